//! # Security Schemes
//!
//! Security definitions declared by a document and the requirement sets
//! that operations reference by name.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Scheme name → required scopes. Every entry must be satisfied.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// Where an API key is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
}

/// OAuth2 grant flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OAuthFlow {
    Implicit,
    Password,
    Application,
    AccessCode,
}

/// A declared authentication scheme, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SecurityScheme {
    /// HTTP basic authentication.
    Basic {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// A key passed in a header or query parameter.
    ApiKey {
        /// Header or query parameter name.
        name: String,
        #[serde(rename = "in")]
        location: ApiKeyLocation,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// OAuth2.
    #[serde(rename_all = "camelCase")]
    Oauth2 {
        flow: OAuthFlow,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        authorization_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token_url: Option<String>,
        /// Scope name → description.
        #[serde(default)]
        scopes: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl SecurityScheme {
    pub fn basic() -> Self {
        Self::Basic { description: None }
    }

    pub fn api_key(name: &str, location: ApiKeyLocation) -> Self {
        Self::ApiKey {
            name: name.to_string(),
            location,
            description: None,
        }
    }

    pub fn oauth2_implicit(authorization_url: &str) -> Self {
        Self::Oauth2 {
            flow: OAuthFlow::Implicit,
            authorization_url: Some(authorization_url.to_string()),
            token_url: None,
            scopes: BTreeMap::new(),
            description: None,
        }
    }

    pub fn oauth2_password(token_url: &str) -> Self {
        Self::Oauth2 {
            flow: OAuthFlow::Password,
            authorization_url: None,
            token_url: Some(token_url.to_string()),
            scopes: BTreeMap::new(),
            description: None,
        }
    }

    /// Add a scope to an OAuth2 scheme. Other schemes are returned as-is.
    pub fn with_scope(mut self, scope: &str, description: &str) -> Self {
        if let Self::Oauth2 { scopes, .. } = &mut self {
            scopes.insert(scope.to_string(), description.to_string());
        }
        self
    }

    /// The `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::ApiKey { .. } => "apiKey",
            Self::Oauth2 { .. } => "oauth2",
        }
    }
}

impl fmt::Display for SecurityScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}
