//! # Wiring Traits
//!
//! The artifacts a server registers against its contract. All of them are
//! shared as `Arc<dyn Trait>` and must be `Send + Sync`, since lookups
//! happen concurrently at request time.
//!
//! Closures are adapted with [`handler_fn`] and [`authenticator_fn`].

use std::collections::BTreeMap;
use std::fmt;
use std::io::{Read, Write};

use serde_json::Value;

use crate::error::{AuthError, CodecError, HandlerError};

/// Identity established by an authenticator.
pub type Principal = Value;

/// Decodes a request body of one content type.
pub trait Consumer: Send + Sync {
    fn consume(&self, reader: &mut dyn Read) -> Result<Value, CodecError>;
}

/// Encodes a response body of one content type.
pub trait Producer: Send + Sync {
    fn produce(&self, writer: &mut dyn Write, value: &Value) -> Result<(), CodecError>;
}

/// Executes one operation.
pub trait OperationHandler: Send + Sync {
    /// Run the operation with its bound parameters.
    fn handle(&self, params: Value) -> Result<Value, HandlerError>;
}

/// Credentials carried by a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthRequest {
    /// Header name → value. Names are matched case-insensitively.
    pub headers: BTreeMap<String, String>,
    /// Query parameter name → value.
    pub query: BTreeMap<String, String>,
}

impl AuthRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn with_query(mut self, name: &str, value: &str) -> Self {
        self.query.insert(name.to_string(), value.to_string());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

/// Implements one security scheme.
pub trait Authenticator: Send + Sync {
    /// Check `request` for this scheme's credentials.
    ///
    /// Returns `Ok(None)` when the request carries no credentials for the
    /// scheme, `Ok(Some(principal))` when they are accepted, and an error
    /// when they are present but rejected.
    fn authenticate(
        &self,
        request: &AuthRequest,
        scopes: &[String],
    ) -> Result<Option<Principal>, AuthError>;
}

/// An [`OperationHandler`] backed by a closure.
pub struct HandlerFn<F>(F);

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HandlerFn")
    }
}

/// Adapt a closure into an [`OperationHandler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(Value) -> Result<Value, HandlerError> + Send + Sync,
{
    HandlerFn(f)
}

impl<F> OperationHandler for HandlerFn<F>
where
    F: Fn(Value) -> Result<Value, HandlerError> + Send + Sync,
{
    fn handle(&self, params: Value) -> Result<Value, HandlerError> {
        (self.0)(params)
    }
}

/// An [`Authenticator`] backed by a closure.
pub struct AuthenticatorFn<F>(F);

impl<F> fmt::Debug for AuthenticatorFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthenticatorFn")
    }
}

/// Adapt a closure into an [`Authenticator`].
pub fn authenticator_fn<F>(f: F) -> AuthenticatorFn<F>
where
    F: Fn(&AuthRequest, &[String]) -> Result<Option<Principal>, AuthError> + Send + Sync,
{
    AuthenticatorFn(f)
}

impl<F> Authenticator for AuthenticatorFn<F>
where
    F: Fn(&AuthRequest, &[String]) -> Result<Option<Principal>, AuthError> + Send + Sync,
{
    fn authenticate(
        &self,
        request: &AuthRequest,
        scopes: &[String],
    ) -> Result<Option<Principal>, AuthError> {
        (self.0)(request, scopes)
    }
}
