//! # Document Requirements
//!
//! What a document needs from the server that implements it: codecs for
//! every content type it consumes or produces, a handler per operation, and
//! an authenticator per security scheme it both references and declares.
//!
//! Content types include the document defaults as well as every
//! operation's effective list. Scheme names come from document-level
//! security and from every operation's effective security.

use std::collections::BTreeSet;

use oapi_spec::Document;
use serde::Serialize;

/// Requirement sets derived from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Requirements {
    /// Request content types needing a consumer.
    pub consumes: BTreeSet<String>,
    /// Response content types needing a producer.
    pub produces: BTreeSet<String>,
    /// Operation ids needing a handler.
    pub operations: BTreeSet<String>,
    /// Referenced and declared schemes needing an authenticator.
    pub auth_schemes: BTreeSet<String>,
    /// Referenced schemes missing from `securityDefinitions`.
    pub undeclared_schemes: BTreeSet<String>,
}

impl Requirements {
    /// Walk every operation of `document` and collect its requirements.
    pub fn from_document(document: &Document) -> Self {
        let mut out = Self::default();
        out.consumes.extend(document.props.consumes.iter().cloned());
        out.produces.extend(document.props.produces.iter().cloned());

        let mut referenced: BTreeSet<String> = document
            .props
            .security
            .iter()
            .flat_map(|requirement| requirement.keys().cloned())
            .collect();

        for found in document.operations() {
            let op = found.operation;
            out.consumes.extend(document.consumes_for(op).iter().cloned());
            out.produces.extend(document.produces_for(op).iter().cloned());
            referenced.extend(
                document
                    .security_for(op)
                    .iter()
                    .flat_map(|requirement| requirement.keys().cloned()),
            );
            if op.id().is_empty() {
                tracing::warn!(
                    path = found.path,
                    method = %found.method,
                    "operation has no operationId and cannot be registered"
                );
            } else {
                out.operations.insert(op.id().to_string());
            }
        }

        let declared = &document.props.security_definitions;
        let (auth_schemes, undeclared_schemes): (BTreeSet<String>, BTreeSet<String>) = referenced
            .into_iter()
            .partition(|name| declared.contains_key(name));
        out.auth_schemes = auth_schemes;
        out.undeclared_schemes = undeclared_schemes;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_union_of_defaults_and_operations() {
        let doc = Document::from_value(json!({
            "consumes": ["application/json"],
            "produces": ["application/json"],
            "security": [{"apiKey": []}],
            "securityDefinitions": {"apiKey": {"type": "apiKey", "in": "header", "name": "K"}},
            "paths": {
                "/a": {
                    "get": {"operationId": "getA", "produces": ["text/plain"]},
                    "post": {
                        "operationId": "postA",
                        "consumes": ["application/x-yaml"],
                        "security": [{"basic": [], "apiKey": []}]
                    }
                },
                "/b": {"delete": {}}
            }
        }))
        .unwrap();
        let req = Requirements::from_document(&doc);
        assert_eq!(req.consumes, set(&["application/json", "application/x-yaml"]));
        assert_eq!(req.produces, set(&["application/json", "text/plain"]));
        assert_eq!(req.operations, set(&["getA", "postA"]));
        assert_eq!(req.auth_schemes, set(&["apiKey"]));
        assert_eq!(req.undeclared_schemes, set(&["basic"]));
    }

    #[test]
    fn test_empty_document_requires_nothing() {
        assert_eq!(Requirements::from_document(&Document::new()), Requirements::default());
    }
}
