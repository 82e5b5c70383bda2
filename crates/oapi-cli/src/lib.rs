//! # oapi-cli — Command-Line Front End
//!
//! Provides the `oapi` binary:
//!
//! - `oapi validate`: check payload files against a document definition.
//! - `oapi requirements`: print the codecs, handlers, and authenticators a
//!   document requires.
//!
//! ```bash
//! oapi validate --spec petstore.yaml --definition Pet pet.json
//! oapi requirements --spec petstore.yaml --format json
//! ```
//!
//! Exit codes: 0 when everything checks out, 1 when a payload or document
//! fails its checks, 2 when the command itself cannot run.

pub mod requirements;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use oapi_spec::Document;
use oapi_validate::ValidatorOptions;
use serde_json::Value;

/// Read a document from a JSON or YAML file.
///
/// Files ending in `.json` are parsed as JSON; everything else goes through
/// the YAML front end, which also accepts JSON.
pub fn load_document(path: &Path) -> Result<Document> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;
    let document = if has_json_extension(path) {
        Document::from_json_str(&text)
    } else {
        Document::from_yaml_str(&text)
    };
    document.with_context(|| format!("failed to decode document {}", path.display()))
}

/// Read a payload from a JSON or YAML file.
pub fn load_payload(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read payload {}", path.display()))?;
    if has_json_extension(path) {
        serde_json::from_str(&text)
            .with_context(|| format!("failed to decode payload {}", path.display()))
    } else {
        oapi_spec::yaml::from_str(&text)
            .with_context(|| format!("failed to decode payload {}", path.display()))
    }
}

/// Load validator options from `--config`, or the defaults when absent.
pub fn load_options(config: Option<&Path>) -> Result<ValidatorOptions> {
    let Some(path) = config else {
        return Ok(ValidatorOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    if text.trim().is_empty() {
        return Ok(ValidatorOptions::default());
    }
    serde_yaml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_document_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("api.json");
        std::fs::write(&json, r#"{"swagger": "2.0", "consumes": ["application/json"]}"#).unwrap();
        let yaml = dir.path().join("api.yaml");
        std::fs::write(&yaml, "swagger: '2.0'\nconsumes: [application/json]\n").unwrap();

        assert_eq!(load_document(&json).unwrap(), load_document(&yaml).unwrap());
    }

    #[test]
    fn load_document_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{").unwrap();
        let err = load_document(&broken).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn load_options_defaults_and_overrides() {
        assert_eq!(load_options(None).unwrap(), ValidatorOptions::default());

        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.yaml");
        std::fs::write(&empty, "").unwrap();
        assert_eq!(load_options(Some(&empty)).unwrap(), ValidatorOptions::default());

        let lax = dir.path().join("lax.yaml");
        std::fs::write(&lax, "validate_formats: false\n").unwrap();
        assert!(!load_options(Some(&lax)).unwrap().validate_formats);

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "strictness: 11\n").unwrap();
        assert!(load_options(Some(&bad)).is_err());
    }

    #[test]
    fn load_payload_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("pet.json");
        std::fs::write(&json, r#"{"name": "rex"}"#).unwrap();
        let yaml = dir.path().join("pet.yml");
        std::fs::write(&yaml, "name: rex\n").unwrap();
        assert_eq!(load_payload(&json).unwrap(), load_payload(&yaml).unwrap());
    }
}
