//! # Requirements Subcommand
//!
//! Prints what a server implementing a document has to register: consumers,
//! producers, operation handlers, and authenticators. Security schemes that
//! are referenced but never declared are reported as a document defect.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use oapi_registry::Requirements;

/// Output encoding for `oapi requirements`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Arguments for the `oapi requirements` subcommand.
#[derive(Args, Debug)]
pub struct RequirementsArgs {
    /// Document to inspect (JSON or YAML).
    #[arg(long)]
    pub spec: PathBuf,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the requirements subcommand.
///
/// Returns exit code: 0 for a self-consistent document, 1 when it references
/// undeclared security schemes.
pub fn run_requirements(args: &RequirementsArgs) -> Result<u8> {
    let document = crate::load_document(&args.spec)?;
    let requirements = Requirements::from_document(&document);
    print!("{}", render(&requirements, args.format)?);

    if requirements.undeclared_schemes.is_empty() {
        Ok(0)
    } else {
        tracing::warn!(
            schemes = ?requirements.undeclared_schemes,
            "document references undeclared security schemes"
        );
        Ok(1)
    }
}

fn render(requirements: &Requirements, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(requirements)
                .context("failed to encode requirements as JSON")?;
            out.push('\n');
            out
        }
        OutputFormat::Yaml => serde_yaml::to_string(requirements)
            .context("failed to encode requirements as YAML")?,
        OutputFormat::Text => {
            let mut out = String::new();
            section(&mut out, "consumes", &requirements.consumes);
            section(&mut out, "produces", &requirements.produces);
            section(&mut out, "operations", &requirements.operations);
            section(&mut out, "auth schemes", &requirements.auth_schemes);
            if !requirements.undeclared_schemes.is_empty() {
                section(&mut out, "undeclared schemes", &requirements.undeclared_schemes);
            }
            out
        }
    })
}

fn section(out: &mut String, title: &str, names: &BTreeSet<String>) {
    out.push_str(&format!("{title} ({}):\n", names.len()));
    for name in names {
        out.push_str(&format!("  {name}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const SPEC: &str = r#"{
        "consumes": ["application/json"],
        "produces": ["application/json"],
        "security": [{"apiKey": []}],
        "securityDefinitions": {"basic": {"type": "basic"}},
        "paths": {"/": {"get": {
            "operationId": "someOperation",
            "security": [{"basic": []}]
        }}}
    }"#;

    fn write_spec(dir: &Path) -> PathBuf {
        let path = dir.join("api.json");
        std::fs::write(&path, SPEC).unwrap();
        path
    }

    #[test]
    fn text_output_lists_sections() {
        let dir = tempfile::tempdir().unwrap();
        let document = crate::load_document(&write_spec(dir.path())).unwrap();
        let text = render(&Requirements::from_document(&document), OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "consumes (1):\n  application/json\n\
             produces (1):\n  application/json\n\
             operations (1):\n  someOperation\n\
             auth schemes (1):\n  basic\n\
             undeclared schemes (1):\n  apiKey\n"
        );
    }

    #[test]
    fn json_output_is_structured() {
        let dir = tempfile::tempdir().unwrap();
        let document = crate::load_document(&write_spec(dir.path())).unwrap();
        let json = render(&Requirements::from_document(&document), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["operations"], serde_json::json!(["someOperation"]));
    }

    #[test]
    fn undeclared_schemes_exit_one() {
        let dir = tempfile::tempdir().unwrap();
        let args = RequirementsArgs {
            spec: write_spec(dir.path()),
            format: OutputFormat::Yaml,
        };
        assert_eq!(run_requirements(&args).unwrap(), 1);
    }
}
