//! # Validate Subcommand
//!
//! Validates payload files against one definition of a document. Every
//! payload is checked even when an earlier one fails, and every violation
//! of a failing payload is printed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use oapi_validate::{SchemaValidator, ValidatorOptions};

/// Arguments for the `oapi validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Document holding the definition (JSON or YAML).
    #[arg(long)]
    pub spec: PathBuf,

    /// Name of the entry under `definitions` to validate against.
    #[arg(long)]
    pub definition: String,

    /// Payload files to validate (JSON or YAML).
    #[arg(value_name = "PAYLOAD", required = true)]
    pub payloads: Vec<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every payload passes, 1 when any fails.
pub fn run_validate(args: &ValidateArgs, options: &ValidatorOptions) -> Result<u8> {
    let document = crate::load_document(&args.spec)?;
    let validator = SchemaValidator::for_definition(&document, &args.definition, options)
        .with_context(|| format!("cannot validate against definition '{}'", args.definition))?;

    let mut failed = 0usize;
    for path in &args.payloads {
        let payload = crate::load_payload(path)?;
        let result = validator.validate(&payload);
        tracing::debug!(
            payload = %path.display(),
            checks = result.validation_count(),
            "validated payload"
        );
        if result.is_valid() {
            println!("PASS: {}", path.display());
        } else {
            failed += 1;
            println!("FAIL: {}", path.display());
            for violation in result.errors() {
                println!("{violation}");
            }
        }
    }

    println!(
        "\n{}/{} payload(s) conform to '{}'",
        args.payloads.len() - failed,
        args.payloads.len(),
        args.definition
    );
    Ok(u8::from(failed > 0))
}
