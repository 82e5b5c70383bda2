//! # oapi CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use oapi_cli::requirements::{run_requirements, RequirementsArgs};
use oapi_cli::validate::{run_validate, ValidateArgs};

/// OpenAPI 2.0 contract tooling.
///
/// Validates payloads against document definitions and reports the wiring
/// a document requires from its server.
#[derive(Parser, Debug)]
#[command(name = "oapi", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a validator options file (YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit log lines as JSON objects.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate payload files against a document definition.
    Validate(ValidateArgs),

    /// Print the codecs, handlers, and authenticators a document requires.
    Requirements(RequirementsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "oapi CLI starting");

    let result = match cli.command {
        Commands::Validate(args) => oapi_cli::load_options(cli.config.as_deref())
            .and_then(|options| run_validate(&args, &options)),
        Commands::Requirements(args) => run_requirements(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
