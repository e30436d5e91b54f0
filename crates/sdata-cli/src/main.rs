//! # sdata CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sdata_cli::config::CliConfig;
use sdata_cli::convert::{run_to_json, ToJsonArgs};
use sdata_cli::schema::{run_check_schema, run_schemas, CheckSchemaArgs, SchemasArgs};
use sdata_cli::validate::{run_validate, ValidateArgs};
use sdata_cli::{require_schema_dir, resolve_schema_dir};

/// Validate YAML and JSON documents against JSON Schemas.
#[derive(Parser, Debug)]
#[command(name = "sdata", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of named schema files. Overrides the config file.
    #[arg(long, global = true)]
    schema_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a data file against a schema.
    Validate(ValidateArgs),

    /// Self-check a schema file.
    CheckSchema(CheckSchemaArgs),

    /// Print a YAML or JSON file as canonical JSON.
    ToJson(ToJsonArgs),

    /// List the schemas in the schema directory.
    Schemas(SchemasArgs),
}

/// Exit code for operational errors.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| {
        let schema_dir = cli.schema_dir.as_deref();
        match &cli.command {
            Commands::Validate(args) => {
                run_validate(args, resolve_schema_dir(schema_dir, &config).as_deref())
            }
            Commands::CheckSchema(args) => run_check_schema(args),
            Commands::ToJson(args) => run_to_json(args),
            Commands::Schemas(args) => run_schemas(args, &require_schema_dir(schema_dir, &config)?),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
