//! # Validate Subcommand
//!
//! Checks one data file against a schema, given either as a schema file
//! (`--schema`) or as a name resolved from the schema directory
//! (`--schema-name`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use sdata_schema::{schema_name_for, SchemaBinding, SchemaRegistry, ValidationEngine};

/// Arguments for the `sdata validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// YAML or JSON data file (`-` for stdin).
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Schema file to validate against.
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with = "schema_name",
        required_unless_present = "schema_name"
    )]
    pub schema: Option<PathBuf>,

    /// Name of a schema in the schema directory.
    #[arg(long, value_name = "NAME")]
    pub schema_name: Option<String>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the data complies, 1 on any validation
/// failure (including an unknown schema name). Unreadable files and a
/// missing schema directory are returned as errors.
pub fn run_validate(args: &ValidateArgs, schema_dir: Option<&Path>) -> Result<u8> {
    let (code, message) = validate_report(args, schema_dir)?;
    println!("{message}");
    Ok(code)
}

/// Run the validation and render the line to print.
fn validate_report(args: &ValidateArgs, schema_dir: Option<&Path>) -> Result<(u8, String)> {
    let data = crate::read_input(&args.data)?;
    let engine = ValidationEngine::new();

    let outcome = match (&args.schema, &args.schema_name) {
        (Some(path), _) => {
            let text = crate::read_input(path)?;
            let name = schema_name_for(path).unwrap_or_else(|| path.display().to_string());
            SchemaBinding::inline(name, text).validate(&engine, &data, &SchemaRegistry::new())
        }
        (None, Some(name)) => {
            let dir = schema_dir.context(
                "--schema-name needs a schema directory: pass --schema-dir or set schema_dir in the config file",
            )?;
            let registry = SchemaRegistry::from_dir(dir)
                .with_context(|| format!("failed to load schemas from {}", dir.display()))?;
            SchemaBinding::named(name.as_str()).validate(&engine, &data, &registry)
        }
        (None, None) => anyhow::bail!("one of --schema or --schema-name is required"),
    };

    tracing::debug!(data = %args.data.display(), valid = outcome.is_valid(), "validated");
    Ok(match outcome.report() {
        None => (0, format!("OK: {}", args.data.display())),
        Some(report) => (1, format!("FAIL: {}: {report}", args.data.display())),
    })
}
