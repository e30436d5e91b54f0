//! # Schema Subcommands
//!
//! `check-schema` runs the authoring self-check on a schema file;
//! `schemas` lists what the schema directory provides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use sdata_schema::{schema_name_for, SchemaRegistry, SelfCheck};

/// Arguments for the `sdata check-schema` subcommand.
#[derive(Args, Debug)]
pub struct CheckSchemaArgs {
    /// YAML or JSON schema file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Name used in reports. Defaults to the file name without extension.
    #[arg(long)]
    pub name: Option<String>,
}

/// Arguments for the `sdata schemas` subcommand.
#[derive(Args, Debug)]
pub struct SchemasArgs {}

/// Execute the check-schema subcommand. Exit code 0 when accepted, 1 when
/// rejected.
pub fn run_check_schema(args: &CheckSchemaArgs) -> Result<u8> {
    let (code, message) = check_report(args)?;
    println!("{message}");
    Ok(code)
}

fn check_report(args: &CheckSchemaArgs) -> Result<(u8, String)> {
    let text = crate::read_input(&args.file)?;
    let name = args
        .name
        .clone()
        .or_else(|| schema_name_for(&args.file))
        .unwrap_or_else(|| args.file.display().to_string());

    let mut check = SelfCheck::new();
    let state = check.run(&text, &name);
    Ok(match state.failure() {
        None => (0, format!("ACCEPTED: {name}")),
        Some(failure) => (1, format!("REJECTED ({}): {failure}", state.label())),
    })
}

/// Execute the schemas subcommand: print one schema name per line.
pub fn run_schemas(_args: &SchemasArgs, schema_dir: &Path) -> Result<u8> {
    for name in list_schemas(schema_dir)? {
        println!("{name}");
    }
    Ok(0)
}

fn list_schemas(schema_dir: &Path) -> Result<Vec<String>> {
    let registry = SchemaRegistry::from_dir(schema_dir)
        .with_context(|| format!("failed to load schemas from {}", schema_dir.display()))?;
    Ok(registry.names().into_iter().map(str::to_string).collect())
}
