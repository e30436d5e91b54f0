//! # sdata-cli — Command-Line Validation
//!
//! Provides the `sdata` command-line interface over the validation engine.
//!
//! ## Subcommands
//!
//! - `sdata validate`: Validate a data file against a schema file or a
//!   named schema from the schema directory.
//! - `sdata check-schema`: Self-check a schema file.
//! - `sdata to-json`: Print a YAML/JSON file as canonical JSON.
//! - `sdata schemas`: List the schemas in the schema directory.
//!
//! ## Exit Codes
//!
//! `0` success, `1` the content was rejected, `2` operational error
//! (unreadable file, bad configuration, missing schema directory).
//!
//! ```bash
//! sdata validate person.yaml --schema person.schema.json
//! sdata validate person.yaml --schema-name person --schema-dir schemas/
//! sdata check-schema schemas/person.schema.yaml
//! ```

pub mod config;
pub mod convert;
pub mod schema;
pub mod validate;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::config::CliConfig;

/// Read a file as UTF-8 text. `-` reads standard input.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read standard input")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// The schema directory: `--schema-dir` wins over the config file.
pub fn resolve_schema_dir(flag: Option<&Path>, config: &CliConfig) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| config.schema_dir.clone())
}

/// Like [`resolve_schema_dir`], but a directory is required.
pub fn require_schema_dir(flag: Option<&Path>, config: &CliConfig) -> Result<PathBuf> {
    match resolve_schema_dir(flag, config) {
        Some(dir) => Ok(dir),
        None => bail!("no schema directory: pass --schema-dir or set schema_dir in the config file"),
    }
}
