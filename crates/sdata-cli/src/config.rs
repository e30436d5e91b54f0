//! # CLI Configuration File
//!
//! Optional YAML file passed with `--config`:
//!
//! ```yaml
//! schema_dir: ./schemas
//! ```
//!
//! Relative paths are resolved against the config file's directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Directory of named schema files.
    pub schema_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Load the config file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        };

        if let (Some(dir), Some(base)) = (config.schema_dir.as_mut(), path.parent()) {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        tracing::debug!(config = ?config, "loaded CLI config");
        Ok(config)
    }
}
