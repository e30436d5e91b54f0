//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Holds the record store and the runtime
//! configuration.

use std::path::{Path, PathBuf};

use sdata_schema::{RegistryError, SchemaRegistry};
use sdata_store::{RecordStore, StoreError};
use thiserror::Error;

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Directory of schema files to seed the store with at startup.
    pub schema_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            schema_dir: None,
        }
    }
}

impl AppConfig {
    /// Build from `SDATA_PORT` and `SDATA_SCHEMA_DIR`.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let port = var("SDATA_PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);
        let schema_dir = var("SDATA_SCHEMA_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from);
        Self { port, schema_dir }
    }
}

/// Startup failures while seeding schemas.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("seed schema '{name}' rejected: {source}")]
    Rejected { name: String, source: StoreError },
}

/// Shared application state. Cloning is cheap; clones share the store.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub store: RecordStore,
    pub config: AppConfig,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            store: RecordStore::new(),
            config,
        }
    }

    /// Create a schema record for every file in `dir`. Each definition goes
    /// through the same self-check as an API write.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if the directory cannot be loaded or any schema
    /// is rejected.
    pub fn seed_schemas(&self, dir: &Path) -> Result<usize, SeedError> {
        let registry = SchemaRegistry::from_dir(dir)?;
        for doc in registry.documents() {
            let text = doc.root().to_json_string();
            self.store
                .create_schema(doc.name(), &text)
                .map_err(|source| SeedError::Rejected {
                    name: doc.name().to_string(),
                    source,
                })?;
        }
        Ok(registry.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn config_defaults() {
        assert_eq!(config_from(&[]), AppConfig::default());
    }

    #[test]
    fn config_reads_vars() {
        let config = config_from(&[("SDATA_PORT", "9000"), ("SDATA_SCHEMA_DIR", "/srv/schemas")]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.schema_dir, Some(PathBuf::from("/srv/schemas")));
    }

    #[test]
    fn config_ignores_bad_port_and_blank_dir() {
        let config = config_from(&[("SDATA_PORT", "http"), ("SDATA_SCHEMA_DIR", " ")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.schema_dir, None);
    }

    #[test]
    fn seed_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("person.yaml"), "type: object\nrequired: [age]").unwrap();
        std::fs::write(dir.path().join("tags.json"), r#"{"type": "array"}"#).unwrap();

        let state = AppState::new();
        assert_eq!(state.seed_schemas(dir.path()).unwrap(), 2);
        assert!(state.store.get_schema("person").is_some());
        assert!(state.store.get_schema("tags").is_some());
    }

    #[test]
    fn seed_rejects_uncompilable_schema() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.yaml"), "type: 12").unwrap();
        let err = AppState::new().seed_schemas(dir.path()).unwrap_err();
        assert!(matches!(err, SeedError::Rejected { ref name, .. } if name == "broken"));
    }
}
