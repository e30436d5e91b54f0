//! # Schema Resolution by Name
//!
//! Records and form fields usually know their schema only by name. The
//! [`SchemaResolver`] trait is the lookup seam: callers receive a resolver
//! explicitly instead of reaching into a global store.
//!
//! [`SchemaRegistry`] is the in-memory implementation, optionally loaded
//! from a directory of schema files. Names are matched exactly
//! (case-sensitive).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sdata_core::ParseError;
use thiserror::Error;

use crate::document::SchemaDocument;
use crate::report::ValidationFailure;

/// No schema is registered under the requested name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Schema '{name}' not found")]
pub struct SchemaNotFound {
    pub name: String,
}

impl From<SchemaNotFound> for ValidationFailure {
    fn from(err: SchemaNotFound) -> Self {
        Self::SchemaNotFound {
            schema_name: err.name,
        }
    }
}

/// Name → schema lookup.
pub trait SchemaResolver {
    /// Resolve a schema by its exact name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaNotFound`] if no schema has that name.
    fn resolve(&self, name: &str) -> Result<SchemaDocument, SchemaNotFound>;
}

impl<T: SchemaResolver + ?Sized> SchemaResolver for &T {
    fn resolve(&self, name: &str) -> Result<SchemaDocument, SchemaNotFound> {
        (**self).resolve(name)
    }
}

impl<T: SchemaResolver + ?Sized> SchemaResolver for Arc<T> {
    fn resolve(&self, name: &str) -> Result<SchemaDocument, SchemaNotFound> {
        (**self).resolve(name)
    }
}

/// Error loading a registry from disk.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A directory or file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A schema file is not well-formed YAML/JSON.
    #[error("could not parse schema file {path}: {error}")]
    Parse { path: PathBuf, error: ParseError },

    /// Two files map to the same schema name.
    #[error("duplicate schema name '{name}' ({path})")]
    DuplicateName { name: String, path: PathBuf },
}

/// Extensions recognised when loading a schema directory.
const SCHEMA_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// In-memory registry of named schema documents.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, SchemaDocument>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json`, `*.yaml` and `*.yml` file in `dir` (not
    /// recursive). A file named `person.schema.yaml` or `person.json` is
    /// registered as `person`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the directory or a file cannot be read,
    /// a file does not parse, or two files claim the same name.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let dir = dir.as_ref();

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err(dir))? {
            let path = entry.map_err(io_err(dir))?.path();
            let recognised = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| SCHEMA_EXTENSIONS.contains(&e));
            if path.is_file() && recognised {
                paths.push(path);
            }
        }
        paths.sort();

        let mut registry = Self::new();
        for path in paths {
            let Some(name) = schema_name_for(&path) else {
                continue;
            };
            if registry.contains(&name) {
                return Err(RegistryError::DuplicateName { name, path });
            }
            let text = std::fs::read_to_string(&path).map_err(io_err(&path))?;
            let doc = SchemaDocument::from_text(&text, name.as_str())
                .map_err(|error| RegistryError::Parse {
                    path: path.clone(),
                    error,
                })?;
            tracing::debug!(schema = %name, path = %path.display(), "registered schema");
            registry.insert(doc);
        }

        tracing::info!(
            dir = %dir.display(),
            schema_count = registry.len(),
            "loaded schema registry"
        );
        Ok(registry)
    }

    /// Register a document under its own name, replacing any previous one.
    pub fn insert(&mut self, doc: SchemaDocument) -> Option<SchemaDocument> {
        self.schemas.insert(doc.name().to_string(), doc)
    }

    /// Parse and register schema text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the text is malformed or empty.
    pub fn insert_text(&mut self, name: &str, text: &str) -> Result<(), ParseError> {
        self.insert(SchemaDocument::from_text(text, name)?);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<SchemaDocument> {
        self.schemas.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&SchemaDocument> {
        self.schemas.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over registered documents in name order.
    pub fn documents(&self) -> impl Iterator<Item = &SchemaDocument> {
        self.names().into_iter().filter_map(|n| self.schemas.get(n))
    }
}

impl SchemaResolver for SchemaRegistry {
    fn resolve(&self, name: &str) -> Result<SchemaDocument, SchemaNotFound> {
        self.schemas.get(name).cloned().ok_or_else(|| SchemaNotFound {
            name: name.to_string(),
        })
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> RegistryError {
    let path = path.to_path_buf();
    move |source| RegistryError::Io { path, source }
}

/// Schema name for a file: the file stem with an optional `.schema` suffix
/// removed, so `person.schema.yaml` and `person.json` both name `person`.
pub fn schema_name_for(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = stem.strip_suffix(".schema").unwrap_or(stem);
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, file: &str, content: &str) {
        std::fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn resolve_is_exact_and_case_sensitive() {
        let mut registry = SchemaRegistry::new();
        registry.insert_text("Person", "type: object").unwrap();
        assert_eq!(registry.resolve("Person").unwrap().name(), "Person");
        assert_eq!(
            registry.resolve("person").unwrap_err(),
            SchemaNotFound { name: "person".into() }
        );
    }

    #[test]
    fn not_found_converts_to_failure() {
        let err = SchemaRegistry::new().resolve("nonexistent").unwrap_err();
        let failure = ValidationFailure::from(err);
        assert_eq!(failure.report(), "Schema 'nonexistent' not found");
    }

    #[test]
    fn insert_replaces_previous() {
        let mut registry = SchemaRegistry::new();
        registry.insert_text("a", "type: object").unwrap();
        registry.insert_text("a", "type: array").unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().to_json()["type"], "array");
    }

    #[test]
    fn insert_text_rejects_malformed() {
        let mut registry = SchemaRegistry::new();
        assert!(registry.insert_text("bad", "{not valid").is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "person.schema.yaml", "type: object\nrequired: [age]");
        write(dir.path(), "tags.json", r#"{"type": "array"}"#);
        write(dir.path(), "notes.yml", "type: string");
        write(dir.path(), "README.md", "not a schema");

        let registry = SchemaRegistry::from_dir(dir.path()).unwrap();
        assert_eq!(registry.names(), vec!["notes", "person", "tags"]);
        let names: Vec<&str> = registry.documents().map(SchemaDocument::name).collect();
        assert_eq!(names, vec!["notes", "person", "tags"]);
    }

    #[test]
    fn load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken.json", "{not valid");
        let err = SchemaRegistry::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, RegistryError::Parse { .. }), "{err}");
    }

    #[test]
    fn load_rejects_duplicate_names() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "person.json", r#"{"type": "object"}"#);
        write(dir.path(), "person.yaml", "type: object");
        let err = SchemaRegistry::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName { ref name, .. } if name == "person"));
    }

    #[test]
    fn schema_names_from_paths() {
        assert_eq!(schema_name_for(Path::new("a/person.schema.yaml")).as_deref(), Some("person"));
        assert_eq!(schema_name_for(Path::new("tags.json")).as_deref(), Some("tags"));
        assert_eq!(schema_name_for(Path::new(".schema.json")), None);
    }

    #[test]
    fn load_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SchemaRegistry::from_dir(dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
    }

    #[test]
    fn resolver_through_references() {
        let mut registry = SchemaRegistry::new();
        registry.insert_text("a", "type: object").unwrap();
        let shared = Arc::new(registry);
        fn lookup(r: &impl SchemaResolver) -> bool {
            r.resolve("a").is_ok()
        }
        assert!(lookup(&shared));
        assert!(lookup(&&*shared));
    }
}
