//! # In-Memory Record Store
//!
//! Thread-safe storage for schema and data records. Writes run the
//! record's pre-write checks first and are refused on any failure; reads
//! never block on validation.
//!
//! Validation happens outside the write lock, so a concurrent schema edit
//! can land between a data record's validation and its insert. Callers get
//! no stronger read-after-write guarantee than that.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use sdata_schema::{SchemaDocument, SchemaNotFound, SchemaResolver};
use thiserror::Error;

use crate::record::{DataRecord, RecordError, SchemaRecord};

/// Errors from store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with this name/key.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// A record with this name/key already exists.
    #[error("{kind} '{name}' already exists")]
    Duplicate { kind: &'static str, name: String },

    /// The record failed its pre-write checks.
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl StoreError {
    fn schema_not_found(name: &str) -> Self {
        Self::NotFound {
            kind: "schema",
            name: name.to_string(),
        }
    }

    fn data_not_found(key: &str) -> Self {
        Self::NotFound {
            kind: "data",
            name: key.to_string(),
        }
    }
}

/// Partial update for a data record. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct DataUpdate {
    pub description: Option<String>,
    pub schema_name: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone)]
struct StoredSchema {
    record: SchemaRecord,
    document: SchemaDocument,
}

#[derive(Debug, Default)]
struct Records {
    /// Keyed by schema name.
    schemas: HashMap<String, StoredSchema>,
    /// Keyed by data key.
    data: HashMap<String, DataRecord>,
}

/// Cloneable handle to the shared record store.
///
/// `parking_lot::RwLock` is used because the lock is never held across an
/// await point and is not poisoned by a panicking writer.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    inner: Arc<RwLock<Records>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Schemas --------------------------------------------------------------

    /// Create a schema record. The definition must pass the self-check.
    pub fn create_schema(&self, name: &str, definition: &str) -> Result<SchemaRecord, StoreError> {
        let record = SchemaRecord::new(name, definition);
        let document = record.validate().map_err(|e| {
            tracing::warn!(schema = %name, error = %e, "schema rejected");
            e
        })?;

        let mut guard = self.inner.write();
        if guard.schemas.contains_key(name) {
            return Err(StoreError::Duplicate {
                kind: "schema",
                name: name.to_string(),
            });
        }
        guard.schemas.insert(
            name.to_string(),
            StoredSchema {
                record: record.clone(),
                document,
            },
        );
        tracing::info!(schema = %name, id = %record.id, "schema created");
        Ok(record)
    }

    /// Replace a schema's definition. The new definition must pass the
    /// self-check. Existing data records are not re-validated.
    pub fn update_schema(&self, name: &str, definition: &str) -> Result<SchemaRecord, StoreError> {
        let mut candidate = self
            .get_schema(name)
            .ok_or_else(|| StoreError::schema_not_found(name))?;
        candidate.definition = definition.to_string();
        let document = candidate.validate().map_err(|e| {
            tracing::warn!(schema = %name, error = %e, "schema update rejected");
            e
        })?;
        candidate.updated_at = Utc::now();

        let mut guard = self.inner.write();
        let stored = guard
            .schemas
            .get_mut(name)
            .ok_or_else(|| StoreError::schema_not_found(name))?;
        stored.record = candidate.clone();
        stored.document = document;
        tracing::info!(schema = %name, "schema updated");
        Ok(candidate)
    }

    pub fn get_schema(&self, name: &str) -> Option<SchemaRecord> {
        self.inner.read().schemas.get(name).map(|s| s.record.clone())
    }

    /// All schema records, sorted by name.
    pub fn list_schemas(&self) -> Vec<SchemaRecord> {
        let mut records: Vec<SchemaRecord> = self
            .inner
            .read()
            .schemas
            .values()
            .map(|s| s.record.clone())
            .collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }

    pub fn delete_schema(&self, name: &str) -> Result<SchemaRecord, StoreError> {
        let removed = self
            .inner
            .write()
            .schemas
            .remove(name)
            .ok_or_else(|| StoreError::schema_not_found(name))?;
        tracing::info!(schema = %name, "schema deleted");
        Ok(removed.record)
    }

    pub fn schema_count(&self) -> usize {
        self.inner.read().schemas.len()
    }

    // -- Data -----------------------------------------------------------------

    /// Create a data record. Its content must validate against its schema.
    pub fn create_data(&self, record: DataRecord) -> Result<DataRecord, StoreError> {
        record.validate(self).map_err(|e| {
            tracing::warn!(key = %record.key, schema = %record.schema_name, error = %e, "data rejected");
            e
        })?;

        let mut guard = self.inner.write();
        if guard.data.contains_key(&record.key) {
            return Err(StoreError::Duplicate {
                kind: "data",
                name: record.key.clone(),
            });
        }
        guard.data.insert(record.key.clone(), record.clone());
        tracing::info!(key = %record.key, schema = %record.schema_name, "data created");
        Ok(record)
    }

    /// Apply a partial update. The merged record must validate.
    pub fn update_data(&self, key: &str, update: DataUpdate) -> Result<DataRecord, StoreError> {
        let mut candidate = self
            .get_data(key)
            .ok_or_else(|| StoreError::data_not_found(key))?;
        if let Some(description) = update.description {
            candidate.description = description;
        }
        if let Some(schema_name) = update.schema_name {
            candidate.schema_name = schema_name;
        }
        if let Some(content) = update.content {
            candidate.content = content;
        }
        candidate.validate(self).map_err(|e| {
            tracing::warn!(key = %key, error = %e, "data update rejected");
            e
        })?;
        candidate.updated_at = Utc::now();

        let mut guard = self.inner.write();
        let slot = guard
            .data
            .get_mut(key)
            .ok_or_else(|| StoreError::data_not_found(key))?;
        *slot = candidate.clone();
        tracing::info!(key = %key, "data updated");
        Ok(candidate)
    }

    pub fn get_data(&self, key: &str) -> Option<DataRecord> {
        self.inner.read().data.get(key).cloned()
    }

    /// All data records, sorted by key.
    pub fn list_data(&self) -> Vec<DataRecord> {
        let mut records: Vec<DataRecord> = self.inner.read().data.values().cloned().collect();
        records.sort_by(|a, b| a.key.cmp(&b.key));
        records
    }

    pub fn delete_data(&self, key: &str) -> Result<DataRecord, StoreError> {
        let removed = self
            .inner
            .write()
            .data
            .remove(key)
            .ok_or_else(|| StoreError::data_not_found(key))?;
        tracing::info!(key = %key, "data deleted");
        Ok(removed)
    }

    pub fn data_count(&self) -> usize {
        self.inner.read().data.len()
    }
}

impl SchemaResolver for RecordStore {
    fn resolve(&self, name: &str) -> Result<SchemaDocument, SchemaNotFound> {
        self.inner
            .read()
            .schemas
            .get(name)
            .map(|s| s.document.clone())
            .ok_or_else(|| SchemaNotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERSON: &str = "type: object\nproperties:\n  age: {type: number}\nrequired: [age]";

    fn store_with_person() -> RecordStore {
        let store = RecordStore::new();
        store.create_schema("person", PERSON).unwrap();
        store
    }

    #[test]
    fn create_and_resolve_schema() {
        let store = store_with_person();
        assert_eq!(store.schema_count(), 1);
        let doc = store.resolve("person").unwrap();
        assert_eq!(doc.name(), "person");
        assert_eq!(store.resolve("Person").unwrap_err().name, "Person");
    }

    #[test]
    fn duplicate_schema_name_is_refused() {
        let store = store_with_person();
        let err = store.create_schema("person", "type: object").unwrap_err();
        assert_eq!(err.to_string(), "schema 'person' already exists");
    }

    #[test]
    fn malformed_schema_is_never_stored() {
        let store = RecordStore::new();
        let err = store.create_schema("broken", "{not valid").unwrap_err();
        assert!(matches!(err, StoreError::Record(RecordError::Invalid(_))));
        assert_eq!(store.schema_count(), 0);
    }

    #[test]
    fn schema_update_is_self_checked() {
        let store = store_with_person();
        assert!(store.update_schema("person", "type: 12").is_err());
        assert_eq!(store.get_schema("person").unwrap().definition, PERSON);

        let updated = store.update_schema("person", "type: array").unwrap();
        assert!(updated.updated_at >= updated.created_at);
        assert_eq!(store.resolve("person").unwrap().to_json()["type"], "array");
    }

    #[test]
    fn update_missing_schema_is_not_found() {
        let err = RecordStore::new().update_schema("ghost", "type: object").unwrap_err();
        assert_eq!(err.to_string(), "schema 'ghost' not found");
    }

    #[test]
    fn data_write_is_gated_by_schema() {
        let store = store_with_person();
        store
            .create_data(DataRecord::new("alice", "person", "age: 31"))
            .unwrap();
        let err = store
            .create_data(DataRecord::new("bob", "person", "age: old"))
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Data does not comply with schema: person"));
        assert_eq!(store.data_count(), 1);
    }

    #[test]
    fn duplicate_data_key_is_refused() {
        let store = store_with_person();
        store.create_data(DataRecord::new("k", "person", "age: 1")).unwrap();
        let err = store
            .create_data(DataRecord::new("k", "person", "age: 2"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { kind: "data", .. }));
    }

    #[test]
    fn data_update_merges_and_revalidates() {
        let store = store_with_person();
        store.create_data(DataRecord::new("k", "person", "age: 1")).unwrap();

        let rejected = store.update_data(
            "k",
            DataUpdate {
                content: Some("age: x".into()),
                ..Default::default()
            },
        );
        assert!(rejected.is_err());
        assert_eq!(store.get_data("k").unwrap().content, "age: 1");

        let updated = store
            .update_data(
                "k",
                DataUpdate {
                    description: Some("one".into()),
                    content: Some("age: 2".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.description, "one");
        assert_eq!(store.get_data("k").unwrap().content, "age: 2");
    }

    #[test]
    fn rebinding_to_missing_schema_is_refused() {
        let store = store_with_person();
        store.create_data(DataRecord::new("k", "person", "age: 1")).unwrap();
        let err = store
            .update_data(
                "k",
                DataUpdate {
                    schema_name: Some("ghost".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Schema 'ghost' not found");
    }

    #[test]
    fn lists_are_sorted() {
        let store = RecordStore::new();
        store.create_schema("zeta", "type: object").unwrap();
        store.create_schema("alpha", "type: object").unwrap();
        let names: Vec<String> = store.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);

        store.create_data(DataRecord::new("b", "alpha", "{}")).unwrap();
        store.create_data(DataRecord::new("a", "zeta", "{}")).unwrap();
        let keys: Vec<String> = store.list_data().into_iter().map(|d| d.key).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn delete_records() {
        let store = store_with_person();
        store.create_data(DataRecord::new("k", "person", "age: 1")).unwrap();
        assert_eq!(store.delete_data("k").unwrap().key, "k");
        assert!(store.delete_data("k").is_err());
        assert_eq!(store.delete_schema("person").unwrap().name, "person");
        assert!(store.resolve("person").is_err());
    }

    #[test]
    fn clones_share_state() {
        let store = RecordStore::new();
        let other = store.clone();
        other.create_schema("shared", "type: object").unwrap();
        assert!(store.get_schema("shared").is_some());
    }

    #[test]
    fn concurrent_writers() {
        let store = store_with_person();
        std::thread::scope(|s| {
            for i in 0..8 {
                let store = store.clone();
                s.spawn(move || {
                    store
                        .create_data(DataRecord::new(format!("k{i}"), "person", format!("age: {i}")))
                        .unwrap();
                });
            }
        });
        assert_eq!(store.data_count(), 8);
    }
}
