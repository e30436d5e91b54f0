//! # Records
//!
//! A [`SchemaRecord`] holds schema text under a unique name. A
//! [`DataRecord`] holds content text under a unique key, bound to a schema
//! by name. Both carry their own pre-write checks:
//!
//! - required fields are present and names/keys fit in
//!   [`MAX_NAME_LEN`] characters;
//! - schema definitions pass the self-check;
//! - data content validates against the bound schema.

use chrono::{DateTime, Utc};
use sdata_core::{parse, ParseError, Value};
use sdata_schema::{
    SchemaBinding, SchemaDocument, SchemaResolver, SelfCheck, SelfCheckState, ValidationEngine,
    ValidationFailure,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Longest accepted schema name or data key, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// A record failed its pre-write checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A required field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A name or key exceeds [`MAX_NAME_LEN`].
    #[error("{field} must not exceed {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// The engine rejected the record's content or definition.
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),
}

fn require(field: &'static str, value: &str) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::MissingField(field));
    }
    Ok(())
}

fn require_name(field: &'static str, value: &str) -> Result<(), RecordError> {
    require(field, value)?;
    if value.chars().count() > MAX_NAME_LEN {
        return Err(RecordError::TooLong {
            field,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// A named schema definition (YAML or JSON text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRecord {
    pub id: Uuid,
    pub name: String,
    pub definition: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SchemaRecord {
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            definition: definition.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Pre-write checks: a name is required and the definition must pass the
    /// schema self-check. Returns the parsed document on success.
    ///
    /// # Errors
    ///
    /// [`RecordError::MissingField`] / [`RecordError::TooLong`] for a bad
    /// name, [`RecordError::Invalid`] when the self-check rejects the
    /// definition.
    pub fn validate(&self) -> Result<SchemaDocument, RecordError> {
        require_name("schema_name", &self.name)?;
        let mut check = SelfCheck::new();
        match check.run(&self.definition, &self.name) {
            SelfCheckState::RejectedForParseFailure(failure)
            | SelfCheckState::RejectedForEngineFault(failure) => {
                return Err(RecordError::Invalid(failure.clone()))
            }
            SelfCheckState::Accepted | SelfCheckState::Unchecked => {}
        }
        self.document().map_err(|error| {
            RecordError::Invalid(ValidationFailure::SchemaParse {
                schema_name: self.name.clone(),
                error,
            })
        })
    }

    /// Parse the definition into a document named after this record.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the definition is malformed or empty.
    pub fn document(&self) -> Result<SchemaDocument, ParseError> {
        SchemaDocument::from_text(&self.definition, self.name.as_str())
    }
}

/// A unit of structured content bound to a schema by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    pub id: Uuid,
    /// Unique key used to look the record up.
    pub key: String,
    pub description: String,
    /// Name of the schema the content must satisfy.
    pub schema_name: String,
    /// Validated YAML or JSON text.
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DataRecord {
    pub fn new(
        key: impl Into<String>,
        schema_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            key: key.into(),
            description: String::new(),
            schema_name: schema_name.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn binding(&self) -> SchemaBinding {
        SchemaBinding::named(self.schema_name.as_str())
    }

    /// Pre-write checks: key, schema and content are required, and the
    /// content must validate against the schema found through `resolver`.
    ///
    /// # Errors
    ///
    /// [`RecordError::MissingField`] / [`RecordError::TooLong`] for missing
    /// or oversized fields, [`RecordError::Invalid`] carrying the engine's
    /// failure otherwise (including an unknown schema name).
    pub fn validate<R>(&self, resolver: &R) -> Result<(), RecordError>
    where
        R: SchemaResolver + ?Sized,
    {
        require("schema", &self.schema_name)?;
        require_name("key", &self.key)?;
        require("content", &self.content)?;
        self.binding()
            .validate(&ValidationEngine::new(), &self.content, resolver)
            .into_result()?;
        Ok(())
    }

    /// The content as a canonical value.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the content does not parse.
    pub fn parsed(&self) -> Result<Value, ParseError> {
        parse(&self.content)
    }

    /// The content rendered as compact JSON. Empty content renders as `[]`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the content does not parse.
    pub fn as_json_string(&self) -> Result<String, ParseError> {
        if self.content.trim().is_empty() {
            return Ok("[]".to_string());
        }
        Ok(self.parsed()?.to_json_string())
    }
}
