//! # Structured Data Form Field
//!
//! A free-text input whose submitted value must be YAML or JSON satisfying
//! a schema. The schema is bound by name, by a document in hand, or by
//! inline text. Any failure, including an unresolvable name, rejects the
//! submission with the report attached to this field.

use sdata_schema::{SchemaBinding, SchemaDocument, SchemaResolver, ValidationEngine};
use serde::Serialize;
use thiserror::Error;

/// A submission was rejected. `message` is the validation report.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructuredDataField {
    name: String,
    title: Option<String>,
    binding: Option<SchemaBinding>,
}

impl StructuredDataField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            binding: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_schema_name(mut self, name: impl Into<String>) -> Self {
        self.binding = Some(SchemaBinding::named(name));
        self
    }

    pub fn with_schema_document(mut self, doc: SchemaDocument) -> Self {
        self.binding = Some(SchemaBinding::Document(doc));
        self
    }

    pub fn with_inline_schema(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.binding = Some(SchemaBinding::inline(name, text));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label shown next to the input; falls back to the field name.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Name of the bound schema, empty when nothing is bound.
    pub fn schema_name(&self) -> &str {
        self.binding.as_ref().map_or("", SchemaBinding::schema_name)
    }

    pub fn tooltip(&self) -> String {
        format!("Data in this field is validated against {}", self.schema_name())
    }

    /// Validate a submitted value.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] carrying the report when the schema cannot be
    /// resolved, either text is malformed, or the data does not comply. An
    /// unbound field reports `Schema '' not found`.
    pub fn validate<R>(&self, input: &str, resolver: &R) -> Result<(), FieldError>
    where
        R: SchemaResolver + ?Sized,
    {
        let unbound;
        let binding = match &self.binding {
            Some(binding) => binding,
            None => {
                unbound = SchemaBinding::named("");
                &unbound
            }
        };
        binding
            .validate(&ValidationEngine::new(), input, resolver)
            .into_result()
            .map_err(|failure| {
                tracing::debug!(field = %self.name, error = %failure, "field input rejected");
                FieldError {
                    field: self.name.clone(),
                    message: failure.report(),
                }
            })
    }
}
