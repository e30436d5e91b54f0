//! # Schema Bindings
//!
//! How a data record or form field names the schema it must conform to:
//! by registry name, by a document already in hand, or by raw schema text
//! carried alongside the field.

use crate::document::SchemaDocument;
use crate::engine::ValidationEngine;
use crate::registry::SchemaResolver;
use crate::report::{ValidationFailure, ValidationOutcome};

/// The association between data and its schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaBinding {
    /// Look the schema up by name at validation time.
    Named(String),
    /// A document resolved ahead of time.
    Document(SchemaDocument),
    /// Unparsed schema text with a display name.
    Inline { name: String, text: String },
}

impl SchemaBinding {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn inline(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Inline {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Display name of the bound schema.
    pub fn schema_name(&self) -> &str {
        match self {
            Self::Named(name) | Self::Inline { name, .. } => name,
            Self::Document(doc) => doc.name(),
        }
    }

    /// Produce the bound document.
    ///
    /// # Errors
    ///
    /// [`ValidationFailure::SchemaNotFound`] when a name does not resolve,
    /// [`ValidationFailure::SchemaParse`] when inline text is malformed.
    pub fn resolve<R>(&self, resolver: &R) -> Result<SchemaDocument, ValidationFailure>
    where
        R: SchemaResolver + ?Sized,
    {
        match self {
            Self::Named(name) => Ok(resolver.resolve(name)?),
            Self::Document(doc) => Ok(doc.clone()),
            Self::Inline { name, text } => SchemaDocument::from_text(text, name.as_str())
                .map_err(|error| ValidationFailure::SchemaParse {
                    schema_name: name.clone(),
                    error,
                }),
        }
    }

    /// Validate data text against the bound schema.
    ///
    /// A name that does not resolve fails before the data is looked at.
    /// Inline schemas follow the engine's text pipeline, so malformed data
    /// is reported ahead of malformed schema text.
    pub fn validate<R>(
        &self,
        engine: &ValidationEngine,
        data_text: &str,
        resolver: &R,
    ) -> ValidationOutcome
    where
        R: SchemaResolver + ?Sized,
    {
        match self {
            Self::Inline { name, text } => engine.validate_text(data_text, text, name),
            _ => match self.resolve(resolver) {
                Ok(doc) => engine.validate_str(data_text, &doc),
                Err(failure) => ValidationOutcome::Invalid(failure),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SchemaRegistry;
    use crate::report::FailureKind;

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry
            .insert_text("person", "type: object\nproperties:\n  age: {type: number}")
            .unwrap();
        registry
    }

    fn kind(outcome: ValidationOutcome) -> Option<FailureKind> {
        outcome.failure().map(ValidationFailure::kind)
    }

    #[test]
    fn named_binding_resolves_through_registry() {
        let engine = ValidationEngine::new();
        let binding = SchemaBinding::named("person");
        assert_eq!(binding.schema_name(), "person");
        assert!(binding.validate(&engine, "age: 3", &registry()).is_valid());
        assert_eq!(
            kind(binding.validate(&engine, "age: x", &registry())),
            Some(FailureKind::Mismatch)
        );
    }

    #[test]
    fn unknown_name_is_not_found_even_for_bad_data() {
        let engine = ValidationEngine::new();
        let outcome = SchemaBinding::named("ghost").validate(&engine, "age: [", &registry());
        assert_eq!(outcome.report().unwrap(), "Schema 'ghost' not found");
    }

    #[test]
    fn document_binding_skips_the_resolver() {
        let doc = SchemaDocument::from_text("type: array", "list").unwrap();
        let binding = SchemaBinding::Document(doc);
        assert_eq!(binding.schema_name(), "list");
        let empty = SchemaRegistry::new();
        assert!(binding.validate(&ValidationEngine::new(), "[1, 2]", &empty).is_valid());
    }

    #[test]
    fn inline_binding_reports_schema_parse() {
        let binding = SchemaBinding::inline("scratch", "{not valid");
        let outcome = binding.validate(&ValidationEngine::new(), "a: 1", &SchemaRegistry::new());
        assert_eq!(kind(outcome), Some(FailureKind::SchemaParse));
        assert!(matches!(
            binding.resolve(&SchemaRegistry::new()),
            Err(ValidationFailure::SchemaParse { .. })
        ));
    }
}
