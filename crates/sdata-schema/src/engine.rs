//! # Validation Engine
//!
//! Structural validation of canonical values against schema documents.
//! Keyword semantics (`type`, `required`, `properties`, `items`, `enum`,
//! `pattern`, numeric bounds, `allOf`/`anyOf`/`oneOf`/`not`, ...) come from
//! the `jsonschema` crate. The draft is taken from the schema's `$schema`
//! keyword, defaulting to Draft 2020-12.
//!
//! ## Boundary Contract
//!
//! The engine never lets a failure escape as anything other than a
//! [`ValidationOutcome`]:
//!
//! 1. Data text that does not parse → [`ValidationFailure::DataParse`].
//! 2. Schema text that does not parse → [`ValidationFailure::SchemaParse`].
//! 3. Data that violates the schema → [`ValidationFailure::Mismatch`].
//! 4. The library rejects the schema itself, or panics →
//!    [`ValidationFailure::EngineFault`].
//!
//! When both texts are malformed the data error wins, since data is parsed
//! first.
//!
//! ## References
//!
//! Schemas are single self-contained documents. Local `#/...` references
//! resolve normally; any reference that would need retrieval fails the
//! schema build instead of touching the network.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use jsonschema::{Retrieve, Uri};
use sdata_core::{parse, Value};

use crate::document::SchemaDocument;
use crate::report::{ValidationFailure, ValidationOutcome, Violation, Violations};

/// Retriever that refuses every external `$ref`.
struct NoRemoteRefs;

impl Retrieve for NoRemoteRefs {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema references are not supported: {}", uri.as_str()).into())
    }
}

/// Stateless validator. Cheap to construct and safe to share across threads;
/// each call compiles the schema it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationEngine {
    ignore_mismatch: bool,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat data mismatches as success. Parse failures and library faults
    /// are still reported. Used by schema self-checks, where the sample data
    /// is arbitrary.
    pub fn ignoring_mismatch(mut self) -> Self {
        self.ignore_mismatch = true;
        self
    }

    /// Validate a parsed value against a schema document.
    pub fn validate(&self, data: &Value, schema: &SchemaDocument) -> ValidationOutcome {
        self.check(data, schema).into()
    }

    /// Parse data text, then validate it against a schema document.
    pub fn validate_str(&self, data_text: &str, schema: &SchemaDocument) -> ValidationOutcome {
        let data = match parse(data_text) {
            Ok(data) => data,
            Err(error) => return ValidationOutcome::Invalid(ValidationFailure::DataParse { error }),
        };
        self.validate(&data, schema)
    }

    /// Full text pipeline: parse data, parse schema, validate.
    pub fn validate_text(
        &self,
        data_text: &str,
        schema_text: &str,
        schema_name: &str,
    ) -> ValidationOutcome {
        let data = match parse(data_text) {
            Ok(data) => data,
            Err(error) => return ValidationOutcome::Invalid(ValidationFailure::DataParse { error }),
        };
        let schema = match SchemaDocument::from_text(schema_text, schema_name) {
            Ok(schema) => schema,
            Err(error) => {
                return ValidationOutcome::Invalid(ValidationFailure::SchemaParse {
                    schema_name: schema_name.to_string(),
                    error,
                })
            }
        };
        self.validate(&data, &schema)
    }

    fn check(&self, data: &Value, schema: &SchemaDocument) -> Result<(), ValidationFailure> {
        let instance = data.to_json();
        let schema_json = schema.to_json();

        let violations = panic::catch_unwind(AssertUnwindSafe(|| {
            collect_violations(&instance, &schema_json)
        }))
        .map_err(|payload| ValidationFailure::EngineFault {
            message: panic_message(payload.as_ref()),
        })
        .and_then(|result| result)
        .map_err(|failure| {
            tracing::warn!(schema = %schema.name(), error = %failure, "validator fault");
            failure
        })?;

        if violations.is_empty() {
            tracing::debug!(schema = %schema.name(), "data complies with schema");
            return Ok(());
        }
        if self.ignore_mismatch {
            tracing::debug!(
                schema = %schema.name(),
                count = violations.len(),
                "ignoring data mismatch"
            );
            return Ok(());
        }
        Err(ValidationFailure::Mismatch {
            schema_name: schema.name().to_string(),
            violations: Violations::new(violations),
        })
    }
}

fn collect_violations(
    instance: &serde_json::Value,
    schema: &serde_json::Value,
) -> Result<Vec<Violation>, ValidationFailure> {
    let mut opts = jsonschema::options();
    opts.with_retriever(NoRemoteRefs);
    let validator = opts
        .build(schema)
        .map_err(|e| ValidationFailure::EngineFault {
            message: e.to_string(),
        })?;

    Ok(validator
        .iter_errors(instance)
        .map(|e| Violation {
            instance_path: e.instance_path.to_string(),
            schema_path: e.schema_path.to_string(),
            message: e.to_string(),
        })
        .collect())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "validator panicked".to_string()
    }
}
