//! # Validation Outcomes and Reports
//!
//! Every validate call ends in a [`ValidationOutcome`]. A failed call carries
//! exactly one [`ValidationFailure`], and the failure's `Display` output is
//! the report shown to authors. All call sites share these messages:
//!
//! | Failure                 | Report                                                       |
//! |-------------------------|--------------------------------------------------------------|
//! | data does not parse     | `Could not parse data: <diagnostic>`                         |
//! | schema does not parse   | `Could not parse schema '<name>', error: <diagnostic>`       |
//! | data violates schema    | `Data does not comply with schema: <name>, error: <details>` |
//! | validator library fault | `An exception was thrown: <message>`                         |
//! | schema name unknown     | `Schema '<name>' not found`                                  |

use std::fmt;

use sdata_core::ParseError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single schema violation reported by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON Pointer to the violating value in the data. Empty for the root.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    /// The validator's description of the problem.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Violations in the order the validator produced them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Why a validate call failed. Each variant renders its own report wording.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// The data text is not well-formed YAML/JSON.
    #[error("Could not parse data: {error}")]
    DataParse {
        /// Parser diagnostic.
        error: ParseError,
    },

    /// The schema text is not well-formed YAML/JSON.
    #[error("Could not parse schema '{schema_name}', error: {error}")]
    SchemaParse {
        /// Display name of the schema.
        schema_name: String,
        /// Parser diagnostic.
        error: ParseError,
    },

    /// Both sides parsed but the data does not satisfy the schema.
    #[error("Data does not comply with schema: {schema_name}, error: {violations}")]
    Mismatch {
        /// Display name of the schema.
        schema_name: String,
        /// What the validator rejected.
        violations: Violations,
    },

    /// The validator library failed, e.g. on a schema it cannot compile.
    #[error("An exception was thrown: {message}")]
    EngineFault {
        /// Library message.
        message: String,
    },

    /// No schema with this name exists.
    #[error("Schema '{schema_name}' not found")]
    SchemaNotFound {
        /// The name that was looked up.
        schema_name: String,
    },
}

/// Discriminant of [`ValidationFailure`], for callers that branch on the
/// failure class without caring about its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    DataParse,
    SchemaParse,
    Mismatch,
    EngineFault,
    SchemaNotFound,
}

impl ValidationFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::DataParse { .. } => FailureKind::DataParse,
            Self::SchemaParse { .. } => FailureKind::SchemaParse,
            Self::Mismatch { .. } => FailureKind::Mismatch,
            Self::EngineFault { .. } => FailureKind::EngineFault,
            Self::SchemaNotFound { .. } => FailureKind::SchemaNotFound,
        }
    }

    /// The report string for this failure.
    pub fn report(&self) -> String {
        self.to_string()
    }
}

/// Result of checking data against a schema. Exactly one of the two.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ValidationOutcome {
    Valid,
    Invalid(ValidationFailure),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Valid => None,
            Self::Invalid(failure) => Some(failure),
        }
    }

    /// The report string, present only for failed calls.
    pub fn report(&self) -> Option<String> {
        self.failure().map(ValidationFailure::report)
    }

    pub fn into_result(self) -> Result<(), ValidationFailure> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(failure) => Err(failure),
        }
    }
}

impl From<Result<(), ValidationFailure>> for ValidationOutcome {
    fn from(result: Result<(), ValidationFailure>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(failure) => Self::Invalid(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(path: &str, message: &str) -> Violation {
        Violation {
            instance_path: path.to_string(),
            schema_path: "/properties/age/type".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn violation_display_with_path() {
        let v = violation("/age", r#""ten" is not of type "number""#);
        assert_eq!(v.to_string(), r#"/age: "ten" is not of type "number""#);
    }

    #[test]
    fn violation_display_root() {
        let v = violation("", r#""age" is a required property"#);
        assert!(v.to_string().starts_with("(root): "));
    }

    #[test]
    fn violations_join_with_semicolons() {
        let vs = Violations::new(vec![violation("/a", "first"), violation("/b", "second")]);
        assert_eq!(vs.to_string(), "/a: first; /b: second");
        assert_eq!(vs.len(), 2);
    }

    #[test]
    fn report_wording() {
        let parse_err = ParseError::new("did not find expected ',' or ']'");
        assert_eq!(
            ValidationFailure::DataParse { error: parse_err.clone() }.report(),
            "Could not parse data: did not find expected ',' or ']'"
        );
        assert_eq!(
            ValidationFailure::SchemaParse {
                schema_name: "person".into(),
                error: parse_err,
            }
            .report(),
            "Could not parse schema 'person', error: did not find expected ',' or ']'"
        );
        assert_eq!(
            ValidationFailure::Mismatch {
                schema_name: "person".into(),
                violations: Violations::new(vec![violation("/age", "bad")]),
            }
            .report(),
            "Data does not comply with schema: person, error: /age: bad"
        );
        assert_eq!(
            ValidationFailure::EngineFault { message: "boom".into() }.report(),
            "An exception was thrown: boom"
        );
        assert_eq!(
            ValidationFailure::SchemaNotFound { schema_name: "nonexistent".into() }.report(),
            "Schema 'nonexistent' not found"
        );
    }

    #[test]
    fn valid_outcome_has_no_report() {
        let outcome = ValidationOutcome::Valid;
        assert!(outcome.is_valid());
        assert!(outcome.report().is_none());
        assert!(outcome.into_result().is_ok());
    }

    #[test]
    fn invalid_outcome_round_trips_through_result() {
        let failure = ValidationFailure::EngineFault { message: "x".into() };
        let outcome = ValidationOutcome::from(Err(failure.clone()));
        assert_eq!(outcome.failure().map(ValidationFailure::kind), Some(FailureKind::EngineFault));
        assert_eq!(outcome.into_result(), Err(failure));
    }
}
