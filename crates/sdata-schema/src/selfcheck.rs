//! # Schema Self-Check
//!
//! When an author saves a schema there is usually no real data at hand.
//! The self-check runs a fixed sample payload through the engine with
//! mismatches ignored: the sample is not expected to satisfy arbitrary
//! schemas, but a schema that does not parse or that the validator cannot
//! compile is rejected.
//!
//! ```text
//! Unchecked ──run──▶ Accepted
//!           ├──────▶ RejectedForParseFailure
//!           └──────▶ RejectedForEngineFault
//! ```
//!
//! Every edit starts again from `Unchecked`.

use crate::engine::ValidationEngine;
use crate::report::{ValidationFailure, ValidationOutcome};

/// The sample document: a single-key numeric mapping.
pub const SAMPLE_PAYLOAD: &str = "age: 10";

/// Where a schema stands after the self-check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelfCheckState {
    #[default]
    Unchecked,
    Accepted,
    RejectedForParseFailure(ValidationFailure),
    RejectedForEngineFault(ValidationFailure),
}

impl SelfCheckState {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unchecked)
    }

    /// Short label for logs and API responses.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unchecked => "unchecked",
            Self::Accepted => "accepted",
            Self::RejectedForParseFailure(_) => "rejected_parse_failure",
            Self::RejectedForEngineFault(_) => "rejected_engine_fault",
        }
    }

    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::RejectedForParseFailure(f) | Self::RejectedForEngineFault(f) => Some(f),
            Self::Unchecked | Self::Accepted => None,
        }
    }

    fn from_outcome(outcome: ValidationOutcome) -> Self {
        match outcome {
            ValidationOutcome::Valid => Self::Accepted,
            ValidationOutcome::Invalid(
                failure @ (ValidationFailure::DataParse { .. }
                | ValidationFailure::SchemaParse { .. }),
            ) => Self::RejectedForParseFailure(failure),
            ValidationOutcome::Invalid(failure) => Self::RejectedForEngineFault(failure),
        }
    }
}

/// Self-check tracker for a schema being edited.
#[derive(Debug, Clone, Default)]
pub struct SelfCheck {
    state: SelfCheckState,
}

impl SelfCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelfCheckState {
        &self.state
    }

    /// Check a new revision of the schema text.
    pub fn run(&mut self, schema_text: &str, schema_name: &str) -> &SelfCheckState {
        self.state = SelfCheckState::from_outcome(check_schema_shape(schema_text, schema_name));
        tracing::debug!(schema = %schema_name, state = self.state.label(), "schema self-check");
        &self.state
    }
}

/// Validate the structure of candidate schema text using the sample payload.
/// Only parse failures and validator faults are reported.
pub fn check_schema_shape(schema_text: &str, schema_name: &str) -> ValidationOutcome {
    ValidationEngine::new()
        .ignoring_mismatch()
        .validate_text(SAMPLE_PAYLOAD, schema_text, schema_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unchecked() {
        let check = SelfCheck::new();
        assert_eq!(check.state(), &SelfCheckState::Unchecked);
        assert!(!check.state().is_terminal());
    }

    #[test]
    fn schema_rejecting_the_sample_is_still_accepted() {
        let mut check = SelfCheck::new();
        let state = check.run(r#"{"type": "string"}"#, "label");
        assert!(state.is_accepted());
        assert!(state.is_terminal());
    }

    #[test]
    fn schema_requiring_other_keys_is_accepted() {
        let outcome = check_schema_shape(
            "type: object\nrequired: [name]\nadditionalProperties: false",
            "strict",
        );
        assert!(outcome.is_valid());
    }

    #[test]
    fn malformed_text_is_a_parse_rejection() {
        let mut check = SelfCheck::new();
        let state = check.run("{not valid", "broken");
        assert!(matches!(state, SelfCheckState::RejectedForParseFailure(_)));
        assert!(state
            .failure()
            .unwrap()
            .report()
            .starts_with("Could not parse schema 'broken'"));
    }

    #[test]
    fn empty_text_is_a_parse_rejection() {
        let mut check = SelfCheck::new();
        assert_eq!(check.run("", "blank").label(), "rejected_parse_failure");
    }

    #[test]
    fn uncompilable_schema_is_an_engine_rejection() {
        let mut check = SelfCheck::new();
        let state = check.run("type: 12", "broken");
        assert!(matches!(state, SelfCheckState::RejectedForEngineFault(_)));
    }

    #[test]
    fn rerun_replaces_previous_state() {
        let mut check = SelfCheck::new();
        check.run("{not valid", "s");
        assert!(!check.state().is_accepted());
        check.run("type: object", "s");
        assert!(check.state().is_accepted());
    }
}
