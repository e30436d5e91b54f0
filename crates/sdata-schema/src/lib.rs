//! # sdata-schema — Schema Validation Engine
//!
//! Checks canonical [`Value`](sdata_core::Value) trees against JSON Schema
//! documents authored as YAML or JSON text, and reports failures with one
//! stable, human-readable message per call.
//!
//! ## Pipeline
//!
//! ```text
//! data text ──parse──▶ Value ─┐
//!                             ├─▶ ValidationEngine ─▶ ValidationOutcome
//! schema text ─parse─▶ SchemaDocument ─┘      ▲
//!                             ▲               │
//!        SchemaResolver (name lookup) ────────┘
//! ```
//!
//! - [`ValidationEngine`]: delegates keyword semantics to the `jsonschema`
//!   crate and owns the boundary contract: parse failures on either side,
//!   data mismatches, and library faults are never conflated.
//! - [`ValidationFailure`]: the failure taxonomy; its `Display` output is
//!   the report wording shown to authors.
//! - [`SchemaResolver`] / [`SchemaRegistry`]: name → document lookup.
//! - [`SchemaBinding`]: how a record or field refers to its schema.
//! - [`SelfCheck`]: sample-based structural check run on every schema edit.
//!
//! ## Crate Policy
//!
//! - Depends only on `sdata-core` internally.
//! - Nothing here panics or returns a bare library error past the engine
//!   boundary; every path ends in a [`ValidationOutcome`] or a typed error.

pub mod binding;
pub mod document;
pub mod engine;
pub mod registry;
pub mod report;
pub mod selfcheck;

pub use binding::SchemaBinding;
pub use document::SchemaDocument;
pub use engine::ValidationEngine;
pub use registry::{schema_name_for, RegistryError, SchemaNotFound, SchemaRegistry, SchemaResolver};
pub use report::{FailureKind, ValidationFailure, ValidationOutcome, Violation, Violations};
pub use selfcheck::{check_schema_shape, SelfCheck, SelfCheckState, SAMPLE_PAYLOAD};
