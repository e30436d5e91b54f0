//! # API Route Modules
//!
//! - `schemas`: schema record CRUD and the standalone self-check.
//! - `data`: data record CRUD, every write gated by schema validation.
//! - `validate`: ad hoc validation of text against a stored or inline schema.

pub mod data;
pub mod schemas;
pub mod validate;
