//! # sdata-core — Canonical Values for Structured Data
//!
//! Every document that enters the system, whether editor content or a schema
//! definition, arrives as YAML or JSON text. This crate turns that text into
//! a single canonical tree so that everything downstream can reason about
//! object-vs-array-vs-scalar without guessing.
//!
//! ## Key Design Principles
//!
//! 1. **One parser for both syntaxes.** JSON is accepted as YAML flow syntax,
//!    so [`parse`] is the only entry point. There is no format sniffing.
//!
//! 2. **Mappings are always [`Value::Map`].** Empty and single-entry mappings
//!    included. Schema rules that distinguish `object` from `array` depend on
//!    this being unambiguous.
//!
//! 3. **Parse failures carry the parser's own diagnostic.** Authors need the
//!    line and column to find their mistake, so [`ParseError`] never
//!    paraphrases the underlying message.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sdata-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod value;

pub use error::{ParseError, Position};
pub use value::{parse, Kind, Value};
