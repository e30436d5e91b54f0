//! # sdata-store — Schema and Data Records
//!
//! The collaborators that sit around the validation engine:
//!
//! - [`record`]: [`SchemaRecord`] and [`DataRecord`], each with the checks
//!   that must pass before a write is accepted. Schema records are
//!   self-checked; data records are validated against their bound schema.
//! - [`store`]: [`RecordStore`], a thread-safe in-memory store for both
//!   record kinds. It implements
//!   [`SchemaResolver`](sdata_schema::SchemaResolver), so data records and
//!   form fields resolve schemas by name through it.
//! - [`field`]: [`StructuredDataField`], free-text form input validated
//!   against a bound schema on submission.
//!
//! Any validation failure blocks the write and surfaces the engine's report
//! string unchanged.

pub mod field;
pub mod record;
pub mod store;

pub use field::{FieldError, StructuredDataField};
pub use record::{DataRecord, RecordError, SchemaRecord, MAX_NAME_LEN};
pub use store::{DataUpdate, RecordStore, StoreError};
