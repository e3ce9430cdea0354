//! Schema diff engine
//!
//! Compares two [`RelationalDatabase`](crate::model::RelationalDatabase)
//! models (a reference and a test schema) and reports every structural
//! discrepancy as a typed [`DiffRecord`]. Legitimate schema differences are
//! never errors: given two valid inputs, [`DiffEngine::compare`] always
//! terminates and always returns a (possibly empty) record list.

pub mod engine;
pub mod kind;
pub mod record;

pub use engine::DiffEngine;
pub use kind::{DiffKind, Severity};
pub use record::{DiffRecord, FoundOn};
