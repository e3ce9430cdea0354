//! # dbdrift
//!
//! Schema drift detection for relational databases: model two schemas (a
//! trusted reference and a schema under test), compare them structurally,
//! and get back a typed list of every difference.

pub mod builder;
pub mod config;
pub mod diff;
pub mod model;
pub mod report;
pub mod snapshot;

pub use diff::{DiffEngine, DiffKind, DiffRecord, FoundOn, Severity};
pub use model::{RelationalDatabase, RelationalTable};
