//! In-memory relational schema model
//!
//! Passive data holders for the entities the diff engine compares: columns,
//! foreign keys, indices, tables, and the database itself. Lookup maps are
//! built once at construction; entities are immutable afterwards, so the
//! internal search indices can never go stale.
//!
//! Constructors validate referential consistency and fail with
//! [`SchemaConsistencyError`] on a malformed object graph. That failure
//! channel is distinct from diff records: it means the input itself is
//! broken, not that two schemas differ.

pub mod catalog_schema;
pub mod column;
pub mod column_type;
pub mod database;
pub mod error;
pub mod foreign_key;
pub mod index;
pub mod table;

pub use catalog_schema::{CatalogSchema, DEFAULT_SCHEMA};
pub use column::Column;
pub use column_type::ColumnType;
pub use database::RelationalDatabase;
pub use error::SchemaConsistencyError;
pub use foreign_key::ForeignKey;
pub use index::RelationalIndex;
pub use table::RelationalTable;
