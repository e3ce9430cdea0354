//! Foreign key model

use crate::model::CatalogSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single-column foreign key constraint.
///
/// Composite (multi-column) foreign keys are not modeled; only key sequence
/// `"1"` appears in practice. The `key_seq` field is kept as reported by the
/// driver so that a sequence disagreement can still be detected.
///
/// Three equality notions are needed for matching:
/// - full equality (`==`): source, target, name, and sequence all equal;
/// - [`same_source`](ForeignKey::same_source): the referencing side
///   (catalog-schema, table, column) is equal;
/// - [`same_target`](ForeignKey::same_target): the referenced side is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Constraint name; `None` when unknown or auto-generated
    pub name: Option<String>,

    /// Position within a (potentially composite) key constraint
    pub key_seq: String,

    /// Catalog/schema of the referencing side
    pub source_catalog_schema: CatalogSchema,

    /// Table the constraint is declared on
    pub source_table: String,

    /// Column the constraint is declared on
    pub source_column: String,

    /// Catalog/schema of the referenced side
    pub target_catalog_schema: CatalogSchema,

    /// Table being referenced
    pub target_table: String,

    /// Column being referenced
    pub target_column: String,
}

impl ForeignKey {
    /// True if both keys are declared on the same catalog/schema, table, and
    /// column (the referencing side matches).
    #[must_use]
    pub fn same_source(&self, other: &ForeignKey) -> bool {
        self.source_catalog_schema == other.source_catalog_schema
            && self.source_table == other.source_table
            && self.source_column == other.source_column
    }

    /// True if both keys point at the same catalog/schema, table, and column
    /// (the referenced side matches).
    #[must_use]
    pub fn same_target(&self, other: &ForeignKey) -> bool {
        self.target_catalog_schema == other.target_catalog_schema
            && self.target_table == other.target_table
            && self.target_column == other.target_column
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}): {}({}) --> {}({})",
            self.name.as_deref().unwrap_or("<unnamed>"),
            self.key_seq,
            self.source_table,
            self.source_column,
            self.target_table,
            self.target_column,
        )
    }
}
