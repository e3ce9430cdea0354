//! Table index model

use crate::model::{CatalogSchema, Column};
use serde::{Deserialize, Serialize};

/// An index over an ordered list of columns within one table.
///
/// Many engines report system-generated indices (implicit primary-key or
/// unique indices) without a usable name, so `name` is optional. The
/// grouping/matching key between two tables' indices is the ordered list of
/// column names the index spans; order matters, so an index on `[a, b]` never
/// matches one on `[b, a]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationalIndex {
    /// Index name; `None` for unnamed system indices
    pub name: Option<String>,

    /// Catalog/schema the index belongs to (must match its table's)
    pub catalog_schema: CatalogSchema,

    /// The indexed columns, in index order
    pub columns: Vec<Column>,
}

impl RelationalIndex {
    /// Create a new index
    #[must_use]
    pub fn new(name: Option<&str>, catalog_schema: CatalogSchema, columns: Vec<Column>) -> Self {
        Self {
            name: name.map(ToOwned::to_owned),
            catalog_schema,
            columns,
        }
    }

    /// The ordered column names this index spans; derived, not independently
    /// settable.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnType;

    #[test]
    fn test_column_names_preserve_index_order() {
        let idx = RelationalIndex::new(
            Some("name_dob_idx"),
            CatalogSchema::default(),
            vec![
                Column::new("name", 2, ColumnType::new(12, "varchar")),
                Column::new("dob", 3, ColumnType::new(93, "timestamp")),
            ],
        );
        assert_eq!(idx.column_names(), vec!["name", "dob"]);
    }
}
