//! Relational table model with pre-built lookup maps

use crate::model::{
    CatalogSchema, Column, ForeignKey, RelationalIndex, SchemaConsistencyError,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A table with its columns, primary key, foreign keys, and indices.
///
/// All lookup maps (columns by name, foreign keys by name and by referenced
/// column, indices grouped by the column-name list they span) are built once
/// by [`RelationalTable::new`] and never mutated afterwards, so accessors can
/// hand out references without any "don't modify the returned collection"
/// caveat.
///
/// Only single-column foreign keys are supported; this is a stated
/// limitation, not a bug.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TableRepr", into = "TableRepr")]
pub struct RelationalTable {
    catalog_schema: CatalogSchema,
    name: String,
    columns: Vec<Column>,
    pk_columns: Vec<String>,
    foreign_keys: Vec<ForeignKey>,
    indices: Vec<RelationalIndex>,

    columns_by_name: HashMap<String, usize>,
    fks_by_name: HashMap<Option<String>, Vec<usize>>,
    fks_by_target: HashMap<(CatalogSchema, String, String), Vec<usize>>,
    index_group_keys: Vec<Vec<String>>,
    index_groups: HashMap<Vec<String>, Vec<usize>>,
}

impl RelationalTable {
    /// Assemble a table and build its lookup maps.
    ///
    /// Columns keep insertion order; a duplicate column name overwrites the
    /// earlier column in place. An empty `pk_columns` list means the table
    /// has no primary key.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaConsistencyError`] if a foreign key's source side does
    /// not match this table, or if an index belongs to a different
    /// catalog/schema or references a column the table does not have.
    pub fn new(
        catalog_schema: CatalogSchema,
        name: impl Into<String>,
        columns: Vec<Column>,
        pk_columns: Vec<String>,
        foreign_keys: Vec<ForeignKey>,
        indices: Vec<RelationalIndex>,
    ) -> Result<Self, SchemaConsistencyError> {
        let name = name.into();

        // Insertion-order columns, keyed by name, duplicates overwrite.
        let mut ordered_columns: Vec<Column> = Vec::with_capacity(columns.len());
        let mut columns_by_name: HashMap<String, usize> = HashMap::with_capacity(columns.len());
        for column in columns {
            match columns_by_name.get(&column.name) {
                Some(&pos) => ordered_columns[pos] = column,
                None => {
                    columns_by_name.insert(column.name.clone(), ordered_columns.len());
                    ordered_columns.push(column);
                }
            }
        }

        let mut fks_by_name: HashMap<Option<String>, Vec<usize>> = HashMap::new();
        let mut fks_by_target: HashMap<(CatalogSchema, String, String), Vec<usize>> =
            HashMap::new();
        for (pos, fk) in foreign_keys.iter().enumerate() {
            if fk.source_catalog_schema != catalog_schema || fk.source_table != name {
                return Err(SchemaConsistencyError::ForeignKeyTableMismatch {
                    foreign_key: fk.to_string(),
                    table: name,
                });
            }
            fks_by_name.entry(fk.name.clone()).or_default().push(pos);
            let target_key = (
                fk.target_catalog_schema.clone(),
                fk.target_table.clone(),
                fk.target_column.clone(),
            );
            fks_by_target.entry(target_key).or_default().push(pos);
        }

        let mut index_group_keys: Vec<Vec<String>> = Vec::new();
        let mut index_groups: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
        for (pos, index) in indices.iter().enumerate() {
            if index.catalog_schema != catalog_schema {
                return Err(SchemaConsistencyError::IndexCatalogSchemaMismatch {
                    index: index.name.clone().unwrap_or_else(|| "<unnamed>".to_string()),
                    table: name,
                });
            }
            for column in &index.columns {
                if !columns_by_name.contains_key(&column.name) {
                    return Err(SchemaConsistencyError::UnknownIndexColumn {
                        index: index.name.clone().unwrap_or_else(|| "<unnamed>".to_string()),
                        table: name,
                        column: column.name.clone(),
                    });
                }
            }
            let key = index.column_names();
            match index_groups.get_mut(&key) {
                Some(group) => group.push(pos),
                None => {
                    index_group_keys.push(key.clone());
                    index_groups.insert(key, vec![pos]);
                }
            }
        }

        Ok(Self {
            catalog_schema,
            name,
            columns: ordered_columns,
            pk_columns,
            foreign_keys,
            indices,
            columns_by_name,
            fks_by_name,
            fks_by_target,
            index_group_keys,
            index_groups,
        })
    }

    /// The catalog/schema this table belongs to
    #[must_use]
    pub fn catalog_schema(&self) -> &CatalogSchema {
        &self.catalog_schema
    }

    /// Table name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in declared order
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name
    #[must_use]
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns_by_name.get(name).map(|&pos| &self.columns[pos])
    }

    /// Primary key column names in key-sequence order; empty = no primary key
    #[must_use]
    pub fn pk_columns(&self) -> &[String] {
        &self.pk_columns
    }

    /// All foreign keys, in insertion order
    #[must_use]
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Foreign keys sharing a constraint name (`None` matches unnamed keys),
    /// in insertion order.
    #[must_use]
    pub fn fks_by_name(&self, name: Option<&str>) -> Vec<&ForeignKey> {
        let key = name.map(ToOwned::to_owned);
        self.fks_by_name
            .get(&key)
            .map(|group| group.iter().map(|&pos| &self.foreign_keys[pos]).collect())
            .unwrap_or_default()
    }

    /// Foreign keys pointing at the given referenced column, in insertion
    /// order. Catalog, schema, table, and column must match exactly.
    #[must_use]
    pub fn fks_by_target(
        &self,
        catalog_schema: &CatalogSchema,
        table: &str,
        column: &str,
    ) -> Vec<&ForeignKey> {
        let key = (catalog_schema.clone(), table.to_string(), column.to_string());
        self.fks_by_target
            .get(&key)
            .map(|group| group.iter().map(|&pos| &self.foreign_keys[pos]).collect())
            .unwrap_or_default()
    }

    /// All indices, in insertion order
    #[must_use]
    pub fn indices(&self) -> &[RelationalIndex] {
        &self.indices
    }

    /// The distinct column-name lists spanned by this table's indices, in
    /// first-seen order. Several indices can span the same column set.
    #[must_use]
    pub fn index_column_sets(&self) -> &[Vec<String>] {
        &self.index_group_keys
    }

    /// The indices spanning exactly the given ordered column-name list
    #[must_use]
    pub fn indices_for_columns(&self, column_names: &[String]) -> Vec<&RelationalIndex> {
        self.index_groups
            .get(column_names)
            .map(|group| group.iter().map(|&pos| &self.indices[pos]).collect())
            .unwrap_or_default()
    }
}

/// Plain serialized form; deserialization goes back through
/// [`RelationalTable::new`] so a hand-edited snapshot cannot bypass
/// consistency validation.
#[derive(Serialize, Deserialize)]
struct TableRepr {
    catalog_schema: CatalogSchema,
    name: String,
    columns: Vec<Column>,
    pk_columns: Vec<String>,
    foreign_keys: Vec<ForeignKey>,
    indices: Vec<RelationalIndex>,
}

impl TryFrom<TableRepr> for RelationalTable {
    type Error = SchemaConsistencyError;

    fn try_from(repr: TableRepr) -> Result<Self, Self::Error> {
        RelationalTable::new(
            repr.catalog_schema,
            repr.name,
            repr.columns,
            repr.pk_columns,
            repr.foreign_keys,
            repr.indices,
        )
    }
}

impl From<RelationalTable> for TableRepr {
    fn from(table: RelationalTable) -> Self {
        TableRepr {
            catalog_schema: table.catalog_schema,
            name: table.name,
            columns: table.columns,
            pk_columns: table.pk_columns,
            foreign_keys: table.foreign_keys,
            indices: table.indices,
        }
    }
}
