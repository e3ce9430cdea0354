//! Relational database model

use crate::model::{CatalogSchema, RelationalTable, SchemaConsistencyError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An ordered, name-unique collection of tables scoped to one catalog/schema.
///
/// Iteration order is the order the tables were supplied in; callers that
/// need reproducible diff output should sort tables by name before
/// constructing the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DatabaseRepr", into = "DatabaseRepr")]
pub struct RelationalDatabase {
    catalog_schema: CatalogSchema,
    tables: Vec<RelationalTable>,
    tables_by_name: HashMap<String, usize>,
}

impl RelationalDatabase {
    /// Assemble a database from already-validated tables.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaConsistencyError`] on a duplicate table name or a
    /// table whose catalog/schema differs from the database scope. These are
    /// structural preconditions, not data differences.
    pub fn new(
        catalog_schema: CatalogSchema,
        tables: Vec<RelationalTable>,
    ) -> Result<Self, SchemaConsistencyError> {
        let mut tables_by_name = HashMap::with_capacity(tables.len());
        for (pos, table) in tables.iter().enumerate() {
            if *table.catalog_schema() != catalog_schema {
                return Err(SchemaConsistencyError::TableOutOfScope {
                    table: table.name().to_string(),
                    scope: catalog_schema.to_string(),
                });
            }
            if tables_by_name
                .insert(table.name().to_string(), pos)
                .is_some()
            {
                return Err(SchemaConsistencyError::DuplicateTable {
                    name: table.name().to_string(),
                });
            }
        }
        Ok(Self {
            catalog_schema,
            tables,
            tables_by_name,
        })
    }

    /// The catalog/schema this database is scoped to
    #[must_use]
    pub fn catalog_schema(&self) -> &CatalogSchema {
        &self.catalog_schema
    }

    /// Tables in insertion order
    #[must_use]
    pub fn tables(&self) -> &[RelationalTable] {
        &self.tables
    }

    /// Look up a table by name
    #[must_use]
    pub fn table_by_name(&self, name: &str) -> Option<&RelationalTable> {
        self.tables_by_name.get(name).map(|&pos| &self.tables[pos])
    }
}

/// Plain serialized form; deserialization re-runs duplicate/scope validation.
#[derive(Serialize, Deserialize)]
struct DatabaseRepr {
    catalog_schema: CatalogSchema,
    tables: Vec<RelationalTable>,
}

impl TryFrom<DatabaseRepr> for RelationalDatabase {
    type Error = SchemaConsistencyError;

    fn try_from(repr: DatabaseRepr) -> Result<Self, Self::Error> {
        RelationalDatabase::new(repr.catalog_schema, repr.tables)
    }
}

impl From<RelationalDatabase> for DatabaseRepr {
    fn from(db: RelationalDatabase) -> Self {
        DatabaseRepr {
            catalog_schema: db.catalog_schema,
            tables: db.tables,
        }
    }
}
