//! Model construction errors

/// A malformed schema object graph.
///
/// Raised at model construction time (including snapshot deserialization,
/// which re-runs construction). This is a different failure channel than a
/// diff record: it means the input itself is broken, not that two schemas
/// differ.
#[derive(Debug)]
pub enum SchemaConsistencyError {
    /// Two tables with the same name within one catalog/schema
    DuplicateTable { name: String },
    /// A table whose catalog/schema does not match the database scope
    TableOutOfScope { table: String, scope: String },
    /// A foreign key whose source side does not match its owning table
    ForeignKeyTableMismatch { foreign_key: String, table: String },
    /// An index from a different catalog/schema than its table
    IndexCatalogSchemaMismatch { index: String, table: String },
    /// An index referencing a column the table does not have
    UnknownIndexColumn {
        index: String,
        table: String,
        column: String,
    },
}

impl std::fmt::Display for SchemaConsistencyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaConsistencyError::DuplicateTable { name } => {
                write!(
                    f,
                    "A database supports only unique table names within one catalog/schema; duplicate name found: {}",
                    name
                )
            }
            SchemaConsistencyError::TableOutOfScope { table, scope } => {
                write!(
                    f,
                    "Table '{}' does not belong to the database's catalog/schema scope '{}'",
                    table, scope
                )
            }
            SchemaConsistencyError::ForeignKeyTableMismatch { foreign_key, table } => {
                write!(f, "Foreign key \"{}\" does not match table '{}'", foreign_key, table)
            }
            SchemaConsistencyError::IndexCatalogSchemaMismatch { index, table } => {
                write!(
                    f,
                    "Index '{}' and table '{}' belong to different catalogs or schemas",
                    index, table
                )
            }
            SchemaConsistencyError::UnknownIndexColumn { index, table, column } => {
                write!(
                    f,
                    "Index '{}' references column '{}' which table '{}' does not have",
                    index, column, table
                )
            }
        }
    }
}

impl std::error::Error for SchemaConsistencyError {}
