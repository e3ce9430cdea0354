//! Schema acquisition seam.
//!
//! The diff engine only ever sees [`RelationalDatabase`](crate::model::RelationalDatabase)
//! values; where they come from (a saved snapshot, a live catalog walk, a
//! fixture in a test) is behind [`SchemaBuilder`].

use crate::model::{CatalogSchema, RelationalDatabase, SchemaConsistencyError};
use crate::snapshot::{self, SnapshotError};
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a schema model could not be produced.
#[derive(Debug)]
pub enum SchemaBuildError {
    /// The backing source could not be reached or read
    Unavailable(String),
    /// The source was read but describes an inconsistent schema
    Inconsistent(SchemaConsistencyError),
}

impl fmt::Display for SchemaBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaBuildError::Unavailable(msg) => {
                write!(f, "schema source unavailable: {}", msg)
            }
            SchemaBuildError::Inconsistent(err) => {
                write!(f, "inconsistent schema: {}", err)
            }
        }
    }
}

impl std::error::Error for SchemaBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemaBuildError::Unavailable(_) => None,
            SchemaBuildError::Inconsistent(err) => Some(err),
        }
    }
}

impl From<SchemaConsistencyError> for SchemaBuildError {
    fn from(err: SchemaConsistencyError) -> Self {
        SchemaBuildError::Inconsistent(err)
    }
}

impl From<SnapshotError> for SchemaBuildError {
    fn from(err: SnapshotError) -> Self {
        SchemaBuildError::Unavailable(err.to_string())
    }
}

/// Produces a database model for a given catalog/schema scope.
pub trait SchemaBuilder {
    /// Build the model.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaBuildError`] when the source cannot be read or the
    /// schema it describes fails consistency validation.
    fn build(&self, scope: &CatalogSchema) -> Result<RelationalDatabase, SchemaBuildError>;
}

/// A [`SchemaBuilder`] backed by a snapshot file on disk.
///
/// The snapshot's own catalog/schema must match the requested scope; a
/// snapshot taken of a different schema is a usage error, not drift.
#[derive(Debug, Clone)]
pub struct SnapshotSchemaBuilder {
    path: PathBuf,
}

impl SnapshotSchemaBuilder {
    /// Create a builder reading from the given snapshot file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot path this builder reads from
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchemaBuilder for SnapshotSchemaBuilder {
    fn build(&self, scope: &CatalogSchema) -> Result<RelationalDatabase, SchemaBuildError> {
        let database = snapshot::load(&self.path)?;
        if database.catalog_schema() != scope {
            return Err(SchemaBuildError::Unavailable(format!(
                "snapshot {} is scoped to {} but {} was requested",
                self.path.display(),
                database.catalog_schema(),
                scope
            )));
        }
        Ok(database)
    }
}

/// Probe a set of builders and return the first failure, if any.
///
/// Useful for preflight checks: confirm every schema source is reachable and
/// consistent before any comparison output is produced.
pub fn first_failure(
    builders: &[&dyn SchemaBuilder],
    scope: &CatalogSchema,
) -> Option<SchemaBuildError> {
    builders
        .iter()
        .find_map(|builder| builder.build(scope).err())
}
