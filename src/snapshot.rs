//! Snapshot persistence.
//!
//! A snapshot is a [`RelationalDatabase`] serialized to pretty-printed JSON.
//! Loading goes back through the model constructors, so a hand-edited file
//! that violates schema consistency is rejected at read time rather than
//! producing nonsense diffs later.

use crate::model::RelationalDatabase;
use std::fmt;
use std::fs;
use std::path::Path;

/// Why a snapshot could not be written or read back.
#[derive(Debug)]
pub enum SnapshotError {
    /// Filesystem failure
    Io(std::io::Error),
    /// The file is not valid snapshot JSON, or the decoded schema failed
    /// consistency validation
    Format(serde_json::Error),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io(err) => write!(f, "snapshot io error: {}", err),
            SnapshotError::Format(err) => write!(f, "malformed snapshot: {}", err),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io(err) => Some(err),
            SnapshotError::Format(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        SnapshotError::Io(err)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json wraps the model's consistency errors in its custom
        // error path; classify io-sourced failures separately.
        if err.is_io() {
            SnapshotError::Io(err.into())
        } else {
            SnapshotError::Format(err)
        }
    }
}

/// Serialize a database model to a JSON byte vector.
///
/// # Errors
///
/// Returns [`SnapshotError::Format`] if serialization fails.
pub fn to_vec(database: &RelationalDatabase) -> Result<Vec<u8>, SnapshotError> {
    Ok(serde_json::to_vec_pretty(database)?)
}

/// Deserialize a database model from snapshot bytes.
///
/// # Errors
///
/// Returns [`SnapshotError`] if the bytes are not valid JSON or the decoded
/// schema fails consistency validation.
pub fn from_slice(bytes: &[u8]) -> Result<RelationalDatabase, SnapshotError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Write a database model to a snapshot file.
///
/// # Errors
///
/// Returns [`SnapshotError`] on serialization or filesystem failure.
pub fn save(database: &RelationalDatabase, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
    let bytes = to_vec(database)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Read a database model from a snapshot file.
///
/// # Errors
///
/// Returns [`SnapshotError`] if the file cannot be read, is not valid
/// snapshot JSON, or describes an inconsistent schema.
pub fn load(path: impl AsRef<Path>) -> Result<RelationalDatabase, SnapshotError> {
    let bytes = fs::read(path)?;
    from_slice(&bytes)
}
