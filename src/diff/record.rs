//! Diff records

use crate::diff::DiffKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the comparison a discrepancy was detected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoundOn {
    /// Present only in the reference schema (something is missing)
    Reference,
    /// Present only in the test schema (something is unexpected)
    Test,
    /// Not attributable to a single side (e.g. a type mismatch)
    Unspecified,
}

impl fmt::Display for FoundOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FoundOn::Reference => "reference",
            FoundOn::Test => "test",
            FoundOn::Unspecified => "-",
        })
    }
}

/// One detected schema difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRecord {
    /// What kind of difference this is
    pub kind: DiffKind,

    /// Human-readable description
    pub message: String,

    /// Which side the discrepancy was found on
    pub found_on: FoundOn,
}

impl DiffRecord {
    /// Create a new `DiffRecord`
    #[must_use]
    pub fn new(kind: DiffKind, message: impl Into<String>, found_on: FoundOn) -> Self {
        Self {
            kind,
            message: message.into(),
            found_on,
        }
    }
}

impl fmt::Display for DiffRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
