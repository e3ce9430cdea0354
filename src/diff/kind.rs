//! Diff taxonomy

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of schema differences the engine can report.
///
/// The serialized codes (`MISSING_TABLE`, `COL_TYPE_WARNING`, ...) are the
/// external contract consumers build tooling against and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffKind {
    /// The test schema is missing a reference table
    MissingTable,
    /// The test schema has a table the reference does not
    UnexpectedTable,

    // Column differences
    /// A reference column is absent from the test table
    MissingColumn,
    /// A test column is absent from the reference table
    UnexpectedColumn,
    /// Column types differ (type names disagree)
    ColTypeMismatch,
    /// Column type codes differ but the type names agree
    ColTypeWarning,
    /// Column default values differ
    ColDefaultMismatch,
    /// Column nullability differs
    ColNullableMismatch,
    /// Column sizes differ (only checked when both sides report a size)
    ColSizeMismatch,
    /// Column ordinal positions differ
    ColOrdinalMismatch,

    // Foreign key differences
    /// A reference foreign key was never matched by any test key
    MissingFk,
    /// Same signature as a reference key but a different constraint name
    MisnamedFk,
    /// Same constraint name as reference key(s) but a different signature
    MisconfiguredFk,
    /// Same name and signature but the wrong key sequence
    FkSequenceMismatch,
    /// A test foreign key with no related reference key by name or target
    UnexpectedFk,
    /// Everything observable matches yet full equality failed; points at an
    /// equality/hash bug or an unmodeled attribute
    UnknownFkDiff,

    // Index differences
    /// A reference index is absent from the test table
    MissingIndex,
    /// A test index is absent from the reference table
    UnexpectedIndex,

    // Primary key differences
    /// The reference table has a primary key, the test table does not
    MissingPrimaryKey,
    /// The test table has a primary key, the reference table does not
    UnexpectedPrimaryKey,
    /// Both tables have primary keys spanning different columns (or order)
    MisconfiguredPrimaryKey,
}

impl DiffKind {
    /// Stable string code for this kind
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            DiffKind::MissingTable => "MISSING_TABLE",
            DiffKind::UnexpectedTable => "UNEXPECTED_TABLE",
            DiffKind::MissingColumn => "MISSING_COLUMN",
            DiffKind::UnexpectedColumn => "UNEXPECTED_COLUMN",
            DiffKind::ColTypeMismatch => "COL_TYPE_MISMATCH",
            DiffKind::ColTypeWarning => "COL_TYPE_WARNING",
            DiffKind::ColDefaultMismatch => "COL_DEFAULT_MISMATCH",
            DiffKind::ColNullableMismatch => "COL_NULLABLE_MISMATCH",
            DiffKind::ColSizeMismatch => "COL_SIZE_MISMATCH",
            DiffKind::ColOrdinalMismatch => "COL_ORDINAL_MISMATCH",
            DiffKind::MissingFk => "MISSING_FK",
            DiffKind::MisnamedFk => "MISNAMED_FK",
            DiffKind::MisconfiguredFk => "MISCONFIGURED_FK",
            DiffKind::FkSequenceMismatch => "FK_SEQUENCE_MISMATCH",
            DiffKind::UnexpectedFk => "UNEXPECTED_FK",
            DiffKind::UnknownFkDiff => "UNKNOWN_FK_DIFF",
            DiffKind::MissingIndex => "MISSING_INDEX",
            DiffKind::UnexpectedIndex => "UNEXPECTED_INDEX",
            DiffKind::MissingPrimaryKey => "MISSING_PRIMARY_KEY",
            DiffKind::UnexpectedPrimaryKey => "UNEXPECTED_PRIMARY_KEY",
            DiffKind::MisconfiguredPrimaryKey => "MISCONFIGURED_PRIMARY_KEY",
        }
    }

    /// How severe this kind of difference is
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            DiffKind::ColTypeWarning => Severity::Warning,
            _ => Severity::Mismatch,
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Severity of a diff record, for callers that want to treat warnings
/// differently from hard mismatches at the reporting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Cosmetic disagreement (e.g. same type name, different driver code)
    Warning,
    /// A real structural mismatch
    Mismatch,
}
