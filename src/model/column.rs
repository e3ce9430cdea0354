//! Table column model

use crate::model::ColumnType;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A single column of a table.
///
/// Set-identity (equality, hashing, ordering) is `(ordinal, name)` only.
/// Type, default, nullability, and size deliberately do not participate: the
/// diff engine compares those field by field and reports each discrepancy
/// separately rather than treating the column as one opaque value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,

    /// 1-based position within the table's declared column order
    pub ordinal: i32,

    /// Type descriptor (driver code + dialect name)
    pub column_type: ColumnType,

    /// Tri-state nullability: `Some(true)` / `Some(false)` / unknown
    pub nullable: Option<bool>,

    /// Default value expression, if any
    pub default_value: Option<String>,

    /// Size: max characters for character types, precision for numerics
    pub size: Option<i32>,
}

impl Column {
    /// Create a new column with unknown nullability and no default or size
    #[must_use]
    pub fn new(name: impl Into<String>, ordinal: i32, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            ordinal,
            column_type,
            nullable: None,
            default_value: None,
            size: None,
        }
    }

    /// Set nullability
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    /// Set the default value expression
    #[must_use]
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Set the column size
    #[must_use]
    pub fn with_size(mut self, size: i32) -> Self {
        self.size = Some(size);
        self
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal == other.ordinal && self.name == other.name
    }
}

impl Eq for Column {}

impl Hash for Column {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordinal.hash(state);
        self.name.hash(state);
    }
}

impl PartialOrd for Column {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Column {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal
            .cmp(&other.ordinal)
            .then_with(|| self.name.cmp(&other.name))
    }
}
