//! Column type descriptor

use serde::{Deserialize, Serialize};
use std::fmt;

/// The data type of a column: a driver-level numeric type code paired with a
/// dialect-specific type name (e.g. `bool`, `varchar(255)`).
///
/// The dual representation exists because two engines (or an ORM mapping
/// layer and a live database) can disagree on the numeric code while agreeing
/// on the semantic name, or vice versa. The diff engine treats "same name,
/// different code" as a lesser severity than "different name". Equality
/// requires both fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnType {
    /// Numeric type code, engine/driver specific (standard SQL type constants)
    pub code: i32,

    /// Textual type name, dialect specific
    pub name: String,
}

impl ColumnType {
    /// Create a new `ColumnType`
    #[must_use]
    pub fn new(code: i32, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.code, self.name)
    }
}
