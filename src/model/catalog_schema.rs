//! Catalog/schema scoping

use serde::{Deserialize, Serialize};
use std::fmt;

/// Schema assumed when none is configured (PostgreSQL convention).
pub const DEFAULT_SCHEMA: &str = "public";

/// The catalog/schema pair a set of tables lives in.
///
/// Either side may be absent depending on the engine. Used as a scoping key
/// throughout: a [`RelationalDatabase`](crate::model::RelationalDatabase) is
/// valid only within a single `CatalogSchema`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogSchema {
    /// Catalog name, if the engine reports one
    pub catalog: Option<String>,

    /// Schema name, if the engine reports one
    pub schema: Option<String>,
}

impl CatalogSchema {
    /// Create a new `CatalogSchema`
    #[must_use]
    pub fn new(catalog: Option<&str>, schema: Option<&str>) -> Self {
        Self {
            catalog: catalog.map(ToOwned::to_owned),
            schema: schema.map(ToOwned::to_owned),
        }
    }
}

/// No catalog, `"public"` schema.
impl Default for CatalogSchema {
    fn default() -> Self {
        Self {
            catalog: None,
            schema: Some(DEFAULT_SCHEMA.to_string()),
        }
    }
}

impl fmt::Display for CatalogSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}",
            self.catalog.as_deref().unwrap_or("<none>"),
            self.schema.as_deref().unwrap_or("<none>")
        )
    }
}
