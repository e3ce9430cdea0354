//! Configuration loading.
//!
//! Settings come from `config/config.toml` (optional) with environment
//! variables layered on top using the `DBDRIFT` prefix, e.g.
//! `DBDRIFT__DRIFT__REFERENCE_SNAPSHOT=nightly.json`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct DriftConfig {
    /// Path of the reference snapshot used when the CLI is not given one
    #[serde(default = "default_reference_snapshot")]
    pub reference_snapshot: String,
    /// Catalog to scope models to; most engines leave this unset
    #[serde(default)]
    pub catalog: Option<String>,
    /// Schema to scope models to
    #[serde(default = "default_schema")]
    pub schema: String,
}

fn default_reference_snapshot() -> String {
    "reference-schema.json".to_string()
}

fn default_schema() -> String {
    crate::model::DEFAULT_SCHEMA.to_string()
}

impl DriftConfig {
    /// Load the drift configuration from `config/config.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/config.toml").required(false))
            .add_source(Environment::with_prefix("DBDRIFT").separator("__"));

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                // A file that exists but fails to parse should not take the
                // tool down; warn and retry with env vars only.
                if std::path::Path::new("config/config.toml").exists() {
                    eprintln!(
                        "Warning: failed to load config file, falling back to env. Error: {}",
                        err
                    );
                }
                Config::builder()
                    .add_source(Environment::with_prefix("DBDRIFT").separator("__"))
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {}, then env-only error: {}",
                            err, env_err
                        ))
                    })?
            }
        };

        match settings.get::<DriftConfig>("drift") {
            Ok(cfg) => Ok(cfg),
            // No [drift] section anywhere is fine; defaults apply.
            Err(ConfigError::NotFound(_)) => Ok(DriftConfig {
                reference_snapshot: default_reference_snapshot(),
                catalog: None,
                schema: default_schema(),
            }),
            Err(e) => Err(ConfigError::Message(format!(
                "Drift configuration could not be loaded from file or environment: {}",
                e
            ))),
        }
    }

    /// The catalog/schema scope this configuration selects
    #[must_use]
    pub fn catalog_schema(&self) -> crate::model::CatalogSchema {
        crate::model::CatalogSchema::new(self.catalog.as_deref(), Some(&self.schema))
    }
}
