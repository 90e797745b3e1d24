//! Configuration for minicontacts

use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "minicontacts.toml";

/// Prefix for environment overrides (`MINICONTACTS_URI`, ...)
pub const ENV_PREFIX: &str = "MINICONTACTS";

/// Global configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// MongoDB connection string
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Database holding the contacts collection
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection name
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Per-operation execution window
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Where contacts live
    #[serde(default)]
    pub backend: Backend,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}
fn default_database() -> String {
    "testdb".to_string()
}
fn default_collection() -> String {
    "contacts".to_string()
}
fn default_timeout_ms() -> u64 {
    5_000
}
fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// A MongoDB server reached through `uri`
    #[default]
    Mongo,
    /// Process-local store, gone on exit
    Memory,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
            collection: default_collection(),
            timeout_ms: default_timeout_ms(),
            backend: Backend::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load defaults, then the config file, then `MINICONTACTS_*` env vars.
    ///
    /// An explicit `path` must exist; without one, `minicontacts.toml` is
    /// read from the working directory if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => ::config::File::from(p).required(true),
            None => ::config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = ::config::Config::builder()
            .add_source(file)
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(Error::InvalidConfig("timeout_ms must be positive".into()));
        }
        if self.database.is_empty() || self.collection.is_empty() {
            return Err(Error::InvalidConfig(
                "database and collection names must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Rejects windows whose millisecond count does not fit `timeout_ms`.
    pub fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.timeout_ms = u64::try_from(timeout.as_millis())
            .map_err(|_| Error::InvalidConfig(format!("timeout out of range: {:?}", timeout)))?;
        Ok(())
    }
}
