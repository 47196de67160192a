//! Configuration file
//!
//! JSON file; every field is optional:
//!
//! ```json
//! {
//!   "database_path": "db.sqlite",
//!   "customers_seed": "customers.json",
//!   "items_seed": "items.json",
//!   "http": { "host": "0.0.0.0", "port": 8000, "cors_origins": [], "max_upload_bytes": null }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;

use super::errors::{CliError, CliResult};

/// Service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Phone-to-name customer seed document
    #[serde(default = "default_customers_seed")]
    pub customers_seed: PathBuf,

    /// Name-to-details item seed document
    #[serde(default = "default_items_seed")]
    pub items_seed: PathBuf,

    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("db.sqlite")
}
fn default_customers_seed() -> PathBuf {
    PathBuf::from("customers.json")
}
fn default_items_seed() -> PathBuf {
    PathBuf::from("items.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            customers_seed: default_customers_seed(),
            items_seed: default_items_seed(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        if self.http.max_upload_bytes == Some(0) {
            return Err(CliError::config_error("http.max_upload_bytes must be > 0"));
        }

        Ok(())
    }
}
