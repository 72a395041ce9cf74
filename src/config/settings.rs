//! Application settings loading from `moneybook.toml` and the environment.
//!
//! The embedding application calls [`load_app_configuration`] once at startup.
//! Settings come from an optional TOML file (path overridable through the
//! `MONEYBOOK_CONFIG` environment variable), with `DATABASE_URL` taking
//! precedence over the file for the database location. A missing file is not
//! an error; every setting has a sensible default.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default embedded database location, relative to the working directory.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/moneybook.sqlite?mode=rwc";

/// Application-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// SQLite connection string for the embedded store
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Display language the UI starts with when the user has not chosen one
    #[serde(default = "default_language")]
    pub default_language: String,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            default_language: default_language(),
        }
    }
}

/// Loads configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse configuration: {e}"),
    })
}

/// Loads the application configuration from the environment and, if present,
/// the configuration file.
///
/// Order of precedence for the database URL: `DATABASE_URL` environment
/// variable, then the TOML file, then the built-in default.
pub fn load_app_configuration() -> Result<AppConfig> {
    // Make .env loading non-fatal; variables can be set externally
    dotenvy::dotenv().ok();

    let path = std::env::var("MONEYBOOK_CONFIG").unwrap_or_else(|_| "moneybook.toml".to_string());

    let mut config = if Path::new(&path).exists() {
        load_config(&path)?
    } else {
        AppConfig::default()
    };

    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database_url = url;
    }

    Ok(config)
}
