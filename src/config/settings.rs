//! Application settings loading from config.toml
//!
//! Every section is optional. A missing file yields the defaults, which match
//! the thresholds the advice rules were designed around.

use crate::core::advice::AdviceThresholds;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default location of the settings file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Thresholds used when generating advice
    pub advice: AdviceThresholds,
    /// Export naming
    pub export: ExportSettings,
}

/// Naming of exported report files
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExportSettings {
    /// File name prefix, followed by the export date
    pub file_prefix: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_prefix: "resumen-mes".to_string(),
        }
    }
}

/// Parses settings from a TOML string.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file exists but cannot be read, or if the TOML is
/// invalid. A missing file is not an error.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No settings file at {path:?}, using defaults");
        return Ok(Settings::default());
    }

    debug!("Loading settings from {path:?}");
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;
    parse_settings(&contents)
}

/// Loads settings from `MESADA_CONFIG`, or `./config.toml` when unset.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var("MESADA_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_settings(path)
}
