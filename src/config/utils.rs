//! Configuration utilities - loading config files from disk

use super::schemas::LoggerFileConfig;
use crate::errors::LoggerError;
use std::path::Path;

/// Load a logger config file
///
/// # Returns
/// - `Ok(LoggerFileConfig)` - parsed config, defaults filled in
/// - `Err(LoggerError::Io)` - the file could not be read
/// - `Err(LoggerError::Config)` - the file is not valid TOML for the schema
pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<LoggerFileConfig, LoggerError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
        .map_err(|e| LoggerError::Config(format!("Failed to parse config file '{}': {}", path.display(), e)))
}

/// Parse config from a TOML string
///
/// Unknown top-level keys are reported through `log` and otherwise ignored.
pub fn parse_config(contents: &str) -> Result<LoggerFileConfig, LoggerError> {
    let table: toml::Table = toml::from_str(contents).map_err(|e| LoggerError::Config(e.to_string()))?;

    for key in table.keys() {
        if !LoggerFileConfig::FIELDS.contains(&key.as_str()) {
            log::warn!(target: "stylelog::config", "Ignoring unknown config key '{}'", key);
        }
    }

    toml::Value::Table(table)
        .try_into::<LoggerFileConfig>()
        .map_err(|e| LoggerError::Config(e.to_string()))
}

/// Load a config file if it exists, defaults otherwise
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<LoggerFileConfig, LoggerError> {
    let path = path.as_ref();
    if path.exists() {
        load_config_from_path(path)
    } else {
        log::debug!(target: "stylelog::config", "Config file '{}' not found, using default values", path.display());
        Ok(LoggerFileConfig::default())
    }
}
