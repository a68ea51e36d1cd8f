//! Configuration file schema
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! log_level = "debug"
//! colors = false
//! stderr = "logs/errors.log"
//!
//! [styles.info]
//! prefix = "green.bold"
//! ```

use crate::config::options::LoggerOptions;
use crate::config_struct;
use crate::errors::LoggerError;
use crate::levels::LevelValue;
use crate::stream::Stream;
use crate::styles::StyleTree;

config_struct! {
    /// Logger settings loadable from TOML
    pub struct LoggerFileConfig {
        /// Threshold as a level name or ordinal; unset uses the process default
        log_level: Option<LevelValue> = None,

        /// Force colors on or off; unset uses terminal detection
        colors: Option<bool> = None,

        /// Prepend HH:MM:SS to the default prefix
        timestamp: bool = false,

        /// Stream targets: "stdout", "stderr", "null" or a file path
        stdout: String = "stdout".to_string(),
        stderr: String = "stderr".to_string(),

        /// Style overrides, merged over the built-in styles
        styles: StyleTree = StyleTree::empty(),
    }
}

impl LoggerFileConfig {
    /// Open the configured streams and produce logger options.
    ///
    /// A stream target that cannot be opened is an argument error naming
    /// the field.
    pub fn into_options(self) -> Result<LoggerOptions, LoggerError> {
        let stdout = Stream::from_target(&self.stdout)
            .map_err(|e| LoggerError::argument("stdout", format!("cannot open '{}': {}", self.stdout, e)))?;
        let stderr = Stream::from_target(&self.stderr)
            .map_err(|e| LoggerError::argument("stderr", format!("cannot open '{}': {}", self.stderr, e)))?;

        let mut options = LoggerOptions::new()
            .stdout(stdout)
            .stderr(stderr)
            .styles(self.styles)
            .timestamp(self.timestamp);

        if let Some(level) = self.log_level {
            options = options.log_level(level);
        }
        if let Some(colors) = self.colors {
            options = options.colors(colors);
        }

        Ok(options)
    }
}
