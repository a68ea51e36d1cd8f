//! Logger configuration
//!
//! - `options`: programmatic options, merged over process defaults
//! - `schemas`: TOML file schema with embedded defaults
//! - `utils`: loading config files
//! - `macros`: `config_struct!`

pub mod macros;
pub mod options;
pub mod schemas;
pub mod utils;

pub use options::LoggerOptions;
pub use schemas::LoggerFileConfig;
pub use utils::{load_config_from_path, load_config_or_default, parse_config};
