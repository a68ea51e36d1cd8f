//! Configurable leveled logger
//!
//! Gates calls against a threshold, styles them per level and writes them
//! to a primary and an error stream.

pub mod args;
pub mod config;
pub mod engine;
pub mod error_format;
pub mod errors;
pub mod format;
pub mod levels;
pub mod logger;
pub mod stack;
pub mod stream;
pub mod styles;

pub use args::Arg;
pub use config::{LoggerFileConfig, LoggerOptions};
pub use engine::{ColorEngine, ColorLevel};
pub use errors::{ErrorValue, LoggerError};
pub use levels::{Level, LevelRegistry, LevelValue};
pub use logger::{Formatter, LogBridge, Logger, Prefix, Prelog};
pub use stream::{LogStream, MemoryStream, Stream};
pub use styles::{StyleNode, StyleResolver, StyleTree};
