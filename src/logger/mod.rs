//! Leveled logger with pluggable pre-processing, prefixes and formatting
//!
//! A `Logger` owns two output streams, a threshold, a color engine and a
//! lazily compiled style set. Each level method gates the call against the
//! threshold, runs the prelog over the arguments, computes a prefix and
//! writes one line to the chosen stream.
//!
//! ## Usage
//!
//! ```rust
//! use stylelog::{args, Arg, Logger, LoggerOptions, MemoryStream};
//!
//! let out = MemoryStream::new();
//! let logger = Logger::new(
//!     LoggerOptions::new()
//!         .stdout(out.stream())
//!         .log_level("info")
//!         .colors(false),
//! )
//! .unwrap();
//!
//! logger.info(args!["ready", Arg::field("path", "/srv")]);
//! logger.debug(args!["hidden"]); // above the threshold, dropped
//! assert_eq!(out.contents(), "❯ ready path: /srv\n");
//! ```
//!
//! Errors and warnings go to the error stream; everything else goes to
//! the primary stream. `print`/`eprint` skip the gate and the prelog.

mod bridge;
mod core;
mod prefix;
mod prelog;

pub use bridge::LogBridge;
pub use prefix::{default_prefix, Prefix, PrefixFn, INFO_GLYPH};
pub use prelog::{default_prelog, Prelog, PrelogFn};

use crate::args::Arg;
use crate::config::{load_config_from_path, LoggerOptions};
use crate::engine::{ColorEngine, ColorLevel, DETECTED_LEVEL};
use crate::error_format;
use crate::errors::{ErrorValue, LoggerError};
use crate::format::format_values;
use crate::levels::{Level, LevelRegistry, LevelValue, REGISTRY};
use crate::stream::Stream;
use crate::styles::{StyleResolver, StyleTree};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

/// Custom format callable: arguments in, rendered line out
pub type FormatFn = Arc<dyn Fn(&Logger, &[Arg]) -> String + Send + Sync>;

/// How argument lists are rendered to text
#[derive(Clone, Default)]
pub enum Formatter {
    /// Placeholder substitution with the logger's current color mode
    #[default]
    Default,
    Custom(FormatFn),
}

impl Formatter {
    pub fn custom<F>(format: F) -> Self
    where
        F: Fn(&Logger, &[Arg]) -> String + Send + Sync + 'static,
    {
        Formatter::Custom(Arc::new(format))
    }

    pub fn render(&self, logger: &Logger, args: &[Arg]) -> String {
        match self {
            Formatter::Default => format_values(args, logger.colors()),
            Formatter::Custom(format) => format(logger, args),
        }
    }
}

impl std::fmt::Debug for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formatter::Default => write!(f, "Formatter::Default"),
            Formatter::Custom(_) => write!(f, "Formatter::Custom(..)"),
        }
    }
}

pub struct Logger {
    stdout: RwLock<Stream>,
    stderr: RwLock<Stream>,
    threshold: AtomicI32,
    registry: LevelRegistry,
    engine: Arc<ColorEngine>,
    styles: StyleResolver,
    prefix: Prefix,
    prelog: Prelog,
    format: Formatter,
    timestamp: bool,
}

impl Logger {
    /// Build a logger from options layered over the process defaults.
    ///
    /// Fails with `LoggerError::Argument` naming `stdout` or `stderr` when
    /// that stream is not writable.
    pub fn new(options: LoggerOptions) -> Result<Self, LoggerError> {
        let registry = options.registry.unwrap_or(*REGISTRY);

        let stdout = options.stdout.unwrap_or_else(Stream::stdout);
        if !stdout.is_writable() {
            return Err(LoggerError::argument(
                "stdout",
                format!("stream '{}' is not writable", stdout.label()),
            ));
        }
        let stderr = options.stderr.unwrap_or_else(Stream::stderr);
        if !stderr.is_writable() {
            return Err(LoggerError::argument(
                "stderr",
                format!("stream '{}' is not writable", stderr.label()),
            ));
        }

        let threshold = options
            .log_level
            .map(|level| registry.number_of(level))
            .unwrap_or_else(|| registry.default_ordinal());

        let color_level = options
            .color_level
            .or_else(|| options.colors.map(color_level_for))
            .unwrap_or(*DETECTED_LEVEL);
        let engine = Arc::new(ColorEngine::new(color_level));

        let tree = match options.styles {
            Some(overrides) => StyleTree::defaults().merged(overrides),
            None => StyleTree::defaults(),
        };
        let styles = StyleResolver::new(tree, Arc::clone(&engine));

        log::debug!(
            target: "stylelog::logger",
            "Logger created (threshold={}, colors={:?}, stdout={}, stderr={})",
            threshold,
            color_level,
            stdout.label(),
            stderr.label()
        );

        Ok(Self {
            stdout: RwLock::new(stdout),
            stderr: RwLock::new(stderr),
            threshold: AtomicI32::new(threshold),
            registry,
            engine,
            styles,
            prefix: options.prefix.unwrap_or_default(),
            prelog: options.prelog.unwrap_or_default(),
            format: options.format.unwrap_or_default(),
            timestamp: options.timestamp.unwrap_or(false),
        })
    }

    /// Build a logger from a TOML config file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, LoggerError> {
        let options = load_config_from_path(path)?.into_options()?;
        Self::new(options)
    }

    // =========================================================================
    // Level methods
    // =========================================================================

    pub fn error(&self, args: Vec<Arg>) {
        self.log_at(Level::Error, args);
    }

    pub fn warn(&self, args: Vec<Arg>) {
        self.log_at(Level::Warn, args);
    }

    pub fn info(&self, args: Vec<Arg>) {
        self.log_at(Level::Info, args);
    }

    pub fn log(&self, args: Vec<Arg>) {
        self.log_at(Level::Log, args);
    }

    pub fn debug(&self, args: Vec<Arg>) {
        self.log_at(Level::Debug, args);
    }

    /// Dispatch method with `level` fixed
    pub fn method(&self, level: Level) -> impl Fn(Vec<Arg>) + '_ {
        move |args| self.log_at(level, args)
    }

    /// Write to the primary stream, ignoring the threshold and the prelog
    pub fn print(&self, args: Vec<Arg>) {
        let line = self.format(&args);
        self.stdout.read().write_str(&format!("{}\n", line));
    }

    /// Write to the error stream, ignoring the threshold and the prelog
    pub fn eprint(&self, args: Vec<Arg>) {
        let line = self.format(&args);
        self.stderr.read().write_str(&format!("{}\n", line));
    }

    pub fn flush(&self) {
        self.stdout.read().flush();
        self.stderr.read().flush();
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render arguments through the configured format callable
    pub fn format(&self, args: &[Arg]) -> String {
        self.format.render(self, args)
    }

    pub fn format_error(&self, err: &ErrorValue, skip_stack: bool) -> String {
        error_format::format_error(err, skip_stack, &self.styles)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn stdout(&self) -> Stream {
        self.stdout.read().clone()
    }

    /// Replace the primary stream. The new stream is not checked for
    /// writability.
    pub fn set_stdout(&self, stream: Stream) {
        *self.stdout.write() = stream;
    }

    pub fn stderr(&self) -> Stream {
        self.stderr.read().clone()
    }

    /// Replace the error stream. The new stream is not checked for
    /// writability.
    pub fn set_stderr(&self, stream: Stream) {
        *self.stderr.write() = stream;
    }

    /// Threshold ordinal; -1 means silent
    pub fn log_level(&self) -> i32 {
        self.threshold.load(Ordering::Relaxed)
    }

    pub fn set_log_level(&self, level: impl Into<LevelValue>) {
        let ordinal = self.registry.number_of(level);
        self.threshold.store(ordinal, Ordering::Relaxed);
    }

    pub fn registry(&self) -> &LevelRegistry {
        &self.registry
    }

    /// Whether a call at `level` would be written
    pub fn is_enabled(&self, level: Level) -> bool {
        level.ordinal() <= self.log_level()
    }

    pub fn colors(&self) -> bool {
        self.engine.enabled()
    }

    /// Turn colors off, or back on at the detected terminal level
    pub fn set_colors(&self, colors: bool) {
        self.engine.set_level(color_level_for(colors));
    }

    pub fn color_level(&self) -> ColorLevel {
        self.engine.level()
    }

    pub fn set_color_level(&self, level: ColorLevel) {
        self.engine.set_level(level);
    }

    /// Compiled styles and the raw style tree behind them
    pub fn styles(&self) -> &StyleResolver {
        &self.styles
    }

    pub fn timestamp(&self) -> bool {
        self.timestamp
    }
}

fn color_level_for(colors: bool) -> ColorLevel {
    if colors {
        *DETECTED_LEVEL
    } else {
        ColorLevel::None
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("stdout", &*self.stdout.read())
            .field("stderr", &*self.stderr.read())
            .field("threshold", &self.log_level())
            .field("color_level", &self.color_level())
            .field("prefix", &self.prefix)
            .field("prelog", &self.prelog)
            .field("format", &self.format)
            .field("timestamp", &self.timestamp)
            .finish()
    }
}
