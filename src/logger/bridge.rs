//! `log` crate backend
//!
//! Lets a `Logger` receive records from `log::info!` and friends.
//! Records from this crate's own diagnostics are ignored.

use super::Logger;
use crate::args::Arg;
use crate::levels::Level;
use std::sync::Arc;

const OWN_TARGET: &str = "stylelog";

pub struct LogBridge {
    logger: Arc<Logger>,
}

impl LogBridge {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// Install as the global `log` backend
    ///
    /// Fails if another backend is already installed.
    pub fn install(logger: Arc<Logger>) -> Result<(), log::SetLoggerError> {
        let bridge: &'static LogBridge = Box::leak(Box::new(LogBridge::new(logger)));
        log::set_logger(bridge)?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Map a `log` level onto a logger level
    pub fn level_for(level: log::Level) -> Level {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Log,
            log::Level::Trace => Level::Debug,
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        !metadata.target().starts_with(OWN_TARGET)
            && self.logger.is_enabled(Self::level_for(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = Self::level_for(record.level());
        self.logger
            .log_at(level, vec![Arg::Text(record.args().to_string())]);
    }

    fn flush(&self) {
        self.logger.flush();
    }
}
