//! Error types for the logger
//!
//! `LoggerError` is what construction and config loading can fail with.
//! `ErrorValue` is an error captured as a loggable argument.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::Location;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid argument '{option}': {reason}")] Argument {
        option: String,
        reason: String,
    },

    #[error("Configuration error: {0}")] Config(String),

    #[error("IO error: {0}")] Io(#[from] std::io::Error),
}

impl LoggerError {
    pub fn argument(option: impl Into<String>, reason: impl Into<String>) -> Self {
        LoggerError::Argument {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending option for argument errors
    pub fn option(&self) -> Option<&str> {
        match self {
            LoggerError::Argument { option, .. } => Some(option),
            _ => None,
        }
    }
}

/// An error captured as a log argument.
///
/// Holds the display name, the message, the chain of underlying causes and
/// the trace text. The call site that created the value is always recorded,
/// so every captured error carries at least one trace frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorValue {
    /// Explicit display name, wins over `type_name`
    pub name: Option<String>,
    /// Runtime type name of the source error
    pub type_name: String,
    pub message: String,
    /// Messages of `source()` causes, outermost first
    pub causes: Vec<String>,
    /// Raw trace text (call site plus captured backtrace, if any)
    pub trace: String,
}

impl ErrorValue {
    /// Plain error with the generic name `Error`
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: None,
            type_name: "Error".to_string(),
            message: message.into(),
            causes: Vec::new(),
            trace: capture_trace(Location::caller()),
        }
    }

    /// Capture any std error, including its `source()` chain
    #[track_caller]
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            name: None,
            type_name: short_type_name(std::any::type_name::<E>()),
            message: err.to_string(),
            causes,
            trace: capture_trace(Location::caller()),
        }
    }

    /// Capture an `anyhow::Error`, using its own backtrace when one was captured
    #[track_caller]
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let causes = err.chain().skip(1).map(|cause| cause.to_string()).collect();
        let location = Location::caller();
        let backtrace = err.backtrace();
        let trace = match backtrace.status() {
            BacktraceStatus::Captured => {
                format!("at {}\n{}", format_location(location), backtrace)
            }
            _ => format!("at {}", format_location(location)),
        };

        Self {
            name: None,
            type_name: "Error".to_string(),
            message: err.to_string(),
            causes,
            trace,
        }
    }

    /// Set an explicit display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the trace text
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = trace.into();
        self
    }

    /// Explicit name if set, otherwise the runtime type name
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.type_name)
    }
}

impl std::fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.display_name(), self.message)
    }
}

fn capture_trace(location: &Location<'_>) -> String {
    // Honours RUST_BACKTRACE / RUST_LIB_BACKTRACE
    let backtrace = Backtrace::capture();
    match backtrace.status() {
        BacktraceStatus::Captured => format!("at {}\n{}", format_location(location), backtrace),
        _ => format!("at {}", format_location(location)),
    }
}

fn format_location(location: &Location<'_>) -> String {
    format!("{}:{}:{}", location.file(), location.line(), location.column())
}

fn short_type_name(full: &str) -> String {
    // "core::num::error::ParseIntError" -> "ParseIntError", keeping generics intact
    let base = full.split('<').next().unwrap_or(full);
    let short = base.rsplit("::").next().unwrap_or(base);
    if short.is_empty() {
        "Error".to_string()
    } else {
        short.to_string()
    }
}
