//! Level definitions and lenient level resolution
//!
//! Levels are ordered by verbosity (Error < Warn < Info < Log < Debug).
//! A threshold ordinal admits every level whose ordinal is <= the threshold,
//! and a threshold of -1 silences everything.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

/// Threshold value that silences every level
pub const SILENT: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Error = 0, // Failures, routed to stderr
    Warn = 1,  // Problems worth attention, routed to stderr
    Info = 2,  // Standard operational messages (default threshold)
    Log = 3,   // General output
    Debug = 4, // Detailed diagnostics
}

impl Level {
    /// All levels in ordinal order
    pub const ALL: [Level; 5] = [Level::Error, Level::Warn, Level::Info, Level::Log, Level::Debug];

    /// Lowercase level name, also the key used in the style tree
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Log => "log",
            Level::Debug => "debug",
        }
    }

    pub fn ordinal(&self) -> i32 {
        *self as i32
    }

    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        match ordinal {
            0 => Some(Level::Error),
            1 => Some(Level::Warn),
            2 => Some(Level::Info),
            3 => Some(Level::Log),
            4 => Some(Level::Debug),
            _ => None,
        }
    }

    /// Exact (case-insensitive) name lookup
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Level::ALL.iter().copied().find(|level| level.as_str() == lower)
    }

    /// Error and warn go to the error stream, everything else to the primary stream
    pub fn uses_error_stream(&self) -> bool {
        self.ordinal() <= Level::Warn.ordinal()
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw level input: either a name (or numeric string) or a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelValue {
    Name(String),
    Number(i64),
}

impl From<&str> for LevelValue {
    fn from(value: &str) -> Self {
        LevelValue::Name(value.to_string())
    }
}

impl From<String> for LevelValue {
    fn from(value: String) -> Self {
        LevelValue::Name(value)
    }
}

impl From<i64> for LevelValue {
    fn from(value: i64) -> Self {
        LevelValue::Number(value)
    }
}

impl From<i32> for LevelValue {
    fn from(value: i32) -> Self {
        LevelValue::Number(value as i64)
    }
}

impl From<Level> for LevelValue {
    fn from(value: Level) -> Self {
        LevelValue::Number(value.ordinal() as i64)
    }
}

/// Bidirectional name/ordinal mapping plus the default ordinal used when
/// a level value cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRegistry {
    default_ordinal: i32,
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self {
            default_ordinal: Level::Info.ordinal(),
        }
    }
}

/// Process-wide registry, initialized once from the environment
pub static REGISTRY: Lazy<LevelRegistry> = Lazy::new(LevelRegistry::from_env);

/// Environment flag that forces the most verbose level
pub const ENV_DEBUG: &str = "DEBUG";
/// Explicit level override, primary spelling
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
/// Explicit level override, alternate spelling
pub const ENV_LOG_LEVEL_ALT: &str = "LOGLEVEL";

impl LevelRegistry {
    /// Registry with an explicit default ordinal
    pub fn with_default(default_ordinal: i32) -> Self {
        Self { default_ordinal }
    }

    /// Build the registry from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the registry from any key -> value lookup.
    ///
    /// Priority: debug flag, then `LOG_LEVEL`, then `LOGLEVEL`, then `info`.
    /// Override values go through the same lenient resolution as every
    /// other level value, falling back to `info` when unparseable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();

        if lookup(ENV_DEBUG).map(|v| is_truthy(&v)).unwrap_or(false) {
            return Self::with_default(Level::Debug.ordinal());
        }

        let explicit = [ENV_LOG_LEVEL, ENV_LOG_LEVEL_ALT]
            .into_iter()
            .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()));

        match explicit {
            Some(value) => Self::with_default(base.number_of(value.trim())),
            None => base,
        }
    }

    pub fn default_ordinal(&self) -> i32 {
        self.default_ordinal
    }

    /// Resolve a level value to an ordinal. Never fails.
    ///
    /// 1. names match case-insensitively
    /// 2. in-range numbers (or plain decimal strings) are taken as-is
    /// 3. negative numbers mean "silence everything" (-1)
    /// 4. anything else resolves to the default ordinal
    pub fn number_of(&self, value: impl Into<LevelValue>) -> i32 {
        match value.into() {
            LevelValue::Name(name) => {
                let normalized = name.to_lowercase();
                if let Some(level) = Level::from_name(&normalized) {
                    return level.ordinal();
                }
                match canonical_integer(&normalized) {
                    Some(number) => self.number_of(number),
                    None => self.default_ordinal,
                }
            }
            LevelValue::Number(number) => {
                if number < 0 {
                    SILENT
                } else if number < Level::ALL.len() as i64 {
                    number as i32
                } else {
                    self.default_ordinal
                }
            }
        }
    }
}

/// Parse a plain decimal integer. Signs other than a leading `-`, padding
/// and leading zeros are rejected.
fn canonical_integer(value: &str) -> Option<i64> {
    let number = value.parse::<i64>().ok()?;
    (number.to_string() == value).then_some(number)
}

fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}
