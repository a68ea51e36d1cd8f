//! Line prefixes
//!
//! The default provider gives `info` a single glyph and every other level
//! a bracketed upper-case tag, optionally preceded by the local time.

use super::Logger;
use crate::args::Arg;
use crate::levels::Level;
use chrono::Local;
use std::sync::Arc;

/// Glyph used as the `info` prefix
pub const INFO_GLYPH: &str = "❯";

/// Prefix callable: receives the level being logged
pub type PrefixFn = Arc<dyn Fn(&Logger, Level) -> Vec<Arg> + Send + Sync>;

#[derive(Clone)]
pub enum Prefix {
    /// Same arguments for every level
    Fixed(Vec<Arg>),
    /// Computed per call
    Provider(PrefixFn),
}

impl Prefix {
    pub fn fixed(args: Vec<Arg>) -> Self {
        Prefix::Fixed(args)
    }

    /// No prefix at all
    pub fn none() -> Self {
        Prefix::Fixed(Vec::new())
    }

    pub fn provider<F>(provider: F) -> Self
    where
        F: Fn(&Logger, Level) -> Vec<Arg> + Send + Sync + 'static,
    {
        Prefix::Provider(Arc::new(provider))
    }

    pub fn resolve(&self, logger: &Logger, level: Level) -> Vec<Arg> {
        match self {
            Prefix::Fixed(args) => args.clone(),
            Prefix::Provider(provider) => provider(logger, level),
        }
    }
}

impl Default for Prefix {
    fn default() -> Self {
        Prefix::Provider(Arc::new(default_prefix))
    }
}

impl std::fmt::Debug for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prefix::Fixed(args) => f.debug_tuple("Prefix::Fixed").field(args).finish(),
            Prefix::Provider(_) => write!(f, "Prefix::Provider(..)"),
        }
    }
}

/// Built-in prefix: `❯` for info, `[LEVEL]` for the rest
pub fn default_prefix(logger: &Logger, level: Level) -> Vec<Arg> {
    let styles = logger.styles();
    let mut parts = Vec::with_capacity(2);

    if logger.timestamp() {
        let time = Local::now().format("%H:%M:%S").to_string();
        parts.push(Arg::Text(styles.paint("timestamp", "default", &time)));
    }

    let tag = if level == Level::Info {
        styles.paint(level.as_str(), "prefix", INFO_GLYPH)
    } else {
        let brace = styles.get("brace", "default");
        format!(
            "{}{}{}",
            brace("["),
            styles.paint(level.as_str(), "prefix", &level.as_str().to_uppercase()),
            brace("]")
        )
    };
    parts.push(Arg::Text(tag));

    parts
}
