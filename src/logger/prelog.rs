//! Argument pre-processing
//!
//! Runs after the threshold gate and before formatting. The default
//! pipeline styles text, renders errors and turns known fields into
//! `name: value` fragments.

use super::Logger;
use crate::args::{Arg, THROWING};
use crate::levels::Level;
use serde_json::Value;
use std::sync::Arc;

/// Prelog callable.
///
/// Returning `Some` replaces the argument list; `None` keeps the list as
/// the callable left it.
pub type PrelogFn = Arc<dyn Fn(&Logger, Level, &mut Vec<Arg>) -> Option<Vec<Arg>> + Send + Sync>;

#[derive(Clone, Default)]
pub enum Prelog {
    #[default]
    Default,
    Custom(PrelogFn),
}

impl Prelog {
    pub fn custom<F>(prelog: F) -> Self
    where
        F: Fn(&Logger, Level, &mut Vec<Arg>) -> Option<Vec<Arg>> + Send + Sync + 'static,
    {
        Prelog::Custom(Arc::new(prelog))
    }

    pub fn run(&self, logger: &Logger, level: Level, args: &mut Vec<Arg>) -> Option<Vec<Arg>> {
        match self {
            Prelog::Default => default_prelog(logger, level, args),
            Prelog::Custom(prelog) => prelog(logger, level, args),
        }
    }
}

impl std::fmt::Debug for Prelog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prelog::Default => write!(f, "Prelog::Default"),
            Prelog::Custom(_) => write!(f, "Prelog::Custom(..)"),
        }
    }
}

/// Built-in pre-processing, applied in place
///
/// - text gets the level's `default` style
/// - errors are rendered, without stack traces if any argument is a
///   truthy `throwing` field
/// - a `throwing` field after a rendered error is dropped
/// - a string field whose name is a slot of the level becomes
///   `name: <styled value>`
/// - nulls are dropped
pub fn default_prelog(logger: &Logger, level: Level, args: &mut Vec<Arg>) -> Option<Vec<Arg>> {
    let skip_stack = args.iter().any(Arg::is_throwing_marker);
    let styles = logger.styles().level(level.as_str());
    let mut has_error = false;

    let processed: Vec<Arg> = std::mem::take(args)
        .into_iter()
        .filter_map(|arg| match arg {
            Arg::Text(text) => Some(Arg::Text(styles.paint("default", &text))),
            Arg::Value(Value::String(text)) => {
                Some(Arg::Value(Value::String(styles.paint("default", &text))))
            }
            Arg::Error(err) => {
                has_error = true;
                Some(Arg::Text(logger.format_error(&err, skip_stack)))
            }
            Arg::Field { name, .. } if name == THROWING && has_error => None,
            Arg::Field {
                name,
                value: Value::String(value),
            } if styles.has_slot(&name) => {
                Some(Arg::Text(format!("{}: {}", name, styles.paint(&name, &value))))
            }
            Arg::Value(Value::Null) => None,
            other => Some(other),
        })
        .collect();

    *args = processed;
    None
}
