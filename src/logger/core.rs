//! Core dispatch with threshold gating
//!
//! This module contains the routine every level method funnels into:
//! - Resolves the level and checks it against the threshold
//! - Picks the destination stream
//! - Runs the prelog, the prefix provider and the formatter
//! - Writes one line

use super::Logger;
use crate::args::Arg;
use crate::levels::{Level, LevelValue};

impl Logger {
    /// Check if a call at `ordinal` passes the threshold
    ///
    /// A threshold of -1 rejects every real level.
    pub fn should_log(&self, ordinal: i32) -> bool {
        ordinal <= self.log_level()
    }

    /// Dispatch a call at any level value.
    ///
    /// The level is resolved through the logger's registry, so names,
    /// ordinals and numeric strings are all accepted. Calls rejected by
    /// the threshold have no effect at all.
    pub fn log_at(&self, level: impl Into<LevelValue>, args: Vec<Arg>) {
        let ordinal = self.registry.number_of(level);
        if !self.should_log(ordinal) {
            return;
        }

        let level = match Level::from_ordinal(ordinal) {
            Some(level) => level,
            None => {
                log::trace!(target: "stylelog::logger", "Dropping call at non-level ordinal {}", ordinal);
                return;
            }
        };

        let stream = if level.uses_error_stream() {
            self.stderr()
        } else {
            self.stdout()
        };

        let mut args = args;
        if let Some(replaced) = self.prelog.run(self, level, &mut args) {
            args = replaced;
        }

        let prefix_args = self.prefix.resolve(self, level);
        let prefix = if prefix_args.is_empty() {
            String::new()
        } else {
            self.format(&prefix_args)
        };
        let body = self.format(&args);

        let mut line = String::with_capacity(prefix.len() + body.len() + 2);
        line.push_str(&prefix);
        if !prefix.is_empty() && !body.is_empty() {
            line.push(' ');
        }
        line.push_str(&body);
        line.push('\n');

        stream.write_str(&line);
    }
}
