//! Programmatic logger options
//!
//! Every field is optional. `Logger::new` fills unset fields from the
//! process defaults; `merge` layers one set of options over another with
//! later values winning and style trees merging recursively.

use crate::engine::ColorLevel;
use crate::levels::{LevelRegistry, LevelValue};
use crate::logger::{Formatter, Prefix, Prelog};
use crate::stream::Stream;
use crate::styles::StyleTree;

#[derive(Clone, Default)]
pub struct LoggerOptions {
    pub stdout: Option<Stream>,
    pub stderr: Option<Stream>,
    pub log_level: Option<LevelValue>,
    pub colors: Option<bool>,
    /// Exact color level; wins over `colors`
    pub color_level: Option<ColorLevel>,
    pub styles: Option<StyleTree>,
    pub prefix: Option<Prefix>,
    pub prelog: Option<Prelog>,
    pub format: Option<Formatter>,
    pub timestamp: Option<bool>,
    /// Registry used for level resolution; defaults to the process registry
    pub registry: Option<LevelRegistry>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout(mut self, stream: Stream) -> Self {
        self.stdout = Some(stream);
        self
    }

    pub fn stderr(mut self, stream: Stream) -> Self {
        self.stderr = Some(stream);
        self
    }

    pub fn log_level(mut self, level: impl Into<LevelValue>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn color_level(mut self, level: ColorLevel) -> Self {
        self.color_level = Some(level);
        self
    }

    pub fn styles(mut self, styles: StyleTree) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn prelog(mut self, prelog: Prelog) -> Self {
        self.prelog = Some(prelog);
        self
    }

    pub fn format(mut self, format: Formatter) -> Self {
        self.format = Some(format);
        self
    }

    pub fn timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn registry(mut self, registry: LevelRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Layer `over` on top of `self`
    pub fn merge(self, over: LoggerOptions) -> LoggerOptions {
        let styles = match (self.styles, over.styles) {
            (Some(base), Some(top)) => Some(base.merged(top)),
            (base, top) => top.or(base),
        };

        LoggerOptions {
            stdout: over.stdout.or(self.stdout),
            stderr: over.stderr.or(self.stderr),
            log_level: over.log_level.or(self.log_level),
            colors: over.colors.or(self.colors),
            color_level: over.color_level.or(self.color_level),
            styles,
            prefix: over.prefix.or(self.prefix),
            prelog: over.prelog.or(self.prelog),
            format: over.format.or(self.format),
            timestamp: over.timestamp.or(self.timestamp),
            registry: over.registry.or(self.registry),
        }
    }
}

impl std::fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerOptions")
            .field("stdout", &self.stdout)
            .field("stderr", &self.stderr)
            .field("log_level", &self.log_level)
            .field("colors", &self.colors)
            .field("color_level", &self.color_level)
            .field("styles", &self.styles)
            .field("prefix", &self.prefix.is_some())
            .field("prelog", &self.prelog.is_some())
            .field("format", &self.format.is_some())
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_later_wins() {
        let base = LoggerOptions::new().log_level("warn").colors(true).timestamp(true);
        let over = LoggerOptions::new().log_level("debug");

        let merged = base.merge(over);
        assert_eq!(merged.log_level, Some(LevelValue::Name("debug".into())));
        assert_eq!(merged.colors, Some(true));
        assert_eq!(merged.timestamp, Some(true));
    }

    #[test]
    fn test_merge_styles_recursively() {
        let mut first = StyleTree::empty();
        first.set_slot("info", "prefix", "green");
        first.set_slot("info", "default", "white");
        let mut second = StyleTree::empty();
        second.set_slot("info", "prefix", "blue");

        let merged = LoggerOptions::new()
            .styles(first)
            .merge(LoggerOptions::new().styles(second));
        let styles = merged.styles.unwrap();

        assert_eq!(styles.slot_descriptor("info", "prefix"), Some("blue"));
        assert_eq!(styles.slot_descriptor("info", "default"), Some("white"));
    }
}
