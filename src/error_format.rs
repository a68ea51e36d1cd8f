//! Error rendering
//!
//! `Name: message` on the first line, then the trace block unless the
//! caller asked for it to be skipped. Styles come from the `error` table
//! (`name`, `message`, `stack` slots).

use crate::errors::ErrorValue;
use crate::stack;
use crate::styles::StyleResolver;

const STYLE_LEVEL: &str = "error";

pub fn format_error(err: &ErrorValue, skip_stack: bool, styles: &StyleResolver) -> String {
    let parsed = stack::parse(err);
    let error_styles = styles.level(STYLE_LEVEL);

    let mut out = format!(
        "{}: {}",
        error_styles.paint("name", err.display_name()),
        error_styles.paint("message", &parsed.message)
    );

    if !skip_stack && !parsed.trace.is_empty() {
        let stack_style = error_styles.slot("stack");
        let trace: Vec<String> = parsed.trace.lines().map(|line| stack_style(line)).collect();
        out.push('\n');
        out.push_str(&trace.join("\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ColorEngine, ColorLevel};
    use crate::styles::StyleTree;
    use std::sync::Arc;

    fn plain_styles() -> StyleResolver {
        StyleResolver::new(StyleTree::defaults(), Arc::new(ColorEngine::new(ColorLevel::None)))
    }

    #[test]
    fn test_with_stack() {
        let err = ErrorValue::new("boom").with_trace("at src/main.rs:3:5");
        let out = format_error(&err, false, &plain_styles());
        assert_eq!(out, "Error: boom\n    at src/main.rs:3:5");
    }

    #[test]
    fn test_skip_stack() {
        let err = ErrorValue::new("boom").with_trace("at src/main.rs:3:5");
        let out = format_error(&err, true, &plain_styles());
        assert_eq!(out, "Error: boom");
    }

    #[test]
    fn test_explicit_name() {
        let err = ErrorValue::new("bad input").with_name("ValidationError").with_trace("");
        assert_eq!(format_error(&err, false, &plain_styles()), "ValidationError: bad input");
    }

    #[test]
    fn test_colored_output() {
        let styles =
            StyleResolver::new(StyleTree::defaults(), Arc::new(ColorEngine::new(ColorLevel::Basic)));
        let err = ErrorValue::new("boom");
        let out = format_error(&err, false, &styles);
        assert!(out.contains("\x1b["));
        assert!(out.lines().count() >= 2);
    }
}
