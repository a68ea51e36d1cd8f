//! Stack parser
//!
//! Splits a captured error into its message and an indented trace block.

use crate::errors::ErrorValue;

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStack {
    pub message: String,
    /// Indented trace lines joined by newlines, empty when there is no trace
    pub trace: String,
}

pub fn parse(err: &ErrorValue) -> ParsedStack {
    let mut lines: Vec<String> = err
        .trace
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("{}{}", INDENT, line))
        .collect();

    lines.extend(
        err.causes
            .iter()
            .map(|cause| format!("{}caused by: {}", INDENT, cause)),
    );

    ParsedStack {
        message: err.message.clone(),
        trace: lines.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_is_indented() {
        let err = ErrorValue::new("boom").with_trace("at main.rs:1:1\n\n   at lib.rs:2:2  ");
        let parsed = parse(&err);
        assert_eq!(parsed.message, "boom");
        assert_eq!(parsed.trace, "    at main.rs:1:1\n    at lib.rs:2:2");
    }

    #[test]
    fn test_causes_follow_frames() {
        let mut err = ErrorValue::new("outer").with_trace("at a.rs:1:1");
        err.causes.push("inner".to_string());
        let parsed = parse(&err);
        assert_eq!(parsed.trace, "    at a.rs:1:1\n    caused by: inner");
    }

    #[test]
    fn test_empty_trace() {
        let err = ErrorValue::new("quiet").with_trace("");
        assert!(parse(&err).trace.is_empty());
    }
}
