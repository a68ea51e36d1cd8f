//! Style descriptor compiler
//!
//! Turns a descriptor such as `"red.bold"`, `"bgBlue white"` or
//! `"#ff8800.underline"` into a reusable `(text) -> text` function bound
//! to a color engine.

use crate::engine::{ColorEngine, Effect, Paint, StyleSpec};
use owo_colors::AnsiColors;
use std::sync::Arc;

/// A compiled style function
pub type StyleFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Parse a descriptor into a style spec. Unknown tokens are skipped.
pub fn parse_descriptor(descriptor: &str) -> StyleSpec {
    let mut spec = StyleSpec::default();

    for token in descriptor
        .split(|c: char| c == '.' || c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if let Some(effect) = parse_effect(token) {
            if !spec.effects.contains(&effect) {
                spec.effects.push(effect);
            }
            continue;
        }

        let lower = token.to_lowercase();
        if matches!(lower.as_str(), "reset" | "none" | "default" | "plain") {
            continue;
        }

        let (is_background, color_token) = strip_background(&lower);
        match parse_paint(color_token) {
            Some(paint) if is_background => spec.bg = Some(paint),
            Some(paint) => spec.fg = Some(paint),
            None => {
                log::debug!(target: "stylelog::styles", "Ignoring unknown style token '{}' in '{}'", token, descriptor);
            }
        }
    }

    spec
}

/// Compile a descriptor into a style function bound to `engine`
pub fn compile(descriptor: &str, engine: &Arc<ColorEngine>) -> StyleFn {
    let spec = parse_descriptor(descriptor);
    let engine = Arc::clone(engine);
    log::trace!(target: "stylelog::styles", "Compiled style descriptor '{}'", descriptor);
    Arc::new(move |text: &str| engine.paint(&spec, text))
}

fn parse_effect(token: &str) -> Option<Effect> {
    match token.to_lowercase().as_str() {
        "bold" => Some(Effect::Bold),
        "dim" | "dimmed" => Some(Effect::Dim),
        "italic" => Some(Effect::Italic),
        "underline" | "underlined" => Some(Effect::Underline),
        "inverse" | "reversed" => Some(Effect::Inverse),
        "hidden" => Some(Effect::Hidden),
        "strikethrough" => Some(Effect::Strikethrough),
        _ => None,
    }
}

fn strip_background(token: &str) -> (bool, &str) {
    for prefix in ["bg_", "on_", "bg"] {
        if let Some(rest) = token.strip_prefix(prefix) {
            if !rest.is_empty() {
                return (true, rest);
            }
        }
    }
    (false, token)
}

fn parse_paint(token: &str) -> Option<Paint> {
    if let Some(hex) = token.strip_prefix('#') {
        return parse_hex(hex);
    }

    let (bright, base) = if let Some(rest) = token.strip_prefix("bright_") {
        (true, rest)
    } else if let Some(rest) = token.strip_suffix("bright") {
        (true, rest.trim_end_matches('_'))
    } else if let Some(rest) = token.strip_prefix("bright") {
        (true, rest)
    } else {
        (false, token)
    };

    let color = match (base, bright) {
        ("black", false) => AnsiColors::Black,
        ("black", true) => AnsiColors::BrightBlack,
        ("red", false) => AnsiColors::Red,
        ("red", true) => AnsiColors::BrightRed,
        ("green", false) => AnsiColors::Green,
        ("green", true) => AnsiColors::BrightGreen,
        ("yellow", false) => AnsiColors::Yellow,
        ("yellow", true) => AnsiColors::BrightYellow,
        ("blue", false) => AnsiColors::Blue,
        ("blue", true) => AnsiColors::BrightBlue,
        ("magenta", false) | ("purple", false) => AnsiColors::Magenta,
        ("magenta", true) | ("purple", true) => AnsiColors::BrightMagenta,
        ("cyan", false) => AnsiColors::Cyan,
        ("cyan", true) => AnsiColors::BrightCyan,
        ("white", false) => AnsiColors::White,
        ("white", true) => AnsiColors::BrightWhite,
        ("gray", false) | ("grey", false) => AnsiColors::BrightBlack,
        ("gray", true) | ("grey", true) => AnsiColors::White,
        _ => return None,
    };

    Some(Paint::Ansi(color))
}

fn parse_hex(hex: &str) -> Option<Paint> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Paint::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ColorLevel;

    #[test]
    fn test_parse_simple_descriptor() {
        let spec = parse_descriptor("red.bold");
        assert_eq!(spec.fg, Some(Paint::Ansi(AnsiColors::Red)));
        assert_eq!(spec.effects, vec![Effect::Bold]);
        assert_eq!(spec.bg, None);
    }

    #[test]
    fn test_parse_background_and_bright() {
        let spec = parse_descriptor("bgBlue whiteBright");
        assert_eq!(spec.bg, Some(Paint::Ansi(AnsiColors::Blue)));
        assert_eq!(spec.fg, Some(Paint::Ansi(AnsiColors::BrightWhite)));

        let spec = parse_descriptor("on_red, bright_yellow");
        assert_eq!(spec.bg, Some(Paint::Ansi(AnsiColors::Red)));
        assert_eq!(spec.fg, Some(Paint::Ansi(AnsiColors::BrightYellow)));
    }

    #[test]
    fn test_parse_hex() {
        let spec = parse_descriptor("#ff8800.underline");
        assert_eq!(spec.fg, Some(Paint::Rgb(0xff, 0x88, 0x00)));
        assert_eq!(spec.effects, vec![Effect::Underline]);

        let spec = parse_descriptor("bg#0f0");
        assert_eq!(spec.bg, Some(Paint::Rgb(0, 0xff, 0)));
    }

    #[test]
    fn test_parse_hex_rejects_non_ascii() {
        assert!(parse_descriptor("#€").is_plain());
        assert!(parse_descriptor("#a€bc").is_plain());
        assert!(parse_descriptor("bg#€€").is_plain());
        assert_eq!(parse_descriptor("#a€bc.red").fg, Some(Paint::Ansi(AnsiColors::Red)));
    }

    #[test]
    fn test_unknown_and_reset_tokens() {
        assert!(parse_descriptor("reset").is_plain());
        assert!(parse_descriptor("sparkly").is_plain());
        assert!(parse_descriptor("").is_plain());
        assert_eq!(
            parse_descriptor("sparkly.green").fg,
            Some(Paint::Ansi(AnsiColors::Green))
        );
    }

    #[test]
    fn test_gray_aliases() {
        assert_eq!(parse_descriptor("gray").fg, parse_descriptor("grey").fg);
        assert_eq!(parse_descriptor("gray").fg, Some(Paint::Ansi(AnsiColors::BrightBlack)));
    }

    #[test]
    fn test_compiled_function_follows_engine() {
        let engine = Arc::new(ColorEngine::new(ColorLevel::None));
        let red = compile("red", &engine);
        assert_eq!(red("x"), "x");

        engine.set_level(ColorLevel::Basic);
        assert_ne!(red("x"), "x");
        assert!(red("x").contains('x'));
    }
}
