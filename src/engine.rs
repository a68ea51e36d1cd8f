//! Color engine
//!
//! Holds the active color level for one logger. Compiled style functions
//! keep a handle to the engine and consult the level every time they
//! paint, so toggling colors takes effect without recompiling styles.

use colored::control::ShouldColorize;
use once_cell::sync::Lazy;
use owo_colors::{AnsiColors, DynColors, Style, XtermColors};
use std::env;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorLevel {
    None = 0,      // Plain text
    Basic = 1,     // 16 ANSI colors
    Ansi256 = 2,   // xterm 256-color palette
    TrueColor = 3, // 24-bit RGB
}

/// Color level detected once for the process
pub static DETECTED_LEVEL: Lazy<ColorLevel> = Lazy::new(ColorLevel::detect);

impl ColorLevel {
    /// Detect the color level supported by the current terminal.
    ///
    /// `colored` decides whether to colorize at all (NO_COLOR, CLICOLOR,
    /// CLICOLOR_FORCE, tty); COLORTERM and TERM pick the depth.
    pub fn detect() -> Self {
        if !ShouldColorize::from_env().should_colorize() {
            return ColorLevel::None;
        }

        let colorterm = env::var("COLORTERM").unwrap_or_default().to_lowercase();
        if colorterm == "truecolor" || colorterm == "24bit" {
            return ColorLevel::TrueColor;
        }

        let term = env::var("TERM").unwrap_or_default();
        if term.contains("256") {
            ColorLevel::Ansi256
        } else {
            ColorLevel::Basic
        }
    }

    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => ColorLevel::None,
            1 => ColorLevel::Basic,
            2 => ColorLevel::Ansi256,
            _ => ColorLevel::TrueColor,
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// A color in a style descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Ansi(AnsiColors),
    Rgb(u8, u8, u8),
}

/// Text effects a descriptor can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Bold,
    Dim,
    Italic,
    Underline,
    Inverse,
    Hidden,
    Strikethrough,
}

/// Parsed form of a style descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSpec {
    pub fg: Option<Paint>,
    pub bg: Option<Paint>,
    pub effects: Vec<Effect>,
}

impl StyleSpec {
    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.effects.is_empty()
    }
}

#[derive(Debug)]
pub struct ColorEngine {
    level: AtomicU8,
}

impl ColorEngine {
    pub fn new(level: ColorLevel) -> Self {
        Self {
            level: AtomicU8::new(level.as_u8()),
        }
    }

    pub fn level(&self) -> ColorLevel {
        ColorLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: ColorLevel) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    pub fn enabled(&self) -> bool {
        self.level() != ColorLevel::None
    }

    /// Apply a parsed style to text at the current color level
    pub fn paint(&self, spec: &StyleSpec, text: &str) -> String {
        let level = self.level();
        if level == ColorLevel::None || spec.is_plain() || text.is_empty() {
            return text.to_string();
        }

        let mut style = Style::new();
        if let Some(fg) = spec.fg {
            style = style.color(downsample(fg, level));
        }
        if let Some(bg) = spec.bg {
            style = style.on_color(downsample(bg, level));
        }
        for effect in &spec.effects {
            style = match effect {
                Effect::Bold => style.bold(),
                Effect::Dim => style.dimmed(),
                Effect::Italic => style.italic(),
                Effect::Underline => style.underline(),
                Effect::Inverse => style.reversed(),
                Effect::Hidden => style.hidden(),
                Effect::Strikethrough => style.strikethrough(),
            };
        }

        style.style(text).to_string()
    }
}

fn downsample(paint: Paint, level: ColorLevel) -> DynColors {
    match paint {
        Paint::Ansi(color) => DynColors::Ansi(color),
        Paint::Rgb(r, g, b) => match level {
            ColorLevel::TrueColor => DynColors::Rgb(r, g, b),
            ColorLevel::Ansi256 => DynColors::Xterm(XtermColors::from(rgb_to_ansi256(r, g, b))),
            _ => DynColors::Ansi(rgb_to_basic(r, g, b)),
        },
    }
}

/// Nearest xterm-256 palette index
pub fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return (((r as f32 - 8.0) / 247.0) * 24.0).round() as u8 + 232;
    }

    let scale = |c: u8| ((c as f32 / 255.0) * 5.0).round() as u8;
    16 + 36 * scale(r) + 6 * scale(g) + scale(b)
}

/// Nearest of the 16 basic colors
pub fn rgb_to_basic(r: u8, g: u8, b: u8) -> AnsiColors {
    let brightness = ((r.max(g).max(b) as f32 / 255.0) * 2.0).round() as u8;
    if brightness == 0 {
        return AnsiColors::Black;
    }

    let bit = |c: u8| (c as f32 / 255.0).round() as u8;
    let code = (bit(b) << 2) | (bit(g) << 1) | bit(r);
    let bright = brightness == 2;

    match (code, bright) {
        (0, false) => AnsiColors::Black,
        (0, true) => AnsiColors::BrightBlack,
        (1, false) => AnsiColors::Red,
        (1, true) => AnsiColors::BrightRed,
        (2, false) => AnsiColors::Green,
        (2, true) => AnsiColors::BrightGreen,
        (3, false) => AnsiColors::Yellow,
        (3, true) => AnsiColors::BrightYellow,
        (4, false) => AnsiColors::Blue,
        (4, true) => AnsiColors::BrightBlue,
        (5, false) => AnsiColors::Magenta,
        (5, true) => AnsiColors::BrightMagenta,
        (6, false) => AnsiColors::Cyan,
        (6, true) => AnsiColors::BrightCyan,
        (_, false) => AnsiColors::White,
        (_, true) => AnsiColors::BrightWhite,
    }
}
