//! Placeholder-substitution format engine
//!
//! Handles:
//! - `%s %d %i %f %j %o %O %c %%` placeholders in a leading text argument
//! - Space-joined rendering of surplus arguments
//! - Value inspection, colorized when colors are on

use crate::args::Arg;
use crate::errors::ErrorValue;
use crate::stack;
use once_cell::sync::Lazy;
use owo_colors::OwoColorize;
use regex::Regex;
use serde_json::Value;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%[sdifjoOc%]").expect("placeholder pattern is valid"));

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid"));

/// Format a list of arguments into one string
pub fn format_values(args: &[Arg], colors: bool) -> String {
    let (first, rest) = match args.split_first() {
        Some(split) => split,
        None => return String::new(),
    };

    let mut out = String::new();
    let mut remaining = rest.iter();

    match first {
        Arg::Text(template) if !rest.is_empty() && template.contains('%') => {
            let mut last = 0;
            for found in PLACEHOLDER.find_iter(template) {
                out.push_str(&template[last..found.start()]);
                last = found.end();

                let directive = &found.as_str()[1..];
                if directive == "%" {
                    out.push('%');
                    continue;
                }

                match remaining.next() {
                    Some(arg) => out.push_str(&substitute(directive, arg, colors)),
                    None => out.push_str(found.as_str()),
                }
            }
            out.push_str(&template[last..]);
        }
        other => out.push_str(&render(other, colors)),
    }

    for arg in remaining {
        out.push(' ');
        out.push_str(&render(arg, colors));
    }

    out
}

/// Render one argument outside of a placeholder
pub fn render(arg: &Arg, colors: bool) -> String {
    match arg {
        Arg::Text(text) => text.clone(),
        Arg::Value(Value::String(text)) => text.clone(),
        Arg::Value(value) => inspect(value, colors),
        Arg::Error(err) => render_error(err),
        Arg::Field { name, value } => {
            let mut map = serde_json::Map::new();
            map.insert(name.clone(), value.clone());
            inspect(&Value::Object(map), colors)
        }
    }
}

fn substitute(directive: &str, arg: &Arg, colors: bool) -> String {
    match directive {
        "s" => match arg {
            Arg::Value(Value::String(s)) => s.clone(),
            Arg::Value(value @ (Value::Array(_) | Value::Object(_))) => inspect(value, false),
            Arg::Value(value) => plain_scalar(value),
            other => render(other, false),
        },
        "d" | "i" => {
            let number = to_number(arg);
            let number = if directive == "i" { number.trunc() } else { number };
            format_number(number)
        }
        "f" => format_number(to_number(arg)),
        "j" => match arg {
            Arg::Text(text) => Value::String(text.clone()).to_string(),
            Arg::Value(value) => value.to_string(),
            Arg::Error(err) => {
                serde_json::json!({ "name": err.display_name(), "message": err.message }).to_string()
            }
            Arg::Field { name, value } => {
                let mut map = serde_json::Map::new();
                map.insert(name.clone(), value.clone());
                Value::Object(map).to_string()
            }
        },
        "o" | "O" => match arg {
            Arg::Text(text) => inspect(&Value::String(text.clone()), colors),
            other => render(other, colors),
        },
        // CSS directives are consumed and produce nothing
        "c" => String::new(),
        _ => render(arg, colors),
    }
}

fn to_number(arg: &Arg) -> f64 {
    match arg {
        Arg::Text(text) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
        Arg::Value(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Arg::Value(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        Arg::Value(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Arg::Value(Value::Null) => 0.0,
        _ => f64::NAN,
    }
}

fn format_number(number: f64) -> String {
    if number.is_nan() {
        "NaN".to_string()
    } else if number.is_infinite() {
        if number > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        format!("{}", number)
    }
}

fn plain_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render an error the way the unstyled print path shows it
fn render_error(err: &ErrorValue) -> String {
    let parsed = stack::parse(err);
    if parsed.trace.is_empty() {
        format!("{}: {}", err.display_name(), parsed.message)
    } else {
        format!("{}: {}\n{}", err.display_name(), parsed.message, parsed.trace)
    }
}

/// Human-readable rendering of plain data
pub fn inspect(value: &Value, colors: bool) -> String {
    inspect_nested(value, colors, false)
}

fn inspect_nested(value: &Value, colors: bool, nested: bool) -> String {
    match value {
        Value::Null => paint(colors, "null", |s| s.bold().to_string()),
        Value::Bool(b) => paint(colors, &b.to_string(), |s| s.yellow().to_string()),
        Value::Number(n) => paint(colors, &n.to_string(), |s| s.yellow().to_string()),
        Value::String(s) if nested => {
            let quoted = format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"));
            paint(colors, &quoted, |s| s.green().to_string())
        }
        Value::String(s) => s.clone(),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|item| inspect_nested(item, colors, true))
                .collect();
            format!("[ {} ]", parts.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(key, item)| {
                    let key = if IDENTIFIER.is_match(key) {
                        key.clone()
                    } else {
                        format!("'{}'", key)
                    };
                    format!("{}: {}", key, inspect_nested(item, colors, true))
                })
                .collect();
            format!("{{ {} }}", parts.join(", "))
        }
    }
}

fn paint<F>(colors: bool, text: &str, style: F) -> String
where
    F: Fn(&str) -> String,
{
    if colors {
        style(text)
    } else {
        text.to_string()
    }
}
