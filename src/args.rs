//! Log call arguments
//!
//! Every positional argument of a log call is one of a closed set of kinds,
//! so the pre-processing pipeline matches on the kind instead of guessing
//! from the shape of the value.

use crate::errors::ErrorValue;
use serde_json::Value;

/// Field name whose truthy value suppresses stack traces for the call
pub const THROWING: &str = "throwing";

#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Plain text, styled with the level's default style
    Text(String),
    /// Arbitrary plain data, rendered by the format engine
    Value(Value),
    /// An error, rendered by the error formatter
    Error(ErrorValue),
    /// A named fragment rendered as `name: value` with the slot style `name`
    Field { name: String, value: Value },
}

impl Arg {
    pub fn text(value: impl Into<String>) -> Self {
        Arg::Text(value.into())
    }

    pub fn field(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Arg::Field {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Marker that suppresses the stack trace of errors in the same call
    pub fn throwing() -> Self {
        Arg::field(THROWING, true)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Arg::Value(Value::Null))
    }

    /// True for a `throwing` field with a truthy value
    pub fn is_throwing_marker(&self) -> bool {
        match self {
            Arg::Field { name, value } if name == THROWING => is_truthy(value),
            _ => false,
        }
    }
}

/// JavaScript-style truthiness for plain data
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Text(value.clone())
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<ErrorValue> for Arg {
    fn from(value: ErrorValue) -> Self {
        Arg::Error(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Value(Value::Bool(value))
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(value: $t) -> Self {
                    Arg::Value(Value::from(value))
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Arg::Value(Value::Null))
    }
}

/// Build a `Vec<Arg>` from heterogeneous values
///
/// ```
/// use stylelog::{args, Arg};
/// let list = args!["copied", 3, "files", Arg::field("path", "/tmp")];
/// assert_eq!(list.len(), 4);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        vec![$($crate::Arg::from($arg)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_throwing_marker() {
        assert!(Arg::throwing().is_throwing_marker());
        assert!(Arg::field("throwing", 1).is_throwing_marker());
        assert!(!Arg::field("throwing", false).is_throwing_marker());
        assert!(!Arg::field("throwing", "").is_throwing_marker());
        assert!(!Arg::field("path", true).is_throwing_marker());
        assert!(!Arg::text("throwing").is_throwing_marker());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Arg::from("a"), Arg::Text("a".into()));
        assert_eq!(Arg::from(3), Arg::Value(json!(3)));
        assert_eq!(Arg::from(true), Arg::Value(json!(true)));
        assert!(Arg::from(None::<&str>).is_null());
        assert_eq!(Arg::from(Some("x")), Arg::Text("x".into()));
    }

    #[test]
    fn test_args_macro() {
        let list = crate::args!["a", 1, json!({"k": "v"})];
        assert_eq!(list.len(), 3);
        assert_eq!(list[2], Arg::Value(json!({"k": "v"})));
        assert!(crate::args![].is_empty());
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(is_truthy(&json!(0.5)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!("x")));
    }
}
