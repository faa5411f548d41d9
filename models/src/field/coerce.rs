//! Conversion of loosely-typed values into a field's declared type.
//!
//! Values reach `set_field` from grid editors, config files and the command
//! line, so numbers may arrive as strings and flags as `0`/`1`. Coercion is
//! lenient about representation but never lossy: `1.5` does not become an
//! integer and `"abc"` does not become `0`.

use serde_json::Value;

/// A type a dynamic [`Value`] can be coerced into.
pub trait Coerce: Sized {
    /// Human-readable type name used in coercion errors.
    fn type_name() -> String;

    /// Returns `None` when the value cannot represent `Self`.
    fn coerce(value: &Value) -> Option<Self>;
}

impl Coerce for i64 {
    fn type_name() -> String {
        String::from("integer")
    }

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(text) => text.trim().parse().ok(),
            Value::Bool(flag) => Some(i64::from(*flag)),
            _ => None,
        }
    }
}

impl Coerce for i32 {
    fn type_name() -> String {
        String::from("32-bit integer")
    }

    fn coerce(value: &Value) -> Option<Self> {
        i64::coerce(value).and_then(|wide| i32::try_from(wide).ok())
    }
}

impl Coerce for f64 {
    fn type_name() -> String {
        String::from("number")
    }

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse().ok().filter(|f: &f64| f.is_finite()),
            _ => None,
        }
    }
}

impl Coerce for bool {
    fn type_name() -> String {
        String::from("boolean")
    }

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(flag) => Some(*flag),
            Value::Number(number) => match number.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Coerce for String {
    fn type_name() -> String {
        String::from("string")
    }

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }
}

impl<T: Coerce> Coerce for Vec<T> {
    fn type_name() -> String {
        format!("list of {}", T::type_name())
    }

    /// A scalar is accepted as a one-element list.
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => items.iter().map(T::coerce).collect(),
            Value::Null | Value::Object(_) => None,
            scalar => T::coerce(scalar).map(|item| vec![item]),
        }
    }
}

impl<T: Coerce> Coerce for Option<T> {
    fn type_name() -> String {
        format!("optional {}", T::type_name())
    }

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            present => T::coerce(present).map(Some),
        }
    }
}
