//! Reusable field validators
//!
//! Each validator receives the serialized field name and its JSON value and
//! returns a short message on failure. Validators other than [`required`]
//! let `null` through so a missing field is reported once.

use regex::Regex;
use serde_json::Value;

/// Boxed validator as stored by [`super::PayloadValidator`]
pub type Validator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

/// Validator: field is required (not null, not a blank string)
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value {
        Value::Null => Err("is required".to_string()),
        Value::String(s) if s.trim().is_empty() => Err("is required".to_string()),
        _ => Ok(()),
    }
}

/// Validator: value must be a string
pub fn string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| {
        if value.is_null() || value.is_string() {
            Ok(())
        } else {
            Err(format!("must be a string (value: {})", value))
        }
    }
}

/// Validator: value must be an integer
pub fn integer() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| {
        if value.is_null() || value.as_i64().is_some() {
            Ok(())
        } else {
            Err(format!("must be an integer (value: {})", value))
        }
    }
}

/// Validator: number must be strictly positive
pub fn positive() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value.as_f64() {
        Some(num) if num <= 0.0 => Err(format!("must be positive (value: {})", num)),
        _ => Ok(()),
    }
}

/// Validator: string must match the pattern; `hint` describes the expected shape
pub fn matches(
    pattern: &'static Regex,
    hint: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if !pattern.is_match(s) => Err(format!("{} (value: {})", hint, s)),
        _ => Ok(()),
    }
}
