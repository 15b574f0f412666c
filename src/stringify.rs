//! Display strings for map-entry keys.
//!
//! Map keys that are not already strings are turned into key segments here.
//! The conversion never fails: absent values give the empty string and kinds
//! without a dedicated rendering fall back to [`Value`]'s `Display`.

use crate::value::{format_float, Number, Value};

/// Renders a scalar as a key segment.
///
/// Any-typed slots are looked through; an absent value at any depth renders
/// as `""`. Floats use the shortest text that round-trips at their source
/// width, switching to exponent form below `1e-4` and from `1e6` up
/// (`1e+21`, `1e-07`); infinities render as `+Inf` and `-Inf`.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::{key_string, Value};
///
/// assert_eq!(key_string(&Value::from(42u8)), "42");
/// assert_eq!(key_string(&Value::from(false)), "false");
/// assert_eq!(key_string(&Value::from(0.1f32)), "0.1");
/// assert_eq!(key_string(&Value::Nil), "");
/// ```
#[must_use]
pub fn key_string(value: &Value) -> String {
    match value {
        Value::Nil | Value::Dynamic(None) => String::new(),
        Value::Dynamic(Some(inner)) => key_string(inner),
        Value::String(s) => s.clone(),
        Value::Char(c) => c.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(Number::Int(i)) => i.to_string(),
        Value::Number(Number::Uint(u)) => u.to_string(),
        Value::Number(Number::F32(f)) => format_float(*f),
        Value::Number(Number::F64(f)) => format_float(*f),
        Value::BigInt(bi) => bi.to_string(),
        other => other.to_string(),
    }
}
