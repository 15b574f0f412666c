//! Dynamic value representation for flattening input and output.
//!
//! This module provides the [`Value`] enum, which is both the shape the
//! flattening engine walks and the leaf type stored in a [`FlatMap`](crate::FlatMap).
//!
//! ## Core Types
//!
//! - [`Value`]: any value the engine understands (nil, scalars, containers, records, any-slots)
//! - [`Number`]: integer and floating-point scalars, keeping the source width for floats
//! - [`Record`] / [`Field`]: a composite value with named, ordered, annotated fields
//!
//! ## Building Records by Hand
//!
//! ```rust
//! use serde_dotted::{Field, Record, Value};
//!
//! let record = Record::new("Point")
//!     .with_field(Field::new("x", 1))
//!     .with_field(Field::new("y", 2).tagged("yCoord"))
//!     .with_field(Field::new("secret", "hunter2").hidden());
//!
//! assert_eq!(record.len(), 3);
//! assert!(Value::Record(record).is_record());
//! ```
//!
//! ## Absent Values
//!
//! [`Value::Nil`] stands for an absent reference (`None`, an empty `Box`-like
//! pointer, or serde's `none`/`unit`). Containers carry their own unset state:
//! `Value::Seq(None)` and `Value::Map(None)` differ from an empty container,
//! and `Value::Dynamic(None)` is an unset any-typed slot.

use crate::stringify::key_string;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use std::fmt;

/// A dynamically-typed value.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::{Number, Value};
///
/// let nil = Value::Nil;
/// let num = Value::Number(Number::Int(42));
/// let text = Value::from("hello");
///
/// assert!(nil.is_nil());
/// assert!(num.is_number());
/// assert_eq!(text.as_str(), Some("hello"));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(Number),
    Char(char),
    String(String),
    BigInt(BigInt),
    Date(DateTime<Utc>),
    Seq(Option<Vec<Value>>),
    Map(Option<Vec<(Value, Value)>>),
    Record(Record),
    Dynamic(Option<Box<Value>>),
}

/// A numeric scalar.
///
/// Floats keep their source width so that a value read from an `f32` renders
/// with the digits an `f32` needs rather than those of its `f64` widening.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::Number;
///
/// assert_eq!(Number::Int(-3).as_i64(), Some(-3));
/// assert_eq!(Number::Uint(7).as_i64(), Some(7));
/// assert_eq!(Number::F32(0.1).to_string(), "0.1");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Uint(u64),
    F32(f32),
    F64(f64),
}

impl Number {
    /// Returns `true` if this is a signed or unsigned integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Int(_) | Number::Uint(_))
    }

    /// Returns `true` if this is a floating-point value of either width.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::F32(_) | Number::F64(_))
    }

    /// Converts this number to an `i64` if it is an integer that fits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::Number;
    ///
    /// assert_eq!(Number::Int(42).as_i64(), Some(42));
    /// assert_eq!(Number::Uint(u64::MAX).as_i64(), None);
    /// assert_eq!(Number::F64(1.0).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(*i),
            Number::Uint(u) => i64::try_from(*u).ok(),
            Number::F32(_) | Number::F64(_) => None,
        }
    }

    /// Converts this number to a `u64` if it is a non-negative integer.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Number::Int(i) => u64::try_from(*i).ok(),
            Number::Uint(u) => Some(*u),
            Number::F32(_) | Number::F64(_) => None,
        }
    }

    /// Converts this number to an `f64`, possibly losing precision for large integers.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::Uint(u) => *u as f64,
            Number::F32(f) => f64::from(*f),
            Number::F64(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Uint(u) => write!(f, "{}", u),
            Number::F32(fl) => f.write_str(&format_float(*fl)),
            Number::F64(fl) => f.write_str(&format_float(*fl)),
        }
    }
}

/// Decimal exponents in this range are written positionally; the rest use
/// exponent form.
const POSITIONAL_EXPONENTS: std::ops::Range<i32> = -4..6;

/// Shortest text that round-trips at the value's own width.
///
/// Exponent form has a sign and at least two exponent digits (`1e+21`,
/// `1.5e-07`). Infinities are `+Inf` and `-Inf`, not-a-number is `NaN`.
pub(crate) fn format_float<F>(value: F) -> String
where
    F: fmt::Display + fmt::LowerExp + Into<f64> + Copy,
{
    let wide: f64 = value.into();
    if wide.is_nan() {
        return "NaN".to_string();
    }
    if wide.is_infinite() {
        return if wide > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };
    if POSITIONAL_EXPONENTS.contains(&exponent) {
        return value.to_string();
    }

    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}

/// A composite value with named, ordered fields.
///
/// `name` is the type name used only for diagnostics; keys are derived from
/// the fields.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Record {
    name: &'static str,
    fields: Vec<Field>,
}

/// One field of a [`Record`].
///
/// `tag` holds the raw annotation string (`segment[,directive]*`) when the
/// field carries one.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub exported: bool,
    pub tag: Option<&'static str>,
    pub value: Value,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Record {
            name,
            fields: Vec::new(),
        }
    }

    /// Creates an empty record with room for `capacity` fields.
    #[must_use]
    pub fn with_capacity(name: &'static str, capacity: usize) -> Self {
        Record {
            name,
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Appends a field, builder style.
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a field.
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the first field with the given declared name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consumes the record, yielding its fields in declared order.
    #[must_use]
    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

impl Field {
    /// Creates an exported, untagged field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::{Field, Value};
    ///
    /// let field = Field::new("count", 3u8);
    /// assert!(field.exported);
    /// assert_eq!(field.tag, None);
    /// assert_eq!(field.value.as_i64(), Some(3));
    /// ```
    pub fn new(name: &'static str, value: impl Into<Value>) -> Self {
        Field {
            name,
            exported: true,
            tag: None,
            value: value.into(),
        }
    }

    /// Attaches an annotation string such as `"id,omitempty"`.
    #[must_use]
    pub fn tagged(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Marks the field as not externally visible.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.exported = false;
        self
    }
}

impl Value {
    /// Builds a set sequence from any iterator of values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::Value;
    ///
    /// let seq = Value::seq([1, 2, 3]);
    /// assert_eq!(seq.as_seq().map(<[Value]>::len), Some(3));
    /// ```
    pub fn seq<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Seq(Some(items.into_iter().map(Into::into).collect()))
    }

    /// Builds a set map from any iterator of key/value pairs.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(Some(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Wraps a value in a set any-typed slot.
    pub fn dynamic(value: impl Into<Value>) -> Self {
        Value::Dynamic(Some(Box::new(value.into())))
    }

    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Returns `true` for sequences and maps, set or unset.
    #[inline]
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Value::Seq(_) | Value::Map(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer that fits in `i64`, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::Value;
    ///
    /// assert_eq!(Value::from(7u16).as_i64(), Some(7));
    /// assert_eq!(Value::from("7").as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the elements of a set sequence.
    #[inline]
    #[must_use]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(Some(items)) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries of a set map.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(Some(entries)) => Some(entries),
            _ => None,
        }
    }
}

/// Generic textual rendering.
///
/// Used as the fallback of the key stringifier for kinds it does not dispatch
/// on explicitly; the exact format is best-effort.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil | Value::Dynamic(None) => write!(f, "<nil>"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Char(c) => write!(f, "{}", c),
            Value::String(s) => write!(f, "{}", s),
            Value::BigInt(bi) => write!(f, "{}", bi),
            Value::Date(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::Seq(items) => {
                write!(
                    f,
                    "[{}]",
                    items
                        .iter()
                        .flatten()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(" ")
                )
            }
            Value::Map(entries) => {
                write!(
                    f,
                    "map[{}]",
                    entries
                        .iter()
                        .flatten()
                        .map(|(k, v)| format!("{}:{}", k, v))
                        .collect::<Vec<_>>()
                        .join(" ")
                )
            }
            Value::Record(record) => {
                write!(
                    f,
                    "{{{}}}",
                    record
                        .fields
                        .iter()
                        .map(|field| format!("{}:{}", field.name, field.value))
                        .collect::<Vec<_>>()
                        .join(" ")
                )
            }
            Value::Dynamic(Some(inner)) => write!(f, "{}", inner),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Nil | Value::Seq(None) | Value::Map(None) | Value::Dynamic(None) => {
                serializer.serialize_unit()
            }
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Int(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Uint(u)) => serializer.serialize_u64(*u),
            Value::Number(Number::F32(f)) => serializer.serialize_f32(*f),
            Value::Number(Number::F64(f)) => serializer.serialize_f64(*f),
            Value::Char(c) => serializer.serialize_char(*c),
            Value::String(s) => serializer.serialize_str(s),
            Value::BigInt(bi) => serializer.collect_str(bi),
            Value::Date(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Value::Seq(Some(items)) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for element in items {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Map(Some(entries)) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(&key_string(k), v)?;
                }
                map.end()
            }
            Value::Record(record) => {
                use serde::ser::SerializeMap;
                let exported = record.fields.iter().filter(|field| field.exported);
                let mut map = serializer.serialize_map(None)?;
                for field in exported {
                    map.serialize_entry(field.name, &field.value)?;
                }
                map.end()
            }
            Value::Dynamic(Some(inner)) => inner.serialize(serializer),
        }
    }
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::Int(value as i64))
                }
            }
        )*
    };
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::Uint(value as u64))
                }
            }
        )*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::F32(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::F64(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Seq(Some(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}
