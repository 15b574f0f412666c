//! The flattening engine.
//!
//! Walks a [`Record`] field by field and writes every leaf into a single
//! [`FlatMap`] under a dotted key built from the enclosing field segments.
//!
//! Per field:
//!
//! 1. hidden fields and fields annotated `-` are skipped;
//! 2. the key segment is the annotation rename (or declared name), unless a
//!    naming policy is set, in which case it is the policy applied to the
//!    declared name;
//! 3. `ignoreparents` drops the parent prefix for this field and everything
//!    below it; siblings still see the original prefix;
//! 4. an absent value is written as `Nil`, or dropped under `omitempty`;
//! 5. nested records recurse under the field key; maps and sequences are
//!    unwrapped one level (`key.entry`, `key.index`), with record entries and
//!    elements recursing under the map key and the indexed key respectively.
//!
//! Recursion depth follows the input's nesting. Cycles are not detected: a
//! `Reflect` impl that walks an `Rc` cycle never returns.

use crate::options::FlattenOptions;
use crate::stringify::key_string;
use crate::tag::FieldTag;
use crate::value::{Field, Record, Value};
use crate::FlatMap;

/// Joins key segments.
pub const KEY_SEPARATOR: &str = ".";

const LOG_TARGET: &str = "serde_dotted::flatten";

/// Flattens an owned value.
///
/// Returns `None` unless `value`, after looking through any-typed slots, is a
/// record.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::{flatten_value, Field, FlattenOptions, Record, Value};
///
/// let inner = Record::new("Inner").with_field(Field::new("x", 1));
/// let outer = Record::new("Outer").with_field(Field::new("n", inner));
///
/// let map = flatten_value(Value::Record(outer), &FlattenOptions::default()).unwrap();
/// assert_eq!(map.get("n.x").and_then(Value::as_i64), Some(1));
///
/// assert!(flatten_value(Value::from(5), &FlattenOptions::default()).is_none());
/// ```
#[must_use]
pub fn flatten_value(value: Value, options: &FlattenOptions) -> Option<FlatMap> {
    let record = match resolve(value) {
        Some(Value::Record(record)) => record,
        Some(other) => {
            log::debug!(target: LOG_TARGET, "Not flattening non-record input: {}", kind(&other));
            return None;
        }
        None => {
            log::debug!(target: LOG_TARGET, "Not flattening absent input");
            return None;
        }
    };

    let mut out = FlatMap::with_capacity(record.len());
    Flattener { options }.record(&mut out, "", record);
    Some(out)
}

/// Looks through set any-typed slots; `None` if the chain ends absent.
fn resolve(mut value: Value) -> Option<Value> {
    loop {
        match value {
            Value::Nil | Value::Dynamic(None) => return None,
            Value::Dynamic(Some(inner)) => value = *inner,
            other => return Some(other),
        }
    }
}

/// Unwraps any-typed slots for emission. Whatever a slot holds is written as-is.
fn leaf(value: Value) -> Value {
    match value {
        Value::Dynamic(Some(inner)) => leaf(*inner),
        Value::Dynamic(None) => Value::Nil,
        other => other,
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}{KEY_SEPARATOR}{segment}")
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Nil => "nil",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::Char(_) => "char",
        Value::String(_) => "string",
        Value::BigInt(_) => "bigint",
        Value::Date(_) => "date",
        Value::Seq(_) => "sequence",
        Value::Map(_) => "map",
        Value::Record(_) => "record",
        Value::Dynamic(_) => "dynamic",
    }
}

struct Flattener<'o> {
    options: &'o FlattenOptions,
}

impl Flattener<'_> {
    fn record(&self, out: &mut FlatMap, prefix: &str, record: Record) {
        for field in record.into_fields() {
            self.field(out, prefix, field);
        }
    }

    fn field(&self, out: &mut FlatMap, prefix: &str, field: Field) {
        if !field.exported {
            log::trace!(target: LOG_TARGET, "Skipping hidden field '{}'", field.name);
            return;
        }

        let tag = FieldTag::parse(field.name, field.tag);
        if tag.excluded {
            log::trace!(target: LOG_TARGET, "Skipping excluded field '{}'", field.name);
            return;
        }

        let segment = match self.options.policy {
            Some(policy) => policy.apply(field.name),
            None => tag.segment.to_string(),
        };
        let prefix = if tag.ignore_parents { "" } else { prefix };
        let key = join(prefix, &segment);

        match field.value {
            Value::Nil | Value::Dynamic(None) | Value::Seq(None) | Value::Map(None)
                if tag.omit_empty =>
            {
                log::trace!(target: LOG_TARGET, "Omitting empty field '{}'", key);
            }
            Value::Nil | Value::Dynamic(None) => {
                out.insert(key, Value::Nil);
            }
            Value::Record(record) => self.record(out, &key, record),
            Value::Map(entries) => {
                for (entry_key, entry_value) in entries.into_iter().flatten() {
                    match entry_value {
                        Value::Record(record) => self.record(out, &key, record),
                        other => {
                            let segment = self.entry_segment(entry_key);
                            out.insert(join(&key, &segment), leaf(other));
                        }
                    }
                }
            }
            Value::Seq(items) => {
                for (index, item) in items.into_iter().flatten().enumerate() {
                    let item_key = join(&key, &index.to_string());
                    match item {
                        Value::Record(record) => self.record(out, &item_key, record),
                        other => {
                            out.insert(item_key, leaf(other));
                        }
                    }
                }
            }
            scalar => {
                out.insert(key, leaf(scalar));
            }
        }
    }

    fn entry_segment(&self, entry_key: Value) -> String {
        match entry_key {
            Value::String(s) => s,
            Value::Nil | Value::Dynamic(None) => self.options.nil_key.clone(),
            other => key_string(&other),
        }
    }
}
