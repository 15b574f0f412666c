//! # serde_dotted
//!
//! Flattens an arbitrarily nested record into a single map from dotted keys to
//! leaf values, for places that want record data as a flat key/value set:
//! structured log fields, metric tags, form encoding.
//!
//! ```text
//! Order { id: 7, customer: Customer { name: "Ann" }, items: [3, 4] }
//!
//! id            = 7
//! customer.name = "Ann"
//! items.0       = 3
//! items.1       = 4
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_dotted::{flatten, record, Value};
//!
//! record! {
//!     pub struct Customer {
//!         pub name: String,
//!         pub email: Option<String> => "email,omitempty",
//!     }
//! }
//!
//! record! {
//!     pub struct Order {
//!         pub id: u64 => "orderId",
//!         pub customer: Customer,
//!         pub items: Vec<u32>,
//!     }
//! }
//!
//! let order = Order {
//!     id: 7,
//!     customer: Customer { name: "Ann".to_string(), email: None },
//!     items: vec![3, 4],
//! };
//!
//! let map = flatten(&order).unwrap();
//! assert_eq!(map.get("orderId").and_then(Value::as_i64), Some(7));
//! assert_eq!(map.get("customer.name").and_then(Value::as_str), Some("Ann"));
//! assert_eq!(map.get("items.1").and_then(Value::as_i64), Some(4));
//! assert!(!map.contains_key("customer.email"));
//! ```
//!
//! ## Annotations
//!
//! A field annotation is `segment[,directive]*`:
//!
//! - `segment` renames the field's key segment; `-` removes the field entirely;
//! - `omitempty` drops the field when it is absent (`None`, an unset container
//!   or any-typed slot) instead of writing `Nil`;
//! - `ignoreparents` roots the field's key at its own segment, discarding the
//!   prefix accumulated from enclosing fields. Fields nested below it still
//!   build on it normally.
//!
//! Only fields declared `pub` are flattened.
//!
//! Serde field keys must name their segment explicitly
//! (`#[serde(rename = "id,omitempty")]`, not `",omitempty"`), because serde
//! does not expose the Rust field name to fall back to.
//!
//! ## Naming Policies
//!
//! A [`NamingPolicy`] rewrites every declared field name (lowercase, UPPERCASE,
//! UpperCamel, lowerCamel, snake_case or unchanged). While a policy is active,
//! annotation renames are ignored but directives still apply.
//!
//! ```rust
//! use serde_dotted::{flatten_with, record, NamingPolicy};
//!
//! record! {
//!     pub struct Profile {
//!         pub display_name: String => "nick",
//!     }
//! }
//!
//! let profile = Profile { display_name: "ann".to_string() };
//! let map = flatten_with(&profile, [NamingPolicy::LowerCamel]).unwrap();
//! assert!(map.contains_key("displayName"));
//! ```
//!
//! ## Serde Types
//!
//! Anything implementing `Serialize` can be flattened through [`to_flat_map`].
//! The serde field key is read as the annotation, so
//! `#[serde(rename = "id,omitempty")]` works as expected.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_dotted::to_flat_map;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! #[derive(Serialize)]
//! struct Line { from: Point, to: Point }
//!
//! let line = Line { from: Point { x: 0, y: 0 }, to: Point { x: 3, y: 4 } };
//! let map = to_flat_map(&line).unwrap().unwrap();
//! assert_eq!(map.sorted_keys(), vec!["from.x", "from.y", "to.x", "to.y"]);
//! ```
//!
//! ## Edge Cases
//!
//! - Non-record input (a scalar, `None`, a bare sequence) flattens to `None`.
//! - Map entries and sequence elements are unwrapped one level only; deeper
//!   containers are written as opaque [`Value`]s. Record-valued map entries
//!   are merged under the map's own key, without the entry key.
//! - Two fields that render to the same key overwrite each other; the last
//!   one written wins.
//! - A serde struct with a `#[serde(flatten)]` field serializes as a map, not
//!   a struct, so [`to_flat_map`] returns `Ok(None)` for it.

pub mod case;
pub mod error;
pub mod flatten;
pub mod macros;
pub mod map;
pub mod options;
pub mod reflect;
pub mod ser;
pub mod stringify;
pub mod tag;
pub mod value;

pub use case::NamingPolicy;
pub use error::{Error, Result};
pub use flatten::{flatten_value, KEY_SEPARATOR};
pub use map::FlatMap;
pub use options::FlattenOptions;
pub use reflect::{Dynamic, Reflect};
pub use ser::{to_value, ValueSerializer};
pub use stringify::key_string;
pub use tag::FieldTag;
pub use value::{Field, Number, Record, Value};

use serde::Serialize;

/// Flattens a value with no naming policy.
///
/// Returns `None` if `value` is not a record.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::{flatten, Field, Record, Value};
///
/// let record = Record::new("Point")
///     .with_field(Field::new("x", 1))
///     .with_field(Field::new("y", 2));
/// let map = flatten(&Value::Record(record)).unwrap();
/// assert_eq!(map.len(), 2);
///
/// assert!(flatten(&42).is_none());
/// ```
#[must_use]
pub fn flatten<T>(value: &T) -> Option<FlatMap>
where
    T: ?Sized + Reflect,
{
    flatten_with_options(value, &FlattenOptions::default())
}

/// Flattens a value under a list of naming policies; the last one wins.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::{flatten_with, Field, NamingPolicy, Record, Value};
///
/// let record = Value::Record(Record::new("R").with_field(Field::new("UserName", "ann")));
/// let map = flatten_with(&record, [NamingPolicy::Upper, NamingPolicy::Snake]).unwrap();
/// assert!(map.contains_key("user_name"));
/// ```
#[must_use]
pub fn flatten_with<T, I>(value: &T, policies: I) -> Option<FlatMap>
where
    T: ?Sized + Reflect,
    I: IntoIterator<Item = NamingPolicy>,
{
    flatten_with_options(value, &FlattenOptions::new().with_policies(policies))
}

/// Flattens a value with explicit options.
#[must_use]
pub fn flatten_with_options<T>(value: &T, options: &FlattenOptions) -> Option<FlatMap>
where
    T: ?Sized + Reflect,
{
    flatten_value(value.reflect(), options)
}

/// Flattens any `T: Serialize` with no naming policy.
///
/// # Errors
///
/// Returns an error if the value's `Serialize` implementation fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_flat_map<T>(value: &T) -> Result<Option<FlatMap>>
where
    T: ?Sized + Serialize,
{
    to_flat_map_with_options(value, &FlattenOptions::default())
}

/// Flattens any `T: Serialize` with explicit options.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_dotted::{to_flat_map_with_options, FlattenOptions, NamingPolicy};
///
/// #[derive(Serialize)]
/// struct Request { request_id: u32 }
///
/// let options = FlattenOptions::new().with_policy(NamingPolicy::UpperCamel);
/// let map = to_flat_map_with_options(&Request { request_id: 1 }, &options)
///     .unwrap()
///     .unwrap();
/// assert!(map.contains_key("RequestId"));
/// ```
///
/// # Errors
///
/// Returns an error if the value's `Serialize` implementation fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_flat_map_with_options<T>(value: &T, options: &FlattenOptions) -> Result<Option<FlatMap>>
where
    T: ?Sized + Serialize,
{
    Ok(flatten_value(to_value(value)?, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Tags {
        #[serde(rename = "env,omitempty")]
        environment: Option<String>,
        #[serde(rename = "-")]
        internal: u8,
        labels: HashMap<String, String>,
    }

    #[test]
    fn test_flatten_non_record() {
        assert!(flatten(&1u8).is_none());
        assert!(flatten(&None::<Record>).is_none());
        assert!(flatten("text").is_none());
        assert!(flatten(&vec![1, 2]).is_none());
    }

    #[test]
    fn test_flatten_through_pointers() {
        let record = Value::Record(Record::new("R").with_field(Field::new("a", 1)));
        let boxed = Some(Box::new(record));
        let map = flatten(&boxed).unwrap();
        assert_eq!(map.get("a").and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn test_to_flat_map_reads_serde_keys_as_tags() {
        let mut labels = HashMap::new();
        labels.insert("team".to_string(), "core".to_string());
        let tags = Tags {
            environment: None,
            internal: 1,
            labels,
        };

        let map = to_flat_map(&tags).unwrap().unwrap();
        assert_eq!(map.sorted_keys(), vec!["labels.team"]);

        let tags = Tags {
            environment: Some("prod".to_string()),
            ..tags
        };
        let map = to_flat_map(&tags).unwrap().unwrap();
        assert_eq!(map.get("env").and_then(Value::as_str), Some("prod"));
    }

    #[test]
    fn test_to_flat_map_non_record() {
        assert!(to_flat_map(&5).unwrap().is_none());
        assert!(to_flat_map(&vec!["a"]).unwrap().is_none());
    }

    #[test]
    fn test_flatten_with_empty_policy_list() {
        let record = Value::Record(Record::new("R").with_field(Field::new("Ab", 1).tagged("x")));
        let map = flatten_with(&record, Vec::<NamingPolicy>::new()).unwrap();
        assert!(map.contains_key("x"));
    }
}
