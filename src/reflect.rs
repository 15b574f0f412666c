//! Runtime introspection of Rust values.
//!
//! [`Reflect`] turns a Rust value into the [`Value`] tree the flattening
//! engine walks. Reference-like wrappers (`Option`, `Box`, `&`, `Rc`, `Arc`)
//! are looked through, so a chain of them resolves to its pointee or, if any
//! link is absent, to [`Value::Nil`].
//!
//! Structs implement `Reflect` through the [`record!`](crate::record) macro,
//! or by hand when a custom field layout is needed:
//!
//! ```rust
//! use serde_dotted::{Field, Record, Reflect, Value};
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Reflect for Point {
//!     fn reflect(&self) -> Value {
//!         Record::new("Point")
//!             .with_field(Field::new("x", self.x.reflect()))
//!             .with_field(Field::new("y", self.y.reflect()).tagged("yCoord"))
//!             .into()
//!     }
//! }
//!
//! let map = serde_dotted::flatten(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(map.get("yCoord").and_then(Value::as_i64), Some(2));
//! ```

use crate::value::{Number, Record, Value};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Conversion of a Rust value into a [`Value`].
pub trait Reflect {
    fn reflect(&self) -> Value;
}

/// An any-typed slot.
///
/// Flattening never looks inside a set slot: whatever it holds, record or
/// container included, is emitted as one opaque value. An empty slot is the
/// unset state that `omitempty` drops.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::{Dynamic, Reflect, Value};
///
/// assert_eq!(Dynamic::none().reflect(), Value::Dynamic(None));
/// assert_eq!(Dynamic::new(3u8).reflect(), Value::dynamic(3u8));
/// ```
pub struct Dynamic(pub Option<Box<dyn Reflect>>);

impl Dynamic {
    /// Creates a set slot.
    pub fn new<T: Reflect + 'static>(value: T) -> Self {
        Dynamic(Some(Box::new(value)))
    }

    /// Creates an unset slot.
    #[must_use]
    pub fn none() -> Self {
        Dynamic(None)
    }
}

impl Default for Dynamic {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Dynamic").field(&self.reflect()).finish()
    }
}

impl Reflect for Dynamic {
    fn reflect(&self) -> Value {
        Value::Dynamic(self.0.as_ref().map(|inner| Box::new(inner.reflect())))
    }
}

macro_rules! reflect_scalar {
    ($($ty:ty),*) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

reflect_scalar!(bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Reflect for i128 {
    fn reflect(&self) -> Value {
        match i64::try_from(*self) {
            Ok(i) => Value::Number(Number::Int(i)),
            Err(_) => Value::BigInt(BigInt::from(*self)),
        }
    }
}

impl Reflect for u128 {
    fn reflect(&self) -> Value {
        match u64::try_from(*self) {
            Ok(u) => Value::Number(Number::Uint(u)),
            Err(_) => Value::BigInt(BigInt::from(*self)),
        }
    }
}

impl Reflect for str {
    fn reflect(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Reflect for String {
    fn reflect(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Reflect for BigInt {
    fn reflect(&self) -> Value {
        Value::BigInt(self.clone())
    }
}

impl Reflect for DateTime<Utc> {
    fn reflect(&self) -> Value {
        Value::Date(*self)
    }
}

impl Reflect for Value {
    fn reflect(&self) -> Value {
        self.clone()
    }
}

impl Reflect for Record {
    fn reflect(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Value {
        match self {
            Some(inner) => inner.reflect(),
            None => Value::Nil,
        }
    }
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Rc<T> {
    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for [T] {
    fn reflect(&self) -> Value {
        Value::Seq(Some(self.iter().map(Reflect::reflect).collect()))
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Value {
        self.as_slice().reflect()
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect(&self) -> Value {
        self.as_slice().reflect()
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn reflect(&self) -> Value {
        Value::Seq(Some(self.iter().map(Reflect::reflect).collect()))
    }
}

macro_rules! reflect_map {
    ($($map:ident<K, V $(, $s:ident)?>),*) => {
        $(
            impl<K: Reflect, V: Reflect $(, $s)?> Reflect for $map<K, V $(, $s)?> {
                fn reflect(&self) -> Value {
                    Value::Map(Some(
                        self.iter().map(|(k, v)| (k.reflect(), v.reflect())).collect(),
                    ))
                }
            }
        )*
    };
}

reflect_map!(HashMap<K, V, S>, BTreeMap<K, V>, IndexMap<K, V, S>);
