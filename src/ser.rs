//! Serde bridge: any `T: Serialize` into a [`Value`].
//!
//! Structs become [`Record`]s whose fields are all exported. The serde field
//! key doubles as the annotation string, so a field renamed with
//! `#[serde(rename = "id,omitempty")]` gets the key segment `id` and the
//! `omitempty` directive. The first comma-separated segment of the key is also
//! taken as the field's declared name, which is what naming policies rewrite.
//! That segment has to be spelled out: a key such as `",omitempty"` has no
//! name to fall back to and is rejected with an error.
//!
//! | serde data model            | `Value`                                   |
//! |-----------------------------|-------------------------------------------|
//! | `none`, `unit`              | `Nil`                                     |
//! | `some(v)`, newtype struct   | the inner value                           |
//! | unit struct                 | record without fields                     |
//! | unit variant                | `String(variant)`                         |
//! | newtype / tuple / struct variant | record `{variant: payload}`          |
//! | seq, tuple, tuple struct    | `Seq`                                     |
//! | bytes                       | `Seq` of unsigned integers                |
//! | map                         | `Map`                                     |
//! | struct with a `#[serde(flatten)]` field | `Map` (serde writes it as a map, so it is not a record) |
//! | `i128` / `u128` out of 64-bit range | `BigInt`                          |

use crate::error::{Error, Result};
use crate::tag::TAG_SEPARATOR;
use crate::value::{Field, Number, Record, Value};
use num_bigint::BigInt;
use serde::ser::{self, Serialize};

/// Serializer whose output is a [`Value`].
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
    variant: Option<(&'static str, &'static str)>,
}

pub struct SerializeMap {
    entries: Vec<(Value, Value)>,
    current_key: Option<Value>,
}

pub struct SerializeRecord {
    record: Record,
    variant: Option<(&'static str, &'static str)>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeRecord;
    type SerializeStructVariant = SerializeRecord;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Number(Number::Int(i64::from(v))))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Number(Number::Int(i64::from(v))))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Number(Number::Int(i64::from(v))))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Int(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(match i64::try_from(v) {
            Ok(i) => Value::Number(Number::Int(i)),
            Err(_) => Value::BigInt(BigInt::from(v)),
        })
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Number(Number::Uint(u64::from(v))))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Number(Number::Uint(u64::from(v))))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Number(Number::Uint(u64::from(v))))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Number(Number::Uint(v)))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(match u64::try_from(v) {
            Ok(u) => Value::Number(Number::Uint(u)),
            Err(_) => Value::BigInt(BigInt::from(v)),
        })
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(Number::F32(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::F64(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::seq(v.iter().copied()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Nil)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Nil)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Ok(Value::Record(Record::new(name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(variant_record(name, variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some((name, variant))))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<SerializeRecord> {
        Ok(SerializeRecord {
            record: Record::with_capacity(name, len),
            variant: None,
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeRecord> {
        Ok(SerializeRecord {
            record: Record::with_capacity(variant, len),
            variant: Some((name, variant)),
        })
    }
}

impl SerializeVec {
    fn new(len: usize, variant: Option<(&'static str, &'static str)>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(len),
            variant,
        }
    }

    fn finish(self) -> Value {
        let seq = Value::Seq(Some(self.vec));
        match self.variant {
            Some((name, variant)) => variant_record(name, variant, seq),
            None => seq,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(to_value(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::message("serialize_value called without serialize_key"))?;
        self.entries.push((key, to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Map(Some(self.entries)))
    }
}

impl SerializeRecord {
    /// Serde keys stand in for declared names, so segment 0 must be present.
    fn push(&mut self, key: &'static str, value: Value) -> Result<()> {
        let name = key.split(TAG_SEPARATOR).next().unwrap_or(key);
        if name.is_empty() {
            return Err(Error::message(format!(
                "field key {:?} of `{}` has no name segment; write `rename = \"name{}\"`",
                key,
                self.record.name(),
                key
            )));
        }
        self.record.push(Field {
            name,
            exported: true,
            tag: Some(key),
            value,
        });
        Ok(())
    }

    fn finish(self) -> Value {
        let record = Value::Record(self.record);
        match self.variant {
            Some((name, variant)) => variant_record(name, variant, record),
            None => record,
        }
    }
}

impl ser::SerializeStruct for SerializeRecord {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(key, to_value(value)?)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeRecord {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(key, to_value(value)?)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

fn variant_record(name: &'static str, variant: &'static str, payload: Value) -> Value {
    Value::Record(Record::new(name).with_field(Field::new(variant, payload)))
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_dotted::{to_value, Value};
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// let record = value.as_record().unwrap();
/// assert_eq!(record.name(), "Point");
/// assert_eq!(record.get("y").map(|f| &f.value), Some(&Value::from(2)));
/// ```
///
/// # Errors
///
/// Returns an error if the value's `Serialize` implementation fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}
