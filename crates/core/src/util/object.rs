//! Property-level inspection and comparison of arbitrary values.
//!
//! There is no runtime reflection: a type's properties are whatever its
//! `serde::Serialize` implementation emits as a map. For a `#[derive(Serialize)]`
//! struct that is its field names (after any `rename`) in declaration order,
//! each paired with its value as JSON.

use core::fmt::Display;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::error::ObjectError;

/// Ordered property name → value table of a single object.
pub type PropertyTable = Map<String, Value>;

/// Comparison policy for [`is_same`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Comparison {
    /// Both objects must be present, expose the compared properties and agree
    /// on every value. When comparing all properties the counts must match.
    #[default]
    Strict,
    /// Identical references are equal outright; properties missing on either
    /// side are skipped. Only an explicit value mismatch fails.
    Lenient,
}

/// JSON shape of a property value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl PropertyKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// Name, kind and value of one property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub value: Value,
}

/// Property table of `obj`.
///
/// For structs the table lists every declared field, so a field left out by
/// `skip_serializing_if` is still present with a `null` value. Maps contribute
/// their entries. Fails with [`ObjectError::NotAnObject`] when `obj` is
/// anything else (scalars, sequences, unit structs).
pub fn property_table<T: Serialize + ?Sized>(obj: &T) -> Result<PropertyTable, ObjectError> {
    if let Ok(table) = obj.serialize(fields::FieldCapture) {
        return Ok(table);
    }

    match serde_json::to_value(obj)? {
        Value::Object(map) => Ok(map),
        other => Err(ObjectError::NotAnObject {
            type_name: core::any::type_name::<T>(),
            kind: PropertyKind::of(&other).as_str(),
        }),
    }
}

/// Compare two objects property by property.
///
/// `names` selects the properties to compare; when empty, every property of
/// `a` is compared. Values are compared with [`is_not_equal`], so two nulls
/// are considered equal.
pub fn is_same<A, B>(
    a: Option<&A>,
    b: Option<&B>,
    mode: Comparison,
    names: &[&str],
) -> Result<bool, ObjectError>
where
    A: Serialize + ?Sized,
    B: Serialize + ?Sized,
{
    let identical = match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => same_reference(x, y),
        _ => false,
    };
    if identical && (mode == Comparison::Lenient || (a.is_some() && names.is_empty())) {
        return Ok(true);
    }

    let (Some(a), Some(b)) = (a, b) else {
        return Ok(false);
    };

    let left = property_table(a)?;
    let right = property_table(b)?;

    let selected: Vec<&str> = if names.is_empty() {
        if mode == Comparison::Strict && left.len() != right.len() {
            return Ok(false);
        }
        left.keys().map(String::as_str).collect()
    } else {
        names.to_vec()
    };

    for name in selected {
        match (left.get(name), right.get(name)) {
            (Some(l), Some(r)) => {
                if is_not_equal(present(l), present(r)) {
                    return Ok(false);
                }
            }
            _ if mode == Comparison::Lenient => continue,
            _ => return Ok(false),
        }
    }

    Ok(true)
}

// A struct and its first field share an address; only same-typed values of
// the same extent at the same address are the same object.
fn same_reference<A: ?Sized, B: ?Sized>(a: &A, b: &B) -> bool {
    core::any::type_name::<A>() == core::any::type_name::<B>()
        && core::mem::size_of_val(a) == core::mem::size_of_val(b)
        && core::ptr::addr_eq(a as *const A, b as *const B)
}

fn present(value: &Value) -> Option<&Value> {
    (!value.is_null()).then_some(value)
}

/// Null-safe equality; two absent values are equal.
pub fn is_equal<T: PartialEq + ?Sized>(a: Option<&T>, b: Option<&T>) -> bool {
    is_equal_with(a, b, true)
}

/// Null-safe equality with an explicit policy for the both-absent case.
pub fn is_equal_with<T: PartialEq + ?Sized>(
    a: Option<&T>,
    b: Option<&T>,
    equal_if_all_null: bool,
) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        (None, None) => equal_if_all_null,
        _ => false,
    }
}

pub fn is_not_equal<T: PartialEq + ?Sized>(a: Option<&T>, b: Option<&T>) -> bool {
    !is_equal(a, b)
}

pub fn is_not_equal_with<T: PartialEq + ?Sized>(
    a: Option<&T>,
    b: Option<&T>,
    equal_if_all_null: bool,
) -> bool {
    !is_equal_with(a, b, equal_if_all_null)
}

/// Whether a loosely-typed value carries no content.
///
/// Absent and null values are blank, as are strings that are whitespace or
/// the literal `"null"` once trimmed, and empty arrays. Numbers, booleans and
/// objects are never blank.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => {
            let s = s.trim();
            s.is_empty() || s == "null"
        }
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

pub fn to_string_opt<T: Display + ?Sized>(value: Option<&T>) -> Option<String> {
    value.map(ToString::to_string)
}

/// Value of a single property, or `None` if it cannot be read.
pub fn property_value<T: Serialize + ?Sized>(name: &str, obj: &T) -> Option<Value> {
    match property_table(obj) {
        Ok(mut table) => table.remove(name),
        Err(e) => {
            tracing::debug!(property = name, error = %e, "property lookup failed");
            None
        }
    }
}

/// Values of all properties, in declaration order.
pub fn property_values<T: Serialize + ?Sized>(obj: &T) -> Result<Vec<Value>, ObjectError> {
    Ok(property_table(obj)?.into_iter().map(|(_, v)| v).collect())
}

/// Name, kind and value of all properties, in declaration order.
pub fn properties_info<T: Serialize + ?Sized>(obj: &T) -> Result<Vec<PropertyInfo>, ObjectError> {
    Ok(property_table(obj)?
        .into_iter()
        .map(|(name, value)| PropertyInfo {
            name,
            kind: PropertyKind::of(&value),
            value,
        })
        .collect())
}

/// Build a fresh `T::default()` carrying only the named properties of `source`.
///
/// A name that `T` does not expose fails with [`ObjectError::UnknownProperty`].
pub fn part_copy_new<T>(source: &T, names: &[&str]) -> Result<T, ObjectError>
where
    T: Serialize + DeserializeOwned + Default,
{
    let from = property_table(source)?;
    let mut into = property_table(&T::default())?;

    for name in names {
        match from.get(*name) {
            Some(value) => {
                into.insert((*name).to_string(), value.clone());
            }
            None if into.contains_key(*name) => {
                into.remove(*name);
            }
            None => {
                return Err(ObjectError::UnknownProperty {
                    type_name: core::any::type_name::<T>(),
                    name: (*name).to_string(),
                });
            }
        }
    }

    Ok(serde_json::from_value(Value::Object(into))?)
}

/// Serializer that records the declared fields of a struct.
///
/// Any other shape is rejected so the caller can fall back to a plain
/// `serde_json` conversion.
mod fields {
    use serde::ser::{self, Impossible, Serialize};
    use serde_json::{Map, Value};

    type Error = serde_json::Error;
    type Table = Map<String, Value>;
    type Rejected = Impossible<Table, Error>;

    pub(super) struct FieldCapture;

    pub(super) struct Fields(Table);

    fn not_a_struct() -> Error {
        ser::Error::custom("value is not a struct")
    }

    macro_rules! reject {
        ($($method:ident($($arg:ty),*);)*) => {
            $(
                fn $method(self, $(_: $arg),*) -> Result<Table, Error> {
                    Err(not_a_struct())
                }
            )*
        };
    }

    impl ser::Serializer for FieldCapture {
        type Ok = Table;
        type Error = Error;
        type SerializeSeq = Rejected;
        type SerializeTuple = Rejected;
        type SerializeTupleStruct = Rejected;
        type SerializeTupleVariant = Rejected;
        type SerializeMap = Rejected;
        type SerializeStruct = Fields;
        type SerializeStructVariant = Rejected;

        reject! {
            serialize_bool(bool);
            serialize_i8(i8);
            serialize_i16(i16);
            serialize_i32(i32);
            serialize_i64(i64);
            serialize_u8(u8);
            serialize_u16(u16);
            serialize_u32(u32);
            serialize_u64(u64);
            serialize_f32(f32);
            serialize_f64(f64);
            serialize_char(char);
            serialize_str(&str);
            serialize_bytes(&[u8]);
            serialize_none();
            serialize_unit();
            serialize_unit_struct(&'static str);
            serialize_unit_variant(&'static str, u32, &'static str);
        }

        fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Table, Error> {
            value.serialize(self)
        }

        fn serialize_newtype_struct<T: ?Sized + Serialize>(
            self,
            _name: &'static str,
            value: &T,
        ) -> Result<Table, Error> {
            value.serialize(self)
        }

        fn serialize_newtype_variant<T: ?Sized + Serialize>(
            self,
            _name: &'static str,
            _index: u32,
            _variant: &'static str,
            _value: &T,
        ) -> Result<Table, Error> {
            Err(not_a_struct())
        }

        fn serialize_seq(self, _len: Option<usize>) -> Result<Rejected, Error> {
            Err(not_a_struct())
        }

        fn serialize_tuple(self, _len: usize) -> Result<Rejected, Error> {
            Err(not_a_struct())
        }

        fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Rejected, Error> {
            Err(not_a_struct())
        }

        fn serialize_tuple_variant(
            self,
            _name: &'static str,
            _index: u32,
            _variant: &'static str,
            _len: usize,
        ) -> Result<Rejected, Error> {
            Err(not_a_struct())
        }

        fn serialize_map(self, _len: Option<usize>) -> Result<Rejected, Error> {
            Err(not_a_struct())
        }

        fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Fields, Error> {
            Ok(Fields(Map::with_capacity(len)))
        }

        fn serialize_struct_variant(
            self,
            _name: &'static str,
            _index: u32,
            _variant: &'static str,
            _len: usize,
        ) -> Result<Rejected, Error> {
            Err(not_a_struct())
        }
    }

    impl ser::SerializeStruct for Fields {
        type Ok = Table;
        type Error = Error;

        fn serialize_field<T: ?Sized + Serialize>(
            &mut self,
            key: &'static str,
            value: &T,
        ) -> Result<(), Error> {
            self.0.insert(key.to_string(), serde_json::to_value(value)?);
            Ok(())
        }

        // Declared but skipped for this value.
        fn skip_field(&mut self, key: &'static str) -> Result<(), Error> {
            self.0.insert(key.to_string(), Value::Null);
            Ok(())
        }

        fn end(self) -> Result<Table, Error> {
            Ok(self.0)
        }
    }
}
