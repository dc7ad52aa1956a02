//! The Value type - the generic tree that typed values are encoded into.
//!
//! A `Value` is dynamically typed. Typed Rust values are walked by the codec
//! engines and turned into this tree (or built back from it), so any other
//! subsystem can inspect and modify the data without knowing its Rust type.

use std::fmt;

use indexmap::IndexMap;

use crate::path::{Path, PathSegment};

/// Key-value map with string keys.
///
/// Insertion order is preserved so an encoded record lists its fields in the
/// order its encoder wrote them. Lookups do not depend on order.
pub type Map = IndexMap<String, Value>;

/// A tree-shaped value produced by encoding and consumed by decoding.
///
/// # Design Notes
///
/// - Integers and floats remember their width and signedness, so boxing a
///   typed value never loses information
/// - Uses an insertion-ordered map so encoded records display in field order
/// - There is no bytes variant; binary data is a list of `u8`
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Explicit absence of a value. Distinct from "key doesn't exist".
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Fixed-width integer.
    Integer(Integer),
    /// Fixed-width floating point.
    Float(Float),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of values.
    List(Vec<Value>),
    /// Key-value map with string keys (the "record" part).
    Map(Map),
}

/// An integer together with the width and signedness it was stored with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Integer {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
}

impl Integer {
    /// The exact mathematical value. Every variant fits.
    pub fn to_i128(self) -> i128 {
        match self {
            Integer::I8(v) => v.into(),
            Integer::I16(v) => v.into(),
            Integer::I32(v) => v.into(),
            Integer::I64(v) => v.into(),
            Integer::U8(v) => v.into(),
            Integer::U16(v) => v.into(),
            Integer::U32(v) => v.into(),
            Integer::U64(v) => v.into(),
        }
    }

    /// Rust name of the stored width, e.g. `"u16"`.
    pub fn width_name(self) -> &'static str {
        match self {
            Integer::I8(_) => "i8",
            Integer::I16(_) => "i16",
            Integer::I32(_) => "i32",
            Integer::I64(_) => "i64",
            Integer::U8(_) => "u8",
            Integer::U16(_) => "u16",
            Integer::U32(_) => "u32",
            Integer::U64(_) => "u64",
        }
    }

    /// Check whether the stored type is signed.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            Integer::I8(_) | Integer::I16(_) | Integer::I32(_) | Integer::I64(_)
        )
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i128())
    }
}

/// A float together with the width it was stored with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Float {
    F32(f32),
    F64(f64),
}

impl Float {
    /// Widen to `f64`. Exact for both variants.
    pub fn to_f64(self) -> f64 {
        match self {
            Float::F32(v) => v.into(),
            Float::F64(v) => v,
        }
    }

    /// Rust name of the stored width.
    pub fn width_name(self) -> &'static str {
        match self {
            Float::F32(_) => "f32",
            Float::F64(_) => "f64",
        }
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Float::F32(v) => write!(f, "{}", v),
            Float::F64(v) => write!(f, "{}", v),
        }
    }
}

/// The shape of a `Value`, without its payload.
///
/// Used in diagnostics to say what was found where something else was expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    List,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Map => "map",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Create a null value.
    pub fn null() -> Self {
        Value::Null
    }

    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(Map::new())
    }

    /// Create an empty list.
    pub fn list() -> Self {
        Value::List(Vec::new())
    }

    /// The shape of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a map (record).
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Check if this value is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Consume the value, returning the map if it is one.
    pub fn into_map(self) -> Result<Map, Value> {
        match self {
            Value::Map(map) => Ok(map),
            other => Err(other),
        }
    }

    /// Get a reference to a nested value by path.
    ///
    /// Meant for diagnostics: given the path carried by a decode error, this
    /// finds the offending value in the tree that was being decoded.
    ///
    /// Returns `None` if the path doesn't exist or can't be navigated
    /// (e.g., a key segment applied to a list).
    pub fn get(&self, path: &Path) -> Option<&Value> {
        let mut current = self;
        for segment in path.iter() {
            current = match (current, segment) {
                (Value::Map(map), PathSegment::Key(key)) => map.get(key)?,
                (Value::List(items), PathSegment::Index(index)) => items.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Integer(Integer::$variant(v))
                }
            }

            impl From<$ty> for Integer {
                fn from(v: $ty) -> Self {
                    Integer::$variant(v)
                }
            }
        )*
    };
}

impl_from_integer! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(Float::F32(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(Float::F64(v))
    }
}

impl From<Integer> for Value {
    fn from(v: Integer) -> Self {
        Value::Integer(v)
    }
}

impl From<Float> for Value {
    fn from(v: Float) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
