//! Conversion between primitive types and leaf `Value`s.
//!
//! Boxing never loses information: every integer and float width has a
//! matching `Value` variant. Unboxing is strict. A number is accepted for a
//! numeric type only if converting it to that type and back yields the same
//! number; booleans are only ever read from `Value::Bool`.

use std::fmt;

use mapcoder_core::{Float, Integer, Value};

/// Why a leaf value could not be read as a scalar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScalarError {
    /// The value has the wrong shape (e.g. a string where a number is expected).
    Mismatch,
    /// The value has the right shape but cannot be represented exactly.
    Inexact { message: String },
}

/// A primitive that converts directly to and from a leaf `Value`.
pub trait Scalar: Sized {
    /// Name used in diagnostics.
    const EXPECTED: &'static str;

    /// Box into a `Value`.
    fn to_value(&self) -> Value;

    /// Unbox from a non-null `Value`.
    fn from_value(value: &Value) -> Result<Self, ScalarError>;

    /// The float value, if this is a NaN or infinite float.
    fn non_finite(&self) -> Option<f64> {
        None
    }

    /// Build from a non-finite float named by a string token.
    fn from_non_finite(_value: f64) -> Option<Self> {
        None
    }
}

/// Numeric targets that can check a candidate for exact representation.
trait Exact: Sized {
    fn from_integer(value: i128) -> Option<Self>;
    fn from_float(value: f64) -> Option<Self>;
}

fn unbox_number<T: Exact>(value: &Value, expected: &str) -> Result<T, ScalarError> {
    let (converted, source) = match value {
        Value::Integer(i) => (T::from_integer(i.to_i128()), i.to_string()),
        Value::Float(f) => (T::from_float(f.to_f64()), f.to_string()),
        _ => return Err(ScalarError::Mismatch),
    };
    converted.ok_or_else(|| ScalarError::Inexact {
        message: format!("parsed number <{}> does not fit in {}", source, expected),
    })
}

macro_rules! impl_integer_scalar {
    ($($ty:ty => $name:literal, $boxed:expr;)*) => {
        $(
            impl Exact for $ty {
                fn from_integer(value: i128) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }

                fn from_float(value: f64) -> Option<Self> {
                    if !value.is_finite() || value.fract() != 0.0 {
                        return None;
                    }
                    let integral = value as i128;
                    if integral as f64 != value {
                        return None;
                    }
                    <$ty>::try_from(integral).ok()
                }
            }

            impl Scalar for $ty {
                const EXPECTED: &'static str = $name;

                fn to_value(&self) -> Value {
                    let boxed: fn($ty) -> Integer = $boxed;
                    Value::Integer(boxed(*self))
                }

                fn from_value(value: &Value) -> Result<Self, ScalarError> {
                    unbox_number(value, $name)
                }
            }
        )*
    };
}

impl_integer_scalar! {
    i8 => "i8", Integer::I8;
    i16 => "i16", Integer::I16;
    i32 => "i32", Integer::I32;
    i64 => "i64", Integer::I64;
    u8 => "u8", Integer::U8;
    u16 => "u16", Integer::U16;
    u32 => "u32", Integer::U32;
    u64 => "u64", Integer::U64;
    // Pointer-sized integers box as their 64-bit counterparts.
    isize => "isize", |v| Integer::I64(v as i64);
    usize => "usize", |v| Integer::U64(v as u64);
}

impl Exact for f64 {
    fn from_integer(value: i128) -> Option<Self> {
        let converted = value as f64;
        (converted as i128 == value).then_some(converted)
    }

    fn from_float(value: f64) -> Option<Self> {
        Some(value)
    }
}

impl Exact for f32 {
    fn from_integer(value: i128) -> Option<Self> {
        let converted = value as f32;
        (converted as i128 == value).then_some(converted)
    }

    fn from_float(value: f64) -> Option<Self> {
        let converted = value as f32;
        // NaN never equals itself; it is still represented exactly.
        (f64::from(converted) == value || value.is_nan()).then_some(converted)
    }
}

impl Scalar for f32 {
    const EXPECTED: &'static str = "f32";

    fn to_value(&self) -> Value {
        Value::Float(Float::F32(*self))
    }

    fn from_value(value: &Value) -> Result<Self, ScalarError> {
        unbox_number(value, Self::EXPECTED)
    }

    fn non_finite(&self) -> Option<f64> {
        (!self.is_finite()).then(|| f64::from(*self))
    }

    fn from_non_finite(value: f64) -> Option<Self> {
        Some(value as f32)
    }
}

impl Scalar for f64 {
    const EXPECTED: &'static str = "f64";

    fn to_value(&self) -> Value {
        Value::Float(Float::F64(*self))
    }

    fn from_value(value: &Value) -> Result<Self, ScalarError> {
        unbox_number(value, Self::EXPECTED)
    }

    fn non_finite(&self) -> Option<f64> {
        (!self.is_finite()).then_some(*self)
    }

    fn from_non_finite(value: f64) -> Option<Self> {
        Some(value)
    }
}

impl Scalar for bool {
    const EXPECTED: &'static str = "bool";

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Result<Self, ScalarError> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(ScalarError::Mismatch),
        }
    }
}

impl Scalar for String {
    const EXPECTED: &'static str = "string";

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: &Value) -> Result<Self, ScalarError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(ScalarError::Mismatch),
        }
    }
}

impl Scalar for char {
    const EXPECTED: &'static str = "char";

    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_value(value: &Value) -> Result<Self, ScalarError> {
        let Value::String(s) = value else {
            return Err(ScalarError::Mismatch);
        };
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ScalarError::Inexact {
                message: format!("expected a single character, found {:?}", s),
            }),
        }
    }
}

impl fmt::Display for ScalarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarError::Mismatch => f.write_str("type mismatch"),
            ScalarError::Inexact { message } => f.write_str(message),
        }
    }
}
