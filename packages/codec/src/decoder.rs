//! The decoding traversal coordinator.
//!
//! `Decoder` borrows the input tree and keeps a stack of the values being
//! decoded next to the path that leads to them. Containers hand out child
//! decoders by pushing one value and one path segment, running the child,
//! and popping both again, whether the child succeeded or not.

use std::collections::BTreeMap;
use std::sync::Arc;

use mapcoder_core::{DecodeError, Path, PathSegment, Value};
use tracing::trace;

use crate::keyed_decoder::KeyedDecoder;
use crate::options::DecoderOptions;
use crate::scalar::{Scalar, ScalarError};
use crate::traits::Decodable;
use crate::unkeyed_decoder::UnkeyedDecoder;

/// Traversal state handed to `Decodable::decode`.
pub struct Decoder<'a> {
    storage: Vec<&'a Value>,
    pub(crate) path: Path,
    options: Arc<DecoderOptions>,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(value: &'a Value, options: Arc<DecoderOptions>) -> Self {
        Self {
            storage: vec![value],
            path: Path::root(),
            options,
        }
    }

    /// Keys and indices from the root to the value being decoded.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    pub fn user_info(&self) -> &BTreeMap<String, Value> {
        &self.options.user_info
    }

    /// A `DataCorrupted` error at the current path, for impls that reject a
    /// well-shaped but invalid value.
    pub fn data_corrupted(&self, message: impl Into<String>) -> DecodeError {
        DecodeError::data_corrupted(self.path.clone(), message)
    }

    /// The value being decoded.
    pub fn value(&self) -> &'a Value {
        self.storage[self.storage.len() - 1]
    }

    /// Read the current value as a map.
    pub fn keyed_container(&mut self) -> Result<KeyedDecoder<'_, 'a>, DecodeError> {
        match self.value() {
            Value::Map(map) => Ok(KeyedDecoder::new(self, map)),
            Value::Null => Err(DecodeError::value_not_found(
                self.path.clone(),
                "map",
                "cannot get a keyed container, found null",
            )),
            other => Err(DecodeError::type_mismatch(
                self.path.clone(),
                "map",
                other.kind(),
            )),
        }
    }

    /// Read the current value as a list.
    pub fn unkeyed_container(&mut self) -> Result<UnkeyedDecoder<'_, 'a>, DecodeError> {
        match self.value() {
            Value::List(items) => Ok(UnkeyedDecoder::new(self, items)),
            Value::Null => Err(DecodeError::value_not_found(
                self.path.clone(),
                "list",
                "cannot get an unkeyed container, found null",
            )),
            other => Err(DecodeError::type_mismatch(
                self.path.clone(),
                "list",
                other.kind(),
            )),
        }
    }

    /// Read the current value as one leaf.
    pub fn single_value_container(&self) -> SingleValueDecoder<'_, 'a> {
        SingleValueDecoder { decoder: self }
    }

    /// Run `f` with `value` pushed as the current value at `segment`.
    pub(crate) fn with_child<T, F>(
        &mut self,
        segment: PathSegment,
        value: &'a Value,
        f: F,
    ) -> Result<T, DecodeError>
    where
        F: FnOnce(&mut Decoder<'a>) -> Result<T, DecodeError>,
    {
        self.path.push(segment);
        self.storage.push(value);
        trace!(path = %self.path, kind = %value.kind(), "entered child");

        let result = f(self);

        self.storage.pop();
        self.path.pop();
        result
    }

    /// Decode `value` as a `T` found at `segment`.
    pub(crate) fn decode_child<T: Decodable>(
        &mut self,
        segment: PathSegment,
        value: &'a Value,
    ) -> Result<T, DecodeError> {
        self.with_child(segment, value, T::decode)
    }

    /// Unbox the current value as a scalar.
    pub(crate) fn unbox<S: Scalar>(&self) -> Result<S, DecodeError> {
        let value = self.value();
        if value.is_null() {
            return Err(DecodeError::value_not_found(
                self.path.clone(),
                S::EXPECTED,
                "found null",
            ));
        }

        if let Value::String(token) = value {
            if let Some(parsed) = self
                .options
                .non_finite_floats
                .parse(token)
                .and_then(S::from_non_finite)
            {
                return Ok(parsed);
            }
        }

        S::from_value(value).map_err(|err| match err {
            ScalarError::Mismatch => {
                DecodeError::type_mismatch(self.path.clone(), S::EXPECTED, value.kind())
            }
            ScalarError::Inexact { message } => {
                DecodeError::data_corrupted(self.path.clone(), message)
            }
        })
    }
}

/// Reads exactly one leaf value at the decoder's current path.
pub struct SingleValueDecoder<'d, 'a> {
    decoder: &'d Decoder<'a>,
}

impl<'a> SingleValueDecoder<'_, 'a> {
    pub fn path(&self) -> &Path {
        &self.decoder.path
    }

    /// The raw value.
    pub fn value(&self) -> &'a Value {
        self.decoder.value()
    }

    /// Whether the value is null.
    pub fn decode_nil(&self) -> bool {
        self.decoder.value().is_null()
    }

    /// Unbox the value as a scalar.
    ///
    /// Null is `ValueNotFound`, a value of the wrong shape is `TypeMismatch`,
    /// and a number that does not fit `S` exactly is `DataCorrupted`.
    pub fn decode<S: Scalar>(&self) -> Result<S, DecodeError> {
        self.decoder.unbox()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::NonFiniteFloatDecoding;
    use mapcoder_core::{path, ValueKind};

    fn decoder(value: &Value) -> Decoder<'_> {
        Decoder::new(value, Arc::new(DecoderOptions::default()))
    }

    #[test]
    fn unbox_scalars() {
        let value = Value::from(42u8);
        let d = decoder(&value);
        assert_eq!(d.single_value_container().decode::<i64>(), Ok(42));
        assert!(!d.single_value_container().decode_nil());
    }

    #[test]
    fn null_is_value_not_found() {
        let value = Value::Null;
        let d = decoder(&value);
        assert!(d.single_value_container().decode_nil());
        let err = d.single_value_container().decode::<u8>().unwrap_err();
        assert_eq!(
            err,
            DecodeError::value_not_found(Path::root(), "u8", "found null")
        );
    }

    #[test]
    fn wrong_shape_is_type_mismatch() {
        let value = Value::from("true");
        let d = decoder(&value);
        let err = d.single_value_container().decode::<bool>().unwrap_err();
        assert_eq!(
            err,
            DecodeError::type_mismatch(Path::root(), "bool", ValueKind::String)
        );
    }

    #[test]
    fn inexact_number_is_data_corrupted() {
        let value = Value::from(12345678901234i64);
        let d = decoder(&value);
        let err = d.single_value_container().decode::<i32>().unwrap_err();
        assert!(matches!(err, DecodeError::DataCorrupted { .. }));
        assert!(err.to_string().contains("12345678901234"));
    }

    #[test]
    fn container_shape_errors() {
        let value = Value::from(1i32);
        let mut d = decoder(&value);
        assert!(matches!(
            d.keyed_container(),
            Err(DecodeError::TypeMismatch { expected: "map", actual: ValueKind::Integer, .. })
        ));
        assert!(matches!(
            d.unkeyed_container(),
            Err(DecodeError::TypeMismatch { expected: "list", .. })
        ));

        let null = Value::Null;
        let mut d = decoder(&null);
        assert!(matches!(
            d.keyed_container(),
            Err(DecodeError::ValueNotFound { expected: "map", .. })
        ));
    }

    #[test]
    fn with_child_restores_state_on_error() {
        let root = Value::map();
        let child = Value::from("x");
        let mut d = decoder(&root);
        let err = d
            .with_child("a".into(), &child, |d| {
                d.with_child(0usize.into(), &child, |d| {
                    d.single_value_container().decode::<f64>()
                })
            })
            .unwrap_err();
        assert_eq!(err.path(), &path!("a/0"));
        assert!(d.path().is_empty());
        assert!(d.value().is_map());
    }

    #[test]
    fn non_finite_tokens_only_for_floats() {
        let options = DecoderOptions::new().with_non_finite_floats(
            NonFiniteFloatDecoding::ConvertFromString {
                positive_infinity: "Infinity".to_string(),
                negative_infinity: "-Infinity".to_string(),
                nan: "NaN".to_string(),
            },
        );
        let value = Value::from("Infinity");
        let d = Decoder::new(&value, Arc::new(options));
        assert_eq!(d.single_value_container().decode::<f64>(), Ok(f64::INFINITY));
        assert_eq!(
            d.single_value_container().decode::<f32>(),
            Ok(f32::INFINITY)
        );
        assert_eq!(
            d.single_value_container().decode::<String>(),
            Ok("Infinity".to_string())
        );
        assert!(matches!(
            d.single_value_container().decode::<i32>(),
            Err(DecodeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn non_finite_tokens_rejected_by_default() {
        let value = Value::from("NaN");
        let d = decoder(&value);
        assert!(matches!(
            d.single_value_container().decode::<f64>(),
            Err(DecodeError::TypeMismatch { expected: "f64", .. })
        ));
    }
}
