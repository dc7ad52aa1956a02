//! Top-level entry points: typed value to `Map` and back.

use std::any::type_name;
use std::sync::Arc;

use mapcoder_core::{DecodeError, EncodeError, Map, Value};
use tracing::debug;

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::options::{DecoderOptions, EncoderOptions};
use crate::traits::{Decodable, Encodable};

/// Encodes `Encodable` values into maps.
///
/// Cheap to clone; the options are shared between clones and between the
/// traversals this encoder starts.
#[derive(Clone, Debug, Default)]
pub struct MapEncoder {
    options: Arc<EncoderOptions>,
}

impl MapEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Encode `value`, which must produce a map at the top level.
    ///
    /// A root that encodes nothing is `EncodedNothing`; a root that encodes
    /// a list or a leaf is `NotADictionary`.
    pub fn encode<T: Encodable + ?Sized>(&self, value: &T) -> Result<Map, EncodeError> {
        let result = self.encode_root(value).and_then(|produced| match produced {
            None => Err(EncodeError::EncodedNothing {
                type_name: type_name::<T>(),
            }),
            Some(value) => value.into_map().map_err(|other| EncodeError::NotADictionary {
                found: other.kind(),
            }),
        });
        if let Err(err) = &result {
            debug!(error = %err, type_name = type_name::<T>(), "encode failed");
        }
        result
    }

    /// Encode `value` without the top-level map requirement.
    ///
    /// A root that encodes nothing becomes an empty map, as a nested value
    /// would.
    pub fn encode_value<T: Encodable + ?Sized>(&self, value: &T) -> Result<Value, EncodeError> {
        let result = self
            .encode_root(value)
            .map(|produced| produced.unwrap_or_else(Value::map));
        if let Err(err) = &result {
            debug!(error = %err, type_name = type_name::<T>(), "encode failed");
        }
        result
    }

    fn encode_root<T: Encodable + ?Sized>(&self, value: &T) -> Result<Option<Value>, EncodeError> {
        let mut encoder = Encoder::new(Arc::clone(&self.options));
        encoder.box_with(|encoder| value.encode(encoder))
    }
}

/// Decodes `Decodable` values from maps.
#[derive(Clone, Debug, Default)]
pub struct MapDecoder {
    options: Arc<DecoderOptions>,
}

impl MapDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecoderOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decode a `T` from `map`.
    pub fn decode<T: Decodable>(&self, map: Map) -> Result<T, DecodeError> {
        self.decode_value(&Value::Map(map))
    }

    /// Decode a `T` from any value, including a list or a leaf.
    pub fn decode_value<T: Decodable>(&self, value: &Value) -> Result<T, DecodeError> {
        let mut decoder = Decoder::new(value, Arc::clone(&self.options));
        T::decode(&mut decoder).inspect_err(|err| {
            debug!(error = %err, path = %err.path(), type_name = type_name::<T>(), "decode failed");
        })
    }
}

/// Encode `value` into a map with default options.
pub fn to_map<T: Encodable + ?Sized>(value: &T) -> Result<Map, EncodeError> {
    MapEncoder::new().encode(value)
}

/// Decode a `T` from `map` with default options.
pub fn from_map<T: Decodable>(map: Map) -> Result<T, DecodeError> {
    MapDecoder::new().decode(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapcoder_core::ValueKind;

    struct Nothing;

    impl Encodable for Nothing {
        fn encode(&self, _encoder: &mut Encoder) -> Result<(), EncodeError> {
            Ok(())
        }
    }

    #[test]
    fn root_must_be_a_map() {
        assert_eq!(
            to_map(&vec![1i32, 2]),
            Err(EncodeError::NotADictionary {
                found: ValueKind::List
            })
        );
        assert_eq!(
            to_map(&5u8),
            Err(EncodeError::NotADictionary {
                found: ValueKind::Integer
            })
        );
        assert!(matches!(
            to_map(&Nothing),
            Err(EncodeError::EncodedNothing { type_name }) if type_name.ends_with("Nothing")
        ));
    }

    #[test]
    fn encode_value_has_no_root_rule() {
        let encoder = MapEncoder::new();
        assert_eq!(encoder.encode_value(&vec![1i32]), Ok(Value::from(vec![1i32])));
        assert_eq!(encoder.encode_value(&Nothing), Ok(Value::map()));
    }

    #[test]
    fn map_round_trip() {
        let mut original = Map::new();
        original.insert("a".to_string(), Value::from(1i64));
        original.insert("b".to_string(), Value::from(vec!["x", "y"]));
        let encoded = to_map(&original).unwrap();
        assert_eq!(encoded, original);
        let decoded: Map = from_map(encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn decode_value_accepts_any_root() {
        let decoder = MapDecoder::new();
        assert_eq!(decoder.decode_value::<Vec<u8>>(&Value::from(vec![1u8])), Ok(vec![1]));
        assert_eq!(decoder.decode_value::<bool>(&Value::Bool(true)), Ok(true));
    }

    #[test]
    fn options_are_shared_by_clones() {
        let encoder = MapEncoder::with_options(EncoderOptions::new().with_user_info("k", 1i32));
        let clone = encoder.clone();
        assert!(std::ptr::eq(encoder.options(), clone.options()));
    }
}
