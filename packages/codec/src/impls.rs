//! `Encodable` and `Decodable` for standard library types.
//!
//! Scalars go through a single value container. Sequences and sets use an
//! unkeyed container; maps with `String` keys use a keyed container.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::hash::BuildHasher;

use indexmap::IndexMap;
use mapcoder_core::{DecodeError, EncodeError, Float, Map, Value};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::traits::{Decodable, Encodable};

macro_rules! impl_scalar_codable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encodable for $ty {
                fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
                    encoder.single_value_container().encode(*self)
                }
            }

            impl Decodable for $ty {
                fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
                    decoder.single_value_container().decode()
                }
            }
        )*
    };
}

impl_scalar_codable!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, char);

impl Encodable for String {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        self.as_str().encode(encoder)
    }
}

impl Decodable for String {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.single_value_container().decode()
    }
}

impl Encodable for str {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder
            .single_value_container()
            .encode_value(Value::String(self.to_string()))
    }
}

impl<T: Encodable> Encodable for Option<T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        match self {
            Some(value) => value.encode(encoder),
            None => encoder.single_value_container().encode_nil(),
        }
    }
}

impl<T: Decodable> Decodable for Option<T> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        if decoder.single_value_container().decode_nil() {
            Ok(None)
        } else {
            T::decode(decoder).map(Some)
        }
    }
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        (**self).encode(encoder)
    }
}

impl<T: Encodable + ?Sized> Encodable for Box<T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        (**self).encode(encoder)
    }
}

impl<T: Decodable> Decodable for Box<T> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        T::decode(decoder).map(Box::new)
    }
}

impl<T: Encodable> Encodable for [T] {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.unkeyed_container().encode_all(self)
    }
}

impl<T: Encodable, const N: usize> Encodable for [T; N] {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        self.as_slice().encode(encoder)
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        self.as_slice().encode(encoder)
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let mut container = decoder.unkeyed_container()?;
        let mut items = Vec::with_capacity(container.count());
        while !container.is_at_end() {
            items.push(container.decode()?);
        }
        Ok(items)
    }
}

impl<T: Encodable> Encodable for VecDeque<T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.unkeyed_container().encode_all(self)
    }
}

impl<T: Decodable> Decodable for VecDeque<T> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Vec::<T>::decode(decoder).map(VecDeque::from)
    }
}

impl<T: Encodable> Encodable for BTreeSet<T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.unkeyed_container().encode_all(self)
    }
}

impl<T: Decodable + Ord> Decodable for BTreeSet<T> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Vec::<T>::decode(decoder).map(BTreeSet::from_iter)
    }
}

fn encode_entries<'v, T, I>(encoder: &mut Encoder, entries: I) -> Result<(), EncodeError>
where
    T: Encodable + 'v,
    I: IntoIterator<Item = (&'v String, &'v T)>,
{
    let mut container = encoder.keyed_container();
    for (key, value) in entries {
        container.encode(key, value)?;
    }
    Ok(())
}

fn decode_entries<T, C>(decoder: &mut Decoder<'_>) -> Result<C, DecodeError>
where
    T: Decodable,
    C: FromIterator<(String, T)>,
{
    let mut container = decoder.keyed_container()?;
    let keys: Vec<String> = container.all_keys().into_iter().map(str::to_string).collect();
    let mut entries = Vec::with_capacity(keys.len());
    for key in keys {
        let value: T = container.decode(&key)?;
        entries.push((key, value));
    }
    Ok(entries.into_iter().collect())
}

impl<T: Encodable> Encodable for BTreeMap<String, T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encode_entries(encoder, self)
    }
}

impl<T: Decodable> Decodable for BTreeMap<String, T> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decode_entries(decoder)
    }
}

impl<T: Encodable, S> Encodable for HashMap<String, T, S> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encode_entries(encoder, self)
    }
}

impl<T: Decodable, S: BuildHasher + Default> Decodable for HashMap<String, T, S> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decode_entries(decoder)
    }
}

impl<T: Encodable, S> Encodable for IndexMap<String, T, S> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encode_entries(encoder, self)
    }
}

impl<T: Decodable, S: BuildHasher + Default> Decodable for IndexMap<String, T, S> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        decode_entries(decoder)
    }
}

/// A `Value` re-encodes through the containers, so key and float strategies
/// still apply to it.
impl Encodable for Value {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        match self {
            Value::Null => encoder.single_value_container().encode_nil(),
            Value::Float(Float::F32(f)) => f.encode(encoder),
            Value::Float(Float::F64(f)) => f.encode(encoder),
            Value::List(items) => items.encode(encoder),
            Value::Map(map) => encode_entries(encoder, map),
            Value::Bool(_) | Value::Integer(_) | Value::String(_) => {
                encoder.single_value_container().encode_value(self.clone())
            }
        }
    }
}

/// A `Value` decodes through the containers too, so map keys and
/// non-finite float tokens come back the way they were before encoding.
impl Decodable for Value {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        match decoder.value() {
            Value::Map(_) => decode_entries::<Value, Map>(decoder).map(Value::Map),
            Value::List(_) => Vec::<Value>::decode(decoder).map(Value::List),
            Value::String(token) => Ok(match decoder.options().non_finite_floats.parse(token) {
                Some(float) => Value::Float(Float::F64(float)),
                None => Value::String(token.clone()),
            }),
            other => Ok(other.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::options::{DecoderOptions, EncoderOptions, KeyDecoding, NonFiniteFloatDecoding};
    use mapcoder_core::path;

    fn encode<T: Encodable + ?Sized>(value: &T) -> Value {
        let mut encoder = Encoder::new(Arc::new(EncoderOptions::default()));
        encoder
            .box_with(|e| value.encode(e))
            .unwrap()
            .unwrap_or_default()
    }

    fn decode<T: Decodable>(value: &Value) -> Result<T, DecodeError> {
        let mut decoder = Decoder::new(value, Arc::new(DecoderOptions::default()));
        T::decode(&mut decoder)
    }

    #[test]
    fn scalars() {
        assert_eq!(encode(&7u16), Value::from(7u16));
        assert_eq!(encode("hi"), Value::from("hi"));
        assert_eq!(encode(&'c'), Value::from("c"));
        assert_eq!(decode::<u16>(&Value::from(7u8)), Ok(7));
        assert_eq!(decode::<char>(&Value::from("c")), Ok('c'));
    }

    #[test]
    fn options() {
        assert_eq!(encode(&None::<i32>), Value::Null);
        assert_eq!(encode(&Some(3i32)), Value::from(3i32));
        assert_eq!(decode::<Option<i32>>(&Value::Null), Ok(None));
        assert_eq!(decode::<Option<i32>>(&Value::from(3i32)), Ok(Some(3)));
        assert!(matches!(
            decode::<Option<i32>>(&Value::from("3")),
            Err(DecodeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn sequences() {
        let list = Value::from(vec![1i32, 2, 3]);
        assert_eq!(encode(&vec![1i32, 2, 3]), list);
        assert_eq!(encode(&[1i32, 2, 3]), list);
        assert_eq!(decode::<Vec<i32>>(&list), Ok(vec![1, 2, 3]));
        assert_eq!(
            decode::<VecDeque<i64>>(&list),
            Ok(VecDeque::from(vec![1, 2, 3]))
        );
        assert_eq!(
            decode::<BTreeSet<u8>>(&Value::from(vec![3u8, 1, 3])),
            Ok(BTreeSet::from([1, 3]))
        );
    }

    #[test]
    fn sequence_errors_carry_index() {
        let list = Value::from(vec![Value::from(1i32), Value::from("two")]);
        let err = decode::<Vec<i32>>(&list).unwrap_err();
        assert_eq!(err.path(), &path!("1"));
    }

    #[test]
    fn string_keyed_maps() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), 2i32);
        map.insert("a".to_string(), 1i32);
        let value = encode(&map);
        assert_eq!(value, Value::from_iter([("a", 1i32), ("b", 2i32)]));
        assert_eq!(decode::<BTreeMap<String, i32>>(&value), Ok(map));

        let decoded: HashMap<String, i32> = decode(&value).unwrap();
        assert_eq!(decoded.get("b"), Some(&2));

        let ordered: IndexMap<String, i32> =
            decode(&Value::from_iter([("z", 1i32), ("a", 2i32)])).unwrap();
        assert_eq!(ordered.keys().collect::<Vec<_>>(), vec!["z", "a"]);
    }

    #[test]
    fn map_errors_carry_key() {
        let value = Value::from_iter([("ok", Value::from(1i32)), ("bad", Value::Null)]);
        let err = decode::<BTreeMap<String, i32>>(&value).unwrap_err();
        assert!(matches!(err, DecodeError::ValueNotFound { .. }));
        assert_eq!(err.path(), &path!("bad"));
    }

    #[test]
    fn value_passes_through() {
        let value = Value::from_iter([
            ("list", Value::from(vec![Value::Null, Value::from(1.5f32)])),
            ("flag", Value::from(true)),
        ]);
        assert_eq!(encode(&value), value);
        assert_eq!(decode::<Value>(&value), Ok(value.clone()));
    }

    #[test]
    fn value_reverses_key_and_float_strategies() {
        let stored = Value::from_iter([
            (
                "outer_key",
                Value::from_iter([("inner_key", Value::from("Infinity"))]),
            ),
            ("list_key", Value::from(vec![Value::from("NaN"), Value::from("plain")])),
        ]);
        let options = DecoderOptions::new()
            .with_key_decoding(KeyDecoding::ConvertFromSnakeCase)
            .with_non_finite_floats(NonFiniteFloatDecoding::ConvertFromString {
                positive_infinity: "Infinity".to_string(),
                negative_infinity: "-Infinity".to_string(),
                nan: "NaN".to_string(),
            });
        let mut decoder = Decoder::new(&stored, Arc::new(options));
        let decoded = Value::decode(&mut decoder).unwrap();

        assert_eq!(
            decoded.get(&path!("outerKey/innerKey")),
            Some(&Value::from(f64::INFINITY))
        );
        let list = decoded.get(&path!("listKey")).and_then(Value::as_list).unwrap();
        assert!(matches!(list[0], Value::Float(Float::F64(f)) if f.is_nan()));
        assert_eq!(list[1], Value::from("plain"));
        assert!(decoded.get(&path!("outer_key")).is_none());
    }

    #[test]
    fn boxed() {
        assert_eq!(encode(&Box::new(5i8)), Value::from(5i8));
        assert_eq!(decode::<Box<i8>>(&Value::from(5i8)), Ok(Box::new(5)));
    }
}
