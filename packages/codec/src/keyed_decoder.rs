//! Field-name-indexed reads from one map.

use indexmap::IndexMap;
use mapcoder_core::{DecodeError, Map, Path, PathSegment, Value};

use crate::decoder::Decoder;
use crate::keyed_encoder::SUPER_KEY;
use crate::options::{from_snake_case, KeyDecoding};
use crate::traits::Decodable;
use crate::unkeyed_decoder::UnkeyedDecoder;

/// Stands in for an absent base-type entry.
static NULL: Value = Value::Null;

/// The map's entries as seen through the key decoding strategy.
enum Entries<'a> {
    Direct(&'a Map),
    Converted(IndexMap<String, &'a Value>),
}

impl<'a> Entries<'a> {
    fn new(map: &'a Map, strategy: KeyDecoding) -> Self {
        match strategy {
            KeyDecoding::UseDefaultKeys => Entries::Direct(map),
            KeyDecoding::ConvertFromSnakeCase => {
                let mut converted = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    // On collisions the first stored key wins.
                    converted.entry(from_snake_case(key)).or_insert(value);
                }
                Entries::Converted(converted)
            }
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        match self {
            Entries::Direct(map) => {
                let map: &'a Map = *map;
                map.get(key)
            }
            Entries::Converted(entries) => entries.get(key).copied(),
        }
    }

    fn keys(&self) -> Vec<&str> {
        match self {
            Entries::Direct(map) => map.keys().map(String::as_str).collect(),
            Entries::Converted(entries) => entries.keys().map(String::as_str).collect(),
        }
    }
}

/// Reads named members of one map.
///
/// Lookups are by exact key (after key decoding). A missing key is
/// `KeyNotFound`; a key holding null is `ValueNotFound` unless read with
/// `decode_nil` or `decode_if_present`.
pub struct KeyedDecoder<'d, 'a> {
    decoder: &'d mut Decoder<'a>,
    entries: Entries<'a>,
}

impl<'d, 'a> KeyedDecoder<'d, 'a> {
    pub(crate) fn new(decoder: &'d mut Decoder<'a>, map: &'a Map) -> Self {
        let entries = Entries::new(map, decoder.options().key_decoding);
        Self { decoder, entries }
    }

    fn lookup(&self, key: &str) -> Result<&'a Value, DecodeError> {
        self.entries
            .get(key)
            .ok_or_else(|| DecodeError::key_not_found(self.decoder.path.clone(), key))
    }

    /// Path of the map being read.
    pub fn path(&self) -> &Path {
        self.decoder.path()
    }

    /// Every key in the map, in stored order.
    pub fn all_keys(&self) -> Vec<&str> {
        self.entries.keys()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.get(key).is_some()
    }

    /// Whether the value under `key` is null.
    pub fn decode_nil(&self, key: &str) -> Result<bool, DecodeError> {
        Ok(self.lookup(key)?.is_null())
    }

    /// Decode the value under `key`.
    pub fn decode<T: Decodable>(&mut self, key: &str) -> Result<T, DecodeError> {
        let value = self.lookup(key)?;
        self.decoder.decode_child(PathSegment::from(key), value)
    }

    /// Decode the value under `key`, or `None` if it is absent or null.
    pub fn decode_if_present<T: Decodable>(&mut self, key: &str) -> Result<Option<T>, DecodeError> {
        match self.entries.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => self
                .decoder
                .decode_child(PathSegment::from(key), value)
                .map(Some),
        }
    }

    /// Read the map under `key` with `f`.
    pub fn nested_keyed<T, F>(&mut self, key: &str, f: F) -> Result<T, DecodeError>
    where
        F: FnOnce(&mut KeyedDecoder<'_, 'a>) -> Result<T, DecodeError>,
    {
        let value = self.lookup(key)?;
        self.decoder
            .with_child(PathSegment::from(key), value, |decoder| {
                f(&mut decoder.keyed_container()?)
            })
    }

    /// Read the list under `key` with `f`.
    pub fn nested_unkeyed<T, F>(&mut self, key: &str, f: F) -> Result<T, DecodeError>
    where
        F: FnOnce(&mut UnkeyedDecoder<'_, 'a>) -> Result<T, DecodeError>,
    {
        let value = self.lookup(key)?;
        self.decoder
            .with_child(PathSegment::from(key), value, |decoder| {
                f(&mut decoder.unkeyed_container()?)
            })
    }

    /// Hand the value under `"super"` to a base type's decoder.
    ///
    /// An absent key presents null to `f`, so a base type that reads a
    /// container from it gets `ValueNotFound` rather than `KeyNotFound`.
    pub fn super_decoder<T, F>(&mut self, f: F) -> Result<T, DecodeError>
    where
        F: FnOnce(&mut Decoder<'a>) -> Result<T, DecodeError>,
    {
        self.super_decoder_for_key(SUPER_KEY, f)
    }

    /// Like `super_decoder`, under a caller-chosen key.
    pub fn super_decoder_for_key<T, F>(&mut self, key: &str, f: F) -> Result<T, DecodeError>
    where
        F: FnOnce(&mut Decoder<'a>) -> Result<T, DecodeError>,
    {
        let value = self.entries.get(key).unwrap_or(&NULL);
        self.decoder.with_child(PathSegment::from(key), value, f)
    }
}
