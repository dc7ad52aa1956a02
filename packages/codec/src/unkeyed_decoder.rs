//! Position-indexed reads from one list.

use std::any::type_name;

use mapcoder_core::{DecodeError, Path, PathSegment, Value};

use crate::decoder::Decoder;
use crate::keyed_decoder::KeyedDecoder;
use crate::traits::Decodable;

/// Reads the elements of one list in order.
///
/// The cursor only moves forward, and only past elements that were read
/// successfully. A failed read leaves it where it was.
pub struct UnkeyedDecoder<'d, 'a> {
    decoder: &'d mut Decoder<'a>,
    items: &'a [Value],
    index: usize,
}

impl<'d, 'a> UnkeyedDecoder<'d, 'a> {
    pub(crate) fn new(decoder: &'d mut Decoder<'a>, items: &'a [Value]) -> Self {
        Self {
            decoder,
            items,
            index: 0,
        }
    }

    fn peek(&self) -> Option<&'a Value> {
        self.items.get(self.index)
    }

    fn at_end(&self, expected: &'static str) -> DecodeError {
        DecodeError::value_not_found(
            self.decoder.path.child(self.index),
            expected,
            "unkeyed container is at end",
        )
    }

    fn current(&self, expected: &'static str) -> Result<&'a Value, DecodeError> {
        self.peek().ok_or_else(|| self.at_end(expected))
    }

    /// Path of the list being read.
    pub fn path(&self) -> &Path {
        self.decoder.path()
    }

    /// Number of elements in the list.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Index of the next element to be read.
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn is_at_end(&self) -> bool {
        self.index >= self.items.len()
    }

    /// If the next element is null, consume it and return `true`.
    pub fn decode_nil(&mut self) -> Result<bool, DecodeError> {
        if self.current("null")?.is_null() {
            self.index += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Decode the next element.
    pub fn decode<T: Decodable>(&mut self) -> Result<T, DecodeError> {
        let value = self.current(type_name::<T>())?;
        let decoded = self
            .decoder
            .decode_child(PathSegment::Index(self.index), value)?;
        self.index += 1;
        Ok(decoded)
    }

    /// Decode the next element, or `None` at the end or on a null element.
    pub fn decode_if_present<T: Decodable>(&mut self) -> Result<Option<T>, DecodeError> {
        match self.peek() {
            None => Ok(None),
            Some(Value::Null) => {
                self.index += 1;
                Ok(None)
            }
            Some(_) => self.decode().map(Some),
        }
    }

    /// Read the next element as a map with `f`.
    pub fn nested_keyed<T, F>(&mut self, f: F) -> Result<T, DecodeError>
    where
        F: FnOnce(&mut KeyedDecoder<'_, 'a>) -> Result<T, DecodeError>,
    {
        let value = self.current("map")?;
        let decoded = self
            .decoder
            .with_child(PathSegment::Index(self.index), value, |decoder| {
                f(&mut decoder.keyed_container()?)
            })?;
        self.index += 1;
        Ok(decoded)
    }

    /// Read the next element as a list with `f`.
    pub fn nested_unkeyed<T, F>(&mut self, f: F) -> Result<T, DecodeError>
    where
        F: FnOnce(&mut UnkeyedDecoder<'_, 'a>) -> Result<T, DecodeError>,
    {
        let value = self.current("list")?;
        let decoded = self
            .decoder
            .with_child(PathSegment::Index(self.index), value, |decoder| {
                f(&mut decoder.unkeyed_container()?)
            })?;
        self.index += 1;
        Ok(decoded)
    }

    /// Hand the next element to a base type's decoder.
    pub fn super_decoder<T, F>(&mut self, f: F) -> Result<T, DecodeError>
    where
        F: FnOnce(&mut Decoder<'a>) -> Result<T, DecodeError>,
    {
        let value = self.current("decoder")?;
        let decoded = self
            .decoder
            .with_child(PathSegment::Index(self.index), value, f)?;
        self.index += 1;
        Ok(decoded)
    }
}
