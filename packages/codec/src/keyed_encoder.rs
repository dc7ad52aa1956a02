//! Field-name-indexed writes into one map frame.

use mapcoder_core::{EncodeError, Map, Path, PathSegment, Value};
use tracing::trace;

use crate::encoder::{Encoder, Frame};
use crate::scalar::Scalar;
use crate::traits::Encodable;
use crate::unkeyed_encoder::UnkeyedEncoder;

/// Key used by `super_encoder` when no key is given.
pub const SUPER_KEY: &str = "super";

/// Writes named members into the map frame at `depth`.
///
/// Obtained from `Encoder::keyed_container` or `nested_keyed`. Writes go to
/// exactly one map; nested containers are scoped to a closure and written
/// into this map when the closure returns.
pub struct KeyedEncoder<'e> {
    encoder: &'e mut Encoder,
    depth: usize,
}

impl<'e> KeyedEncoder<'e> {
    pub(crate) fn new(encoder: &'e mut Encoder, depth: usize) -> Self {
        Self { encoder, depth }
    }

    fn map(&mut self) -> &mut Map {
        match &mut self.encoder.storage[self.depth] {
            Frame::Keyed(map) => map,
            _ => unreachable!("keyed encoder bound to a non-keyed frame"),
        }
    }

    fn insert(&mut self, key: &str, value: Value) {
        let key = self
            .encoder
            .options()
            .key_encoding
            .encode_key(key)
            .into_owned();
        self.map().insert(key, value);
    }

    /// Path of the map this container writes into.
    pub fn path(&self) -> &Path {
        &self.encoder.path
    }

    /// Write an explicit null under `key`.
    pub fn encode_nil(&mut self, key: &str) -> Result<(), EncodeError> {
        self.insert(key, Value::Null);
        Ok(())
    }

    /// Encode `value` under `key`.
    pub fn encode<T: Encodable + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), EncodeError> {
        let encoded = self.encoder.encode_child(PathSegment::from(key), value)?;
        self.insert(key, encoded);
        Ok(())
    }

    /// Box a scalar straight into this map without a child frame.
    pub fn encode_scalar<S: Scalar>(&mut self, key: &str, value: S) -> Result<(), EncodeError> {
        let boxed = self.encoder.box_scalar_at(PathSegment::from(key), &value)?;
        self.insert(key, boxed);
        Ok(())
    }

    /// Encode `value` under `key` if there is one; write nothing otherwise.
    pub fn encode_if_present<T: Encodable + ?Sized>(
        &mut self,
        key: &str,
        value: Option<&T>,
    ) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.encode(key, value),
            None => Ok(()),
        }
    }

    /// Write a nested map under `key`, filled in by `f`.
    pub fn nested_keyed<F>(&mut self, key: &str, f: F) -> Result<(), EncodeError>
    where
        F: FnOnce(&mut KeyedEncoder<'_>) -> Result<(), EncodeError>,
    {
        let nested = self.encoder.nested(
            PathSegment::from(key),
            Frame::Keyed(Map::new()),
            |encoder, depth| f(&mut KeyedEncoder::new(encoder, depth)),
        )?;
        self.insert(key, nested);
        Ok(())
    }

    /// Write a nested list under `key`, filled in by `f`.
    pub fn nested_unkeyed<F>(&mut self, key: &str, f: F) -> Result<(), EncodeError>
    where
        F: FnOnce(&mut UnkeyedEncoder<'_>) -> Result<(), EncodeError>,
    {
        let nested = self.encoder.nested(
            PathSegment::from(key),
            Frame::Unkeyed(Vec::new()),
            |encoder, depth| f(&mut UnkeyedEncoder::new(encoder, depth)),
        )?;
        self.insert(key, nested);
        Ok(())
    }

    /// Let a base type encode itself under the `"super"` key.
    ///
    /// `f` receives an encoder positioned at that key. Whatever it produces
    /// (an empty map if it produces nothing) is written here once `f`
    /// returns; if `f` fails nothing is written.
    pub fn super_encoder<F>(&mut self, f: F) -> Result<(), EncodeError>
    where
        F: FnOnce(&mut Encoder) -> Result<(), EncodeError>,
    {
        self.super_encoder_for_key(SUPER_KEY, f)
    }

    /// Like `super_encoder`, under a caller-chosen key.
    pub fn super_encoder_for_key<F>(&mut self, key: &str, f: F) -> Result<(), EncodeError>
    where
        F: FnOnce(&mut Encoder) -> Result<(), EncodeError>,
    {
        let produced = self.encoder.delegate(PathSegment::from(key), f)?;
        trace!(path = %self.encoder.path, key, "flushed base-type delegate");
        self.insert(key, produced);
        Ok(())
    }
}
