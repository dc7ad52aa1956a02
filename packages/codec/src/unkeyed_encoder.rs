//! Position-indexed appends into one list frame.

use mapcoder_core::{EncodeError, Map, Path, PathSegment, Value};
use tracing::trace;

use crate::encoder::{Encoder, Frame};
use crate::keyed_encoder::KeyedEncoder;
use crate::scalar::Scalar;
use crate::traits::Encodable;

/// Appends elements to the list frame at `depth`.
pub struct UnkeyedEncoder<'e> {
    encoder: &'e mut Encoder,
    depth: usize,
}

impl<'e> UnkeyedEncoder<'e> {
    pub(crate) fn new(encoder: &'e mut Encoder, depth: usize) -> Self {
        Self { encoder, depth }
    }

    fn items(&mut self) -> &mut Vec<Value> {
        match &mut self.encoder.storage[self.depth] {
            Frame::Unkeyed(items) => items,
            _ => unreachable!("unkeyed encoder bound to a non-unkeyed frame"),
        }
    }

    fn next_segment(&self) -> PathSegment {
        PathSegment::Index(self.count())
    }

    /// Path of the list this container appends to.
    pub fn path(&self) -> &Path {
        &self.encoder.path
    }

    /// Number of elements written so far.
    pub fn count(&self) -> usize {
        match &self.encoder.storage[self.depth] {
            Frame::Unkeyed(items) => items.len(),
            _ => unreachable!("unkeyed encoder bound to a non-unkeyed frame"),
        }
    }

    /// Append an explicit null.
    pub fn encode_nil(&mut self) -> Result<(), EncodeError> {
        self.items().push(Value::Null);
        Ok(())
    }

    /// Append `value`.
    pub fn encode<T: Encodable + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        let segment = self.next_segment();
        let encoded = self.encoder.encode_child(segment, value)?;
        self.items().push(encoded);
        Ok(())
    }

    /// Box a scalar straight into this list without a child frame.
    pub fn encode_scalar<S: Scalar>(&mut self, value: S) -> Result<(), EncodeError> {
        let segment = self.next_segment();
        let boxed = self.encoder.box_scalar_at(segment, &value)?;
        self.items().push(boxed);
        Ok(())
    }

    /// Append every element of `values` in order.
    pub fn encode_all<'v, T, I>(&mut self, values: I) -> Result<(), EncodeError>
    where
        T: Encodable + ?Sized + 'v,
        I: IntoIterator<Item = &'v T>,
    {
        for value in values {
            self.encode(value)?;
        }
        Ok(())
    }

    /// Append a nested map filled in by `f`.
    pub fn nested_keyed<F>(&mut self, f: F) -> Result<(), EncodeError>
    where
        F: FnOnce(&mut KeyedEncoder<'_>) -> Result<(), EncodeError>,
    {
        let segment = self.next_segment();
        let nested = self
            .encoder
            .nested(segment, Frame::Keyed(Map::new()), |encoder, depth| {
                f(&mut KeyedEncoder::new(encoder, depth))
            })?;
        self.items().push(nested);
        Ok(())
    }

    /// Append a nested list filled in by `f`.
    pub fn nested_unkeyed<F>(&mut self, f: F) -> Result<(), EncodeError>
    where
        F: FnOnce(&mut UnkeyedEncoder<'_>) -> Result<(), EncodeError>,
    {
        let segment = self.next_segment();
        let nested = self
            .encoder
            .nested(segment, Frame::Unkeyed(Vec::new()), |encoder, depth| {
                f(&mut UnkeyedEncoder::new(encoder, depth))
            })?;
        self.items().push(nested);
        Ok(())
    }

    /// Let a base type encode itself as the next element.
    ///
    /// The slot index is fixed when this is called; the produced value is
    /// written at that index once `f` returns successfully.
    pub fn super_encoder<F>(&mut self, f: F) -> Result<(), EncodeError>
    where
        F: FnOnce(&mut Encoder) -> Result<(), EncodeError>,
    {
        let index = self.count();
        let produced = self.encoder.delegate(PathSegment::Index(index), f)?;
        trace!(path = %self.encoder.path, index, "flushed base-type delegate");
        self.items().insert(index, produced);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::options::{EncoderOptions, NonFiniteFloatEncoding};

    fn encode_with<F>(options: EncoderOptions, f: F) -> Result<Value, EncodeError>
    where
        F: FnOnce(&mut UnkeyedEncoder<'_>) -> Result<(), EncodeError>,
    {
        let mut encoder = Encoder::new(Arc::new(options));
        let produced = encoder.box_with(|e| f(&mut e.unkeyed_container()))?;
        Ok(produced.unwrap_or_default())
    }

    fn encode(f: impl FnOnce(&mut UnkeyedEncoder<'_>) -> Result<(), EncodeError>) -> Value {
        encode_with(EncoderOptions::default(), f).unwrap()
    }

    #[test]
    fn appends_in_order() {
        let value = encode(|c| {
            c.encode(&1i32)?;
            c.encode_nil()?;
            c.encode_scalar("three".to_string())?;
            assert_eq!(c.count(), 3);
            Ok(())
        });
        assert_eq!(
            value,
            Value::List(vec![Value::from(1i32), Value::Null, Value::from("three")])
        );
    }

    #[test]
    fn encode_all_from_slice() {
        let value = encode(|c| c.encode_all(&[1u8, 2, 3]));
        assert_eq!(value, Value::from(vec![1u8, 2, 3]));
    }

    #[test]
    fn nested_lists_and_maps() {
        let value = encode(|c| {
            c.nested_unkeyed(|row| row.encode_all(&[1i32, 2]))?;
            c.nested_keyed(|cell| cell.encode("x", &0i32))
        });
        assert_eq!(
            value,
            Value::List(vec![
                Value::from(vec![1i32, 2]),
                Value::from_iter([("x", 0i32)]),
            ])
        );
    }

    #[test]
    fn error_path_uses_element_index() {
        let options = EncoderOptions::new().with_non_finite_floats(NonFiniteFloatEncoding::Reject);
        let err = encode_with(options, |c| {
            c.encode(&1.0f64)?;
            c.nested_keyed(|cell| cell.encode("weight", &f64::INFINITY))
        })
        .unwrap_err();
        assert_eq!(err.path(), mapcoder_core::path!("1/weight"));
    }

    #[test]
    fn super_encoder_takes_next_slot() {
        let value = encode(|c| {
            c.encode("first")?;
            c.super_encoder(|base| base.keyed_container().encode("base", &true))?;
            c.encode("last")
        });
        assert_eq!(
            value,
            Value::List(vec![
                Value::from("first"),
                Value::from_iter([("base", true)]),
                Value::from("last"),
            ])
        );
    }

    #[test]
    fn failed_super_encoder_writes_nothing() {
        let mut encoder = Encoder::new(Arc::new(EncoderOptions::default()));
        let result = encoder.box_with(|e| {
            let mut list = e.unkeyed_container();
            list.encode(&1i32)?;
            let failed = list.super_encoder(|base| {
                base.keyed_container().encode("partial", &1i32)?;
                Err(base.invalid_value("base refused"))
            });
            assert!(failed.is_err());
            assert_eq!(list.count(), 1);
            Ok(())
        });
        assert_eq!(result.unwrap(), Some(Value::from(vec![1i32])));
    }
}
