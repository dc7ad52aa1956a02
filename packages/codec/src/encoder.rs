//! The encoding traversal coordinator.
//!
//! `Encoder` owns the current path and a stack of in-progress frames. A frame
//! is pushed when a value requests a container (or encodes a single value)
//! and popped by whoever asked for that value, once it is complete.
//!
//! Invariant: a new frame may be pushed only while
//! `storage.len() == path.len()`. Requesting a keyed or unkeyed container
//! when a frame of the same shape already sits at this path reuses it;
//! anything else is a contract violation and panics.

use std::collections::BTreeMap;
use std::sync::Arc;

use mapcoder_core::{EncodeError, Map, Path, PathSegment, Value};
use tracing::trace;

use crate::keyed_encoder::KeyedEncoder;
use crate::options::{EncoderOptions, NonFiniteFloatEncoding};
use crate::scalar::Scalar;
use crate::traits::Encodable;
use crate::unkeyed_encoder::UnkeyedEncoder;

/// One in-progress level of the output tree.
#[derive(Debug)]
pub(crate) enum Frame {
    Keyed(Map),
    Unkeyed(Vec<Value>),
    Single(Value),
}

impl Frame {
    pub(crate) fn into_value(self) -> Value {
        match self {
            Frame::Keyed(map) => Value::Map(map),
            Frame::Unkeyed(items) => Value::List(items),
            Frame::Single(value) => value,
        }
    }
}

/// Traversal state handed to `Encodable::encode`.
pub struct Encoder {
    pub(crate) storage: Vec<Frame>,
    pub(crate) path: Path,
    options: Arc<EncoderOptions>,
}

impl Encoder {
    pub(crate) fn new(options: Arc<EncoderOptions>) -> Self {
        Self {
            storage: Vec::new(),
            path: Path::root(),
            options,
        }
    }

    /// Keys and indices from the root to the value being encoded.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    pub fn user_info(&self) -> &BTreeMap<String, Value> {
        &self.options.user_info
    }

    /// An `InvalidValue` error at the current path.
    pub fn invalid_value(&self, reason: impl Into<String>) -> EncodeError {
        EncodeError::invalid_value(self.path.clone(), reason)
    }

    fn can_encode_new_value(&self) -> bool {
        self.storage.len() == self.path.len()
    }

    /// Claim a map for the value at the current path.
    ///
    /// # Panics
    ///
    /// Panics if a list or single value was already encoded at this path.
    pub fn keyed_container(&mut self) -> KeyedEncoder<'_> {
        if self.can_encode_new_value() {
            self.storage.push(Frame::Keyed(Map::new()));
            trace!(path = %self.path, "pushed keyed frame");
        } else if !matches!(self.storage.last(), Some(Frame::Keyed(_))) {
            panic!(
                "attempt to push a keyed container at {} after a different value was encoded there",
                self.path
            );
        }
        let depth = self.storage.len() - 1;
        KeyedEncoder::new(self, depth)
    }

    /// Claim a list for the value at the current path.
    ///
    /// # Panics
    ///
    /// Panics if a map or single value was already encoded at this path.
    pub fn unkeyed_container(&mut self) -> UnkeyedEncoder<'_> {
        if self.can_encode_new_value() {
            self.storage.push(Frame::Unkeyed(Vec::new()));
            trace!(path = %self.path, "pushed unkeyed frame");
        } else if !matches!(self.storage.last(), Some(Frame::Unkeyed(_))) {
            panic!(
                "attempt to push an unkeyed container at {} after a different value was encoded there",
                self.path
            );
        }
        let depth = self.storage.len() - 1;
        UnkeyedEncoder::new(self, depth)
    }

    /// Encode one leaf value at the current path.
    pub fn single_value_container(&mut self) -> SingleValueEncoder<'_> {
        SingleValueEncoder { encoder: self }
    }

    /// Box a scalar, applying the non-finite float strategy.
    pub(crate) fn box_scalar<S: Scalar>(&self, value: &S) -> Result<Value, EncodeError> {
        let Some(float) = value.non_finite() else {
            return Ok(value.to_value());
        };
        match &self.options.non_finite_floats {
            NonFiniteFloatEncoding::Allow => Ok(value.to_value()),
            NonFiniteFloatEncoding::Reject => Err(self.invalid_value(format!(
                "non-finite float {} cannot be encoded",
                float
            ))),
            NonFiniteFloatEncoding::ConvertToString {
                positive_infinity,
                negative_infinity,
                nan,
            } => {
                let token = if float.is_nan() {
                    nan
                } else if float > 0.0 {
                    positive_infinity
                } else {
                    negative_infinity
                };
                Ok(Value::String(token.clone()))
            }
        }
    }

    /// Box a scalar that will be stored under `segment`.
    pub(crate) fn box_scalar_at<S: Scalar>(
        &mut self,
        segment: PathSegment,
        value: &S,
    ) -> Result<Value, EncodeError> {
        self.path.push(segment);
        let result = self.box_scalar(value);
        self.path.pop();
        result
    }

    /// Run `f` against this encoder and take the frame it produced, if any.
    ///
    /// Whatever `f` pushed is popped again on every exit, so a failing child
    /// never leaves a half-built container behind.
    pub(crate) fn box_with<F>(&mut self, f: F) -> Result<Option<Value>, EncodeError>
    where
        F: FnOnce(&mut Encoder) -> Result<(), EncodeError>,
    {
        let depth = self.storage.len();
        let result = f(self);

        if let Err(err) = result {
            self.storage.truncate(depth);
            return Err(err);
        }

        debug_assert!(self.storage.len() <= depth + 1);
        if self.storage.len() > depth {
            Ok(self.storage.pop().map(Frame::into_value))
        } else {
            Ok(None)
        }
    }

    /// Encode `value` as the child at `segment`.
    ///
    /// A child that requests no container at all encodes as an empty map.
    pub(crate) fn encode_child<T: Encodable + ?Sized>(
        &mut self,
        segment: PathSegment,
        value: &T,
    ) -> Result<Value, EncodeError> {
        self.delegate(segment, |encoder| value.encode(encoder))
    }

    /// Hand the slot at `segment` to `f`, for children and base-type delegates.
    pub(crate) fn delegate<F>(&mut self, segment: PathSegment, f: F) -> Result<Value, EncodeError>
    where
        F: FnOnce(&mut Encoder) -> Result<(), EncodeError>,
    {
        self.path.push(segment);
        let result = self.box_with(f);
        self.path.pop();
        Ok(result?.unwrap_or_else(Value::map))
    }

    /// Push `frame` one level below the current one at `segment`, run `f`
    /// with its depth, and pop it again.
    pub(crate) fn nested<F>(
        &mut self,
        segment: PathSegment,
        frame: Frame,
        f: F,
    ) -> Result<Value, EncodeError>
    where
        F: FnOnce(&mut Encoder, usize) -> Result<(), EncodeError>,
    {
        self.path.push(segment);
        self.storage.push(frame);
        let depth = self.storage.len() - 1;
        trace!(path = %self.path, depth, "pushed nested frame");

        let result = f(self, depth);

        self.storage.truncate(depth + 1);
        let frame = self.storage.pop();
        self.path.pop();
        result?;

        match frame {
            Some(frame) => Ok(frame.into_value()),
            None => unreachable!("nested frame removed while in use"),
        }
    }
}

/// Encodes exactly one leaf value at the encoder's current path.
pub struct SingleValueEncoder<'e> {
    encoder: &'e mut Encoder,
}

impl SingleValueEncoder<'_> {
    pub fn path(&self) -> &Path {
        &self.encoder.path
    }

    /// Encode an explicit null.
    pub fn encode_nil(self) -> Result<(), EncodeError> {
        self.push(Value::Null)
    }

    /// Encode a scalar.
    pub fn encode<S: Scalar>(self, value: S) -> Result<(), EncodeError> {
        let boxed = self.encoder.box_scalar(&value)?;
        self.push(boxed)
    }

    /// Encode an already boxed value as-is.
    pub fn encode_value(self, value: Value) -> Result<(), EncodeError> {
        self.push(value)
    }

    fn push(self, value: Value) -> Result<(), EncodeError> {
        assert!(
            self.encoder.can_encode_new_value(),
            "attempt to encode a single value at {} after a value was already encoded there",
            self.encoder.path
        );
        self.encoder.storage.push(Frame::Single(value));
        Ok(())
    }
}
