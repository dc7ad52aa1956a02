//! Encodable and Decodable: the per-type descriptors the engines drive.

use mapcoder_core::{DecodeError, EncodeError};

use crate::decoder::Decoder;
use crate::encoder::Encoder;

/// A type that can write itself into an `Encoder`.
///
/// Implementations request exactly one container from the encoder (keyed,
/// unkeyed, or single value) and write their members into it in a fixed
/// order.
///
/// # Example
///
/// ```rust
/// use mapcoder_codec::{Encodable, Encoder};
/// use mapcoder_core::EncodeError;
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Encodable for Point {
///     fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
///         let mut container = encoder.keyed_container();
///         container.encode("x", &self.x)?;
///         container.encode("y", &self.y)
///     }
/// }
/// ```
pub trait Encodable {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError>;
}

/// A type that can build itself from a `Decoder`.
///
/// # Example
///
/// ```rust
/// use mapcoder_codec::{Decodable, Decoder};
/// use mapcoder_core::DecodeError;
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Decodable for Point {
///     fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
///         let mut container = decoder.keyed_container()?;
///         Ok(Point {
///             x: container.decode("x")?,
///             y: container.decode("y")?,
///         })
///     }
/// }
/// ```
pub trait Decodable: Sized {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError>;
}
