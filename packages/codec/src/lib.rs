//! Typed value encoding for mapcoder
//!
//! This layer turns typed Rust values into `Map`s of `Value`s and back. It adds:
//! - `Encodable` / `Decodable`: per-type descriptors of how a value is written and read
//! - `Encoder` / `Decoder`: the traversal engines that track the current path
//! - Keyed, unkeyed and single value accessors handed to the descriptors
//! - `MapEncoder` / `MapDecoder`: top-level entry points with their options
//!
//! # Example
//!
//! ```rust
//! use mapcoder_codec::{from_map, to_map, Decodable, Decoder, Encodable, Encoder};
//! use mapcoder_core::{DecodeError, EncodeError};
//!
//! #[derive(Debug, PartialEq)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl Encodable for Server {
//!     fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
//!         let mut container = encoder.keyed_container();
//!         container.encode("host", &self.host)?;
//!         container.encode("port", &self.port)
//!     }
//! }
//!
//! impl Decodable for Server {
//!     fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
//!         let mut container = decoder.keyed_container()?;
//!         Ok(Server {
//!             host: container.decode("host")?,
//!             port: container.decode("port")?,
//!         })
//!     }
//! }
//!
//! let server = Server { host: "localhost".to_string(), port: 8080 };
//! let map = to_map(&server).unwrap();
//! assert_eq!(from_map::<Server>(map).unwrap(), server);
//! ```
//!
//! # Async Support
//!
//! Enable the `async` feature for `AsyncMapEncoder` and `AsyncMapDecoder`.

mod coder;
mod decoder;
mod encoder;
mod impls;
mod keyed_decoder;
mod keyed_encoder;
mod options;
mod scalar;
mod traits;
mod unkeyed_decoder;
mod unkeyed_encoder;

pub use coder::{from_map, to_map, MapDecoder, MapEncoder};
pub use decoder::{Decoder, SingleValueDecoder};
pub use encoder::{Encoder, SingleValueEncoder};
pub use keyed_decoder::KeyedDecoder;
pub use keyed_encoder::{KeyedEncoder, SUPER_KEY};
pub use options::{
    DecoderOptions, EncoderOptions, KeyDecoding, KeyEncoding, NonFiniteFloatDecoding,
    NonFiniteFloatEncoding,
};
pub use scalar::{Scalar, ScalarError};
pub use traits::{Decodable, Encodable};
pub use unkeyed_decoder::UnkeyedDecoder;
pub use unkeyed_encoder::UnkeyedEncoder;

// Re-export core types for convenience
pub use mapcoder_core::{DecodeError, EncodeError, Map, Path, PathSegment, Value, ValueKind};

#[cfg(feature = "async")]
mod async_coder;

#[cfg(feature = "async")]
pub use async_coder::{AsyncMapDecoder, AsyncMapEncoder};
