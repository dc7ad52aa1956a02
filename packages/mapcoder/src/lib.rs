//! mapcoder: typed Rust values to generic string-keyed maps and back.
//!
//! A value describes itself once, through `Encodable` and `Decodable`, and
//! can then be turned into a `Map` of `Value`s for any subsystem that only
//! understands generic data, and rebuilt from one. Every failure names the
//! path of keys and indices where it happened.
//!
//! This crate re-exports the two layers it is built from:
//! - `mapcoder-core`: the `Value` tree, `Path`, and the error types
//! - `mapcoder-codec`: the encoding and decoding engines
//!
//! # Example
//!
//! ```rust
//! use mapcoder::{
//!     from_map, to_map, DecodeError, Decodable, Decoder, EncodeError, Encodable, Encoder,
//! };
//!
//! #[derive(Debug, PartialEq)]
//! struct Pet {
//!     name: String,
//!     legs: u8,
//!     owner: Option<String>,
//! }
//!
//! impl Encodable for Pet {
//!     fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
//!         let mut container = encoder.keyed_container();
//!         container.encode("name", &self.name)?;
//!         container.encode("legs", &self.legs)?;
//!         container.encode_if_present("owner", self.owner.as_ref())
//!     }
//! }
//!
//! impl Decodable for Pet {
//!     fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
//!         let mut container = decoder.keyed_container()?;
//!         Ok(Pet {
//!             name: container.decode("name")?,
//!             legs: container.decode("legs")?,
//!             owner: container.decode_if_present("owner")?,
//!         })
//!     }
//! }
//!
//! let pet = Pet { name: "Rex".to_string(), legs: 4, owner: None };
//! let map = to_map(&pet).unwrap();
//! assert!(!map.contains_key("owner"));
//! assert_eq!(from_map::<Pet>(map).unwrap(), pet);
//! ```

pub use mapcoder_core::{
    path, DecodeError, EncodeError, Float, Integer, Map, Path, PathSegment, Value, ValueKind,
};

pub use mapcoder_codec::{
    from_map, to_map, Decodable, Decoder, DecoderOptions, Encodable, Encoder, EncoderOptions,
    KeyDecoding, KeyEncoding, KeyedDecoder, KeyedEncoder, MapDecoder, MapEncoder,
    NonFiniteFloatDecoding, NonFiniteFloatEncoding, Scalar, ScalarError, SingleValueDecoder,
    SingleValueEncoder, UnkeyedDecoder, UnkeyedEncoder, SUPER_KEY,
};

#[cfg(feature = "async")]
pub use mapcoder_codec::{AsyncMapDecoder, AsyncMapEncoder};
