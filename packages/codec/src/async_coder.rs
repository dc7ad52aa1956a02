//! Async encode and decode entry points.
//!
//! Enable the `async` feature to use these traits:
//!
//! ```toml
//! [dependencies]
//! mapcoder-codec = { version = "0.1", features = ["async"] }
//! ```
//!
//! A traversal never suspends; each call runs the whole synchronous
//! traversal inside one future so async callers can keep a uniform
//! `.await` style.

use async_trait::async_trait;

use mapcoder_core::{DecodeError, EncodeError, Map};

use crate::coder::{MapDecoder, MapEncoder};
use crate::traits::{Decodable, Encodable};

/// Async extension trait for encoding.
///
/// # Example
///
/// ```rust,ignore
/// use mapcoder_codec::{AsyncMapEncoder, MapEncoder};
///
/// async fn snapshot(config: &Config) -> Result<Map, EncodeError> {
///     MapEncoder::new().encode_async(config).await
/// }
/// ```
#[async_trait]
pub trait AsyncMapEncoder {
    /// Encode `value` into a map.
    async fn encode_async<T: Encodable + Sync + ?Sized>(
        &self,
        value: &T,
    ) -> Result<Map, EncodeError>;
}

/// Async extension trait for decoding.
#[async_trait]
pub trait AsyncMapDecoder {
    /// Decode a `T` from `map`.
    async fn decode_async<T: Decodable + Send>(&self, map: Map) -> Result<T, DecodeError>;
}

#[async_trait]
impl AsyncMapEncoder for MapEncoder {
    async fn encode_async<T: Encodable + Sync + ?Sized>(
        &self,
        value: &T,
    ) -> Result<Map, EncodeError> {
        self.encode(value)
    }
}

#[async_trait]
impl AsyncMapDecoder for MapDecoder {
    async fn decode_async<T: Decodable + Send>(&self, map: Map) -> Result<T, DecodeError> {
        self.decode(map)
    }
}
