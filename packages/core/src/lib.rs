//! Core mapcoder types
//!
//! This crate holds the data model shared by the encoding and decoding
//! engines:
//! - `Value`: Dynamically typed tree (null, bool, integer, float, string, list, map)
//! - `Map`: Insertion-ordered string-keyed map of values
//! - `Path`: Keys and indices from the root to a traversal frame
//! - `EncodeError` / `DecodeError`: What went wrong, and where
//!
//! # Example
//!
//! ```rust
//! use mapcoder_core::{path, Value};
//!
//! let value = Value::from_iter([("port", Value::from(8080u16))]);
//! assert_eq!(value.get(&path!("port")), Some(&Value::from(8080u16)));
//! ```

mod error;
mod path;
mod value;

#[cfg(feature = "serde")]
mod serde_impls;

pub use error::{DecodeError, EncodeError};
pub use path::{Path, PathSegment};
pub use value::{Float, Integer, Map, Value, ValueKind};
