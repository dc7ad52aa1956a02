//! Error types for encoding and decoding.
//!
//! Every error that can happen below the root carries the `Path` of the
//! frame that failed. Errors propagate unchanged from the failing frame to
//! the caller; the engines only restore their own stacks on the way out.

use thiserror::Error;

use crate::path::Path;
use crate::value::ValueKind;

/// Errors produced while turning a typed value into a `Map`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EncodeError {
    /// The root value did not encode to a map.
    #[error("top-level value encoded as {found}, expected a map")]
    NotADictionary {
        /// Shape the root value actually encoded to.
        found: ValueKind,
    },

    /// The root value requested no container and wrote nothing.
    #[error("top-level {type_name} did not encode any values")]
    EncodedNothing {
        /// Rust type name of the root value.
        type_name: &'static str,
    },

    /// A value cannot be represented, e.g. a non-finite float when those are rejected.
    #[error("invalid value at {path}: {reason}")]
    InvalidValue { path: Path, reason: String },
}

impl EncodeError {
    /// Create an invalid value error.
    pub fn invalid_value(path: Path, reason: impl Into<String>) -> Self {
        EncodeError::InvalidValue {
            path,
            reason: reason.into(),
        }
    }

    /// The path of the failing frame. Root-shape errors sit at the root.
    pub fn path(&self) -> Path {
        match self {
            EncodeError::InvalidValue { path, .. } => path.clone(),
            EncodeError::NotADictionary { .. } | EncodeError::EncodedNothing { .. } => Path::root(),
        }
    }
}

/// Errors produced while building a typed value from a `Map`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DecodeError {
    /// A value was required but the slot held null, or a list ran out.
    #[error("value not found at {path}: expected {expected}, {message}")]
    ValueNotFound {
        path: Path,
        expected: &'static str,
        message: String,
    },

    /// A required key is absent from the enclosing map.
    #[error("key '{key}' not found at {path}")]
    KeyNotFound { path: Path, key: String },

    /// The value found has the wrong shape for the requested type.
    #[error("type mismatch at {path}: expected {expected}, found {actual}")]
    TypeMismatch {
        path: Path,
        expected: &'static str,
        actual: ValueKind,
    },

    /// The value has the right shape but is not valid for the requested type.
    #[error("data corrupted at {path}: {message}")]
    DataCorrupted { path: Path, message: String },
}

impl DecodeError {
    /// Create a value not found error.
    pub fn value_not_found(path: Path, expected: &'static str, message: impl Into<String>) -> Self {
        DecodeError::ValueNotFound {
            path,
            expected,
            message: message.into(),
        }
    }

    /// Create a key not found error.
    pub fn key_not_found(path: Path, key: impl Into<String>) -> Self {
        DecodeError::KeyNotFound {
            path,
            key: key.into(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(path: Path, expected: &'static str, actual: ValueKind) -> Self {
        DecodeError::TypeMismatch {
            path,
            expected,
            actual,
        }
    }

    /// Create a data corrupted error.
    pub fn data_corrupted(path: Path, message: impl Into<String>) -> Self {
        DecodeError::DataCorrupted {
            path,
            message: message.into(),
        }
    }

    /// The path of the failing frame.
    pub fn path(&self) -> &Path {
        match self {
            DecodeError::ValueNotFound { path, .. }
            | DecodeError::KeyNotFound { path, .. }
            | DecodeError::TypeMismatch { path, .. }
            | DecodeError::DataCorrupted { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use std::error::Error as StdError;

    #[test]
    fn not_a_dictionary_display() {
        let e = EncodeError::NotADictionary {
            found: ValueKind::List,
        };
        assert_eq!(e.to_string(), "top-level value encoded as list, expected a map");
        assert!(e.path().is_empty());
    }

    #[test]
    fn encoded_nothing_display() {
        let e = EncodeError::EncodedNothing { type_name: "Unit" };
        assert!(e.to_string().contains("Unit"));
    }

    #[test]
    fn invalid_value_display() {
        let e = EncodeError::invalid_value(path!("stats/mean"), "NaN is not allowed");
        let display = e.to_string();
        assert!(display.contains("stats/mean"));
        assert!(display.contains("NaN is not allowed"));
        assert_eq!(e.path(), path!("stats/mean"));
    }

    #[test]
    fn key_not_found_display() {
        let e = DecodeError::key_not_found(path!("config"), "port");
        assert_eq!(e.to_string(), "key 'port' not found at config");
    }

    #[test]
    fn type_mismatch_display() {
        let e = DecodeError::type_mismatch(path!("outer/inner"), "i32", ValueKind::String);
        let display = e.to_string();
        assert!(display.contains("outer/inner"));
        assert!(display.contains("expected i32"));
        assert!(display.contains("found string"));
    }

    #[test]
    fn value_not_found_display() {
        let e = DecodeError::value_not_found(path!("x"), "u8", "found null");
        assert_eq!(e.to_string(), "value not found at x: expected u8, found null");
    }

    #[test]
    fn root_path_display() {
        let e = DecodeError::data_corrupted(Path::root(), "bad");
        assert_eq!(e.to_string(), "data corrupted at <root>: bad");
    }

    #[test]
    fn path_accessor() {
        let e = DecodeError::data_corrupted(path!("a/0"), "bad");
        assert_eq!(e.path(), &path!("a/0"));
    }

    #[test]
    fn errors_have_no_source() {
        let e = DecodeError::key_not_found(Path::root(), "k");
        assert!(StdError::source(&e).is_none());
    }
}
