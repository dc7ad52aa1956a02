//! Encoder and decoder configuration.

use std::borrow::Cow;
use std::collections::BTreeMap;

use mapcoder_core::Value;

/// How non-finite floats (NaN, +inf, -inf) are encoded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NonFiniteFloatEncoding {
    /// Store them as float values like any other float.
    #[default]
    Allow,
    /// Fail with `EncodeError::InvalidValue`.
    Reject,
    /// Store them as the given strings.
    ConvertToString {
        positive_infinity: String,
        negative_infinity: String,
        nan: String,
    },
}

/// How string values are treated when a float is requested.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NonFiniteFloatDecoding {
    /// A string is a type mismatch for a float.
    #[default]
    Reject,
    /// Accept these exact strings as NaN, +inf and -inf.
    ConvertFromString {
        positive_infinity: String,
        negative_infinity: String,
        nan: String,
    },
}

impl NonFiniteFloatDecoding {
    /// The float named by `token`, if the strategy recognizes it.
    pub(crate) fn parse(&self, token: &str) -> Option<f64> {
        match self {
            NonFiniteFloatDecoding::Reject => None,
            NonFiniteFloatDecoding::ConvertFromString {
                positive_infinity,
                negative_infinity,
                nan,
            } => {
                if token == positive_infinity {
                    Some(f64::INFINITY)
                } else if token == negative_infinity {
                    Some(f64::NEG_INFINITY)
                } else if token == nan {
                    Some(f64::NAN)
                } else {
                    None
                }
            }
        }
    }
}

/// How keys written by `Encodable` impls are stored in the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyEncoding {
    /// Store keys exactly as written.
    #[default]
    UseDefaultKeys,
    /// `myFieldName` is stored as `my_field_name`.
    ConvertToSnakeCase,
}

impl KeyEncoding {
    pub(crate) fn encode_key<'k>(&self, key: &'k str) -> Cow<'k, str> {
        match self {
            KeyEncoding::UseDefaultKeys => Cow::Borrowed(key),
            KeyEncoding::ConvertToSnakeCase => Cow::Owned(to_snake_case(key)),
        }
    }
}

/// How keys found in the map are presented to `Decodable` impls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyDecoding {
    /// Look keys up exactly as stored.
    #[default]
    UseDefaultKeys,
    /// A stored `my_field_name` is looked up as `myFieldName`.
    ConvertFromSnakeCase,
}

/// Options for `MapEncoder`.
#[derive(Clone, Debug, Default)]
pub struct EncoderOptions {
    pub non_finite_floats: NonFiniteFloatEncoding,
    pub key_encoding: KeyEncoding,
    /// Caller context handed to every `Encodable` through `Encoder::user_info`.
    pub user_info: BTreeMap<String, Value>,
}

impl EncoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_non_finite_floats(mut self, strategy: NonFiniteFloatEncoding) -> Self {
        self.non_finite_floats = strategy;
        self
    }

    #[must_use]
    pub fn with_key_encoding(mut self, strategy: KeyEncoding) -> Self {
        self.key_encoding = strategy;
        self
    }

    #[must_use]
    pub fn with_user_info(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.user_info.insert(key.into(), value.into());
        self
    }
}

/// Options for `MapDecoder`.
#[derive(Clone, Debug, Default)]
pub struct DecoderOptions {
    pub non_finite_floats: NonFiniteFloatDecoding,
    pub key_decoding: KeyDecoding,
    /// Caller context handed to every `Decodable` through `Decoder::user_info`.
    pub user_info: BTreeMap<String, Value>,
}

impl DecoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_non_finite_floats(mut self, strategy: NonFiniteFloatDecoding) -> Self {
        self.non_finite_floats = strategy;
        self
    }

    #[must_use]
    pub fn with_key_decoding(mut self, strategy: KeyDecoding) -> Self {
        self.key_decoding = strategy;
        self
    }

    #[must_use]
    pub fn with_user_info(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.user_info.insert(key.into(), value.into());
        self
    }
}

/// `myURLProperty` -> `my_url_property`.
///
/// A word starts at an uppercase letter that follows a lowercase letter or
/// digit, or at the last uppercase letter of a run that is followed by a
/// lowercase letter.
pub(crate) fn to_snake_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_uppercase() {
            out.push(c);
            continue;
        }

        let starts_word = match i.checked_sub(1).map(|j| chars[j]) {
            Some(prev) if prev.is_lowercase() || prev.is_ascii_digit() => true,
            Some(prev) if prev.is_uppercase() => {
                chars.get(i + 1).is_some_and(|next| next.is_lowercase())
            }
            _ => false,
        };
        if starts_word {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// `my_url_property` -> `myUrlProperty`. Every word is lowercased before
/// the later ones are capitalized, so `MY_VALUE` becomes `myValue`. Leading
/// and trailing underscores are kept; keys without inner underscores are
/// returned unchanged.
pub(crate) fn from_snake_case(key: &str) -> String {
    let trimmed = key.trim_matches('_');
    if !trimmed.contains('_') {
        return key.to_string();
    }

    let leading = &key[..key.len() - key.trim_start_matches('_').len()];
    let trailing = &key[key.trim_end_matches('_').len()..];

    let mut words = trimmed.split('_').filter(|w| !w.is_empty());
    let mut out = String::with_capacity(key.len());
    out.push_str(leading);
    if let Some(first) = words.next() {
        out.push_str(&first.to_lowercase());
    }
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out.push_str(trailing);
    out
}
