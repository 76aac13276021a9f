//! Body escaping
//!
//! Serialized envelopes are escaped before they are handed to a transport, so
//! that transports which are not 8-bit clean (or which treat quotes and
//! backslashes specially) carry the body unchanged.
//!
//! Two schemes are supported:
//!
//! - `Backslash`: legacy-compatible. Quotes, backslashes and NUL are prefixed
//!   with a backslash (NUL becomes `\0`).
//! - `Hex`: every byte as two lowercase hex digits. Larger, but ASCII-only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::ConfigError;

/// Failure to reverse an escaping transform.
#[derive(Debug, Error)]
pub enum UnescapeError {
    #[error("invalid hex body: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("hex body is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Reversible transform applied to the serialized body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEscaping {
    #[default]
    Backslash,
    Hex,
}

impl BodyEscaping {
    #[must_use]
    pub fn escape(self, raw: &str) -> String {
        match self {
            Self::Backslash => add_slashes(raw),
            Self::Hex => hex::encode(raw),
        }
    }

    /// Reverse [`escape`](Self::escape).
    ///
    /// # Errors
    ///
    /// Only `Hex` can fail: on odd length, non-hex digits, or bytes that do
    /// not form UTF-8.
    pub fn unescape(self, escaped: &str) -> Result<String, UnescapeError> {
        match self {
            Self::Backslash => Ok(strip_slashes(escaped)),
            Self::Hex => Ok(String::from_utf8(hex::decode(escaped)?)?),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backslash => "backslash",
            Self::Hex => "hex",
        }
    }
}

impl fmt::Display for BodyEscaping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyEscaping {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backslash" => Ok(Self::Backslash),
            "hex" => Ok(Self::Hex),
            _ => Err(ConfigError::UnknownEscaping(s.to_string())),
        }
    }
}

/// Prefix `'`, `"` and `\` with a backslash; write NUL as `\0`.
#[must_use]
pub fn add_slashes(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len() + raw.len() / 8);
    for c in raw.chars() {
        match c {
            '\'' | '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\0' => escaped.push_str("\\0"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Reverse of [`add_slashes`].
///
/// `\0` becomes NUL, any other `\x` becomes `x`, and a trailing lone
/// backslash is dropped. Input that was never escaped is still accepted.
#[must_use]
pub fn strip_slashes(escaped: &str) -> String {
    let mut raw = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            raw.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => raw.push('\0'),
            Some(next) => raw.push(next),
            None => {}
        }
    }
    raw
}
