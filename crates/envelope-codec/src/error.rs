//! Error types for the envelope codec

use thiserror::Error;

/// Name of the serialization format, as reported in decoding failures.
pub const FORMAT_NAME: &str = "JSON serialization";

/// The single error kind raised when an encoded envelope cannot be decoded.
///
/// The raw low-level fault is never carried; callers only learn that decoding
/// failed and, for malformed payloads, the offending payload text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageDecodingFailed {
    #[error("Encoded envelope should have at least a \"body\".")]
    EmptyBody,

    #[error("Encoded envelope body is too large: {size} > {max} bytes.")]
    BodyTooLarge { size: usize, max: usize },

    #[error("Message class \"{class}\" not found during decoding.")]
    UnknownClass { class: String },

    #[error("Could not decode message using {format}: {payload}.")]
    MalformedPayload {
        format: &'static str,
        payload: String,
    },
}

impl MessageDecodingFailed {
    /// Signaling error for a payload that could not be deserialized.
    #[must_use]
    pub fn malformed(payload: impl Into<String>) -> Self {
        Self::MalformedPayload {
            format: FORMAT_NAME,
            payload: payload.into(),
        }
    }

    #[must_use]
    pub fn unknown_class(class: impl Into<String>) -> Self {
        Self::UnknownClass {
            class: class.into(),
        }
    }

    /// Tagged reason, without the payload.
    #[must_use]
    pub fn reason(&self) -> FailureReason {
        match self {
            Self::EmptyBody => FailureReason::EmptyBody,
            Self::BodyTooLarge { .. } => FailureReason::BodyTooLarge,
            Self::UnknownClass { .. } => FailureReason::UnknownClass,
            Self::MalformedPayload { .. } => FailureReason::MalformedPayload,
        }
    }
}

/// Why a decode failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    EmptyBody,
    BodyTooLarge,
    UnknownClass,
    MalformedPayload,
}

impl FailureReason {
    /// Stable label for logs and metrics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmptyBody => "empty_body",
            Self::BodyTooLarge => "body_too_large",
            Self::UnknownClass => "unknown_class",
            Self::MalformedPayload => "malformed_payload",
        }
    }
}

/// Encoding failures. These come from the serialization layer unmodified.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// Invalid codec configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_body_bytes must be between 1 and {max}, got {value}")]
    InvalidBodyLimit { value: usize, max: usize },

    #[error("Unknown body escaping: {0} (expected \"backslash\" or \"hex\")")]
    UnknownEscaping(String),

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}
