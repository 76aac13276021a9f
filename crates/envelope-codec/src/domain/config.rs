//! Codec configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use envelope_codec::domain::{BodyEscaping, CodecConfigBuilder};
//!
//! let config = CodecConfigBuilder::new()
//!     .escaping(BodyEscaping::Hex)
//!     .max_body_bytes(1024 * 1024)
//!     .build()
//!     .expect("Valid config");
//! ```

use serde::{Deserialize, Serialize};
use std::env;

use super::escaping::BodyEscaping;
use crate::error::ConfigError;

/// Codec configuration
///
/// The body limit is checked before anything else touches an untrusted body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Transform applied to the serialized body
    pub escaping: BodyEscaping,
    /// Largest escaped body accepted by decode, in bytes
    pub max_body_bytes: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            escaping: BodyEscaping::Backslash,
            max_body_bytes: Self::DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl CodecConfig {
    /// 16 MiB.
    pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

    /// Hard cap for `max_body_bytes` (256 MiB).
    pub const HARD_MAX_BODY_BYTES: usize = 256 * 1024 * 1024;

    /// Create a new configuration with validation
    pub fn new(escaping: BodyEscaping, max_body_bytes: usize) -> Result<Self, ConfigError> {
        let config = Self {
            escaping,
            max_body_bytes,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 || self.max_body_bytes > Self::HARD_MAX_BODY_BYTES {
            return Err(ConfigError::InvalidBodyLimit {
                value: self.max_body_bytes,
                max: Self::HARD_MAX_BODY_BYTES,
            });
        }
        Ok(())
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CODEC_BODY_ESCAPING`: `backslash` or `hex` (default: backslash)
    /// - `CODEC_MAX_BODY_BYTES`: body limit in bytes (default: 16 MiB)
    ///
    /// Unlike telemetry settings, a malformed value is an error rather than
    /// silently replaced by the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut builder = CodecConfigBuilder::new();

        if let Some(value) = lookup("CODEC_BODY_ESCAPING") {
            builder = builder.escaping(value.parse()?);
        }

        if let Some(value) = lookup("CODEC_MAX_BODY_BYTES") {
            let bytes = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "CODEC_MAX_BODY_BYTES",
                value: value.clone(),
            })?;
            builder = builder.max_body_bytes(bytes);
        }

        builder.build()
    }

    /// Builder-style method to set the escaping
    pub fn with_escaping(mut self, escaping: BodyEscaping) -> Self {
        self.escaping = escaping;
        self
    }
}

/// Builder for CodecConfig with validation
#[derive(Default)]
pub struct CodecConfigBuilder {
    escaping: Option<BodyEscaping>,
    max_body_bytes: Option<usize>,
}

impl CodecConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn escaping(mut self, escaping: BodyEscaping) -> Self {
        self.escaping = Some(escaping);
        self
    }

    pub fn max_body_bytes(mut self, bytes: usize) -> Self {
        self.max_body_bytes = Some(bytes);
        self
    }

    /// Build the CodecConfig, validating all parameters
    pub fn build(self) -> Result<CodecConfig, ConfigError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation (for internal use only)
    pub fn build_unchecked(self) -> CodecConfig {
        let defaults = CodecConfig::default();

        CodecConfig {
            escaping: self.escaping.unwrap_or(defaults.escaping),
            max_body_bytes: self.max_body_bytes.unwrap_or(defaults.max_body_bytes),
        }
    }
}
