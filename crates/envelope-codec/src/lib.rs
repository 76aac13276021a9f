//! # Envelope Codec
//!
//! Converts message envelopes to transport-safe field maps and back, with
//! guarded decoding of untrusted payloads.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure codec logic, no I/O
//!   - `BodyEscaping`: Reversible body transform (backslash or hex)
//!   - `WireEnvelope`: Self-describing JSON records
//!   - `ClassRegistry`: Allow-list of decodable classes
//!   - `Unserializer`: Class resolution under a scoped unknown-class policy
//!   - `FaultTrap`: Scoped interception of deserializer panics
//!   - `safely_unserialize`: The guarded decode routine
//!   - `CodecConfig`: Configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `EnvelopeSerializer`: Driving port used by transports
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `NativeSerializer`: Implements `EnvelopeSerializer`
//!
//! ## Security
//!
//! Bodies handed to `decode` are untrusted:
//! - Empty or missing body is rejected before any parsing
//! - Bodies above `max_body_bytes` are rejected before unescaping
//! - Only registered classes are ever instantiated
//! - Deserializer panics are caught and reported as malformed payloads
//!
//! ## Invariants
//!
//! - **Round trip**: `decode(encode(e)) == e` for registered classes
//! - **No partial results**: decode returns a full envelope or `MessageDecodingFailed`
//! - **Restoration**: the process panic hook is the same before and after every decode
//!
//! ## Usage Example
//!
//! ```ignore
//! use envelope_codec::{ClassRegistry, EnvelopeSerializer, NativeSerializer};
//! use shared_types::{DelayStamp, Envelope};
//! use std::sync::Arc;
//!
//! let mut registry = ClassRegistry::with_builtin_stamps();
//! registry.register_message::<SendWelcomeEmail>();
//!
//! let serializer = NativeSerializer::new(Arc::new(registry));
//! let encoded = serializer.encode(&Envelope::wrap(message).with(DelayStamp { delay_ms: 500 }))?;
//!
//! // ... transport carries `encoded` ...
//!
//! let envelope = serializer.decode(&encoded)?;
//! ```

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{
    safely_unserialize, BodyEscaping, ClassKind, ClassRegistry, CodecConfig, CodecConfigBuilder,
    FaultTrap, UnknownClassPolicy, Unserializer,
};
pub use error::{ConfigError, EncodeError, FailureReason, MessageDecodingFailed, FORMAT_NAME};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::EnvelopeSerializer;
pub use service::NativeSerializer;
