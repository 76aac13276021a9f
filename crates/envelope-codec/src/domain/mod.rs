//! Domain Layer - Pure codec logic
//!
//! This layer contains:
//! - Body escaping (backslash and hex)
//! - Wire records for the serialized body
//! - Class registry (the decode allow-list)
//! - Unserializer with scoped unknown-class policy
//! - Fault trap (scoped panic interception)
//! - Guarded deserialization
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod config;
pub mod escaping;
pub mod fault_trap;
pub mod guard;
pub mod registry;
pub mod unserializer;
pub mod wire;

pub use config::{CodecConfig, CodecConfigBuilder};
pub use escaping::{add_slashes, strip_slashes, BodyEscaping, UnescapeError};
pub use fault_trap::FaultTrap;
pub use guard::safely_unserialize;
pub use registry::{ClassKind, ClassRegistry};
pub use unserializer::{UnknownClassPolicy, UnserializeFault, Unserializer};
pub use wire::{serialize_envelope, WireEnvelope, WireObject};
