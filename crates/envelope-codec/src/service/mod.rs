//! Service Layer
//!
//! Implements the serializer port on top of the domain layer.

pub mod native_serializer;

pub use native_serializer::NativeSerializer;
