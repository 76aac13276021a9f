//! Ports Layer
//!
//! Defines the interface transports use to turn envelopes into field maps
//! and back.

pub mod inbound;

pub use inbound::EnvelopeSerializer;
