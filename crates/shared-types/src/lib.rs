//! # Shared Types Crate
//!
//! This crate contains the `Envelope` passed between producers and consumers,
//! the class model used to name messages and stamps on the wire, and the
//! `EncodedEnvelope` field map handed to transports.
//!
//! ## Design Principles
//!
//! - **One Message Per Envelope**: An envelope always wraps exactly one message.
//! - **Additive Stamps**: Stamps are appended in order and never mutate the message.
//! - **Named Classes**: Every message and stamp type declares a stable wire name,
//!   so a consumer can tell "unknown to this process" apart from "corrupt".

pub mod encoded;
pub mod envelope;
pub mod object;
pub mod stamps;

pub use encoded::{EncodedEnvelope, BODY_FIELD};
pub use envelope::Envelope;
pub use object::{Class, IncompleteObject, Message, Object, Stamp};
pub use stamps::{BusNameStamp, CorrelationStamp, DelayStamp, RedeliveryStamp};
