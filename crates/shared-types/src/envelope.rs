//! # `Envelope`
//!
//! The wrapper every message travels in between a producer and a consumer.
//!
//! ## Properties
//!
//! - **Single Message**: Exactly one message instance per envelope.
//! - **Ordered Stamps**: Stamps keep insertion order; `last` returns the most recent.
//! - **Immutability**: Adding or removing stamps yields a new envelope. The
//!   wrapped message is shared, never mutated.

use crate::object::{Message, Object, Stamp};
use std::sync::Arc;

/// A message plus its ordered metadata stamps.
#[derive(Debug, Clone)]
pub struct Envelope {
    // =========================================================================
    // PAYLOAD SECTION
    // =========================================================================
    /// The wrapped message.
    message: Arc<dyn Object>,

    // =========================================================================
    // METADATA SECTION
    // =========================================================================
    /// Stamps in the order they were attached.
    stamps: Vec<Arc<dyn Object>>,
}

impl Envelope {
    /// Wrap a message with no stamps.
    #[must_use]
    pub fn wrap<M: Message>(message: M) -> Self {
        Self {
            message: Arc::new(message),
            stamps: Vec::new(),
        }
    }

    /// Rebuild an envelope from already erased parts.
    ///
    /// Used by decoders, which only learn the concrete types at runtime.
    #[must_use]
    pub fn from_parts(message: Arc<dyn Object>, stamps: Vec<Arc<dyn Object>>) -> Self {
        Self { message, stamps }
    }

    /// Return a copy of this envelope with `stamp` appended.
    #[must_use]
    pub fn with<S: Stamp>(mut self, stamp: S) -> Self {
        self.stamps.push(Arc::new(stamp));
        self
    }

    /// Return a copy of this envelope without any stamp of type `S`.
    #[must_use]
    pub fn without_all<S: Stamp>(mut self) -> Self {
        self.stamps
            .retain(|stamp| stamp.as_any().downcast_ref::<S>().is_none());
        self
    }

    /// The most recently attached stamp of type `S`.
    #[must_use]
    pub fn last<S: Stamp>(&self) -> Option<&S> {
        self.stamps
            .iter()
            .rev()
            .find_map(|stamp| stamp.as_any().downcast_ref::<S>())
    }

    /// All stamps of type `S`, oldest first.
    #[must_use]
    pub fn all_of<S: Stamp>(&self) -> Vec<&S> {
        self.stamps
            .iter()
            .filter_map(|stamp| stamp.as_any().downcast_ref::<S>())
            .collect()
    }

    /// Every stamp, oldest first.
    #[must_use]
    pub fn stamps(&self) -> &[Arc<dyn Object>] {
        &self.stamps
    }

    /// The wrapped message.
    #[must_use]
    pub fn message(&self) -> &dyn Object {
        self.message.as_ref()
    }

    /// The wrapped message, if it is an `M`.
    #[must_use]
    pub fn message_as<M: Message>(&self) -> Option<&M> {
        self.message.as_any().downcast_ref::<M>()
    }

    /// Wire name of the wrapped message's class.
    #[must_use]
    pub fn message_class(&self) -> &str {
        self.message.class_name()
    }
}

impl PartialEq for Envelope {
    fn eq(&self, other: &Self) -> bool {
        self.message.eq_object(other.message.as_ref())
            && self.stamps.len() == other.stamps.len()
            && self
                .stamps
                .iter()
                .zip(&other.stamps)
                .all(|(a, b)| a.eq_object(b.as_ref()))
    }
}
