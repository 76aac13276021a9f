//! Unserializer
//!
//! Parses a raw body and resolves every class reference against a registry.
//! What happens to a class the registry does not know is decided by the
//! unserializer's policy, which is scoped to the unserializer value itself:
//! building a strict one never changes what another caller sees.

use serde_json::Value;
use shared_types::{Envelope, IncompleteObject, Object};
use std::sync::Arc;
use thiserror::Error;

use super::registry::{ClassKind, ClassRegistry};
use super::wire::{WireEnvelope, WireObject};

/// What to do with a class reference the registry cannot resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownClassPolicy {
    /// Keep the raw data in an [`IncompleteObject`] stand-in.
    #[default]
    Incomplete,
    /// Fail with [`UnserializeFault::UnknownClass`].
    Reject,
}

/// Structured failure of a single unserialize call.
#[derive(Debug, Error)]
pub enum UnserializeFault {
    #[error("syntax error: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("class {0} is not registered")]
    UnknownClass(String),

    #[error("class {class} is registered as a {found:?}, expected a {expected:?}")]
    UnexpectedKind {
        class: String,
        expected: ClassKind,
        found: ClassKind,
    },

    #[error("data does not match class {class}: {source}")]
    InvalidData {
        class: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Registry view with a fixed unknown-class policy.
#[derive(Debug, Clone, Copy)]
pub struct Unserializer<'a> {
    registry: &'a ClassRegistry,
    on_unknown: UnknownClassPolicy,
}

impl<'a> Unserializer<'a> {
    #[must_use]
    pub fn new(registry: &'a ClassRegistry) -> Self {
        Self {
            registry,
            on_unknown: UnknownClassPolicy::default(),
        }
    }

    #[must_use]
    pub fn on_unknown_class(mut self, policy: UnknownClassPolicy) -> Self {
        self.on_unknown = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> UnknownClassPolicy {
        self.on_unknown
    }

    /// Parse `contents` and rebuild the envelope it describes.
    ///
    /// The whole document is parsed before any class is looked up, so a
    /// syntax error wins over an unknown class.
    ///
    /// # Errors
    ///
    /// See [`UnserializeFault`]. Deserializers of registered classes may
    /// still panic; callers handling untrusted input go through
    /// [`safely_unserialize`](super::guard::safely_unserialize).
    pub fn unserialize(&self, contents: &str) -> Result<Envelope, UnserializeFault> {
        let wire: WireEnvelope =
            serde_json::from_str(contents).map_err(UnserializeFault::Syntax)?;

        let message = self.resolve(wire.message, ClassKind::Message)?;
        let stamps = wire
            .stamps
            .into_iter()
            .map(|stamp| self.resolve(stamp, ClassKind::Stamp))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Envelope::from_parts(message, stamps))
    }

    fn resolve(
        &self,
        object: WireObject,
        expected: ClassKind,
    ) -> Result<Arc<dyn Object>, UnserializeFault> {
        let WireObject { class, data } = object;

        let Some(entry) = self.registry.entry(&class) else {
            return self.unknown(class, data);
        };

        if entry.kind != expected {
            return Err(UnserializeFault::UnexpectedKind {
                class,
                expected,
                found: entry.kind,
            });
        }

        (entry.decode)(data).map_err(|source| UnserializeFault::InvalidData { class, source })
    }

    fn unknown(&self, class: String, data: Value) -> Result<Arc<dyn Object>, UnserializeFault> {
        match self.on_unknown {
            UnknownClassPolicy::Incomplete => {
                tracing::debug!(class = %class, "Unknown class kept as incomplete object");
                Ok(Arc::new(IncompleteObject::new(class, data)))
            }
            UnknownClassPolicy::Reject => Err(UnserializeFault::UnknownClass(class)),
        }
    }
}
