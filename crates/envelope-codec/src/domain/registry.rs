//! Class registry
//!
//! The allow-list of classes this process is willing to reconstruct. Decoding
//! never instantiates anything that is not registered here.

use serde_json::Value;
use shared_types::{
    BusNameStamp, Class, CorrelationStamp, DelayStamp, Message, Object, RedeliveryStamp, Stamp,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::unserializer::{UnknownClassPolicy, Unserializer};

/// Role a class is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Message,
    Stamp,
}

type DecodeFn = fn(Value) -> Result<Arc<dyn Object>, serde_json::Error>;

#[derive(Clone, Copy)]
pub(crate) struct ClassEntry {
    pub(crate) kind: ClassKind,
    pub(crate) decode: DecodeFn,
}

fn decode_class<T: Class>(data: Value) -> Result<Arc<dyn Object>, serde_json::Error> {
    Ok(Arc::new(serde_json::from_value::<T>(data)?))
}

/// Name → constructor table for messages and stamps.
#[derive(Clone)]
pub struct ClassRegistry {
    classes: HashMap<&'static str, ClassEntry>,
    unknown_class_policy: UnknownClassPolicy,
}

impl ClassRegistry {
    /// An empty registry. Unknown classes become incomplete objects when
    /// unserialized without a guard.
    #[must_use]
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
            unknown_class_policy: UnknownClassPolicy::default(),
        }
    }

    /// A registry that already knows the built-in stamps.
    #[must_use]
    pub fn with_builtin_stamps() -> Self {
        let mut registry = Self::new();
        registry
            .register_stamp::<DelayStamp>()
            .register_stamp::<RedeliveryStamp>()
            .register_stamp::<BusNameStamp>()
            .register_stamp::<CorrelationStamp>();
        registry
    }

    /// Policy used by [`unserializer`](Self::unserializer).
    #[must_use]
    pub fn with_unknown_class_policy(mut self, policy: UnknownClassPolicy) -> Self {
        self.unknown_class_policy = policy;
        self
    }

    pub fn register_message<M: Message>(&mut self) -> &mut Self {
        self.insert::<M>(ClassKind::Message)
    }

    pub fn register_stamp<S: Stamp>(&mut self) -> &mut Self {
        self.insert::<S>(ClassKind::Stamp)
    }

    fn insert<T: Class>(&mut self, kind: ClassKind) -> &mut Self {
        let previous = self.classes.insert(
            T::NAME,
            ClassEntry {
                kind,
                decode: decode_class::<T>,
            },
        );
        if previous.is_some() {
            tracing::warn!(class = T::NAME, "Class registered twice; keeping the latest");
        }
        self
    }

    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    #[must_use]
    pub fn kind_of(&self, class: &str) -> Option<ClassKind> {
        self.classes.get(class).map(|entry| entry.kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    #[must_use]
    pub fn unknown_class_policy(&self) -> UnknownClassPolicy {
        self.unknown_class_policy
    }

    /// Unserializer using this registry's default policy.
    #[must_use]
    pub fn unserializer(&self) -> Unserializer<'_> {
        Unserializer::new(self).on_unknown_class(self.unknown_class_policy)
    }

    pub(crate) fn entry(&self, class: &str) -> Option<ClassEntry> {
        self.classes.get(class).copied()
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.classes.keys().copied().collect();
        names.sort_unstable();
        f.debug_struct("ClassRegistry")
            .field("classes", &names)
            .field("unknown_class_policy", &self.unknown_class_policy)
            .finish()
    }
}
