//! # Class Model
//!
//! Messages and stamps are plain Rust types that declare a stable wire name.
//! The envelope stores them behind the object-safe [`Object`] view so that one
//! envelope can carry any registered message alongside any mix of stamps.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::fmt;

/// A serializable type with a stable name on the wire.
///
/// The name is what a consumer looks up when decoding; two processes agree on
/// a class only if they agree on its `NAME` and its serde shape.
pub trait Class:
    Serialize + DeserializeOwned + Clone + PartialEq + fmt::Debug + Send + Sync + 'static
{
    /// Wire name of the class. MUST be unique within a registry.
    const NAME: &'static str;
}

/// Marker for classes that can be wrapped as the message of an envelope.
pub trait Message: Class {}

/// Marker for classes that can be attached to an envelope as metadata.
pub trait Stamp: Class {}

/// Type-erased view of a class instance.
pub trait Object: fmt::Debug + Send + Sync {
    /// Wire name of the underlying class.
    fn class_name(&self) -> &str;

    /// Serialize the instance into a self-describing value.
    fn to_value(&self) -> Result<Value, serde_json::Error>;

    /// Downcasting hook.
    fn as_any(&self) -> &dyn Any;

    /// Semantic equality across erased values.
    fn eq_object(&self, other: &dyn Object) -> bool;
}

impl<T: Class> Object for T {
    fn class_name(&self) -> &str {
        T::NAME
    }

    fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_object(&self, other: &dyn Object) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }
}

/// Stand-in for an instance whose class is not known to this process.
///
/// Only lenient unserialization produces these. The raw data is kept as-is so
/// the object re-serializes without loss.
#[derive(Debug, Clone, PartialEq)]
pub struct IncompleteObject {
    class: String,
    data: Value,
}

impl IncompleteObject {
    /// Wrap raw data under a class name nobody here can resolve.
    #[must_use]
    pub fn new(class: impl Into<String>, data: Value) -> Self {
        Self {
            class: class.into(),
            data,
        }
    }

    /// The raw, undecoded data.
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }
}

impl Object for IncompleteObject {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn to_value(&self) -> Result<Value, serde_json::Error> {
        Ok(self.data.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_object(&self, other: &dyn Object) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| other == self)
    }
}
