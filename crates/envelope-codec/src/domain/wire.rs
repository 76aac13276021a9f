//! Wire records
//!
//! The serialized body is the JSON text of:
//!
//! ```text
//! {
//!   "message": { "class": "<NAME>", "data": <value> },
//!   "stamps":  [ { "class": "<NAME>", "data": <value> }, ... ]
//! }
//! ```
//!
//! Stamps are written in envelope order. Unknown top-level keys are rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{Envelope, Object};

/// One class instance on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireObject {
    pub class: String,
    pub data: Value,
}

impl WireObject {
    pub fn from_object(object: &dyn Object) -> Result<Self, serde_json::Error> {
        Ok(Self {
            class: object.class_name().to_string(),
            data: object.to_value()?,
        })
    }
}

/// An envelope on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireEnvelope {
    pub message: WireObject,
    #[serde(default)]
    pub stamps: Vec<WireObject>,
}

impl WireEnvelope {
    pub fn from_envelope(envelope: &Envelope) -> Result<Self, serde_json::Error> {
        Ok(Self {
            message: WireObject::from_object(envelope.message())?,
            stamps: envelope
                .stamps()
                .iter()
                .map(|stamp| WireObject::from_object(stamp.as_ref()))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Raw serialized form, before escaping.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Serialize an envelope into its raw (unescaped) body.
pub fn serialize_envelope(envelope: &Envelope) -> Result<String, serde_json::Error> {
    WireEnvelope::from_envelope(envelope)?.to_json()
}
