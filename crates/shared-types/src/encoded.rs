//! # Encoded Envelope
//!
//! The field map a transport carries. Only `body` is required; other keys are
//! reserved for transport metadata and passed through untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key holding the escaped, serialized envelope.
pub const BODY_FIELD: &str = "body";

/// String-keyed field map produced by encoding an envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedEnvelope {
    fields: BTreeMap<String, String>,
}

impl EncodedEnvelope {
    /// An empty map. Decoding it fails: there is no body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding only `body`.
    #[must_use]
    pub fn from_body(body: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(BODY_FIELD.to_string(), body.into());
        Self { fields }
    }

    /// The `body` field, if present.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.get(BODY_FIELD)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    #[must_use]
    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }
}

impl From<BTreeMap<String, String>> for EncodedEnvelope {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EncodedEnvelope {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
