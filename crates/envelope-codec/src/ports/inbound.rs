//! Inbound Ports (Driving Ports)
//!
//! The serializer API that transport producers and consumers call.

use shared_types::{EncodedEnvelope, Envelope};

use crate::error::{EncodeError, MessageDecodingFailed};

/// Envelope serializer (Driving Port)
///
/// Implementations are stateless from the caller's point of view and may be
/// shared across threads.
pub trait EnvelopeSerializer: Send + Sync {
    /// Turn an envelope into a transport-safe field map.
    ///
    /// Output always contains a non-empty `body`.
    fn encode(&self, envelope: &Envelope) -> Result<EncodedEnvelope, EncodeError>;

    /// Rebuild an envelope from a field map.
    ///
    /// The input is untrusted. Every anomaly is reported as
    /// `MessageDecodingFailed`; a partially decoded envelope is never returned.
    fn decode(&self, encoded: &EncodedEnvelope) -> Result<Envelope, MessageDecodingFailed>;
}
