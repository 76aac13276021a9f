//! # Built-in Stamps
//!
//! Metadata that the bus itself attaches to envelopes. Applications may define
//! their own stamps the same way.

use crate::object::{Class, Stamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ask the transport to hold the message back before delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayStamp {
    /// Delay in milliseconds.
    pub delay_ms: u64,
}

impl Class for DelayStamp {
    const NAME: &'static str = "messenger.stamp.delay";
}

impl Stamp for DelayStamp {}

/// Records that the message is being delivered again after a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeliveryStamp {
    /// How many times delivery has been retried so far.
    pub retry_count: u32,
    /// Transport the message was originally received from.
    pub transport_name: Option<String>,
}

impl Class for RedeliveryStamp {
    const NAME: &'static str = "messenger.stamp.redelivery";
}

impl Stamp for RedeliveryStamp {}

/// Name of the bus the message was dispatched on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusNameStamp {
    pub bus_name: String,
}

impl Class for BusNameStamp {
    const NAME: &'static str = "messenger.stamp.bus_name";
}

impl Stamp for BusNameStamp {}

/// Request/response correlation.
///
/// For requests: a newly generated id.
/// For responses: the id from the original request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationStamp {
    pub correlation_id: Uuid,
    /// Topic the response should be published to, if any.
    pub reply_to: Option<String>,
}

impl CorrelationStamp {
    /// Start a new correlation with a random id.
    #[must_use]
    pub fn new_request(reply_to: Option<String>) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            reply_to,
        }
    }
}

impl Class for CorrelationStamp {
    const NAME: &'static str = "messenger.stamp.correlation";
}

impl Stamp for CorrelationStamp {}
