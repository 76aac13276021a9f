//! Guarded deserialization
//!
//! The only way untrusted bodies are turned back into envelopes.
//!
//! ```text
//! ENTER
//!   └─> build signaling error, strict unserializer, arm fault trap
//!         ├─> unserialize ok ──────────┐
//!         └─> fault / unknown class ───┤
//!                                      └─> release trap ─> return value | raise
//! ```
//!
//! The trap is always released before the result is returned, on every path.

use shared_types::Envelope;
use std::panic::{self, AssertUnwindSafe};

use super::fault_trap::FaultTrap;
use super::registry::ClassRegistry;
use super::unserializer::{UnknownClassPolicy, UnserializeFault, Unserializer};
use crate::error::MessageDecodingFailed;

/// Characters of payload included in log lines.
const LOG_PREVIEW_CHARS: usize = 64;

/// Truncate `payload` for logging on a char boundary.
pub(crate) fn preview(payload: &str) -> &str {
    match payload.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((end, _)) => &payload[..end],
        None => payload,
    }
}

/// Rebuild an envelope from an untrusted raw body.
///
/// - Classes missing from `registry` fail with
///   [`MessageDecodingFailed::UnknownClass`], regardless of the registry's
///   own unknown-class policy.
/// - Anything else that goes wrong, including a panicking deserializer,
///   fails with [`MessageDecodingFailed::MalformedPayload`] carrying
///   `contents`.
///
/// No shape validation beyond what the registered classes' deserializers do.
pub fn safely_unserialize(
    registry: &ClassRegistry,
    contents: &str,
) -> Result<Envelope, MessageDecodingFailed> {
    let signaling = MessageDecodingFailed::malformed(contents);
    let unserializer = Unserializer::new(registry).on_unknown_class(UnknownClassPolicy::Reject);

    let trap = FaultTrap::install();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| unserializer.unserialize(contents)));
    let caught = trap.take_fault();
    drop(trap);

    match outcome {
        Ok(Ok(envelope)) => Ok(envelope),
        Ok(Err(UnserializeFault::UnknownClass(class))) => {
            Err(MessageDecodingFailed::unknown_class(class))
        }
        Ok(Err(fault)) => {
            tracing::debug!(
                %fault,
                payload = preview(contents),
                "Unserialize fault converted to decoding failure"
            );
            Err(signaling)
        }
        Err(_) => {
            tracing::debug!(
                fault = caught.as_deref().unwrap_or("unrecorded"),
                payload = preview(contents),
                "Deserializer panicked; converted to decoding failure"
            );
            Err(signaling)
        }
    }
}
