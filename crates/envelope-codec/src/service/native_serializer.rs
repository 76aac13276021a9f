//! Native Serializer
//!
//! Implements `EnvelopeSerializer` with the JSON wire records, configurable
//! body escaping, and guarded decoding.

use shared_types::{EncodedEnvelope, Envelope};
use std::sync::Arc;
use std::time::Instant;

use crate::domain::guard::preview;
use crate::domain::{safely_unserialize, serialize_envelope, ClassRegistry, CodecConfig};
use crate::error::{EncodeError, MessageDecodingFailed};
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::EnvelopeSerializer;

/// Envelope serializer backed by a class registry.
///
/// Cheap to share: wrap in an `Arc` and hand it to every transport.
pub struct NativeSerializer {
    /// Classes this process is willing to decode
    registry: Arc<ClassRegistry>,
    config: CodecConfig,
    metrics: Arc<dyn MetricsRecorder>,
}

impl NativeSerializer {
    /// Create a serializer with the default configuration
    pub fn new(registry: Arc<ClassRegistry>) -> Self {
        Self::with_config(registry, CodecConfig::default())
    }

    /// Create with a custom configuration
    pub fn with_config(registry: Arc<ClassRegistry>, config: CodecConfig) -> Self {
        Self {
            registry,
            config,
            metrics: Arc::new(NoOpMetrics),
        }
    }

    /// Report to `metrics` instead of discarding measurements
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn fail(&self, error: MessageDecodingFailed) -> MessageDecodingFailed {
        let reason = error.reason();
        self.metrics.record_decode_failure(reason);
        tracing::warn!(reason = reason.as_str(), "Envelope decoding failed");
        error
    }

    fn decode_body(&self, body: &str) -> Result<Envelope, MessageDecodingFailed> {
        if body.is_empty() {
            return Err(MessageDecodingFailed::EmptyBody);
        }

        if body.len() > self.config.max_body_bytes {
            return Err(MessageDecodingFailed::BodyTooLarge {
                size: body.len(),
                max: self.config.max_body_bytes,
            });
        }

        let contents = self.config.escaping.unescape(body).map_err(|e| {
            tracing::debug!(
                error = %e,
                escaping = %self.config.escaping,
                body = preview(body),
                "Body could not be unescaped"
            );
            MessageDecodingFailed::malformed(body)
        })?;

        safely_unserialize(&self.registry, &contents)
    }
}

impl EnvelopeSerializer for NativeSerializer {
    fn encode(&self, envelope: &Envelope) -> Result<EncodedEnvelope, EncodeError> {
        let start = Instant::now();

        let raw = serialize_envelope(envelope)?;
        let body = self.config.escaping.escape(&raw);

        self.metrics.record_encoded(body.len(), start.elapsed());
        tracing::debug!(
            class = envelope.message_class(),
            stamps = envelope.stamps().len(),
            body_len = body.len(),
            "Envelope encoded"
        );

        Ok(EncodedEnvelope::from_body(body))
    }

    fn decode(&self, encoded: &EncodedEnvelope) -> Result<Envelope, MessageDecodingFailed> {
        let start = Instant::now();
        let body = encoded.body().unwrap_or_default();

        let envelope = self.decode_body(body).map_err(|e| self.fail(e))?;

        self.metrics.record_decoded(body.len(), start.elapsed());
        tracing::debug!(
            class = envelope.message_class(),
            stamps = envelope.stamps().len(),
            body_len = body.len(),
            "Envelope decoded"
        );

        Ok(envelope)
    }
}
