//! # Untrusted Payload Suite
//!
//! Bodies a hostile or buggy producer could put on a queue. Every one of them
//! must come back as `MessageDecodingFailed`, never as a panic or a partially
//! built envelope.

#[cfg(test)]
mod tests {
    use crate::fixtures::{self, body_of, TRIPPED};
    use envelope_codec::{
        BodyEscaping, ClassRegistry, CodecConfigBuilder, EnvelopeSerializer, FailureReason,
        MessageDecodingFailed, NativeSerializer,
    };
    use serde::{Deserialize, Deserializer, Serialize};
    use shared_types::{Class, EncodedEnvelope, Message};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // =============================================================================
    // EMPTY BODY
    // =============================================================================

    static PROBE_DECODES: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Probe;

    impl<'de> Deserialize<'de> for Probe {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            PROBE_DECODES.fetch_add(1, Ordering::SeqCst);
            serde::de::IgnoredAny::deserialize(deserializer)?;
            Ok(Probe)
        }
    }

    impl Class for Probe {
        const NAME: &'static str = "test.Probe";
    }

    impl Message for Probe {}

    #[test]
    fn test_empty_body_is_rejected_before_decoding() {
        let mut registry = ClassRegistry::new();
        registry.register_message::<Probe>();
        let serializer = NativeSerializer::new(Arc::new(registry));

        for encoded in [EncodedEnvelope::new(), EncodedEnvelope::from_body("")] {
            let err = serializer.decode(&encoded).unwrap_err();
            assert_eq!(err, MessageDecodingFailed::EmptyBody);
            assert_eq!(
                err.to_string(),
                "Encoded envelope should have at least a \"body\"."
            );
        }
        assert_eq!(PROBE_DECODES.load(Ordering::SeqCst), 0);

        let valid = body_of(r#"{"message":{"class":"test.Probe","data":null}}"#);
        serializer.decode(&valid).unwrap();
        assert_eq!(PROBE_DECODES.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_other_fields_without_body_are_rejected() {
        let encoded: EncodedEnvelope = [("headers".to_string(), "{}".to_string())]
            .into_iter()
            .collect();
        assert_eq!(
            fixtures::serializer().decode(&encoded),
            Err(MessageDecodingFailed::EmptyBody)
        );
    }

    // =============================================================================
    // UNKNOWN CLASSES
    // =============================================================================

    #[test]
    fn test_unknown_message_class_is_named() {
        let err = fixtures::serializer()
            .decode(&body_of(r#"{"message":{"class":"NoSuchX","data":{}}}"#))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Message class \"NoSuchX\" not found during decoding."
        );
        assert_eq!(err.reason(), FailureReason::UnknownClass);
    }

    #[test]
    fn test_unknown_stamp_class_is_named() {
        let raw = r#"{"message":{"class":"shop.Tripwire","data":{"tripped":false}},
                     "stamps":[{"class":"vendor.stamp.Priority","data":{"level":9}}]}"#;
        let err = fixtures::serializer().decode(&body_of(raw)).unwrap_err();

        assert_eq!(
            err,
            MessageDecodingFailed::unknown_class("vendor.stamp.Priority")
        );
    }

    // =============================================================================
    // MALFORMED PAYLOADS
    // =============================================================================

    fn assert_malformed(raw: &str) {
        let err = fixtures::serializer().decode(&body_of(raw)).unwrap_err();
        assert_eq!(err, MessageDecodingFailed::malformed(raw), "payload: {raw}");
        assert_eq!(
            err.to_string(),
            format!("Could not decode message using JSON serialization: {raw}.")
        );
    }

    #[test]
    fn test_truncated_payload() {
        assert_malformed(r#"{"message":{"class":"shop.CancelOrder","data":{"order_id":"#);
    }

    #[test]
    fn test_not_json_at_all() {
        assert_malformed("O:7:\"NoSuchX\":0:{}");
    }

    #[test]
    fn test_wrong_data_shape() {
        assert_malformed(r#"{"message":{"class":"shop.CancelOrder","data":{"order_id":42}}}"#);
    }

    #[test]
    fn test_stamp_class_in_message_position() {
        assert_malformed(r#"{"message":{"class":"shop.stamp.tenant","data":{"tenant":"x"}}}"#);
    }

    #[test]
    fn test_message_class_in_stamp_position() {
        assert_malformed(
            r#"{"message":{"class":"shop.Tripwire","data":{"tripped":false}},"stamps":[{"class":"shop.Tripwire","data":{"tripped":false}}]}"#,
        );
    }

    #[test]
    fn test_unexpected_top_level_field() {
        assert_malformed(
            r#"{"message":{"class":"shop.Tripwire","data":{"tripped":false}},"callback":"rm -rf"}"#,
        );
    }

    #[test]
    fn test_deep_nesting_is_bounded() {
        let depth = 10_000;
        let raw = format!(
            r#"{{"message":{{"class":"shop.Tripwire","data":{}{}}}}}"#,
            "[".repeat(depth),
            "]".repeat(depth)
        );
        assert_malformed(&raw);
    }

    #[test]
    fn test_panicking_deserializer_is_contained() {
        let err = fixtures::serializer().decode(&body_of(TRIPPED)).unwrap_err();

        assert_eq!(err, MessageDecodingFailed::malformed(TRIPPED));
        assert!(!err.to_string().contains("tripwire crossed"));
    }

    // =============================================================================
    // TRANSPORT LAYER DAMAGE
    // =============================================================================

    #[test]
    fn test_body_over_limit() {
        let config = CodecConfigBuilder::new().max_body_bytes(64).build().unwrap();
        let serializer = NativeSerializer::with_config(Arc::new(fixtures::registry()), config);

        let err = serializer
            .decode(&EncodedEnvelope::from_body("x".repeat(65)))
            .unwrap_err();
        assert_eq!(err, MessageDecodingFailed::BodyTooLarge { size: 65, max: 64 });
        assert_eq!(err.reason(), FailureReason::BodyTooLarge);
    }

    #[test]
    fn test_corrupted_hex_body() {
        let serializer = fixtures::serializer_with(BodyEscaping::Hex);
        let envelope = shared_types::Envelope::wrap(fixtures::place_order("SKU-3"));

        let mut body = serializer
            .encode(&envelope)
            .unwrap()
            .body()
            .unwrap()
            .to_string();
        body.pop();

        let err = serializer
            .decode(&EncodedEnvelope::from_body(body.clone()))
            .unwrap_err();
        assert_eq!(err, MessageDecodingFailed::malformed(body));
    }

    #[test]
    fn test_re_escaped_body_does_not_decode() {
        let serializer = fixtures::serializer();
        let envelope = shared_types::Envelope::wrap(fixtures::place_order("SKU-4"));
        let body = serializer.encode(&envelope).unwrap().body().unwrap().to_string();

        let twice = EncodedEnvelope::from_body(BodyEscaping::Backslash.escape(&body));
        let err = serializer.decode(&twice).unwrap_err();
        assert_eq!(err.reason(), FailureReason::MalformedPayload);
    }
}
