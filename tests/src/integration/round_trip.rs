//! # Round Trip Suite
//!
//! `decode(encode(e)) == e` for envelopes built from registered classes, and
//! the escaped body always reverses to the raw serialized form.

#[cfg(test)]
mod tests {
    use crate::fixtures::{self, CancelOrder, PlaceOrder, TenantStamp};
    use envelope_codec::domain::serialize_envelope;
    use envelope_codec::{BodyEscaping, EnvelopeSerializer};
    use proptest::prelude::*;
    use shared_types::{
        BusNameStamp, CorrelationStamp, DelayStamp, EncodedEnvelope, Envelope, RedeliveryStamp,
        BODY_FIELD,
    };
    use uuid::Uuid;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    #[derive(Debug, Clone)]
    enum AnyStamp {
        Delay(u64),
        Redelivery(u32, Option<String>),
        BusName(String),
        Tenant(String),
    }

    impl AnyStamp {
        fn attach(self, envelope: Envelope) -> Envelope {
            match self {
                Self::Delay(delay_ms) => envelope.with(DelayStamp { delay_ms }),
                Self::Redelivery(retry_count, transport_name) => envelope.with(RedeliveryStamp {
                    retry_count,
                    transport_name,
                }),
                Self::BusName(bus_name) => envelope.with(BusNameStamp { bus_name }),
                Self::Tenant(tenant) => envelope.with(TenantStamp { tenant }),
            }
        }
    }

    fn any_stamp() -> impl Strategy<Value = AnyStamp> {
        prop_oneof![
            any::<u64>().prop_map(AnyStamp::Delay),
            (any::<u32>(), proptest::option::of(".*"))
                .prop_map(|(n, t)| AnyStamp::Redelivery(n, t)),
            ".*".prop_map(AnyStamp::BusName),
            "[\\\\'\"\\x00]{0,8}[a-z]{0,8}".prop_map(AnyStamp::Tenant),
        ]
    }

    fn any_order() -> impl Strategy<Value = PlaceOrder> {
        (
            any::<u128>(),
            ".*",
            any::<u32>(),
            proptest::option::of(".*"),
            proptest::collection::vec(any::<u8>(), 0..64),
        )
            .prop_map(|(id, sku, quantity, note, attachment)| PlaceOrder {
                order_id: Uuid::from_u128(id),
                sku,
                quantity,
                note,
                attachment,
            })
    }

    fn any_envelope() -> impl Strategy<Value = Envelope> {
        (any_order(), proptest::collection::vec(any_stamp(), 0..6)).prop_map(|(order, stamps)| {
            stamps
                .into_iter()
                .fold(Envelope::wrap(order), |envelope, stamp| stamp.attach(envelope))
        })
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    proptest! {
        #[test]
        fn prop_round_trip_backslash(envelope in any_envelope()) {
            let serializer = fixtures::serializer_with(BodyEscaping::Backslash);
            let encoded = serializer.encode(&envelope).unwrap();
            prop_assert_eq!(serializer.decode(&encoded).unwrap(), envelope);
        }

        #[test]
        fn prop_round_trip_hex(envelope in any_envelope()) {
            let serializer = fixtures::serializer_with(BodyEscaping::Hex);
            let encoded = serializer.encode(&envelope).unwrap();
            prop_assert_eq!(serializer.decode(&encoded).unwrap(), envelope);
        }

        #[test]
        fn prop_body_reverses_to_raw_form(envelope in any_envelope()) {
            let raw = serialize_envelope(&envelope).unwrap();
            for escaping in [BodyEscaping::Backslash, BodyEscaping::Hex] {
                let encoded = fixtures::serializer_with(escaping).encode(&envelope).unwrap();
                prop_assert_eq!(escaping.unescape(encoded.body().unwrap()).unwrap(), raw.clone());
            }
        }
    }

    // =============================================================================
    // EXAMPLES
    // =============================================================================

    #[test]
    fn test_encoded_map_has_only_body() {
        let encoded = fixtures::serializer()
            .encode(&Envelope::wrap(fixtures::place_order("SKU-1")))
            .unwrap();

        let keys: Vec<&str> = encoded.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec![BODY_FIELD]);
    }

    #[test]
    fn test_escaped_body_has_no_bare_quotes() {
        let envelope = Envelope::wrap(fixtures::place_order("quote\"and\\slash"));
        let encoded = fixtures::serializer().encode(&envelope).unwrap();
        let body = encoded.body().unwrap();

        // Every quote in the escaped form is preceded by a backslash.
        let bytes = body.as_bytes();
        for (i, b) in bytes.iter().enumerate() {
            if *b == b'"' {
                assert!(i > 0 && bytes[i - 1] == b'\\', "bare quote at {i} in {body}");
            }
        }
    }

    #[test]
    fn test_stamp_order_survives() {
        let order_id = Uuid::new_v4();
        let envelope = Envelope::wrap(CancelOrder {
            order_id,
            reason: "duplicate".into(),
        })
        .with(DelayStamp { delay_ms: 10 })
        .with(TenantStamp {
            tenant: "acme".into(),
        })
        .with(DelayStamp { delay_ms: 20 })
        .with(CorrelationStamp::new_request(Some("replies".into())));

        let serializer = fixtures::serializer();
        let decoded = serializer
            .decode(&serializer.encode(&envelope).unwrap())
            .unwrap();

        assert_eq!(decoded, envelope);
        let delays: Vec<u64> = decoded
            .all_of::<DelayStamp>()
            .iter()
            .map(|s| s.delay_ms)
            .collect();
        assert_eq!(delays, vec![10, 20]);
        assert_eq!(decoded.last::<TenantStamp>().unwrap().tenant, "acme");
        assert_eq!(
            decoded.message_as::<CancelOrder>().unwrap().order_id,
            order_id
        );
    }

    #[test]
    fn test_transport_fields_do_not_matter() {
        let serializer = fixtures::serializer();
        let envelope = Envelope::wrap(fixtures::place_order("SKU-2"));

        let mut encoded: EncodedEnvelope = serializer.encode(&envelope).unwrap();
        encoded.insert("headers", r#"{"type":"ignored"}"#);

        assert_eq!(serializer.decode(&encoded).unwrap(), envelope);
    }
}
