//! Application classes shared by the suites.

use envelope_codec::{BodyEscaping, ClassRegistry, CodecConfig, NativeSerializer};
use serde::{Deserialize, Deserializer, Serialize};
use shared_types::{Class, EncodedEnvelope, Message, Stamp};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub order_id: Uuid,
    pub sku: String,
    pub quantity: u32,
    pub note: Option<String>,
    pub attachment: Vec<u8>,
}

impl Class for PlaceOrder {
    const NAME: &'static str = "shop.PlaceOrder";
}

impl Message for PlaceOrder {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrder {
    pub order_id: Uuid,
    pub reason: String,
}

impl Class for CancelOrder {
    const NAME: &'static str = "shop.CancelOrder";
}

impl Message for CancelOrder {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantStamp {
    pub tenant: String,
}

impl Class for TenantStamp {
    const NAME: &'static str = "shop.stamp.tenant";
}

impl Stamp for TenantStamp {}

/// Message whose deserializer panics when `tripped` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tripwire {
    pub tripped: bool,
}

impl<'de> Deserialize<'de> for Tripwire {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            tripped: bool,
        }
        let raw = Raw::deserialize(deserializer)?;
        if raw.tripped {
            panic!("tripwire crossed while decoding");
        }
        Ok(Self {
            tripped: raw.tripped,
        })
    }
}

impl Class for Tripwire {
    const NAME: &'static str = "shop.Tripwire";
}

impl Message for Tripwire {}

pub fn place_order(sku: &str) -> PlaceOrder {
    PlaceOrder {
        order_id: Uuid::new_v4(),
        sku: sku.to_string(),
        quantity: 3,
        note: Some(r#"leave at "back door", key under C:\mat"#.to_string()),
        attachment: vec![0x00, 0x27, 0x22, 0x5c, 0xff],
    }
}

pub fn registry() -> ClassRegistry {
    let mut registry = ClassRegistry::with_builtin_stamps();
    registry
        .register_message::<PlaceOrder>()
        .register_message::<CancelOrder>()
        .register_message::<Tripwire>()
        .register_stamp::<TenantStamp>();
    registry
}

pub fn serializer() -> NativeSerializer {
    NativeSerializer::new(Arc::new(registry()))
}

pub fn serializer_with(escaping: BodyEscaping) -> NativeSerializer {
    NativeSerializer::with_config(
        Arc::new(registry()),
        CodecConfig::default().with_escaping(escaping),
    )
}

/// Raw body that panics inside the `Tripwire` deserializer.
pub const TRIPPED: &str = r#"{"message":{"class":"shop.Tripwire","data":{"tripped":true}}}"#;

/// Encoded envelope carrying `raw` under the default escaping.
pub fn body_of(raw: &str) -> EncodedEnvelope {
    EncodedEnvelope::from_body(BodyEscaping::Backslash.escape(raw))
}
