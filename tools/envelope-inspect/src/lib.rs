//! Envelope Inspect
//!
//! Operator commands over encoded envelopes pulled off a transport. Every
//! command returns its report as a string; `main` decides where it goes.

use anyhow::{bail, Context, Result};
use envelope_codec::domain::WireObject;
use envelope_codec::{
    BodyEscaping, ClassRegistry, CodecConfig, EnvelopeSerializer, MessageDecodingFailed,
    NativeSerializer,
};
use shared_types::{EncodedEnvelope, IncompleteObject, Object, BODY_FIELD};
use std::fmt::Write as _;
use std::sync::Arc;

/// Turn raw command input into an encoded envelope.
///
/// With `map`, the input is a JSON object of string fields. Otherwise the
/// whole input is the body, minus trailing line breaks.
pub fn parse_input(input: &str, map: bool) -> Result<EncodedEnvelope> {
    if map {
        return serde_json::from_str(input).context("input is not a JSON object of string fields");
    }
    Ok(EncodedEnvelope::from_body(input.trim_end_matches(['\n', '\r'])))
}

fn body(encoded: &EncodedEnvelope) -> Result<&str> {
    match encoded.body() {
        Some(body) if !body.is_empty() => Ok(body),
        _ => bail!("encoded envelope has no {BODY_FIELD:?} field"),
    }
}

/// Raw serialized form of the body.
pub fn unescape(encoded: &EncodedEnvelope, escaping: BodyEscaping) -> Result<String> {
    let raw = escaping
        .unescape(body(encoded)?)
        .with_context(|| format!("body is not valid {escaping} escaping"))?;
    Ok(raw)
}

/// Guarded decode against the built-in stamp registry.
///
/// Returns the line to print on success and the decoding failure otherwise.
pub fn check(
    encoded: &EncodedEnvelope,
    config: CodecConfig,
) -> Result<String, MessageDecodingFailed> {
    let serializer =
        NativeSerializer::with_config(Arc::new(ClassRegistry::with_builtin_stamps()), config);
    let envelope = serializer.decode(encoded)?;
    Ok(format!(
        "ok {} ({} stamps)",
        envelope.message_class(),
        envelope.stamps().len()
    ))
}

/// Lenient decode: unknown classes are shown with their raw data.
pub fn inspect(encoded: &EncodedEnvelope, escaping: BodyEscaping) -> Result<String> {
    let raw = unescape(encoded, escaping)?;
    let registry = ClassRegistry::with_builtin_stamps();
    let envelope = registry
        .unserializer()
        .unserialize(&raw)
        .context("body does not unserialize")?;

    let mut report = String::new();
    writeln!(report, "message: {}", describe(envelope.message())?)?;
    writeln!(report, "stamps: {}", envelope.stamps().len())?;
    for stamp in envelope.stamps() {
        writeln!(report, "  - {}", describe(stamp.as_ref())?)?;
    }
    Ok(report)
}

fn describe(object: &dyn Object) -> Result<String> {
    let wire = WireObject::from_object(object)?;
    let marker = if object.as_any().is::<IncompleteObject>() {
        " (incomplete)"
    } else {
        ""
    };
    Ok(format!("{}{marker} {}", wire.class, wire.data))
}
