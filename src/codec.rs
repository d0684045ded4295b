//! Payload encoding and the lenient decode policy.
//!
//! A payload is one JSON document whose top level is an array. Decoding never
//! fails: anything that is not a non-empty array reads as an empty sequence.

use thiserror::Error;

use crate::value::{Sequence, Value};

/// Deepest element nesting that still decodes. `serde_json` refuses input
/// with 128 open containers, and the payload's own array takes one of them.
pub const MAX_ELEMENT_DEPTH: usize = 126;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("element nests {depth} containers deep; at most {MAX_ELEMENT_DEPTH} can be read back")]
    TooDeep { depth: usize },

    #[error("sequence contains a NaN or infinite float")]
    NonFiniteFloat,

    #[error("failed to serialize sequence: {0}")]
    Json(#[source] serde_json::Error),
}

/// Serializes the whole sequence into a payload.
pub fn encode(items: &[Value], pretty: bool) -> Result<Vec<u8>, EncodeError> {
    if let Some(depth) = items
        .iter()
        .map(Value::depth)
        .find(|depth| *depth > MAX_ELEMENT_DEPTH)
    {
        return Err(EncodeError::TooDeep { depth });
    }

    // serde_json writes non-finite floats as `null`, which would silently
    // break the round-trip.
    if items.iter().any(Value::contains_non_finite) {
        return Err(EncodeError::NonFiniteFloat);
    }

    let encoded = if pretty {
        serde_json::to_vec_pretty(items)
    } else {
        serde_json::to_vec(items)
    };
    encoded.map_err(EncodeError::Json)
}

/// Decodes a payload, treating every unusable input as "no data".
#[must_use]
pub fn decode(bytes: &[u8]) -> Sequence {
    if bytes.is_empty() {
        return Sequence::new();
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::List(items)) => items,
        Ok(Value::Null) => Sequence::new(),
        Ok(other) => {
            log::warn!(
                "discarding payload with non-list top level ({})",
                variant_name(&other)
            );
            Sequence::new()
        }
        Err(error) => {
            log::warn!("discarding undecodable payload: {error}");
            Sequence::new()
        }
    }
}

fn variant_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Int(_) => "int",
        Value::Float(_) => "float",
        Value::String(_) => "string",
        Value::List(_) => "list",
        Value::Map(_) => "map",
    }
}
