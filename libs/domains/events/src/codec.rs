//! JSON codec for [`Event`].
//!
//! Encoding writes the `type` tag next to the active variant's fields.
//! Decoding reads the tag first and only then decodes the variant, so an
//! unknown tag is reported as such rather than as a field mismatch.

use serde_json::Value;
use thiserror::Error;

use crate::models::{Event, EventType};

/// Name of the discriminator field
pub const TAG_FIELD: &str = "type";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unknown variant `{0}`, expected one of `Page Viewed`, `Order Completed`, `Heartbeat`")]
    UnknownVariant(String),

    #[error("missing or non-string `type` discriminator")]
    MissingTag,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Resolve a discriminator string to its [`EventType`].
pub fn event_type(tag: &str) -> Result<EventType, CodecError> {
    tag.parse()
        .map_err(|_| CodecError::UnknownVariant(tag.to_string()))
}

pub fn encode(event: &Event) -> Result<Value, CodecError> {
    Ok(serde_json::to_value(event)?)
}

pub fn encode_to_vec(event: &Event) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(event)?)
}

pub fn decode(value: Value) -> Result<Event, CodecError> {
    let tag = value
        .get(TAG_FIELD)
        .and_then(Value::as_str)
        .ok_or(CodecError::MissingTag)?;
    event_type(tag)?;

    Ok(serde_json::from_value(value)?)
}

pub fn decode_slice(bytes: &[u8]) -> Result<Event, CodecError> {
    decode(serde_json::from_slice(bytes)?)
}
