//! Protocol document deserialization.

use crate::error::SchemaError;
use crate::raw::RawProtocol;

/// Parse a JSON protocol description into raw records.
///
/// # Errors
///
/// Returns [`SchemaError::Parse`] when the text is not valid JSON or is
/// missing required fields. Cross-domain checks happen later, in the
/// definition-model loader.
pub fn parse_protocol(json: &str) -> Result<RawProtocol, SchemaError> {
    let protocol: RawProtocol =
        serde_json::from_str(json).map_err(|e| SchemaError::Parse(e.to_string()))?;
    tracing::debug!(
        domains = protocol.domains.len(),
        "parsed protocol document"
    );
    Ok(protocol)
}

/// Parse an already-deserialized JSON value into raw records.
///
/// Useful for callers that embed the protocol description inside a larger
/// document.
///
/// # Errors
///
/// Returns [`SchemaError::Parse`] when the value does not have the shape of
/// a protocol description.
pub fn parse_protocol_value(value: serde_json::Value) -> Result<RawProtocol, SchemaError> {
    serde_json::from_value(value).map_err(|e| SchemaError::Parse(e.to_string()))
}
