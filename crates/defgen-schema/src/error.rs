//! Schema deserialization error types.

use thiserror::Error;

/// Errors from deserializing a raw protocol document.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document is not valid JSON, or does not have the shape of a
    /// protocol description.
    #[error("schema parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_display_contains_details() {
        let err = SchemaError::Parse("missing field `domains`".into());
        let msg = format!("{err}");
        assert!(msg.contains("schema parse error"));
        assert!(msg.contains("missing field `domains`"));
    }
}
