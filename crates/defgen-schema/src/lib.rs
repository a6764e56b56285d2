//! defgen-schema — raw protocol schema records for defgen.
//!
//! This crate deserializes a remote-debugging protocol description (a JSON
//! document of domains, each carrying commands, events, and type
//! declarations) into untyped raw records. It performs no name resolution
//! and no cross-domain work; structural validation lives in `defgen-model`.

pub mod error;
pub mod parse;
pub mod raw;

// Re-export key types for convenience.
pub use error::SchemaError;
pub use parse::{parse_protocol, parse_protocol_value};
pub use raw::{
    RawCommand, RawDomain, RawEvent, RawItems, RawProperty, RawProtocol, RawTypeDef, RawVersion,
};
