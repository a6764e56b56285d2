//! Raw schema records.
//!
//! These structs mirror the wire-protocol description document field for
//! field. Optional markers, redirects, and inline enum/array declarations
//! are carried verbatim; nothing is resolved or checked here beyond what
//! serde enforces.

use serde::{Deserialize, Serialize};

/// Top-level protocol description: a version stamp and a list of domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProtocol {
    /// Protocol version, when the document carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<RawVersion>,
    /// Domain records in document order.
    pub domains: Vec<RawDomain>,
}

/// Protocol version stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVersion {
    /// Major version component.
    pub major: String,
    /// Minor version component.
    pub minor: String,
}

/// A single protocol domain: a named group of types, commands, and events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDomain {
    /// Domain name, e.g. `"Debugger"`.
    #[serde(rename = "domain")]
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Marked experimental in the source schema.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub experimental: bool,
    /// Marked deprecated in the source schema.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Names of other domains this one references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Named type declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<RawTypeDef>,
    /// Command declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<RawCommand>,
    /// Event declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<RawEvent>,
}

/// A named type declaration within a domain.
///
/// The `kind` tag is one of the primitive names (`string`, `integer`,
/// `number`, `boolean`, `object`, `any`) or `array`; enum types are string
/// types carrying an `enum` literal list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTypeDef {
    /// Type name, unique within the domain.
    pub id: String,
    /// Base kind tag.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub experimental: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Closed literal set for enum types.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Element declaration for array types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<RawItems>,
    /// Field declarations for object types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<RawProperty>>,
}

/// Element declaration of an array type or array property.
///
/// Exactly one of `kind` / `reference` is expected; the loader enforces
/// this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItems {
    /// Primitive element tag.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Named element reference, possibly domain-qualified.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A property: a command parameter, a return value, an event payload field,
/// or an object type field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProperty {
    /// Property name.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Primitive type tag, mutually exclusive with `reference`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Named type reference, possibly domain-qualified (`Domain.Type`).
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Whether the property may be omitted.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub experimental: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Closed literal set for inline string enums.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Element declaration for array properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<RawItems>,
    /// Nested field declarations; present only on malformed documents
    /// (object-typed properties must reference a named type).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<RawProperty>>,
}

/// A command declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCommand {
    /// Command name, unique within the domain.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub experimental: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Name of the domain that now owns this command, when the command is
    /// a forwarding alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RawProperty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<RawProperty>,
    /// Transport hints, opaque to the generator.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub handlers: Vec<String>,
}

/// An event declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Event name, unique within the domain.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub experimental: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Payload field declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RawProperty>,
}
