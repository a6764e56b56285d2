//! The canonical definition model.
//!
//! Owned, validated entities lowered from raw schema records. Metadata
//! flags (`experimental` / `deprecated`) are plain booleans carried on
//! every entity; only the emitter consumes them, as documentation.

/// A built-in primitive type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// UTF-8 text.
    String,
    /// Integral number.
    Integer,
    /// Floating-point number.
    Number,
    /// Boolean.
    Boolean,
    /// Opaque JSON object.
    Object,
    /// Any JSON value.
    Any,
}

impl Primitive {
    /// Parse a schema type tag into a primitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    /// Return the schema-side tag for this primitive.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Any => "any",
        }
    }
}

/// An unresolved type reference as written in the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A built-in primitive tag.
    Primitive(Primitive),
    /// A named reference to a type declaration, optionally qualified with
    /// the owning domain (`Domain.Type`).
    Named {
        /// Qualifying domain, when the reference is written qualified.
        domain: Option<String>,
        /// The referenced type name.
        name: String,
    },
    /// An array of some element type.
    Array(Box<TypeRef>),
    /// A string constrained to a closed literal set, declared inline on a
    /// property. The emitter synthesizes a named enum for these.
    InlineEnum(Vec<String>),
}

impl TypeRef {
    /// Render the reference the way it was written in the schema, for
    /// diagnostics.
    pub fn display_name(&self) -> String {
        match self {
            Self::Primitive(p) => p.tag().to_string(),
            Self::Named { domain: Some(d), name } => format!("{d}.{name}"),
            Self::Named { domain: None, name } => name.clone(),
            Self::Array(el) => format!("array of {}", el.display_name()),
            Self::InlineEnum(_) => "string enum".to_string(),
        }
    }
}

/// A property: command parameter, return value, event payload field, or
/// object type field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Human-readable description.
    pub description: Option<String>,
    /// The property's type reference.
    pub ty: TypeRef,
    /// Whether the property may be omitted.
    pub optional: bool,
    pub experimental: bool,
    pub deprecated: bool,
}

/// The shape of a named type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// A named alias for a primitive.
    Alias(Primitive),
    /// A closed string enumeration.
    Enum(Vec<String>),
    /// An array of some element type.
    Array(TypeRef),
    /// An object with an ordered field list.
    Object(Vec<Property>),
}

/// A named type declaration within a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    /// Type name, unique within the owning domain.
    pub name: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub deprecated: bool,
    /// The declared shape.
    pub kind: TypeKind,
}

/// A command declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command name, unique within the owning domain.
    pub name: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub deprecated: bool,
    /// Domain that now owns this command, when this declaration is a pure
    /// forwarding alias.
    pub redirect: Option<String>,
    /// Ordered parameters.
    pub parameters: Vec<Property>,
    /// Ordered return values.
    pub returns: Vec<Property>,
    /// Transport hints, opaque to the generator.
    pub handlers: Vec<String>,
}

/// An event declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event name, unique within the owning domain.
    pub name: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub deprecated: bool,
    /// Ordered payload fields.
    pub parameters: Vec<Property>,
}

/// A protocol domain: a named group of types, commands, and events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    /// Domain name, unique across the schema.
    pub name: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub deprecated: bool,
    /// Names of other domains this one references.
    pub dependencies: Vec<String>,
    /// Named type declarations, schema order.
    pub types: Vec<TypeDef>,
    /// Command declarations, schema order.
    pub commands: Vec<Command>,
    /// Event declarations, schema order.
    pub events: Vec<Event>,
}

impl Domain {
    /// Look up a command by name.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Look up a type declaration by name.
    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.name == name)
    }
}

/// Protocol version stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: String,
    pub minor: String,
}

/// The whole definition model: every domain, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protocol {
    /// Protocol version, when the document carries one.
    pub version: Option<Version>,
    pub domains: Vec<Domain>,
}

impl Protocol {
    /// Look up a domain by name.
    pub fn domain(&self, name: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_tags_round_trip() {
        for tag in ["string", "integer", "number", "boolean", "object", "any"] {
            let p = Primitive::from_tag(tag).unwrap();
            assert_eq!(p.tag(), tag);
        }
    }

    #[test]
    fn primitive_rejects_unknown_tag() {
        assert_eq!(Primitive::from_tag("binary"), None);
        assert_eq!(Primitive::from_tag(""), None);
        assert_eq!(Primitive::from_tag("String"), None);
    }

    #[test]
    fn type_ref_display_qualified() {
        let r = TypeRef::Named {
            domain: Some("Runtime".into()),
            name: "RemoteObject".into(),
        };
        assert_eq!(r.display_name(), "Runtime.RemoteObject");
    }

    #[test]
    fn type_ref_display_array_of_named() {
        let r = TypeRef::Array(Box::new(TypeRef::Named {
            domain: None,
            name: "Location".into(),
        }));
        assert_eq!(r.display_name(), "array of Location");
    }

    #[test]
    fn domain_lookup_by_name() {
        let domain = Domain {
            name: "Debugger".into(),
            description: None,
            experimental: false,
            deprecated: false,
            dependencies: Vec::new(),
            types: Vec::new(),
            commands: vec![Command {
                name: "enable".into(),
                description: None,
                experimental: false,
                deprecated: false,
                redirect: None,
                parameters: Vec::new(),
                returns: Vec::new(),
                handlers: Vec::new(),
            }],
            events: Vec::new(),
        };
        assert!(domain.command("enable").is_some());
        assert!(domain.command("disable").is_none());
        assert!(domain.type_def("Location").is_none());
    }
}
