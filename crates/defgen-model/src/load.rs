//! Lowering from raw schema records to the definition model.
//!
//! This is the validating half of schema loading: structural rules
//! (unique names, reference syntax, array/enum shape) are enforced here,
//! with every diagnostic carrying a dotted schema path. No cross-domain
//! resolution happens in this pass.

use defgen_schema::{RawCommand, RawDomain, RawEvent, RawItems, RawProperty, RawProtocol, RawTypeDef};

use crate::error::ModelError;
use crate::model::{
    Command, Domain, Event, Primitive, Property, Protocol, TypeDef, TypeKind, TypeRef, Version,
};

/// Lower raw records into the definition model, validating structure.
///
/// # Errors
///
/// Returns [`ModelError::Malformed`] on empty or duplicate names,
/// contradictory type declarations, or syntactically invalid references.
pub fn lower(raw: RawProtocol) -> Result<Protocol, ModelError> {
    check_unique(raw.domains.iter().map(|d| d.name.as_str()), "domain", "schema")?;

    let domains = raw
        .domains
        .into_iter()
        .map(lower_domain)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(domains = domains.len(), "lowered definition model");

    Ok(Protocol {
        version: raw.version.map(|v| Version {
            major: v.major,
            minor: v.minor,
        }),
        domains,
    })
}

fn lower_domain(raw: RawDomain) -> Result<Domain, ModelError> {
    if !is_identifier(&raw.name) {
        return Err(malformed(
            "schema",
            format!("domain name `{}` is empty or not an identifier", raw.name),
        ));
    }
    let path = raw.name.clone();

    check_unique(raw.types.iter().map(|t| t.id.as_str()), "type", &path)?;
    check_unique(raw.commands.iter().map(|c| c.name.as_str()), "command", &path)?;
    check_unique(raw.events.iter().map(|e| e.name.as_str()), "event", &path)?;

    let types = raw
        .types
        .into_iter()
        .map(|t| lower_type_def(&path, t))
        .collect::<Result<Vec<_>, _>>()?;
    let commands = raw
        .commands
        .into_iter()
        .map(|c| lower_command(&path, c))
        .collect::<Result<Vec<_>, _>>()?;
    let events = raw
        .events
        .into_iter()
        .map(|e| lower_event(&path, e))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Domain {
        name: raw.name,
        description: raw.description,
        experimental: raw.experimental,
        deprecated: raw.deprecated,
        dependencies: raw.dependencies,
        types,
        commands,
        events,
    })
}

fn lower_type_def(domain: &str, raw: RawTypeDef) -> Result<TypeDef, ModelError> {
    if !is_identifier(&raw.id) {
        return Err(malformed(
            domain,
            format!("type name `{}` is empty or not an identifier", raw.id),
        ));
    }
    let path = format!("{domain}.{}", raw.id);

    let kind = match raw.kind.as_str() {
        "array" => {
            if raw.enum_values.is_some() {
                return Err(malformed(&path, "enum literals on a non-string type"));
            }
            if raw.properties.is_some() {
                return Err(malformed(&path, "field declarations on a non-object type"));
            }
            let items = raw
                .items
                .ok_or_else(|| malformed(&path, "array type without an `items` declaration"))?;
            TypeKind::Array(lower_items(&path, items)?)
        }
        "string" if raw.enum_values.is_some() => {
            if raw.items.is_some() {
                return Err(malformed(&path, "`items` declaration on a non-array type"));
            }
            if raw.properties.is_some() {
                return Err(malformed(&path, "field declarations on a non-object type"));
            }
            TypeKind::Enum(lower_enum_literals(&path, raw.enum_values.unwrap())?)
        }
        "object" => {
            if raw.enum_values.is_some() {
                return Err(malformed(&path, "enum literals on a non-string type"));
            }
            if raw.items.is_some() {
                return Err(malformed(&path, "`items` declaration on a non-array type"));
            }
            match raw.properties {
                Some(props) => TypeKind::Object(lower_properties(&path, props)?),
                // An object type without declared fields is an open map;
                // it lowers to an alias for the opaque object primitive.
                None => TypeKind::Alias(Primitive::Object),
            }
        }
        tag => {
            if raw.enum_values.is_some() {
                return Err(malformed(&path, "enum literals on a non-string type"));
            }
            if raw.properties.is_some() {
                return Err(malformed(&path, "field declarations on a non-object type"));
            }
            if raw.items.is_some() {
                return Err(malformed(&path, "`items` declaration on a non-array type"));
            }
            let primitive = Primitive::from_tag(tag)
                .ok_or_else(|| malformed(&path, format!("unknown type tag `{tag}`")))?;
            TypeKind::Alias(primitive)
        }
    };

    Ok(TypeDef {
        name: raw.id,
        description: raw.description,
        experimental: raw.experimental,
        deprecated: raw.deprecated,
        kind,
    })
}

fn lower_command(domain: &str, raw: RawCommand) -> Result<Command, ModelError> {
    if raw.name.is_empty() {
        return Err(malformed(domain, "command with an empty name"));
    }
    let path = format!("{domain}.{}", raw.name);
    let parameters = lower_properties(&path, raw.parameters)?;
    let returns = lower_properties(&path, raw.returns)?;
    Ok(Command {
        name: raw.name,
        description: raw.description,
        experimental: raw.experimental,
        deprecated: raw.deprecated,
        redirect: raw.redirect,
        parameters,
        returns,
        handlers: raw.handlers,
    })
}

fn lower_event(domain: &str, raw: RawEvent) -> Result<Event, ModelError> {
    if raw.name.is_empty() {
        return Err(malformed(domain, "event with an empty name"));
    }
    let path = format!("{domain}.{}", raw.name);
    let parameters = lower_properties(&path, raw.parameters)?;
    Ok(Event {
        name: raw.name,
        description: raw.description,
        experimental: raw.experimental,
        deprecated: raw.deprecated,
        parameters,
    })
}

fn lower_properties(owner: &str, raws: Vec<RawProperty>) -> Result<Vec<Property>, ModelError> {
    check_unique(raws.iter().map(|p| p.name.as_str()), "property", owner)?;
    raws.into_iter().map(|p| lower_property(owner, p)).collect()
}

fn lower_property(owner: &str, raw: RawProperty) -> Result<Property, ModelError> {
    if raw.name.is_empty() {
        return Err(malformed(owner, "property with an empty name"));
    }
    let path = format!("{owner}.{}", raw.name);

    if raw.properties.is_some() {
        return Err(malformed(
            &path,
            "inline object properties are not supported; declare a named type",
        ));
    }

    let ty = match (raw.kind, raw.reference) {
        (Some(_), Some(_)) => {
            return Err(malformed(&path, "property declares both `type` and `$ref`"));
        }
        (None, None) => {
            return Err(malformed(&path, "property declares neither `type` nor `$ref`"));
        }
        (None, Some(reference)) => {
            if raw.enum_values.is_some() {
                return Err(malformed(&path, "enum literals on a `$ref` property"));
            }
            if raw.items.is_some() {
                return Err(malformed(&path, "`items` declaration on a `$ref` property"));
            }
            parse_named(&path, &reference)?
        }
        (Some(tag), None) => match tag.as_str() {
            "array" => {
                if raw.enum_values.is_some() {
                    return Err(malformed(&path, "enum literals on an array property"));
                }
                let items = raw
                    .items
                    .ok_or_else(|| malformed(&path, "array property without an `items` declaration"))?;
                TypeRef::Array(Box::new(lower_items(&path, items)?))
            }
            "string" if raw.enum_values.is_some() => {
                if raw.items.is_some() {
                    return Err(malformed(&path, "`items` declaration on a non-array property"));
                }
                TypeRef::InlineEnum(lower_enum_literals(&path, raw.enum_values.unwrap())?)
            }
            tag => {
                if raw.enum_values.is_some() {
                    return Err(malformed(&path, "enum literals on a non-string property"));
                }
                if raw.items.is_some() {
                    return Err(malformed(&path, "`items` declaration on a non-array property"));
                }
                let primitive = Primitive::from_tag(tag)
                    .ok_or_else(|| malformed(&path, format!("unknown type tag `{tag}`")))?;
                TypeRef::Primitive(primitive)
            }
        },
    };

    Ok(Property {
        name: raw.name,
        description: raw.description,
        ty,
        optional: raw.optional,
        experimental: raw.experimental,
        deprecated: raw.deprecated,
    })
}

fn lower_items(path: &str, items: RawItems) -> Result<TypeRef, ModelError> {
    match (items.kind, items.reference) {
        (Some(_), Some(_)) => Err(malformed(path, "`items` declares both `type` and `$ref`")),
        (None, None) => Err(malformed(path, "`items` declares neither `type` nor `$ref`")),
        (None, Some(reference)) => parse_named(path, &reference),
        (Some(tag), None) => Primitive::from_tag(&tag)
            .map(TypeRef::Primitive)
            .ok_or_else(|| malformed(path, format!("unknown element type tag `{tag}`"))),
    }
}

/// Parse a `Name` or `Domain.Name` reference, validating syntax.
fn parse_named(path: &str, text: &str) -> Result<TypeRef, ModelError> {
    let mut segments = text.split('.');
    let first = segments.next().unwrap_or_default();
    let second = segments.next();
    let malformed_ref =
        || malformed(path, format!("type reference `{text}` is not `Name` or `Domain.Name`"));

    if segments.next().is_some() || !is_identifier(first) {
        return Err(malformed_ref());
    }
    match second {
        Some(name) => {
            if !is_identifier(name) {
                return Err(malformed_ref());
            }
            Ok(TypeRef::Named {
                domain: Some(first.to_string()),
                name: name.to_string(),
            })
        }
        None => Ok(TypeRef::Named {
            domain: None,
            name: first.to_string(),
        }),
    }
}

fn lower_enum_literals(path: &str, values: Vec<String>) -> Result<Vec<String>, ModelError> {
    if values.is_empty() {
        return Err(malformed(path, "enum declaration with no literals"));
    }
    check_unique(values.iter().map(String::as_str), "enum literal", path)?;
    Ok(values)
}

/// Report the first duplicated name in `names`, if any.
fn check_unique<'a>(
    names: impl Iterator<Item = &'a str>,
    what: &str,
    path: &str,
) -> Result<(), ModelError> {
    let mut seen = std::collections::HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(malformed(path, format!("duplicate {what} name `{name}`")));
        }
    }
    Ok(())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn malformed(path: &str, message: impl Into<String>) -> ModelError {
    ModelError::Malformed {
        path: path.to_string(),
        message: message.into(),
    }
}
