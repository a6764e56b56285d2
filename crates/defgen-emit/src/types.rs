//! Emission of per-domain type modules.
//!
//! Each domain with at least one emitted type gets a `types/<domain>.rs`
//! unit: declared types first (schema order), then composite command
//! results, event payloads, and synthesized inline enums, all in planning
//! order.

use std::collections::HashSet;

use defgen_model::{
    ResolvedDomain, ResolvedKind, ResolvedModel, ResolvedProperty, ResolvedRef, TypeId,
};

use crate::emit::doc_block;
use crate::naming::{item_ident, needs_explicit_rename, variant_ident};
use crate::plan::{DomainPlan, ResultShape};
use crate::rust_type::{primitive_type, render_ref};
use crate::unit::SourceUnit;

/// Emit the types unit for one domain, or `None` when the domain has
/// nothing to emit.
pub fn emit_types_unit(
    model: &ResolvedModel,
    domain: &ResolvedDomain,
    plan: &DomainPlan,
    header: &str,
) -> Option<SourceUnit> {
    let mut items = String::new();
    let mut needs_serde = false;

    for &id in &domain.types {
        let def = model.type_def(id);
        match &def.kind {
            ResolvedKind::Alias(p) => alias_item(
                &mut items,
                &def.name,
                def.description.as_deref(),
                def.experimental,
                def.deprecated,
                primitive_type(*p),
            ),
            ResolvedKind::Array(element) => alias_item(
                &mut items,
                &def.name,
                def.description.as_deref(),
                def.experimental,
                def.deprecated,
                &format!("Vec<{}>", render_ref(model, plan, &def.name, element)),
            ),
            ResolvedKind::Enum(literals) => {
                needs_serde = true;
                enum_item(
                    &mut items,
                    &def.name,
                    def.description.as_deref(),
                    def.experimental,
                    def.deprecated,
                    literals,
                );
            }
            ResolvedKind::Object(fields) => {
                needs_serde = true;
                struct_item(
                    &mut items,
                    model,
                    plan,
                    &def.name,
                    def.description.as_deref(),
                    def.experimental,
                    def.deprecated,
                    fields,
                    Some(id),
                );
            }
        }
    }

    for (command, command_plan) in domain.commands.iter().zip(&plan.commands) {
        if let ResultShape::Composite { name } = &command_plan.result {
            needs_serde = true;
            let description =
                format!("Result of the `{}.{}` command.", domain.name, command.name);
            struct_item(
                &mut items,
                model,
                plan,
                name,
                Some(&description),
                command.experimental,
                command.deprecated,
                &command.returns,
                None,
            );
        }
    }

    for (event, event_plan) in domain.events.iter().zip(&plan.events) {
        needs_serde = true;
        struct_item(
            &mut items,
            model,
            plan,
            &event_plan.payload,
            event.description.as_deref(),
            event.experimental,
            event.deprecated,
            &event.parameters,
            None,
        );
    }

    for synth in &plan.enums {
        needs_serde = true;
        enum_item(&mut items, &synth.name, None, false, false, &synth.literals);
    }

    if items.is_empty() {
        return None;
    }

    let mut contents = String::from(header);
    contents.push('\n');
    if needs_serde {
        contents.push_str("use serde::{Deserialize, Serialize};\n\n");
    }
    contents.push_str(items.trim_start_matches('\n'));

    Some(SourceUnit::new(
        format!("types/{}.rs", item_ident(&domain.name).text),
        contents,
    ))
}

fn alias_item(
    out: &mut String,
    name: &str,
    description: Option<&str>,
    experimental: bool,
    deprecated: bool,
    target: &str,
) {
    out.push('\n');
    doc_block(out, "", description, experimental, deprecated);
    out.push_str(&format!("pub type {name} = {target};\n"));
}

fn enum_item(
    out: &mut String,
    name: &str,
    description: Option<&str>,
    experimental: bool,
    deprecated: bool,
    literals: &[String],
) {
    out.push('\n');
    doc_block(out, "", description, experimental, deprecated);
    out.push_str("#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]\n");
    out.push_str(&format!("pub enum {name} {{\n"));
    let mut used = HashSet::new();
    for literal in literals {
        let base = variant_ident(literal);
        let mut variant = base.clone();
        let mut n = 2usize;
        while !used.insert(variant.clone()) {
            variant = format!("{base}{n}");
            n += 1;
        }
        out.push_str(&format!("    #[serde(rename = \"{literal}\")]\n"));
        out.push_str(&format!("    {variant},\n"));
    }
    out.push_str("}\n");
}

#[allow(clippy::too_many_arguments)]
fn struct_item(
    out: &mut String,
    model: &ResolvedModel,
    plan: &DomainPlan,
    name: &str,
    description: Option<&str>,
    experimental: bool,
    deprecated: bool,
    fields: &[ResolvedProperty],
    owner: Option<TypeId>,
) {
    out.push('\n');
    doc_block(out, "", description, experimental, deprecated);
    out.push_str("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]\n");
    out.push_str("#[serde(rename_all = \"camelCase\")]\n");
    if fields.is_empty() {
        out.push_str(&format!("pub struct {name} {{}}\n"));
        return;
    }
    out.push_str(&format!("pub struct {name} {{\n"));
    for field in fields {
        doc_block(
            out,
            "    ",
            field.description.as_deref(),
            field.experimental,
            field.deprecated,
        );
        let ident = item_ident(&field.name);
        if needs_explicit_rename(&field.name, &ident) {
            out.push_str(&format!("    #[serde(rename = \"{}\")]\n", field.name));
        }
        if field.optional {
            out.push_str("    #[serde(skip_serializing_if = \"Option::is_none\")]\n");
        }
        let mut ty = render_ref(model, plan, &field.name, &field.ty);
        if let (Some(owner), ResolvedRef::Named(target)) = (owner, &field.ty) {
            // A field whose target type contains this one by value would
            // make the struct infinitely sized; the cycle is broken with
            // a heap indirection.
            if contains_by_value(model, *target, owner) {
                ty = format!("Box<{ty}>");
            }
        }
        if field.optional {
            ty = format!("Option<{ty}>");
        }
        out.push_str(&format!("    pub {}: {ty},\n", ident.text));
    }
    out.push_str("}\n");
}

/// Whether `from` reaches `to` through by-value field containment.
///
/// Arrays already place elements on the heap, so only direct named fields
/// of object types count as containment edges.
fn contains_by_value(model: &ResolvedModel, from: TypeId, to: TypeId) -> bool {
    let mut stack = vec![from];
    let mut seen = HashSet::new();
    while let Some(id) = stack.pop() {
        if id == to {
            return true;
        }
        if !seen.insert(id) {
            continue;
        }
        if let ResolvedKind::Object(fields) = &model.type_def(id).kind {
            for field in fields {
                if let ResolvedRef::Named(next) = field.ty {
                    stack.push(next);
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::plan_protocol;
    use defgen_model::{lower, resolve};
    use defgen_schema::parse_protocol;

    fn types_unit(json: &str) -> Option<SourceUnit> {
        let model = resolve(&lower(parse_protocol(json).unwrap()).unwrap()).unwrap();
        let plan = plan_protocol(&model);
        emit_types_unit(&model, &model.domains()[0], &plan.domains[0], "//! Test.\n")
    }

    #[test]
    fn object_type_emits_serde_struct() {
        let unit = types_unit(
            r#"{"domains": [{"domain": "Debugger", "types": [
                {"id": "Location", "type": "object",
                 "description": "Location in the source code.",
                 "properties": [
                    {"name": "scriptId", "type": "string"},
                    {"name": "columnNumber", "type": "integer", "optional": true}
                ]}
            ]}]}"#,
        )
        .unwrap();
        assert_eq!(unit.path, "types/debugger.rs");
        assert!(unit.contents.contains("/// Location in the source code."));
        assert!(unit.contents.contains("#[serde(rename_all = \"camelCase\")]"));
        assert!(unit.contents.contains("pub struct Location {"));
        assert!(unit.contents.contains("    pub script_id: String,"));
        assert!(unit
            .contents
            .contains("    #[serde(skip_serializing_if = \"Option::is_none\")]\n    pub column_number: Option<i64>,"));
    }

    #[test]
    fn keyword_field_uses_raw_identifier() {
        let unit = types_unit(
            r#"{"domains": [{"domain": "Runtime", "types": [
                {"id": "RemoteObject", "type": "object", "properties": [
                    {"name": "type", "type": "string"}
                ]}
            ]}]}"#,
        )
        .unwrap();
        assert!(unit.contents.contains("    pub r#type: String,"));
        // `type` round-trips under camelCase, so no explicit rename.
        assert!(!unit.contents.contains("rename = \"type\""));
    }

    #[test]
    fn acronym_field_gets_explicit_rename() {
        let unit = types_unit(
            r#"{"domains": [{"domain": "Page", "types": [
                {"id": "Frame", "type": "object", "properties": [
                    {"name": "frameURL", "type": "string"}
                ]}
            ]}]}"#,
        )
        .unwrap();
        assert!(unit.contents.contains("#[serde(rename = \"frameURL\")]"));
        assert!(unit.contents.contains("pub frame_url: String,"));
    }

    #[test]
    fn self_referential_field_is_boxed() {
        let unit = types_unit(
            r#"{"domains": [{"domain": "Runtime", "types": [
                {"id": "StackTrace", "type": "object", "properties": [
                    {"name": "parent", "$ref": "StackTrace", "optional": true}
                ]}
            ]}]}"#,
        )
        .unwrap();
        assert!(unit
            .contents
            .contains("pub parent: Option<Box<crate::types::runtime::StackTrace>>,"));
    }

    #[test]
    fn mutually_recursive_fields_are_boxed() {
        let unit = types_unit(
            r#"{"domains": [{"domain": "Dom", "types": [
                {"id": "Node", "type": "object", "properties": [
                    {"name": "shadow", "$ref": "ShadowRoot", "optional": true}
                ]},
                {"id": "ShadowRoot", "type": "object", "properties": [
                    {"name": "host", "$ref": "Node"}
                ]}
            ]}]}"#,
        )
        .unwrap();
        assert!(unit
            .contents
            .contains("pub shadow: Option<Box<crate::types::dom::ShadowRoot>>,"));
        assert!(unit.contents.contains("pub host: Box<crate::types::dom::Node>,"));
    }

    #[test]
    fn array_reference_is_not_boxed() {
        let unit = types_unit(
            r#"{"domains": [{"domain": "Dom", "types": [
                {"id": "Node", "type": "object", "properties": [
                    {"name": "children", "type": "array", "items": {"$ref": "Node"}, "optional": true}
                ]}
            ]}]}"#,
        )
        .unwrap();
        assert!(unit
            .contents
            .contains("pub children: Option<Vec<crate::types::dom::Node>>,"));
    }

    #[test]
    fn acyclic_named_field_is_not_boxed() {
        let unit = types_unit(
            r#"{"domains": [{"domain": "Debugger", "types": [
                {"id": "Scope", "type": "object", "properties": [
                    {"name": "start", "$ref": "Location"}
                ]},
                {"id": "Location", "type": "object", "properties": [
                    {"name": "lineNumber", "type": "integer"}
                ]}
            ]}]}"#,
        )
        .unwrap();
        assert!(unit
            .contents
            .contains("pub start: crate::types::debugger::Location,"));
    }

    #[test]
    fn enum_type_emits_renamed_variants() {
        let unit = types_unit(
            r#"{"domains": [{"domain": "Emulation", "types": [
                {"id": "Orientation", "type": "string",
                 "enum": ["portrait-primary", "landscape-primary"]}
            ]}]}"#,
        )
        .unwrap();
        assert!(unit.contents.contains("pub enum Orientation {"));
        assert!(unit
            .contents
            .contains("    #[serde(rename = \"portrait-primary\")]\n    PortraitPrimary,"));
    }

    #[test]
    fn primitive_alias_and_open_object_emit_aliases() {
        let unit = types_unit(
            r#"{"domains": [{"domain": "Network", "types": [
                {"id": "RequestId", "type": "string"},
                {"id": "Headers", "type": "object"}
            ]}]}"#,
        )
        .unwrap();
        assert!(unit.contents.contains("pub type RequestId = String;"));
        assert!(unit.contents.contains("pub type Headers = serde_json::Value;"));
        // Nothing here derives serde.
        assert!(!unit.contents.contains("use serde::"));
    }

    #[test]
    fn composite_result_and_event_payload_are_emitted() {
        let unit = types_unit(
            r#"{"domains": [{"domain": "Debugger",
                "commands": [{"name": "setBreakpointByUrl",
                    "returns": [
                        {"name": "breakpointId", "type": "string"},
                        {"name": "locations", "type": "array", "items": {"type": "integer"}}
                    ]}],
                "events": [{"name": "resumed"}]
            }]}"#,
        )
        .unwrap();
        assert!(unit.contents.contains("pub struct SetBreakpointByUrl {"));
        assert!(unit
            .contents
            .contains("/// Result of the `Debugger.setBreakpointByUrl` command."));
        assert!(unit.contents.contains("pub struct Resumed {}"));
    }

    #[test]
    fn domain_with_nothing_to_emit_yields_no_unit() {
        let unit = types_unit(
            r#"{"domains": [{"domain": "Page", "commands": [{"name": "reload"}]}]}"#,
        );
        assert!(unit.is_none());
    }

    #[test]
    fn deprecated_marker_is_documentation_only() {
        let unit = types_unit(
            r#"{"domains": [{"domain": "Page", "types": [
                {"id": "Quota", "type": "number", "deprecated": true,
                 "description": "Storage quota."}
            ]}]}"#,
        )
        .unwrap();
        assert!(unit.contents.contains("/// Storage quota.\n///\n/// Deprecated.\npub type Quota = f64;"));
        assert!(!unit.contents.contains("#[deprecated]"));
    }
}
