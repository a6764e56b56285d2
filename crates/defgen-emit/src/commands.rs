//! Emission of per-domain command traits.
//!
//! Each domain gets a `commands/<domain>.rs` unit containing one trait:
//! one method per planned command signature, one subscription method per
//! event. Redirected commands are emitted with the redirect target's
//! resolved shape, so a schema change on the target propagates to every
//! alias without touching it.

use defgen_model::{ResolvedCommand, ResolvedDomain, ResolvedModel, ResolvedProperty};

use crate::emit::{doc_block, EmitOptions};
use crate::naming::{item_ident, pascal_case};
use crate::plan::{CommandPlan, DomainPlan, ProtocolPlan, ResultShape, Signature};
use crate::rust_type::render_ref;
use crate::unit::SourceUnit;

/// Emit the command-trait unit for one domain.
pub fn emit_commands_unit(
    model: &ResolvedModel,
    protocol_plan: &ProtocolPlan,
    domain: &ResolvedDomain,
    domain_plan: &DomainPlan,
    header: &str,
    options: &EmitOptions,
) -> SourceUnit {
    let mut contents = String::from(header);
    contents.push('\n');

    let mut imports = Vec::new();
    if !domain.commands.is_empty() {
        imports.push("CallError");
    }
    if !domain.events.is_empty() {
        imports.push("EventHandler");
        imports.push("Subscription");
    }
    if !imports.is_empty() {
        contents.push_str(&format!(
            "use {}::{{{}}};\n\n",
            options.support_path,
            imports.join(", ")
        ));
    }

    doc_block(
        &mut contents,
        "",
        domain.description.as_deref(),
        domain.experimental,
        domain.deprecated,
    );

    let mut methods: Vec<String> = Vec::new();
    for (command, command_plan) in domain.commands.iter().zip(&domain_plan.commands) {
        match &command.redirect {
            Some(target) => {
                // The alias surfaces the final target's resolved shape.
                let target_domain = protocol_plan
                    .domain(target)
                    .expect("redirect target validated during resolution");
                let position = model
                    .domain(target)
                    .and_then(|d| d.commands.iter().position(|c| c.name == command.name))
                    .expect("redirect target validated during resolution");
                let target_command = &model.domain(target).expect("validated").commands[position];
                let target_plan = &target_domain.commands[position];
                let forward_note = format!("Forwards to `{target}.{}`.", command.name);
                for signature in &target_plan.signatures {
                    methods.push(render_command_method(
                        model,
                        target_domain,
                        command,
                        target_command,
                        target_plan,
                        signature,
                        Some(&forward_note),
                    ));
                }
            }
            None => {
                for signature in &command_plan.signatures {
                    methods.push(render_command_method(
                        model,
                        domain_plan,
                        command,
                        command,
                        command_plan,
                        signature,
                        None,
                    ));
                }
            }
        }
    }
    for (event, event_plan) in domain.events.iter().zip(&domain_plan.events) {
        let mut method = String::new();
        doc_block(
            &mut method,
            "    ",
            event.description.as_deref(),
            event.experimental,
            event.deprecated,
        );
        method.push_str(&format!(
            "    /// Wire event: `{}.{}`.\n",
            domain.name, event.name
        ));
        method.push_str(&format!(
            "    fn on_{}(&mut self, handler: EventHandler<crate::types::{}::{}>) -> Subscription;\n",
            item_ident(&event.name).plain,
            item_ident(&domain_plan.name).text,
            event_plan.payload
        ));
        methods.push(method);
    }

    let trait_name = pascal_case(&domain.name);
    if methods.is_empty() {
        contents.push_str(&format!("pub trait {trait_name} {{}}\n"));
    } else {
        contents.push_str(&format!("pub trait {trait_name} {{\n"));
        contents.push_str(&methods.join("\n"));
        contents.push_str("}\n");
    }

    SourceUnit::new(
        format!("commands/{}.rs", item_ident(&domain.name).text),
        contents,
    )
}

/// Render one trait method for one planned signature.
///
/// `shape` is the command whose parameters and returns define the method
/// (the redirect target for aliases); `declared` is the command the method
/// is named and documented after. `plan` must belong to `shape`'s domain
/// so inline enums and composite results resolve to the right module.
fn render_command_method(
    model: &ResolvedModel,
    plan: &DomainPlan,
    declared: &ResolvedCommand,
    shape: &ResolvedCommand,
    command_plan: &CommandPlan,
    signature: &Signature,
    forward_note: Option<&str>,
) -> String {
    let mut out = String::new();
    doc_block(
        &mut out,
        "    ",
        declared.description.as_deref(),
        declared.experimental,
        declared.deprecated,
    );
    if let Some(note) = forward_note {
        out.push_str(&format!("    /// {note}\n"));
    }
    out.push_str(&format!(
        "    /// Wire command: `{}.{}`.\n",
        plan.name, shape.name
    ));

    let base = item_ident(&declared.name);
    let method_name = if signature.full {
        format!("{}_full", base.plain)
    } else {
        base.text.clone()
    };

    let params: Vec<(String, String)> = signature
        .params
        .iter()
        .map(|&i| {
            let property = &shape.parameters[i];
            let mut ty = render_ref(model, plan, &property.name, &property.ty);
            if property.optional {
                ty = format!("Option<{ty}>");
            }
            (item_ident(&property.name).text, ty)
        })
        .collect();

    let ret = render_result(model, plan, shape, &command_plan.result);

    if params.len() <= 1 {
        let args = params
            .iter()
            .map(|(name, ty)| format!(", {name}: {ty}"))
            .collect::<String>();
        out.push_str(&format!("    fn {method_name}(&mut self{args}) -> {ret};\n"));
    } else {
        out.push_str(&format!("    fn {method_name}(\n        &mut self,\n"));
        for (name, ty) in &params {
            out.push_str(&format!("        {name}: {ty},\n"));
        }
        out.push_str(&format!("    ) -> {ret};\n"));
    }
    out
}

fn render_result(
    model: &ResolvedModel,
    plan: &DomainPlan,
    shape: &ResolvedCommand,
    result: &ResultShape,
) -> String {
    match result {
        ResultShape::Unit => "Result<(), CallError>".to_string(),
        ResultShape::Single => {
            let property: &ResolvedProperty = &shape.returns[0];
            let mut ty = render_ref(model, plan, &property.name, &property.ty);
            if property.optional {
                ty = format!("Option<{ty}>");
            }
            format!("Result<{ty}, CallError>")
        }
        ResultShape::Composite { name } => format!(
            "Result<crate::types::{}::{name}, CallError>",
            item_ident(&plan.name).text
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::plan_protocol;
    use defgen_model::{lower, resolve};
    use defgen_schema::parse_protocol;

    fn commands_unit(json: &str, domain_index: usize) -> SourceUnit {
        let model = resolve(&lower(parse_protocol(json).unwrap()).unwrap()).unwrap();
        let plan = plan_protocol(&model);
        emit_commands_unit(
            &model,
            &plan,
            &model.domains()[domain_index],
            &plan.domains[domain_index],
            "//! Test.\n",
            &EmitOptions::default(),
        )
    }

    #[test]
    fn command_without_optionals_emits_one_method() {
        let unit = commands_unit(
            r#"{"domains": [{"domain": "Page",
                "description": "Actions and events related to the inspected page.",
                "commands": [{"name": "navigate",
                    "description": "Navigates current page to the given URL.",
                    "parameters": [{"name": "url", "type": "string"}]}]}]}"#,
            0,
        );
        assert_eq!(unit.path, "commands/page.rs");
        assert!(unit.contents.contains("pub trait Page {"));
        assert!(unit
            .contents
            .contains("    fn navigate(&mut self, url: String) -> Result<(), CallError>;"));
        assert!(!unit.contents.contains("navigate_full"));
    }

    #[test]
    fn optional_parameters_emit_bare_and_full_methods() {
        let unit = commands_unit(
            r#"{"domains": [{"domain": "Debugger",
                "types": [{"id": "SetBreakpointByUrl", "type": "object", "properties": [
                    {"name": "breakpointId", "type": "string"}]}],
                "commands": [{"name": "setBreakpointByUrl",
                    "parameters": [
                        {"name": "lineNumber", "type": "integer"},
                        {"name": "url", "type": "string", "optional": true},
                        {"name": "urlRegex", "type": "string", "optional": true},
                        {"name": "columnNumber", "type": "integer", "optional": true},
                        {"name": "condition", "type": "string", "optional": true}
                    ],
                    "returns": [{"name": "result", "$ref": "SetBreakpointByUrl"}]}]}]}"#,
            0,
        );
        assert!(unit.contents.contains(
            "    fn set_breakpoint_by_url(&mut self, line_number: i64) -> Result<crate::types::debugger::SetBreakpointByUrl, CallError>;"
        ));
        assert!(unit.contents.contains("    fn set_breakpoint_by_url_full(\n"));
        assert!(unit.contents.contains("        line_number: i64,\n"));
        assert!(unit.contents.contains("        url: Option<String>,\n"));
        assert!(unit.contents.contains("        condition: Option<String>,\n"));
    }

    #[test]
    fn events_emit_subscription_methods() {
        let unit = commands_unit(
            r#"{"domains": [{"domain": "Debugger", "events": [
                {"name": "scriptParsed",
                 "description": "Fired when the virtual machine parses a script.",
                 "parameters": [{"name": "scriptId", "type": "string"}]}
            ]}]}"#,
            0,
        );
        assert!(unit.contents.contains(
            "    fn on_script_parsed(&mut self, handler: EventHandler<crate::types::debugger::ScriptParsed>) -> Subscription;"
        ));
        assert!(unit
            .contents
            .contains("use crate::support::{EventHandler, Subscription};"));
        // No commands, so CallError is not imported.
        assert!(!unit.contents.contains("CallError"));
    }

    #[test]
    fn redirect_forwards_with_target_shape() {
        let json = r#"{"domains": [
            {"domain": "Page", "commands": [
                {"name": "canEmulate", "description": "Tells if emulation is supported.",
                 "redirect": "Emulation"}
            ]},
            {"domain": "Emulation", "commands": [
                {"name": "canEmulate",
                 "parameters": [{"name": "strict", "type": "boolean", "optional": true}],
                 "returns": [{"name": "result", "type": "boolean"}]}
            ]}
        ]}"#;
        let alias = commands_unit(json, 0);
        let target = commands_unit(json, 1);
        assert!(alias
            .contents
            .contains("    fn can_emulate(&mut self) -> Result<bool, CallError>;"));
        assert!(alias.contents.contains(
            "    fn can_emulate_full(&mut self, strict: Option<bool>) -> Result<bool, CallError>;"
        ));
        assert!(alias.contents.contains("/// Forwards to `Emulation.canEmulate`."));
        // The alias surfaces the same signatures as the target itself.
        assert!(target
            .contents
            .contains("    fn can_emulate(&mut self) -> Result<bool, CallError>;"));
    }

    #[test]
    fn single_optional_return_is_option() {
        let unit = commands_unit(
            r#"{"domains": [{"domain": "Page", "commands": [{"name": "getAppId",
                "returns": [{"name": "appId", "type": "string", "optional": true}]}]}]}"#,
            0,
        );
        assert!(unit
            .contents
            .contains("    fn get_app_id(&mut self) -> Result<Option<String>, CallError>;"));
    }

    #[test]
    fn keyword_command_uses_raw_identifier() {
        let unit = commands_unit(
            r#"{"domains": [{"domain": "Debugger", "commands": [{"name": "continue"}]}]}"#,
            0,
        );
        assert!(unit
            .contents
            .contains("    fn r#continue(&mut self) -> Result<(), CallError>;"));
    }

    #[test]
    fn deprecated_command_keeps_documentation_marker_only() {
        let unit = commands_unit(
            r#"{"domains": [{"domain": "Page", "commands": [
                {"name": "clearDeviceOrientationOverride", "deprecated": true}
            ]}]}"#,
            0,
        );
        assert!(unit.contents.contains("    /// Deprecated.\n"));
        assert!(!unit.contents.contains("#[deprecated]"));
    }

    #[test]
    fn domain_without_members_emits_empty_trait() {
        let unit = commands_unit(
            r#"{"domains": [{"domain": "Schema", "types": [{"id": "Name", "type": "string"}]}]}"#,
            0,
        );
        assert!(unit.contents.contains("pub trait Schema {}"));
        assert!(!unit.contents.contains("use crate::support"));
    }
}
