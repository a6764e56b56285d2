//! Top-level emission: resolved model in, source units out.

use defgen_model::{ResolvedModel, Version};

use crate::commands::emit_commands_unit;
use crate::naming::item_ident;
use crate::plan::plan_protocol;
use crate::types::emit_types_unit;
use crate::unit::SourceUnit;

/// Rendering options for generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Module path of the support layer that defines `CallError`,
    /// `EventHandler`, and `Subscription`. The generator references these
    /// by name only; their implementation lives with the caller.
    pub support_path: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            support_path: "crate::support".to_string(),
        }
    }
}

/// Emit every source unit for a resolved model.
///
/// Unit order, and everything inside each unit, follows schema
/// declaration order; identical resolved input produces byte-identical
/// output.
pub fn emit_protocol(model: &ResolvedModel, options: &EmitOptions) -> Vec<SourceUnit> {
    let plan = plan_protocol(model);
    let mut units = Vec::new();

    let mut command_modules = Vec::new();
    for (domain, domain_plan) in model.domains().iter().zip(&plan.domains) {
        let header = unit_header(
            &format!("{} domain command interface.", domain.name),
            model.version(),
        );
        units.push(emit_commands_unit(
            model,
            &plan,
            domain,
            domain_plan,
            &header,
            options,
        ));
        command_modules.push(item_ident(&domain.name).text);
    }
    units.push(module_index(
        "commands/mod.rs",
        "Generated domain command interfaces.",
        model.version(),
        &command_modules,
    ));

    let mut type_modules = Vec::new();
    for (domain, domain_plan) in model.domains().iter().zip(&plan.domains) {
        let header = unit_header(&format!("{} domain types.", domain.name), model.version());
        if let Some(unit) = emit_types_unit(model, domain, domain_plan, &header) {
            type_modules.push(item_ident(&domain.name).text);
            units.push(unit);
        }
    }
    units.push(module_index(
        "types/mod.rs",
        "Generated domain types.",
        model.version(),
        &type_modules,
    ));

    tracing::info!(
        domains = model.domains().len(),
        units = units.len(),
        "emitted protocol source units"
    );
    units
}

fn unit_header(title: &str, version: Option<&Version>) -> String {
    let mut header = format!("//! {title}\n//!\n//! Generated by defgen. Do not edit.\n");
    if let Some(version) = version {
        header.push_str(&format!(
            "//! Protocol version {}.{}.\n",
            version.major, version.minor
        ));
    }
    header
}

fn module_index(
    path: &str,
    title: &str,
    version: Option<&Version>,
    modules: &[String],
) -> SourceUnit {
    let mut contents = unit_header(title, version);
    if !modules.is_empty() {
        contents.push('\n');
        for module in modules {
            contents.push_str(&format!("pub mod {module};\n"));
        }
    }
    SourceUnit::new(path, contents)
}

/// Append a doc comment block: description lines, then an empty line and
/// `Experimental.` / `Deprecated.` markers when the entity carries those
/// flags. Flags never become attributes; they are documentation only.
pub(crate) fn doc_block(
    out: &mut String,
    indent: &str,
    description: Option<&str>,
    experimental: bool,
    deprecated: bool,
) {
    let mut lines: Vec<String> = description
        .map(|d| d.lines().map(|l| l.trim_end().to_string()).collect())
        .unwrap_or_default();
    if experimental || deprecated {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        if experimental {
            lines.push("Experimental.".to_string());
        }
        if deprecated {
            lines.push("Deprecated.".to_string());
        }
    }
    for line in &lines {
        if line.is_empty() {
            out.push_str(&format!("{indent}///\n"));
        } else {
            out.push_str(&format!("{indent}/// {line}\n"));
        }
    }
}
