//! Mapping from resolved type references to Rust type text.

use defgen_model::{Primitive, ResolvedModel, ResolvedRef, TypeId};

use crate::naming::item_ident;
use crate::plan::DomainPlan;

/// Rust type for a primitive tag.
pub fn primitive_type(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::String => "String",
        Primitive::Integer => "i64",
        Primitive::Number => "f64",
        Primitive::Boolean => "bool",
        Primitive::Object => "serde_json::Value",
        Primitive::Any => "serde_json::Value",
    }
}

/// Full crate path of a named type, e.g.
/// `crate::types::debugger::Location`.
///
/// References are always fully qualified so units never need import
/// planning and cross-domain references cost nothing extra.
pub fn type_path(model: &ResolvedModel, id: TypeId) -> String {
    let def = model.type_def(id);
    format!(
        "crate::types::{}::{}",
        item_ident(&def.domain).text,
        def.name
    )
}

/// Render a resolved reference as Rust type text.
///
/// `plan` must be the plan of the domain that declares the property, so
/// inline enums resolve to the synthesized names planned there.
/// `property` is the declaring property's name, the key under which an
/// inline enum was planned.
pub fn render_ref(
    model: &ResolvedModel,
    plan: &DomainPlan,
    property: &str,
    reference: &ResolvedRef,
) -> String {
    match reference {
        ResolvedRef::Primitive(p) => primitive_type(*p).to_string(),
        ResolvedRef::Named(id) => type_path(model, *id),
        ResolvedRef::Array(element) => {
            format!("Vec<{}>", render_ref(model, plan, property, element))
        }
        ResolvedRef::InlineEnum(literals) => {
            let name = plan
                .enum_name(property, literals)
                .expect("inline enum registered during planning");
            format!(
                "crate::types::{}::{}",
                item_ident(&plan.name).text,
                name
            )
        }
    }
}
