//! Overload and synthesis planning.
//!
//! Bridges the gap between the schema's implicit "any subset of optional
//! parameters" calling convention and statically-typed signatures. The
//! policy is fixed and bounded: a command or event with at least one
//! optional parameter gets exactly two signatures — required-only, and all
//! parameters in declared order — never the full combinatorial set. This
//! mirrors the hand-authored client interfaces and must not be
//! generalized.
//!
//! Planning also names everything the emitter synthesizes: composite
//! result types for multi-value returns, event payload types, and enums
//! for inline string literal sets.

use std::collections::{HashMap, HashSet};

use defgen_model::{
    ResolvedCommand, ResolvedDomain, ResolvedKind, ResolvedModel, ResolvedProperty, ResolvedRef,
};

use crate::naming::pascal_case;

/// One planned parameter-list variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Indices into the command's (or event's) parameter list, declared
    /// order.
    pub params: Vec<usize>,
    /// Whether this is the all-parameters variant of a command that also
    /// has a required-only variant.
    pub full: bool,
}

/// How a command's return values are surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultShape {
    /// No return values.
    Unit,
    /// Exactly one return value, surfaced directly.
    Single,
    /// Two or more return values, bundled into a named composite type.
    Composite {
        /// Name of the synthesized result type.
        name: String,
    },
}

/// Plan for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    pub signatures: Vec<Signature>,
    pub result: ResultShape,
}

/// Plan for one event: its synthesized payload type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPlan {
    pub payload: String,
}

/// A synthesized enum for an inline string literal set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthEnum {
    pub name: String,
    pub literals: Vec<String>,
}

/// Everything planned for one domain, aligned with the resolved domain's
/// command and event order.
#[derive(Debug)]
pub struct DomainPlan {
    pub name: String,
    pub commands: Vec<CommandPlan>,
    pub events: Vec<EventPlan>,
    /// Synthesized enums, first-encounter order.
    pub enums: Vec<SynthEnum>,
    enum_index: HashMap<(String, Vec<String>), usize>,
}

impl DomainPlan {
    /// Name of the synthesized enum for an inline literal set declared on
    /// the given property, if one was planned.
    pub fn enum_name(&self, property: &str, literals: &[String]) -> Option<&str> {
        self.enum_index
            .get(&(property.to_string(), literals.to_vec()))
            .map(|&i| self.enums[i].name.as_str())
    }
}

/// Plans for every domain, schema order.
#[derive(Debug)]
pub struct ProtocolPlan {
    pub domains: Vec<DomainPlan>,
}

impl ProtocolPlan {
    /// Look up a domain's plan by name, e.g. for a redirect target.
    pub fn domain(&self, name: &str) -> Option<&DomainPlan> {
        self.domains.iter().find(|d| d.name == name)
    }
}

/// Plan signatures, result shapes, and synthesized names for the whole
/// resolved model.
pub fn plan_protocol(model: &ResolvedModel) -> ProtocolPlan {
    let domains = model.domains().iter().map(|d| plan_domain(model, d)).collect();
    ProtocolPlan { domains }
}

fn plan_domain(model: &ResolvedModel, domain: &ResolvedDomain) -> DomainPlan {
    // Names already taken by the domain's declared types; everything
    // synthesized must avoid them.
    let mut names = NamePool::new(
        domain
            .types
            .iter()
            .map(|&id| model.type_def(id).name.clone()),
    );

    let commands = domain
        .commands
        .iter()
        .map(|c| plan_command(c, &mut names))
        .collect();
    let events = domain
        .events
        .iter()
        .map(|e| EventPlan {
            payload: names.claim(&[pascal_case(&e.name), format!("{}Event", pascal_case(&e.name))]),
        })
        .collect();

    let mut enums = Vec::new();
    let mut enum_index = HashMap::new();
    for &id in &domain.types {
        if let ResolvedKind::Object(fields) = &model.type_def(id).kind {
            let owner = model.type_def(id).name.clone();
            plan_inline_enums(&owner, fields, &mut names, &mut enums, &mut enum_index);
        }
    }
    for command in &domain.commands {
        plan_inline_enums(&command.name, &command.parameters, &mut names, &mut enums, &mut enum_index);
        plan_inline_enums(&command.name, &command.returns, &mut names, &mut enums, &mut enum_index);
    }
    for event in &domain.events {
        plan_inline_enums(&event.name, &event.parameters, &mut names, &mut enums, &mut enum_index);
    }

    DomainPlan {
        name: domain.name.clone(),
        commands,
        events,
        enums,
        enum_index,
    }
}

/// The fixed two-variant policy.
fn plan_command(command: &ResolvedCommand, names: &mut NamePool) -> CommandPlan {
    let signatures = plan_signatures(&command.parameters);
    let result = match command.returns.len() {
        0 => ResultShape::Unit,
        1 => ResultShape::Single,
        _ => ResultShape::Composite {
            name: names.claim(&[
                pascal_case(&command.name),
                format!("{}Result", pascal_case(&command.name)),
            ]),
        },
    };
    CommandPlan { signatures, result }
}

fn plan_signatures(parameters: &[ResolvedProperty]) -> Vec<Signature> {
    let required: Vec<usize> = parameters
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.optional)
        .map(|(i, _)| i)
        .collect();
    let all: Vec<usize> = (0..parameters.len()).collect();

    if required.len() == all.len() {
        vec![Signature {
            params: all,
            full: false,
        }]
    } else {
        vec![
            Signature {
                params: required,
                full: false,
            },
            Signature {
                params: all,
                full: true,
            },
        ]
    }
}

fn plan_inline_enums(
    owner: &str,
    properties: &[ResolvedProperty],
    names: &mut NamePool,
    enums: &mut Vec<SynthEnum>,
    enum_index: &mut HashMap<(String, Vec<String>), usize>,
) {
    for property in properties {
        let ResolvedRef::InlineEnum(literals) = &property.ty else {
            continue;
        };
        let key = (property.name.clone(), literals.clone());
        if enum_index.contains_key(&key) {
            continue;
        }
        let name = names.claim(&[
            pascal_case(&property.name),
            format!("{}{}", pascal_case(owner), pascal_case(&property.name)),
        ]);
        enum_index.insert(key, enums.len());
        enums.push(SynthEnum {
            name,
            literals: literals.clone(),
        });
    }
}

/// Tracks claimed type names within one domain's emitted module.
struct NamePool {
    used: HashSet<String>,
}

impl NamePool {
    fn new(seed: impl Iterator<Item = String>) -> Self {
        Self {
            used: seed.collect(),
        }
    }

    /// Claim the first free candidate, falling back to numbered variants
    /// of the last candidate.
    fn claim(&mut self, candidates: &[String]) -> String {
        for candidate in candidates {
            if self.used.insert(candidate.clone()) {
                return candidate.clone();
            }
        }
        let base = candidates.last().expect("at least one candidate");
        let mut n = 2usize;
        loop {
            let candidate = format!("{base}{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
