//! Type reference resolution.
//!
//! Binds every textual type reference in the definition model to a concrete
//! resolved type. Named types live in a shared resolved-type table; a
//! [`TypeId`] is a lightweight key into that table, which is how circular
//! references (self or mutual) are represented without eager expansion.
//!
//! Resolution order is schema declaration order throughout, so resolving
//! the same model twice yields structurally identical output.

use std::collections::{HashMap, HashSet};

use crate::error::ModelError;
use crate::model::{Command, Domain, Event, Primitive, Property, Protocol, TypeDef, TypeKind, TypeRef, Version};

/// Key into the resolved-type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(usize);

impl TypeId {
    /// Position of the type in the shared table.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A type reference after binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedRef {
    /// A built-in primitive.
    Primitive(Primitive),
    /// A handle to a named type in the shared table.
    Named(TypeId),
    /// An array of a resolved element type.
    Array(Box<ResolvedRef>),
    /// An inline string enum, to be synthesized into a named enum by the
    /// emitter.
    InlineEnum(Vec<String>),
}

/// A property with its type reference bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProperty {
    pub name: String,
    pub description: Option<String>,
    pub optional: bool,
    pub experimental: bool,
    pub deprecated: bool,
    pub ty: ResolvedRef,
}

/// The bound shape of a named type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedKind {
    Alias(Primitive),
    Enum(Vec<String>),
    Array(ResolvedRef),
    Object(Vec<ResolvedProperty>),
}

/// A named type in the shared table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTypeDef {
    /// Domain that declares the type.
    pub domain: String,
    pub name: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub deprecated: bool,
    pub kind: ResolvedKind,
}

/// A command with all parameter and return references bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub name: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub deprecated: bool,
    /// Final redirect target domain, after following any redirect chain.
    /// `None` for commands implemented in their declaring domain.
    pub redirect: Option<String>,
    pub parameters: Vec<ResolvedProperty>,
    pub returns: Vec<ResolvedProperty>,
}

/// An event with all payload references bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEvent {
    pub name: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub deprecated: bool,
    pub parameters: Vec<ResolvedProperty>,
}

/// A domain with every reference bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDomain {
    pub name: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub deprecated: bool,
    /// Handles to this domain's named types, declaration order.
    pub types: Vec<TypeId>,
    pub commands: Vec<ResolvedCommand>,
    pub events: Vec<ResolvedEvent>,
}

impl ResolvedDomain {
    /// Look up a resolved command by name.
    pub fn command(&self, name: &str) -> Option<&ResolvedCommand> {
        self.commands.iter().find(|c| c.name == name)
    }
}

/// The fully resolved model: read-only shared state for the planner and
/// emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedModel {
    version: Option<Version>,
    domains: Vec<ResolvedDomain>,
    table: Vec<ResolvedTypeDef>,
    index: HashMap<String, TypeId>,
}

impl ResolvedModel {
    /// Protocol version, when the document carried one.
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    /// Resolved domains, schema declaration order.
    pub fn domains(&self) -> &[ResolvedDomain] {
        &self.domains
    }

    /// Look up a resolved domain by name.
    pub fn domain(&self, name: &str) -> Option<&ResolvedDomain> {
        self.domains.iter().find(|d| d.name == name)
    }

    /// Dereference a type handle.
    pub fn type_def(&self, id: TypeId) -> &ResolvedTypeDef {
        &self.table[id.0]
    }

    /// Look up a type handle by owning domain and name.
    pub fn lookup(&self, domain: &str, name: &str) -> Option<TypeId> {
        self.index.get(&qualified(domain, name)).copied()
    }

    /// Look up a resolved command, e.g. a redirect target.
    pub fn find_command(&self, domain: &str, command: &str) -> Option<&ResolvedCommand> {
        self.domain(domain).and_then(|d| d.command(command))
    }
}

fn qualified(domain: &str, name: &str) -> String {
    format!("{domain}.{name}")
}

/// Resolve every type reference in the definition model.
///
/// # Errors
///
/// Returns [`ModelError::UnresolvedTypeReference`] when a reference matches
/// neither a declared type nor (for unqualified references) a primitive
/// tag, and [`ModelError::InvalidRedirect`] when a redirect is not a pure,
/// resolvable alias. Both are fatal: no partial model is produced.
pub fn resolve(protocol: &Protocol) -> Result<ResolvedModel, ModelError> {
    Resolver::new(protocol).run()
}

struct Resolver<'a> {
    protocol: &'a Protocol,
    /// Declaring domain and definition for each allocated handle.
    defs: Vec<(&'a str, &'a TypeDef)>,
    index: HashMap<String, TypeId>,
    kinds: Vec<Option<ResolvedKind>>,
    in_progress: Vec<bool>,
}

impl<'a> Resolver<'a> {
    fn new(protocol: &'a Protocol) -> Self {
        // Single pass: allocate a table slot per named type, in
        // declaration order, before any reference is chased.
        let mut defs = Vec::new();
        let mut index = HashMap::new();
        for domain in &protocol.domains {
            for ty in &domain.types {
                let id = TypeId(defs.len());
                defs.push((domain.name.as_str(), ty));
                index.insert(qualified(&domain.name, &ty.name), id);
            }
        }
        let len = defs.len();
        Self {
            protocol,
            defs,
            index,
            kinds: vec![None; len],
            in_progress: vec![false; len],
        }
    }

    fn run(mut self) -> Result<ResolvedModel, ModelError> {
        for i in 0..self.defs.len() {
            self.resolve_type(TypeId(i))?;
        }

        let mut domains = Vec::with_capacity(self.protocol.domains.len());
        for domain in &self.protocol.domains {
            let types = domain
                .types
                .iter()
                .map(|t| self.index[&qualified(&domain.name, &t.name)])
                .collect();
            let commands = domain
                .commands
                .iter()
                .map(|c| self.resolve_command(domain, c))
                .collect::<Result<Vec<_>, _>>()?;
            let events = domain
                .events
                .iter()
                .map(|e| self.resolve_event(domain, e))
                .collect::<Result<Vec<_>, _>>()?;
            domains.push(ResolvedDomain {
                name: domain.name.clone(),
                description: domain.description.clone(),
                experimental: domain.experimental,
                deprecated: domain.deprecated,
                types,
                commands,
                events,
            });
        }

        let kinds = std::mem::take(&mut self.kinds);
        let table = self
            .defs
            .iter()
            .zip(kinds)
            .map(|(&(domain, def), kind)| ResolvedTypeDef {
                domain: domain.to_string(),
                name: def.name.clone(),
                description: def.description.clone(),
                experimental: def.experimental,
                deprecated: def.deprecated,
                kind: kind.expect("all table slots resolved"),
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            domains = domains.len(),
            types = table.len(),
            "resolved definition model"
        );

        Ok(ResolvedModel {
            version: self.protocol.version.clone(),
            domains,
            table,
            index: self.index,
        })
    }

    /// Resolve one named type's shape, depth-first.
    ///
    /// A type that is already being resolved higher up the call stack is
    /// left alone: the caller holds its handle, and its shape will be
    /// filled in when the outer call completes. This is the cycle
    /// mechanism.
    fn resolve_type(&mut self, id: TypeId) -> Result<(), ModelError> {
        if self.kinds[id.0].is_some() || self.in_progress[id.0] {
            return Ok(());
        }
        self.in_progress[id.0] = true;

        let (declaring, def) = self.defs[id.0];
        let path = qualified(declaring, &def.name);
        let kind = match &def.kind {
            TypeKind::Alias(p) => ResolvedKind::Alias(*p),
            TypeKind::Enum(literals) => ResolvedKind::Enum(literals.clone()),
            TypeKind::Array(element) => {
                ResolvedKind::Array(self.resolve_ref(declaring, element, &path)?)
            }
            TypeKind::Object(properties) => {
                ResolvedKind::Object(self.resolve_properties(declaring, properties, &path)?)
            }
        };

        self.kinds[id.0] = Some(kind);
        self.in_progress[id.0] = false;
        Ok(())
    }

    fn resolve_ref(
        &mut self,
        declaring: &str,
        reference: &TypeRef,
        path: &str,
    ) -> Result<ResolvedRef, ModelError> {
        match reference {
            TypeRef::Primitive(p) => Ok(ResolvedRef::Primitive(*p)),
            TypeRef::InlineEnum(literals) => Ok(ResolvedRef::InlineEnum(literals.clone())),
            TypeRef::Array(element) => Ok(ResolvedRef::Array(Box::new(
                self.resolve_ref(declaring, element, path)?,
            ))),
            TypeRef::Named { domain, name } => {
                let id = match domain {
                    Some(d) => self.index.get(&qualified(d, name)).copied(),
                    None => {
                        match self.index.get(&qualified(declaring, name)).copied() {
                            Some(id) => Some(id),
                            // An unqualified name that is not declared
                            // locally may still be a primitive tag.
                            None => {
                                if let Some(p) = Primitive::from_tag(name) {
                                    return Ok(ResolvedRef::Primitive(p));
                                }
                                None
                            }
                        }
                    }
                };
                let id = id.ok_or_else(|| ModelError::UnresolvedTypeReference {
                    reference: reference.display_name(),
                    path: path.to_string(),
                })?;
                self.resolve_type(id)?;
                Ok(ResolvedRef::Named(id))
            }
        }
    }

    fn resolve_properties(
        &mut self,
        declaring: &str,
        properties: &[Property],
        owner: &str,
    ) -> Result<Vec<ResolvedProperty>, ModelError> {
        properties
            .iter()
            .map(|p| {
                let path = format!("{owner}.{}", p.name);
                Ok(ResolvedProperty {
                    name: p.name.clone(),
                    description: p.description.clone(),
                    optional: p.optional,
                    experimental: p.experimental,
                    deprecated: p.deprecated,
                    ty: self.resolve_ref(declaring, &p.ty, &path)?,
                })
            })
            .collect()
    }

    fn resolve_command(
        &mut self,
        domain: &Domain,
        command: &Command,
    ) -> Result<ResolvedCommand, ModelError> {
        let path = qualified(&domain.name, &command.name);
        let redirect = self.validate_redirect(domain, command)?;
        Ok(ResolvedCommand {
            name: command.name.clone(),
            description: command.description.clone(),
            experimental: command.experimental,
            deprecated: command.deprecated,
            redirect,
            parameters: self.resolve_properties(&domain.name, &command.parameters, &path)?,
            returns: self.resolve_properties(&domain.name, &command.returns, &path)?,
        })
    }

    fn resolve_event(&mut self, domain: &Domain, event: &Event) -> Result<ResolvedEvent, ModelError> {
        let path = qualified(&domain.name, &event.name);
        Ok(ResolvedEvent {
            name: event.name.clone(),
            description: event.description.clone(),
            experimental: event.experimental,
            deprecated: event.deprecated,
            parameters: self.resolve_properties(&domain.name, &event.parameters, &path)?,
        })
    }

    /// Validate a redirect and return its final target domain.
    ///
    /// A redirect is a pure alias: it must not declare parameters or
    /// returns, its (chained) target must exist and carry a same-named
    /// command, and the chain must not cycle.
    fn validate_redirect(
        &self,
        domain: &Domain,
        command: &Command,
    ) -> Result<Option<String>, ModelError> {
        let Some(first) = &command.redirect else {
            return Ok(None);
        };
        let invalid = |message: String| ModelError::InvalidRedirect {
            domain: domain.name.clone(),
            command: command.name.clone(),
            message,
        };

        if !command.parameters.is_empty() || !command.returns.is_empty() {
            return Err(invalid(
                "a redirect must not declare parameters or returns".to_string(),
            ));
        }

        let mut visited = HashSet::from([domain.name.clone()]);
        let mut target_name = first.clone();
        loop {
            if !visited.insert(target_name.clone()) {
                return Err(invalid(format!(
                    "redirect chain cycles through `{target_name}`"
                )));
            }
            let target = self
                .protocol
                .domain(&target_name)
                .ok_or_else(|| invalid(format!("target domain `{target_name}` not found")))?;
            let target_command = target.command(&command.name).ok_or_else(|| {
                invalid(format!(
                    "target command `{target_name}.{}` not found",
                    command.name
                ))
            })?;
            match &target_command.redirect {
                Some(next) => target_name = next.clone(),
                None => return Ok(Some(target_name)),
            }
        }
    }
}
