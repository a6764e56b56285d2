//! defgen-emit — overload planning and source emission for defgen.
//!
//! Consumes the resolved definition model and produces Rust source units:
//! one trait per domain (commands and event subscriptions) and one types
//! module per domain (named types, composite results, event payloads,
//! synthesized enums). Output is deterministic: identical resolved input
//! produces byte-identical units.

pub mod commands;
pub mod emit;
pub mod naming;
pub mod plan;
pub mod rust_type;
pub mod types;
pub mod unit;

// Re-export key types for convenience.
pub use emit::{emit_protocol, EmitOptions};
pub use plan::{
    plan_protocol, CommandPlan, DomainPlan, EventPlan, ProtocolPlan, ResultShape, Signature,
    SynthEnum,
};
pub use unit::SourceUnit;
