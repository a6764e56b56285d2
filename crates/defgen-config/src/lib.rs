//! defgen-config — generator configuration for defgen.
//!
//! Loads the optional `defgen.toml` file that controls where output is
//! written, the support path rendered into generated code, and log
//! verbosity. Missing fields fall back to defaults; the merged result is
//! validated before use.

pub mod config;
pub mod error;
pub mod load;
pub mod validate;

// Re-export key types for convenience.
pub use config::{EmitConfig, GenConfig, LogConfig, LogLevel, OutputConfig};
pub use error::ConfigError;
pub use load::{load_config, load_from_str};
pub use validate::validate;
