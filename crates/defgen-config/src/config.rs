use serde::{Deserialize, Serialize};

/// Log verbosity level.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Most verbose.
    Trace,
    /// Debug messages.
    Debug,
    /// Informational messages (default).
    #[default]
    Info,
    /// Warnings only.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// `tracing`-compatible filter string for this level.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the generated units are written under.
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

fn default_output_dir() -> String {
    "generated".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

/// Rendering settings for generated code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitConfig {
    /// Module path of the support layer referenced by generated code
    /// (`CallError`, `EventHandler`, `Subscription`).
    #[serde(default = "default_support_path")]
    pub support_path: String,
}

fn default_support_path() -> String {
    "crate::support".to_string()
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            support_path: default_support_path(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log verbosity.
    #[serde(default)]
    pub level: LogLevel,
}

/// The whole generator configuration.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub emit: EmitConfig,
    #[serde(default)]
    pub log: LogConfig,
}
