use std::path::Path;

use crate::config::GenConfig;
use crate::error::ConfigError;
use crate::validate::validate;

/// Load and validate configuration from a TOML file.
///
/// Missing fields keep their defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file does not exist, cannot be read,
/// fails to parse, or fails validation.
pub fn load_config(path: &Path) -> Result<GenConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let config = load_from_str(&content)?;
    tracing::debug!(path = %path.display(), "loaded generator config");
    Ok(config)
}

/// Parse a TOML string directly into a validated [`GenConfig`].
///
/// Useful for tests or one-off parsing without file I/O.
///
/// # Errors
///
/// Returns [`ConfigError`] on parse or validation failure.
pub fn load_from_str(toml_str: &str) -> Result<GenConfig, ConfigError> {
    let config: GenConfig =
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;

    validate(&config).map_err(|errors| {
        errors
            .into_iter()
            .next()
            .unwrap_or_else(|| ConfigError::Validation {
                field: "unknown".to_string(),
                message: "validation failed".to_string(),
            })
    })?;

    Ok(config)
}
