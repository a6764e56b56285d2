use crate::config::GenConfig;
use crate::error::ConfigError;

/// Validate a [`GenConfig`], returning all detected violations.
///
/// Returns `Ok(())` when the config is valid, or `Err` with a vector of
/// every validation error found.
pub fn validate(config: &GenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.output.dir.is_empty() {
        errors.push(ConfigError::Validation {
            field: "output.dir".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    if !is_module_path(&config.emit.support_path) {
        errors.push(ConfigError::Validation {
            field: "emit.support_path".to_string(),
            message: format!(
                "must be a `::`-separated module path, got `{}`",
                config.emit.support_path,
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `::`-separated path of identifiers, e.g. `crate::support`.
fn is_module_path(path: &str) -> bool {
    !path.is_empty()
        && path.split("::").all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_default_config_passes() {
        assert!(validate(&GenConfig::default()).is_ok());
    }

    #[test]
    fn empty_output_dir_rejected() {
        let mut config = GenConfig::default();
        config.output.dir = String::new();
        let errs = validate(&config).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(format!("{}", errs[0]).contains("output.dir"));
    }

    #[test]
    fn bad_support_path_rejected() {
        for bad in ["", "crate::", "::support", "crate support", "crate::1st"] {
            let mut config = GenConfig::default();
            config.emit.support_path = bad.to_string();
            let errs = validate(&config).unwrap_err();
            assert_eq!(errs.len(), 1, "path `{bad}` must be rejected");
            assert!(format!("{}", errs[0]).contains("emit.support_path"));
        }
    }

    #[test]
    fn single_segment_support_path_allowed() {
        let mut config = GenConfig::default();
        config.emit.support_path = "support".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn multiple_errors_returned() {
        let mut config = GenConfig::default();
        config.output.dir = String::new();
        config.emit.support_path = "::".to_string();
        let errs = validate(&config).unwrap_err();
        assert_eq!(errs.len(), 2);
    }
}
