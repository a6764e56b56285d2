//! Definition-model error types.

use thiserror::Error;

/// Errors from lowering or resolving a protocol description.
///
/// All three classes are fatal for a generation run: no output units are
/// produced for a schema that fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The schema is structurally invalid: missing or duplicate names,
    /// contradictory type declarations, or a syntactically invalid
    /// reference.
    #[error("malformed schema at {path}: {message}")]
    Malformed {
        /// Dotted path to the offending entity, e.g.
        /// `Debugger.setBreakpointByUrl.url`.
        path: String,
        /// Human-readable description of the violation.
        message: String,
    },

    /// A type reference matched neither a declared type nor a primitive.
    #[error("unresolved type reference `{reference}` at {path}")]
    UnresolvedTypeReference {
        /// The reference text as written in the schema.
        reference: String,
        /// Dotted path to the property that carries the reference.
        path: String,
    },

    /// A redirected command is not a pure, resolvable alias.
    #[error("invalid redirect on {domain}.{command}: {message}")]
    InvalidRedirect {
        /// Domain that declares the redirected command.
        domain: String,
        /// The redirected command.
        command: String,
        /// Why the redirect is invalid.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_contains_path_and_message() {
        let err = ModelError::Malformed {
            path: "Debugger.setBreakpoint".into(),
            message: "duplicate parameter name `location`".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("malformed schema"));
        assert!(msg.contains("Debugger.setBreakpoint"));
        assert!(msg.contains("duplicate parameter name"));
    }

    #[test]
    fn unresolved_display_contains_reference_and_path() {
        let err = ModelError::UnresolvedTypeReference {
            reference: "Foo.Bar".into(),
            path: "Debugger.evaluate.result".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("unresolved type reference"));
        assert!(msg.contains("`Foo.Bar`"));
        assert!(msg.contains("Debugger.evaluate.result"));
    }

    #[test]
    fn invalid_redirect_display_contains_command_and_reason() {
        let err = ModelError::InvalidRedirect {
            domain: "Page".into(),
            command: "canScreencast".into(),
            message: "target domain `Screencast` not found".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("invalid redirect on Page.canScreencast"));
        assert!(msg.contains("target domain `Screencast` not found"));
    }
}
