//! Emitted source units.

/// One generated source artifact: a relative path and its full text.
///
/// The emitter never touches the file system; writing units out is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Relative path of the unit, e.g. `commands/debugger.rs`.
    pub path: String,
    /// Complete file contents.
    pub contents: String,
}

impl SourceUnit {
    /// Create a unit from a path and contents.
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}
