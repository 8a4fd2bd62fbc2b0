use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the yamlsplit library.
///
/// Every variant is fatal for the run: the pipeline aborts on the first
/// error and leaves already-written files in place. Documents that are
/// merely skipped (no `kind`, no `metadata`) are not errors; they are
/// reported through [`crate::DocumentOutcome`].
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// A document is not well-formed YAML.
    #[error("YAML parse error on document starting with '{snippet}': {message}")]
    Parse {
        /// Opening fragment of the offending document
        snippet: String,
        /// Error message from the YAML parser
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Detailed error message
        message: String,
    },

    /// Placement was attempted for a document whose metadata block is absent.
    ///
    /// The pipeline skips such documents before placement, so hitting this
    /// variant means a caller violated the Placer's precondition.
    #[error("Cannot place document of kind '{kind}': metadata block is absent")]
    MissingMetadata {
        /// The document's kind field
        kind: String,
    },

    /// Two documents derived the same target path under the `Fail` policy.
    #[error("Duplicate target path '{path}': another document already placed there")]
    DuplicatePath {
        /// The colliding derived path
        path: PathBuf,
    },
}

impl Error {
    /// Creates an IO error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a parse error, keeping a short snippet of the document
    /// for diagnostics.
    #[must_use]
    pub fn parse(doc: &str, source: serde_yaml_ng::Error) -> Self {
        const SNIPPET_LEN: usize = 40;
        let head = doc.lines().next().unwrap_or_default();
        let snippet = if head.len() > SNIPPET_LEN {
            let cut = head
                .char_indices()
                .map(|(i, _)| i)
                .take_while(|&i| i <= SNIPPET_LEN)
                .last()
                .unwrap_or(0);
            format!("{}...", &head[..cut])
        } else {
            head.to_string()
        };
        Self::Parse {
            snippet,
            message: source.to_string(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a missing-metadata precondition error.
    #[must_use]
    pub fn missing_metadata(kind: impl Into<String>) -> Self {
        Self::MissingMetadata { kind: kind.into() }
    }

    /// Creates a duplicate-path error.
    #[must_use]
    pub fn duplicate_path(path: impl Into<PathBuf>) -> Self {
        Self::DuplicatePath { path: path.into() }
    }

    /// Returns true if this is an IO error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns true if this is a parse error.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::config("test message");
        assert!(err.is_config());
        assert!(err.to_string().contains("test message"));
    }

    #[test]
    fn test_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io("/tmp/test.txt", io_err);
        assert!(err.is_io());
        assert!(err.to_string().contains("/tmp/test.txt"));
    }

    #[test]
    fn test_parse_error_snippet() {
        let yaml_err =
            serde_yaml_ng::from_str::<serde_yaml_ng::Value>("key: [unclosed").unwrap_err();
        let err = Error::parse("key: [unclosed\nrest", yaml_err);
        assert!(err.is_parse());
        assert!(err.to_string().contains("key: [unclosed"));
        assert!(!err.to_string().contains("rest"));
    }

    #[test]
    fn test_parse_error_snippet_truncated() {
        let yaml_err =
            serde_yaml_ng::from_str::<serde_yaml_ng::Value>("key: [unclosed").unwrap_err();
        let long_line = "x".repeat(200);
        let err = Error::parse(&long_line, yaml_err);
        let rendered = err.to_string();
        assert!(rendered.contains("..."));
        assert!(!rendered.contains(&long_line));
    }

    #[test]
    fn test_missing_metadata() {
        let err = Error::missing_metadata("Pod");
        assert!(err.to_string().contains("Pod"));
    }

    #[test]
    fn test_duplicate_path() {
        let err = Error::duplicate_path("/tmp/ns/v1/Pod/x.yml");
        assert!(err.to_string().contains("x.yml"));
    }

    #[test]
    fn test_error_clone() {
        let err = Error::config("test");
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
