//! Error types for hopxml.
//!
//! Library crates use [`HopXmlError`] via `thiserror`. Every failure is
//! surfaced to the caller as-is: nothing is retried, downgraded to a warning,
//! or turned into a partial result.

use std::path::PathBuf;

/// Top-level error type for all hopxml operations.
#[derive(Debug, thiserror::Error)]
pub enum HopXmlError {
    /// Filesystem I/O error (file missing or unreadable).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed JSON in a configuration file.
    #[error("JSON parse error in {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Malformed XML in a workflow/pipeline definition file.
    #[error("XML parse error in {path:?}: {message}")]
    Xml { path: PathBuf, message: String },

    /// Input had valid syntax but not the expected structure
    /// (missing key, missing section, parameter entry with too few children).
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Failure while composing the output document.
    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, HopXmlError>;

impl HopXmlError {
    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a `serde_json::Error` with a path for context.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Create an XML parse error for a definition file.
    pub fn xml(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Xml {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a schema error from any displayable message.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = HopXmlError::schema("no `parameters` section found");
        assert_eq!(err.to_string(), "schema error: no `parameters` section found");

        let err = HopXmlError::xml("/tmp/wf.hwf", "unexpected end of stream");
        assert!(err.to_string().contains("wf.hwf"));
        assert!(err.to_string().contains("unexpected end of stream"));
    }

    #[test]
    fn io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = HopXmlError::io("/tmp/metastore", source);
        assert!(err.to_string().contains("metastore"));
    }
}
