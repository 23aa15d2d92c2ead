use std::path::PathBuf;
use thiserror::Error;

/// Every failure the header engine can surface to a caller.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// A supplied value is outside its enumerated valid set
    #[error("Invalid {option}: '{value}'")]
    InvalidOption { option: &'static str, value: String },

    #[error("No file specified.")]
    NoFileSpecified,

    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("No version found (expected a '{label}: <version>' line)")]
    NoVersionFound { label: String },

    #[error("Malformed version: '{0}'")]
    MalformedVersion(String),

    #[error("Invalid update argument: '{0}' (expected major, minor, patch or X.Y[.Z])")]
    InvalidUpdateArgument(String),

    #[error("Missing translation for {field} in '{language}'")]
    MissingTranslation {
        field: &'static str,
        language: &'static str,
    },

    /// More than one line carries the same field label, e.g. two stacked headers
    #[error("Ambiguous header: label '{label}' appears on {count} lines")]
    AmbiguousHeader { label: String, count: usize },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HeaderError {
    pub fn invalid(option: &'static str, value: impl Into<String>) -> Self {
        HeaderError::InvalidOption {
            option,
            value: value.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HeaderError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HeaderError>;
