//! Error and diagnostic types for the extraction engine

use thiserror::Error;

/// Result type for parse operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors raised while interpreting a schema against input text.
///
/// All variants signal a malformed schema, never missing data: a pattern or
/// block that matches nothing degrades to `null` instead of erroring.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("The value at key '{key}' must be a regular expression string")]
    InvalidPattern { key: String },

    #[error("Invalid regular expression at key '{key}': {source}")]
    Regex {
        key: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown extraction module '{name}' at key '{key}'")]
    UnknownModule { key: String, name: String },

    #[error("A '#id' or '#start' marker is required in the block at key '{key}'")]
    MissingMarker { key: String },

    #[error("The schema root must be a mapping of field names to specs")]
    InvalidSchema,
}

/// A recoverable diagnostic collected during one parse call.
///
/// Warnings never abort parsing; they record data anomalies such as an
/// `#end` marker that matches nowhere after its block start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// Schema key the warning is attached to
    pub key: String,
    /// Human-readable description
    pub message: String,
}

impl ParseWarning {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}
