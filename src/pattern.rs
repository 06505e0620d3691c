//! Pattern compilation
//!
//! Wraps `regex::Regex` with the validation the schema interpreter needs:
//! a leaf spec must be a pattern *string* (not a number, mapping, or other
//! structural value), and compile failures must name the schema key they
//! came from.

use regex::{CaptureMatches, Regex};
use serde_json::Value;

use crate::error::{ParseError, Result};

/// A compiled, reusable pattern tied to the schema key it was declared under.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
}

impl CompiledPattern {
    /// Compile the pattern declared at `key`.
    ///
    /// Any non-string spec fails with [`ParseError::InvalidPattern`]; a
    /// string that is not a valid regular expression fails with
    /// [`ParseError::Regex`]. Both name the offending key.
    pub fn compile(key: &str, spec: &Value) -> Result<Self> {
        let pattern = spec.as_str().ok_or_else(|| ParseError::InvalidPattern {
            key: key.to_string(),
        })?;
        let regex = Regex::new(pattern).map_err(|source| ParseError::Regex {
            key: key.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// The pattern text as written in the schema
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Number of capture groups, excluding the implicit whole-match group 0
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// Whether the pattern matches anywhere in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// First match in `text`, with its capture groups
    pub fn captures<'t>(&self, text: &'t str) -> Option<regex::Captures<'t>> {
        self.regex.captures(text)
    }

    /// All non-overlapping matches in `text`, left to right
    pub fn captures_iter<'r, 't>(&'r self, text: &'t str) -> CaptureMatches<'r, 't> {
        self.regex.captures_iter(text)
    }
}
