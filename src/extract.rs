//! Extraction modules
//!
//! An extraction module turns a line sequence plus a leaf spec into a value.
//! The default module matches a regular expression per line and returns the
//! captured text; alternate modules can be registered under the name a
//! schema field selects with `@`.

use serde_json::Value;

use crate::error::{ParseError, Result};
use crate::pattern::CompiledPattern;

/// Spec record key naming the pattern to match
pub const SPEC_PATTERN: &str = "pattern";

/// Spec record key overriding the capture group to return
pub const SPEC_GROUP: &str = "group";

/// Strategy turning a line sequence + leaf spec into a value.
///
/// A spec wrapped in a one-element sequence must be treated as "always
/// return a list"; a bare spec as "first value or null". Specs the module
/// cannot interpret must fail with a type error naming `key`.
pub trait ExtractionModule: Send + Sync {
    fn extract(&self, lines: &[&str], key: &str, spec: &Value) -> Result<Value>;
}

/// The default module: per-line regular-expression capture.
///
/// Accepted spec forms, optionally wrapped in a one-element sequence to
/// force list output:
///
/// - a pattern string: `"value is (\d+)"`
/// - a record with an explicit capture group:
///   `{"pattern": "(\d)\s+(\d)", "group": 2}`
#[derive(Debug, Default)]
pub struct RegexExtract;

impl RegexExtract {
    /// Pick the capture group to return: the requested group when the
    /// pattern defines it, else group 1 when any group exists, else the
    /// whole match. The result always names a valid group.
    fn effective_group(pattern: &CompiledPattern, requested: usize) -> usize {
        if pattern.group_count() >= requested {
            requested
        } else if pattern.group_count() > 0 {
            1
        } else {
            0
        }
    }
}

impl ExtractionModule for RegexExtract {
    fn extract(&self, lines: &[&str], key: &str, spec: &Value) -> Result<Value> {
        let (spec, as_list) = match spec {
            Value::Array(items) => {
                let first = items.first().ok_or_else(|| ParseError::InvalidPattern {
                    key: key.to_string(),
                })?;
                (first, true)
            }
            other => (other, false),
        };

        let (pattern_spec, requested_group) = match spec {
            Value::Object(record) => {
                let pattern = record.get(SPEC_PATTERN).unwrap_or(&Value::Null);
                let group = record
                    .get(SPEC_GROUP)
                    .and_then(Value::as_u64)
                    .map(|group| group as usize)
                    .unwrap_or(1);
                (pattern, group)
            }
            other => (other, 1),
        };

        let pattern = CompiledPattern::compile(key, pattern_spec)?;
        let group = Self::effective_group(&pattern, requested_group);

        let mut values = Vec::new();
        'lines: for line in lines {
            for captures in pattern.captures_iter(line) {
                values.push(
                    captures
                        .get(group)
                        .map(|capture| Value::String(capture.as_str().to_string()))
                        .unwrap_or(Value::Null),
                );
                if !as_list {
                    break 'lines;
                }
            }
        }

        if as_list {
            if values.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(Value::Array(values))
            }
        } else {
            Ok(values.into_iter().next().unwrap_or(Value::Null))
        }
    }
}
