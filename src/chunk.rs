//! Block chunking
//!
//! Splits a line sequence into contiguous sub-ranges, one per detected block
//! occurrence, driven by the `#id`/`#start`/`#end` markers of a block node.

use serde_json::{Map, Value};

use crate::error::{ParseError, ParseWarning, Result};
use crate::pattern::CompiledPattern;
use crate::schema::block_markers;

/// A contiguous range of lines: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    /// Borrow the lines this chunk covers.
    pub fn slice<'s, 'l>(&self, lines: &'s [&'l str]) -> &'s [&'l str] {
        &lines[self.start..self.end]
    }
}

/// Partition `lines` into the chunks declared by the block node `fields`.
///
/// The identifier pattern is the `#start` marker if declared, else `#id`;
/// a block node declaring neither fails with [`ParseError::MissingMarker`]
/// naming `key`, the field the block hangs under.
///
/// With an `#end` marker, the first end match strictly after the first
/// identifier match terminates the block: exactly one chunk is produced,
/// spanning from the first identifier line through the end line inclusive,
/// regardless of how many identifier matches follow. An `#end` that never
/// matches after the block start is a data anomaly, not an error: a warning
/// is recorded and chunking falls back to the start-to-start derivation.
///
/// Without an `#end` (or after the fallback), each identifier match opens a
/// chunk running up to the next identifier match, the last one to the end of
/// the line sequence.
///
/// No identifier match anywhere yields `Ok(None)` — optional sections are
/// not an error.
pub fn chunk_lines(
    lines: &[&str],
    fields: &Map<String, Value>,
    key: &str,
    warnings: &mut Vec<ParseWarning>,
) -> Result<Option<Vec<Chunk>>> {
    let markers = block_markers(fields);
    let (marker_key, identifier_spec) =
        markers.identifier().ok_or_else(|| ParseError::MissingMarker {
            key: key.to_string(),
        })?;
    let identifier = CompiledPattern::compile(marker_key, identifier_spec)?;

    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| identifier.is_match(line))
        .map(|(index, _)| index)
        .collect();
    if starts.is_empty() {
        return Ok(None);
    }

    if let Some(end_spec) = markers.end {
        let end = CompiledPattern::compile("end", end_spec)?;
        let first_start = starts[0];
        let terminator = lines
            .iter()
            .enumerate()
            .skip(first_start + 1)
            .find(|(_, line)| end.is_match(line))
            .map(|(index, _)| index);
        match terminator {
            Some(end_index) => {
                // Explicitly delimited block: the first occurrence is the
                // only one taken, end line included.
                return Ok(Some(vec![Chunk {
                    start: first_start,
                    end: end_index + 1,
                }]));
            }
            None => {
                tracing::warn!(
                    key,
                    pattern = end.as_str(),
                    "end marker matched no line after the block start; \
                     falling back to start-to-start chunking"
                );
                warnings.push(ParseWarning::new(
                    key,
                    format!(
                        "end marker '{}' matched no line after the block start",
                        end.as_str()
                    ),
                ));
            }
        }
    }

    let mut chunks = Vec::with_capacity(starts.len());
    for (position, &start) in starts.iter().enumerate() {
        let end = starts
            .get(position + 1)
            .copied()
            .unwrap_or(lines.len());
        chunks.push(Chunk { start, end });
    }
    Ok(Some(chunks))
}
