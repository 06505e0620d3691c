//! Schema interpreter
//!
//! Walks a schema tree against a line sequence, chunking wherever a nested
//! node declares block markers and dispatching every leaf spec to its
//! extraction module. Results compose bottom-up into a JSON object.

use serde_json::{Map, Value};

use crate::chunk::chunk_lines;
use crate::error::{ParseError, ParseWarning, Result};
use crate::extract::ExtractionModule;
use crate::registry::ModuleRegistry;
use crate::schema::{classify_value, block_markers, declares_output_field, FieldKind, FieldName, MarkerRole};

/// Result of one parse call: the extracted value plus any recoverable
/// diagnostics collected along the way.
#[derive(Debug)]
pub struct ParseOutput {
    /// The extracted structure, or `None` when the input was neither text
    /// nor a sequence of lines
    pub value: Option<Value>,
    /// Recoverable diagnostics, scoped to this call
    pub warnings: Vec<ParseWarning>,
}

impl ParseOutput {
    fn none() -> Self {
        Self {
            value: None,
            warnings: Vec::new(),
        }
    }
}

/// Interprets schemas against text.
///
/// Holds the extraction-module registry; the walk itself keeps no state
/// across calls, so one parser may serve concurrent callers.
pub struct StructParser {
    modules: ModuleRegistry,
}

impl StructParser {
    pub fn new() -> Self {
        Self {
            modules: ModuleRegistry::new(),
        }
    }

    /// Build a parser around a pre-populated registry.
    pub fn with_registry(modules: ModuleRegistry) -> Self {
        Self { modules }
    }

    /// Register an alternate extraction module, selectable from schema
    /// fields as `name@module`.
    pub fn register_module(&mut self, name: impl Into<String>, module: Box<dyn ExtractionModule>) {
        self.modules.register(name, module);
    }

    /// Entry point over a JSON input value: a string is split into lines,
    /// an array of strings is taken as the line sequence, anything else
    /// yields `value: None`.
    pub fn parse(&self, input: &Value, schema: &Value) -> Result<ParseOutput> {
        match input {
            Value::String(text) => self.parse_text(text, schema),
            Value::Array(items) => {
                let lines: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
                match lines {
                    Some(lines) => self.parse_lines(&lines, schema),
                    None => Ok(ParseOutput::none()),
                }
            }
            _ => Ok(ParseOutput::none()),
        }
    }

    /// Parse a raw text blob. Lines are split once here, on `\r\n`, `\n`
    /// or `\r`; a trailing terminator yields no empty final line.
    pub fn parse_text(&self, text: &str, schema: &Value) -> Result<ParseOutput> {
        let lines = split_lines(text);
        self.parse_lines(&lines, schema)
    }

    /// Parse an already-split line sequence.
    pub fn parse_lines(&self, lines: &[&str], schema: &Value) -> Result<ParseOutput> {
        let fields = schema.as_object().ok_or(ParseError::InvalidSchema)?;
        let mut warnings = Vec::new();
        let parsed = self.parse_struct(lines, fields, &mut warnings)?;
        Ok(ParseOutput {
            value: Some(Value::Object(parsed)),
            warnings,
        })
    }

    fn parse_struct(
        &self,
        lines: &[&str],
        fields: &Map<String, Value>,
        warnings: &mut Vec<ParseWarning>,
    ) -> Result<Map<String, Value>> {
        let mut parsed = Map::new();

        for (raw, value) in fields {
            let Some(name) = FieldName::parse(raw) else {
                continue;
            };

            match name.marker {
                // Start/end markers only configure the parent's chunking.
                Some(MarkerRole::Start) | Some(MarkerRole::End) => continue,
                // An id marker doubles as an output `id` field unless the
                // schema declares its own. The schema itself stays untouched.
                Some(MarkerRole::Id) => {
                    if declares_output_field(fields, "id") {
                        continue;
                    }
                    let module = self.modules.get(name.module.as_deref(), &name.key)?;
                    let extracted = module.extract(lines, &name.key, value)?;
                    parsed.insert(name.key, extracted);
                }
                _ => match classify_value(&name, value) {
                    FieldKind::Struct {
                        fields: nested,
                        as_list,
                    } => {
                        let result =
                            self.parse_nested(lines, nested, as_list, &name.key, warnings)?;
                        parsed.insert(name.key, result);
                    }
                    FieldKind::Leaf(spec) => {
                        let module = self.modules.get(name.module.as_deref(), &name.key)?;
                        let extracted = module.extract(lines, &name.key, spec)?;
                        parsed.insert(name.key, extracted);
                    }
                },
            }
        }

        Ok(parsed)
    }

    /// Dispatch for a nested structural node: chunk first when the node
    /// declares block markers, otherwise recurse over the same line range.
    fn parse_nested(
        &self,
        lines: &[&str],
        fields: &Map<String, Value>,
        as_list: bool,
        key: &str,
        warnings: &mut Vec<ParseWarning>,
    ) -> Result<Value> {
        if !block_markers(fields).is_block() {
            return Ok(Value::Object(self.parse_struct(lines, fields, warnings)?));
        }

        let Some(chunks) = chunk_lines(lines, fields, key, warnings)? else {
            tracing::debug!(key, "block matched no lines");
            return Ok(Value::Null);
        };

        if as_list {
            let mut items = Vec::with_capacity(chunks.len());
            for chunk in &chunks {
                let parsed = self.parse_struct(chunk.slice(lines), fields, warnings)?;
                items.push(Value::Object(parsed));
            }
            Ok(Value::Array(items))
        } else {
            let parsed = self.parse_struct(chunks[0].slice(lines), fields, warnings)?;
            Ok(Value::Object(parsed))
        }
    }
}

impl Default for StructParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse with a default-configured [`StructParser`].
pub fn parse(input: &Value, schema: &Value) -> Result<ParseOutput> {
    StructParser::new().parse(input, schema)
}

/// Parse a text blob with a default-configured [`StructParser`].
pub fn parse_text(text: &str, schema: &Value) -> Result<ParseOutput> {
    StructParser::new().parse_text(text, schema)
}

/// Split a blob into lines on any of `\r\n`, `\n`, `\r`. A trailing
/// terminator produces no empty final line; empty interior lines survive.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(index) = rest.find(['\n', '\r']) {
        lines.push(&rest[..index]);
        let after = &rest[index..];
        rest = if after.starts_with("\r\n") {
            &after[2..]
        } else {
            &after[1..]
        };
    }
    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}
