//! Schema field-name normalization and value classification
//!
//! A schema is a plain JSON mapping. Field names carry two pieces of inline
//! punctuation, both recognized after trimming and lower-casing:
//!
//! - a leading `#` marks the field as a block marker (`#id`, `#start`,
//!   `#end`) rather than an output field;
//! - an infix `@` selects the extraction module for the field
//!   (`count@regex`); an empty selector means the default module.
//!
//! Schema *values* are classified exactly once per level into a tagged
//! [`FieldKind`] so the walker never re-inspects JSON shapes mid-recursion.

use serde_json::{Map, Value};

/// Leading sigil turning a field into a block-marker declaration
pub const MARKER_SIGIL: char = '#';

/// Infix delimiter selecting the extraction module for a field
pub const MODULE_SEPARATOR: char = '@';

/// Name of the built-in regex extraction module
pub const DEFAULT_MODULE: &str = "regex";

/// Role of a `#`-prefixed marker field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRole {
    /// Identifies block occurrences and doubles as an output `id` field
    Id,
    /// Marks the first line of a block; chunk configuration only
    Start,
    /// Marks the terminating line of a block; chunk configuration only
    End,
    /// Any other sigil-prefixed name; extracted under the stripped name
    Other,
}

/// A schema field name, normalized and split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldName {
    /// Output key: trimmed, lower-cased, sigil and module selector removed
    pub key: String,
    /// Extraction module selected with `@`, if any
    pub module: Option<String>,
    /// Marker role when the name began with the sigil
    pub marker: Option<MarkerRole>,
}

impl FieldName {
    /// Normalize a raw schema key. Returns `None` for names that carry no
    /// usable key (empty or a bare sigil), which the walker skips.
    pub fn parse(raw: &str) -> Option<Self> {
        let name = raw.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }

        let (name, module) = match name.find(MODULE_SEPARATOR) {
            Some(index) => {
                let module = &name[index + MODULE_SEPARATOR.len_utf8()..];
                let module = (!module.is_empty()).then(|| module.to_string());
                (name[..index].to_string(), module)
            }
            None => (name, None),
        };

        let (key, marker) = match name.strip_prefix(MARKER_SIGIL) {
            Some(stripped) => {
                let role = match stripped {
                    "id" => MarkerRole::Id,
                    "start" => MarkerRole::Start,
                    "end" => MarkerRole::End,
                    _ => MarkerRole::Other,
                };
                (stripped.to_string(), Some(role))
            }
            None => (name, None),
        };
        if key.is_empty() {
            return None;
        }

        Some(Self { key, module, marker })
    }

    /// A field may introduce a nested structural node only when it carries
    /// neither a module selector nor a marker sigil.
    pub fn can_nest(&self) -> bool {
        self.module.is_none() && self.marker.is_none()
    }
}

/// Shape of a schema value, decided once per structural level.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind<'a> {
    /// Nested structural node; `as_list` when it arrived wrapped in a
    /// one-element sequence (marking "return one result per chunk")
    Struct {
        fields: &'a Map<String, Value>,
        as_list: bool,
    },
    /// Leaf spec, handed to an extraction module unchanged
    Leaf(&'a Value),
}

/// Classify a schema value for the given (already normalized) field name.
pub fn classify_value<'a>(name: &FieldName, value: &'a Value) -> FieldKind<'a> {
    if name.can_nest() {
        match value {
            Value::Object(fields) => {
                return FieldKind::Struct {
                    fields,
                    as_list: false,
                }
            }
            Value::Array(items) => {
                if let Some(Value::Object(fields)) = items.first() {
                    return FieldKind::Struct {
                        fields,
                        as_list: true,
                    };
                }
            }
            _ => {}
        }
    }
    FieldKind::Leaf(value)
}

/// Block-marker declarations collected from one structural node.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockMarkers<'a> {
    pub id: Option<&'a Value>,
    pub start: Option<&'a Value>,
    pub end: Option<&'a Value>,
}

impl<'a> BlockMarkers<'a> {
    /// A node declaring any marker is a block node and must be chunked
    /// before recursion.
    pub fn is_block(&self) -> bool {
        self.id.is_some() || self.start.is_some() || self.end.is_some()
    }

    /// The pattern identifying block occurrences: `start` wins over `id`.
    /// `None` means the node declared only `#end` and cannot be chunked.
    pub fn identifier(&self) -> Option<(&'static str, &'a Value)> {
        self.start
            .map(|spec| ("start", spec))
            .or_else(|| self.id.map(|spec| ("id", spec)))
    }
}

/// Collect the marker declarations of a structural node.
pub fn block_markers(fields: &Map<String, Value>) -> BlockMarkers<'_> {
    let mut markers = BlockMarkers::default();
    for (raw, value) in fields {
        let Some(name) = FieldName::parse(raw) else {
            continue;
        };
        match name.marker {
            Some(MarkerRole::Id) => markers.id = markers.id.or(Some(value)),
            Some(MarkerRole::Start) => markers.start = markers.start.or(Some(value)),
            Some(MarkerRole::End) => markers.end = markers.end.or(Some(value)),
            _ => {}
        }
    }
    markers
}

/// Whether the node declares a plain (non-marker) output field named `key`.
pub fn declares_output_field(fields: &Map<String, Value>, key: &str) -> bool {
    fields.keys().any(|raw| {
        FieldName::parse(raw)
            .map(|name| name.marker.is_none() && name.key == key)
            .unwrap_or(false)
    })
}
