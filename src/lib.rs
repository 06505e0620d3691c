//! structext
//!
//! Schema-driven extraction of structured data from semi-structured text
//! (command output, log dumps, protocol dumps). A schema is a plain nested
//! JSON value: leaves are regular expressions, structural nodes describe
//! repeating or delimited text blocks. Interpreting the schema against the
//! input yields a matching nested JSON result.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//!
//! let text = "\
//! [TABLE 0]
//! Packet count: 71
//! [TABLE 1]
//! Packet count: 4";
//!
//! let schema = json!({
//!     "tables": [{
//!         "#id": r"\[TABLE (\d+)\]",
//!         "packets": r"Packet count:\s+(\d+)"
//!     }]
//! });
//!
//! let output = structext::parse_text(text, &schema).unwrap();
//! assert_eq!(
//!     output.value.unwrap(),
//!     json!({"tables": [
//!         {"id": "0", "packets": "71"},
//!         {"id": "1", "packets": "4"}
//!     ]})
//! );
//! ```
//!
//! ## Schema surface
//!
//! - `"field": "pattern"` — first captured value, or null
//! - `"field": ["pattern"]` — every captured value, as a list
//! - `"field@regex": {"pattern": "...", "group": 2}` — explicit capture
//!   group; the record form needs a module selector, since a bare mapping
//!   is read as a nested node
//! - `"field": {...}` / `"field": [{...}]` — nested node, chunked when it
//!   declares `#id`/`#start` (optional `#end`) markers
//! - `"field@module"` — route the field to a registered extraction module

pub mod chunk;
pub mod config;
pub mod error;
pub mod extract;
pub mod parser;
pub mod pattern;
pub mod registry;
pub mod schema;

pub use chunk::{chunk_lines, Chunk};
pub use config::{ExtractConfig, OutputFormat};
pub use error::{ParseError, ParseWarning, Result};
pub use extract::{ExtractionModule, RegexExtract};
pub use parser::{parse, parse_text, split_lines, ParseOutput, StructParser};
pub use pattern::CompiledPattern;
pub use registry::ModuleRegistry;
