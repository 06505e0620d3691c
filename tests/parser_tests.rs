//! End-to-end schema interpretation tests
//!
//! Exercises the public parse surface against realistic command-output
//! dumps: nested blocks, delimited sections, list and scalar leaves, and
//! the error cases a malformed schema must surface.

use serde_json::{json, Value};
use structext::{parse_text, ParseError, StructParser};

// =============================================================================
// Leaf extraction
// =============================================================================

#[test]
fn test_single_field_over_single_line() {
    let output = parse_text("Hello World", &json!({"message": "(.*)"})).unwrap();
    assert_eq!(output.value.unwrap(), json!({"message": "Hello World"}));
    assert!(output.warnings.is_empty());
}

#[test]
fn test_list_spec_collects_every_line() {
    let text = (1..=5)
        .map(|n| format!("The count says: {}", n))
        .collect::<Vec<_>>()
        .join("\n");
    let output = parse_text(&text, &json!({"count": [r"(\d)"]})).unwrap();
    assert_eq!(
        output.value.unwrap(),
        json!({"count": ["1", "2", "3", "4", "5"]})
    );
}

#[test]
fn test_scalar_spec_takes_first_line_only() {
    let text = "The count says: 1\nThe count says: 2";
    let output = parse_text(text, &json!({"count": r"(\d)"})).unwrap();
    assert_eq!(output.value.unwrap(), json!({"count": "1"}));
}

#[test]
fn test_missing_field_degrades_to_null() {
    let output = parse_text("Hello World", &json!({"number": r"(\d+)"})).unwrap();
    assert_eq!(output.value.unwrap(), json!({"number": null}));
}

#[test]
fn test_explicit_group_selection() {
    let text = "1 2 3 4\n5 6 7 8";
    let schema = json!({"count@regex": [{"pattern": r"(\d)\s+(\d)\s+(\d)\s+(\d)", "group": 2}]});
    let output = parse_text(text, &schema).unwrap();
    assert_eq!(output.value.unwrap(), json!({"count": ["2", "6"]}));
}

#[test]
fn test_explicit_group_selection_scalar() {
    let text = "1 2 3 4\n5 6 7 8";
    let schema = json!({"count@regex": {"pattern": r"(\d)\s+(\d)\s+(\d)\s+(\d)", "group": 3}});
    let output = parse_text(text, &schema).unwrap();
    assert_eq!(output.value.unwrap(), json!({"count": "3"}));
}

#[test]
fn test_record_without_module_selector_is_a_nested_node() {
    // A mapping under a plain field name is structural dispatch; the
    // pattern-record form is only reachable through a module selector.
    let schema = json!({"count": [{"pattern": r"(\d)", "group": 2}]});
    let err = parse_text("1 2", &schema).unwrap_err();
    match err {
        ParseError::InvalidPattern { key } => assert_eq!(key, "group"),
        other => panic!("Expected InvalidPattern, got {:?}", other),
    }
}

#[test]
fn test_non_string_leaf_spec_fails_naming_key() {
    let err = parse_text("line", &json!({"amount": 7})).unwrap_err();
    match err {
        ParseError::InvalidPattern { key } => assert_eq!(key, "amount"),
        other => panic!("Expected InvalidPattern, got {:?}", other),
    }
}

// =============================================================================
// Block chunking through the interpreter
// =============================================================================

#[test]
fn test_repeated_blocks_return_one_node_per_chunk() {
    let text = "Chunk Start:\ncontent 1\nChunk Start:\ncontent 2";
    let schema = json!({
        "blocks": [{"#start": "(Chunk Start)", "content": r"content (\d)"}]
    });
    let output = parse_text(text, &schema).unwrap();
    assert_eq!(
        output.value.unwrap(),
        json!({"blocks": [{"content": "1"}, {"content": "2"}]})
    );
}

#[test]
fn test_unlisted_block_returns_first_chunk_only() {
    let text = "Chunk Start:\ncontent 1\nChunk Start:\ncontent 2";
    let schema = json!({
        "block": {"#start": "(Chunk Start)", "content": r"content (\d)"}
    });
    let output = parse_text(text, &schema).unwrap();
    assert_eq!(output.value.unwrap(), json!({"block": {"content": "1"}}));
}

#[test]
fn test_absent_block_yields_null() {
    let schema = json!({
        "block": [{"#start": "(Elephant)", "content": r"content (\d)"}]
    });
    let output = parse_text("no such section", &schema).unwrap();
    assert_eq!(output.value.unwrap(), json!({"block": null}));
}

#[test]
fn test_end_marker_takes_single_delimited_section() {
    let text = "Section A\npayload = 1\nSection B\npayload = 2\nEND\nSection C\npayload = 3";
    let schema = json!({
        "sections": [{
            "#start": "(Section)",
            "#end": "(END)",
            "payload": [r"payload = (\d)"]
        }]
    });
    let output = parse_text(text, &schema).unwrap();
    // An explicit end means exactly one section, spanning through the end
    // line, even though more starts follow it.
    assert_eq!(
        output.value.unwrap(),
        json!({"sections": [{"payload": ["1", "2"]}]})
    );
    assert!(output.warnings.is_empty());
}

#[test]
fn test_unmatched_end_marker_warns_and_chunks_by_start() {
    let text = "Section A\npayload = 1\nSection B\npayload = 2";
    let schema = json!({
        "sections": [{
            "#start": "(Section)",
            "#end": "(NEVER)",
            "payload": [r"payload = (\d)"]
        }]
    });
    let output = parse_text(text, &schema).unwrap();
    assert_eq!(
        output.value.unwrap(),
        json!({"sections": [{"payload": ["1"]}, {"payload": ["2"]}]})
    );
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].key, "sections");
}

#[test]
fn test_block_with_only_end_marker_fails() {
    let schema = json!({
        "sections": [{"#end": "(END)", "payload": r"payload = (\d)"}]
    });
    let err = parse_text("payload = 1\nEND", &schema).unwrap_err();
    match err {
        ParseError::MissingMarker { key } => assert_eq!(key, "sections"),
        other => panic!("Expected MissingMarker, got {:?}", other),
    }
}

#[test]
fn test_nested_node_without_markers_shares_parent_lines() {
    let text = "name = disk0\nstate = online";
    let schema = json!({
        "device": {
            "name": r"name = (\w+)",
            "status": {"state": r"state = (\w+)"}
        }
    });
    let output = parse_text(text, &schema).unwrap();
    assert_eq!(
        output.value.unwrap(),
        json!({"device": {"name": "disk0", "status": {"state": "online"}}})
    );
}

// =============================================================================
// Realistic dumps
// =============================================================================

#[test]
fn test_flow_table_dump() {
    let text = include_str!("fixtures/flow_tables.txt");
    let schema = json!({
        "tables": [{
            "#id": r"\[TABLE (\d{1,2})\]",
            "flows": [{
                "#id": r"\[FLOW_ID(\d+)\]",
                "timestamp": r"Timestamp\s+=\s+(.+)"
            }]
        }]
    });
    let output = parse_text(text, &schema).unwrap();
    assert_eq!(
        output.value.unwrap(),
        json!({"tables": [
            {
                "id": "0",
                "flows": [
                    {"id": "1", "timestamp": "Mon Dec 25 10:01:00 2023"},
                    {"id": "2", "timestamp": "Mon Dec 25 10:02:00 2023"}
                ]
            },
            {
                "id": "1",
                "flows": [
                    {"id": "3", "timestamp": "Mon Dec 25 10:03:00 2023"}
                ]
            }
        ]})
    );
}

#[test]
fn test_group_stats_dump() {
    let text = include_str!("fixtures/group_stats.txt");
    let schema = json!({
        "group": {
            "#id": r"Group id:\s+(\d+)",
            "ref_count": r"Reference count:\s+(\d+)",
            "buckets": [{
                "#id": r"Bucket\s+(\d+)",
                "packet_count": r"Packet count:\s+(\d+)"
            }]
        }
    });
    let output = parse_text(text, &schema).unwrap();
    assert_eq!(
        output.value.unwrap(),
        json!({"group": {
            "id": "10",
            "ref_count": "2",
            "buckets": [
                {"id": "1", "packet_count": "100"},
                {"id": "2", "packet_count": "80"}
            ]
        }})
    );
}

// =============================================================================
// Input forms
// =============================================================================

#[test]
fn test_pre_split_line_sequence() {
    let parser = StructParser::new();
    let lines = ["The count says: 1", "The count says: 2"];
    let output = parser
        .parse_lines(&lines, &json!({"count": [r"(\d)"]}))
        .unwrap();
    assert_eq!(output.value.unwrap(), json!({"count": ["1", "2"]}));
}

#[test]
fn test_value_input_dispatch() {
    let parser = StructParser::new();
    let schema = json!({"message": "(.*)"});

    let output = parser.parse(&json!("Hello World"), &schema).unwrap();
    assert_eq!(output.value.unwrap(), json!({"message": "Hello World"}));

    let output = parser.parse(&json!(["Hello World"]), &schema).unwrap();
    assert_eq!(output.value.unwrap(), json!({"message": "Hello World"}));

    let output = parser.parse(&Value::Bool(true), &schema).unwrap();
    assert!(output.value.is_none());
}

#[test]
fn test_crlf_input() {
    let text = "Chunk Start:\r\ncontent 1\r\nChunk Start:\r\ncontent 2\r\n";
    let schema = json!({
        "blocks": [{"#start": "(Chunk Start)", "content": r"content (\d)"}]
    });
    let output = parse_text(text, &schema).unwrap();
    assert_eq!(
        output.value.unwrap(),
        json!({"blocks": [{"content": "1"}, {"content": "2"}]})
    );
}
