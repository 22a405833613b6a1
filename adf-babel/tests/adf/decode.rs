//! Decode tests for ADF JSON (ADF → Document)

use adf_babel::formats::adf::{parse_adf_json, to_json};
use adf_babel::validate::{StructuralValidator, Validator};
use adf_babel::{convert, FormatError, FormatRegistry};

#[test]
fn test_converted_output_reads_back() {
    let md = "# Title\n\nSome **bold** and [a link](https://x.test).\n\n* a\n  * b\n    * c\n* d";
    let doc = convert(md);
    for pretty in [true, false] {
        let json = to_json(&doc, pretty).unwrap();
        assert_eq!(parse_adf_json(&json).unwrap(), doc);
    }
}

#[test]
fn test_registry_converts_markdown_to_adf() {
    let registry = FormatRegistry::default();
    let doc = registry.parse("*   one\n*   two", "markdown").unwrap();
    let json = registry.serialize(&doc, "adf").unwrap();
    assert_eq!(registry.parse(&json, "adf").unwrap(), doc);
}

#[test]
fn test_foreign_document_is_reported_not_rejected() {
    let json = r#"{
        "type": "doc",
        "version": 1,
        "content": [
            {"type": "heading", "attrs": {"level": 7}, "content": [{"type": "text", "text": "x"}]},
            {"type": "paragraph", "content": []},
            {"type": "bulletList", "content": []}
        ]
    }"#;
    let doc = parse_adf_json(json).unwrap();
    let report = StructuralValidator.validate(&doc);

    let messages: Vec<String> = report.errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(
        messages,
        [
            "/content/0/attrs/level: heading level 7 outside 1..=6",
            "/content/1: paragraph has no content",
            "/content/2: bulletList has no items",
        ]
    );
}

#[test]
fn test_unsupported_nodes_are_parse_errors() {
    let json = r#"{"type": "doc", "version": 1, "content": [{"type": "table", "content": []}]}"#;
    assert!(matches!(
        parse_adf_json(json),
        Err(FormatError::ParseError(_))
    ));
}

#[test]
fn test_missing_content_defaults_to_empty() {
    let doc = parse_adf_json(r#"{"type": "doc", "version": 1}"#).unwrap();
    assert!(doc.is_empty());
}
