//! Import tests for Markdown format (Markdown → Document → ADF)
//!
//! These tests check the emitted ADF JSON, which is the contract callers see.

use adf_babel::convert;
use adf_babel::format::Format;
use adf_babel::formats::adf::to_value;
use adf_babel::formats::markdown::MarkdownFormat;
use adf_babel::formats::treeviz::to_treeviz_str;
use insta::assert_snapshot;
use serde_json::{json, Value};
use std::path::PathBuf;

fn md_to_json(md: &str) -> Value {
    to_value(&convert(md)).expect("Should encode ADF")
}

fn read_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

#[test]
fn test_empty_input() {
    let empty = json!({"type": "doc", "version": 1, "content": []});
    assert_eq!(md_to_json(""), empty);
    assert_eq!(md_to_json("   \n\n  "), empty);
}

#[test]
fn test_flat_list_is_one_bullet_list() {
    let json = md_to_json("* one\n* two\n* three");
    let content = json["content"].as_array().unwrap();
    assert_eq!(content.len(), 1);
    assert_eq!(content[0]["type"], "bulletList");

    let texts: Vec<&str> = content[0]["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["content"][0]["content"][0]["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, ["one", "two", "three"]);
}

#[test]
fn test_nested_list_shape() {
    let item = |text: &str| json!({"type": "paragraph", "content": [{"type": "text", "text": text}]});

    assert_eq!(
        md_to_json("* A\n  * B\n  * C\n* D"),
        json!({
            "type": "doc",
            "version": 1,
            "content": [{
                "type": "bulletList",
                "content": [
                    {"type": "listItem", "content": [
                        item("A"),
                        {"type": "bulletList", "content": [
                            {"type": "listItem", "content": [item("B")]},
                            {"type": "listItem", "content": [item("C")]}
                        ]}
                    ]},
                    {"type": "listItem", "content": [item("D")]}
                ]
            }]
        })
    );
}

#[test]
fn test_inline_marks() {
    assert_eq!(
        md_to_json("Para **bold** and *italic* and `code`.")["content"][0]["content"],
        json!([
            {"type": "text", "text": "Para "},
            {"type": "text", "text": "bold", "marks": [{"type": "strong"}]},
            {"type": "text", "text": " and "},
            {"type": "text", "text": "italic", "marks": [{"type": "em"}]},
            {"type": "text", "text": " and "},
            {"type": "text", "text": "code", "marks": [{"type": "code"}]},
            {"type": "text", "text": "."}
        ])
    );
}

#[test]
fn test_code_span_is_literal() {
    assert_eq!(
        md_to_json("`**not bold**`")["content"][0]["content"],
        json!([{"type": "text", "text": "**not bold**", "marks": [{"type": "code"}]}])
    );
}

#[test]
fn test_heading_levels_clamp() {
    let json = md_to_json("# Level1\n## Level2\n####### TooDeep");
    let levels: Vec<u64> = json["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|block| block["attrs"]["level"].as_u64().unwrap())
        .collect();
    assert_eq!(levels, [1, 2, 6]);
}

#[test]
fn test_link_mark() {
    assert_eq!(
        md_to_json("Read [the guide](https://example.com/guide) first")["content"][0]["content"][1],
        json!({
            "type": "text",
            "text": "the guide",
            "marks": [{"type": "link", "attrs": {"href": "https://example.com/guide"}}]
        })
    );
}

#[test]
fn test_malformed_markup_stays_literal() {
    assert_eq!(
        md_to_json("# Title\n\n[Broken link without URL\n\n**Unclosed bold"),
        json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "heading", "attrs": {"level": 1}, "content": [{"type": "text", "text": "Title"}]},
                {"type": "paragraph", "content": [{"type": "text", "text": "[Broken link without URL"}]},
                {"type": "paragraph", "content": [{"type": "text", "text": "**Unclosed bold"}]}
            ]
        })
    );
}

#[test]
fn test_crlf_input_matches_lf_input() {
    let lf = "# Title\n\n* a\n  * b\n\nclosing line";
    let crlf = lf.replace('\n', "\r\n");
    assert_eq!(md_to_json(&crlf), md_to_json(lf));
}

#[test]
fn test_trailing_bare_marker_is_empty_item() {
    let item = json!({"type": "listItem", "content": [{"type": "paragraph", "content": []}]});
    assert_eq!(
        md_to_json("intro\n* ")["content"][1],
        json!({"type": "bulletList", "content": [item]})
    );
}

#[test]
fn test_paragraph_ends_at_list() {
    let json = md_to_json("Intro text\n* item\nafter");
    let types: Vec<&str> = json["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|block| block["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, ["paragraph", "bulletList", "paragraph"]);
}

#[test]
fn test_markdown_format_matches_convert() {
    let md = read_fixture("release_notes.md");
    assert_eq!(MarkdownFormat.parse(&md).unwrap(), convert(&md));
}

#[test]
fn test_release_notes_fixture_tree() {
    let doc = convert(&read_fixture("release_notes.md"));
    assert_snapshot!(to_treeviz_str(&doc), @r"
    ⧉ Document (doc v1, 6 blocks)
    ├─ § h1 Release Notes
    ├─ ¶ Intro line one intro line two…
    ├─ § h2 Changes
    ├─ ☰ 2 items
    │ ├─ • Added adf CLI
    │ │ └─ ☰ 1 items
    │ │   └─ • Supports docs
    │ │     └─ ☰ 1 items
    │ │       └─ • Deep item
    │ └─ • Fixed italic parsing
    ├─ § h6 Overflow heading
    └─ ¶ Trailing paragraph
    ");
}

#[test]
fn test_compact_json_snapshot() {
    let json = adf_babel::convert_to_json("## Steps\n* run `adf`", false).unwrap();
    assert_snapshot!(json, @r#"{"type":"doc","version":1,"content":[{"type":"heading","attrs":{"level":2},"content":[{"type":"text","text":"Steps"}]},{"type":"bulletList","content":[{"type":"listItem","content":[{"type":"paragraph","content":[{"type":"text","text":"run "},{"type":"text","text":"adf","marks":[{"type":"code"}]}]}]}]}]}"#);
}
