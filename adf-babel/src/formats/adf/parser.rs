//! ADF JSON → Document
//!
//! Decoding is strict about shape and lenient about content. Anything the
//! document tree cannot represent (unknown node types, text outside a block,
//! blocks inside inline content, more than one mark on a run, list items that
//! do not open with a paragraph) is a [`FormatError::ParseError`]. Values the
//! tree can hold but ADF forbids (a wrong envelope type or version, an
//! out-of-range heading level, empty paragraphs) are kept so the validator can
//! report them.

use super::schema::{AdfDocument, AdfMark, AdfNode};
use crate::error::FormatError;
use crate::ir::nodes::{Block, BulletList, Document, InlineNode, ListItem, Mark};

/// Decodes ADF JSON text into a document.
pub fn parse_adf_json(source: &str) -> Result<Document, FormatError> {
    let adf: AdfDocument =
        serde_json::from_str(source).map_err(|err| FormatError::ParseError(err.to_string()))?;
    from_adf(adf)
}

/// Decodes an already-parsed JSON value into a document.
pub fn parse_adf_value(value: serde_json::Value) -> Result<Document, FormatError> {
    let adf: AdfDocument =
        serde_json::from_value(value).map_err(|err| FormatError::ParseError(err.to_string()))?;
    from_adf(adf)
}

/// Converts the wire model into the document tree.
pub fn from_adf(adf: AdfDocument) -> Result<Document, FormatError> {
    let blocks = adf
        .content
        .into_iter()
        .map(block_from_adf)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Document {
        kind: adf.kind,
        version: adf.version,
        blocks,
    })
}

fn block_from_adf(node: AdfNode) -> Result<Block, FormatError> {
    match node {
        AdfNode::Heading { attrs, content } => Ok(Block::Heading {
            level: attrs.level,
            inline: inline_from_adf(content)?,
        }),
        AdfNode::Paragraph { content } => Ok(Block::Paragraph {
            inline: inline_from_adf(content)?,
        }),
        AdfNode::BulletList { content } => Ok(Block::BulletList(list_from_adf(content)?)),
        other => Err(unexpected(&other, "a block")),
    }
}

fn list_from_adf(content: Vec<AdfNode>) -> Result<BulletList, FormatError> {
    let items = content
        .into_iter()
        .map(|node| match node {
            AdfNode::ListItem { content } => item_from_adf(content),
            other => Err(unexpected(&other, "listItem")),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(BulletList { items })
}

fn item_from_adf(content: Vec<AdfNode>) -> Result<ListItem, FormatError> {
    let mut parts = content.into_iter();

    let inline = match parts.next() {
        Some(AdfNode::Paragraph { content }) => inline_from_adf(content)?,
        Some(other) => return Err(unexpected(&other, "paragraph as first listItem child")),
        None => {
            return Err(FormatError::ParseError(
                "listItem without content".to_string(),
            ))
        }
    };

    let children = match parts.next() {
        Some(AdfNode::BulletList { content }) => Some(list_from_adf(content)?),
        Some(other) => return Err(unexpected(&other, "bulletList after listItem paragraph")),
        None => None,
    };

    if let Some(extra) = parts.next() {
        return Err(unexpected(&extra, "end of listItem"));
    }

    Ok(ListItem { inline, children })
}

fn inline_from_adf(content: Vec<AdfNode>) -> Result<Vec<InlineNode>, FormatError> {
    content
        .into_iter()
        .map(|node| match node {
            AdfNode::Text { text, marks } => Ok(InlineNode {
                text,
                mark: single_mark(marks)?,
            }),
            other => Err(unexpected(&other, "text")),
        })
        .collect()
}

fn single_mark(marks: Vec<AdfMark>) -> Result<Option<Mark>, FormatError> {
    let mut iter = marks.into_iter();
    let first = iter.next().map(mark_from_adf);
    if iter.next().is_some() {
        return Err(FormatError::ParseError(
            "text nodes carry at most one mark".to_string(),
        ));
    }
    Ok(first)
}

fn mark_from_adf(mark: AdfMark) -> Mark {
    match mark {
        AdfMark::Strong => Mark::Strong,
        AdfMark::Em => Mark::Em,
        AdfMark::Code => Mark::Code,
        AdfMark::Link { attrs } => Mark::Link { href: attrs.href },
    }
}

fn unexpected(node: &AdfNode, expected: &str) -> FormatError {
    FormatError::ParseError(format!(
        "unexpected '{}' node, expected {}",
        node.type_name(),
        expected
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_marked_paragraph() {
        let doc = parse_adf_value(json!({
            "type": "doc",
            "version": 1,
            "content": [{"type": "paragraph", "content": [
                {"type": "text", "text": "a"},
                {"type": "text", "text": "b", "marks": [{"type": "link", "attrs": {"href": "u"}}]}
            ]}]
        }))
        .unwrap();

        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                inline: vec![
                    InlineNode::plain("a"),
                    InlineNode::marked("b", Mark::Link { href: "u".to_string() }),
                ]
            }]
        );
    }

    #[test]
    fn keeps_out_of_range_values_for_validation() {
        let doc = parse_adf_value(json!({
            "type": "page",
            "version": 2,
            "content": [{"type": "heading", "attrs": {"level": 9}, "content": []}]
        }))
        .unwrap();
        assert_eq!(doc.kind, "page");
        assert_eq!(doc.version, 2);
        assert!(matches!(doc.blocks[0], Block::Heading { level: 9, .. }));
    }

    #[test]
    fn rejects_text_at_block_level() {
        let err = parse_adf_value(json!({
            "type": "doc",
            "version": 1,
            "content": [{"type": "text", "text": "loose"}]
        }))
        .unwrap_err();
        assert_eq!(
            err,
            FormatError::ParseError("unexpected 'text' node, expected a block".to_string())
        );
    }

    #[test]
    fn rejects_multiple_marks() {
        let result = parse_adf_value(json!({
            "type": "doc",
            "version": 1,
            "content": [{"type": "paragraph", "content": [
                {"type": "text", "text": "x", "marks": [{"type": "strong"}, {"type": "em"}]}
            ]}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_list_item_without_leading_paragraph() {
        let result = parse_adf_value(json!({
            "type": "doc",
            "version": 1,
            "content": [{"type": "bulletList", "content": [
                {"type": "listItem", "content": [{"type": "bulletList", "content": []}]}
            ]}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            parse_adf_json("{not json"),
            Err(FormatError::ParseError(_))
        ));
    }
}
