//! Document → ADF JSON
//!
//! Mapping is direct: every block becomes one ADF node and every inline node
//! one `text` node with at most one mark. A list item always opens with a
//! paragraph holding its own inline content, followed by its nested list when
//! it has one.

use super::schema::{AdfDocument, AdfMark, AdfNode, HeadingAttrs, LinkAttrs};
use crate::error::FormatError;
use crate::ir::nodes::{Block, BulletList, Document, InlineNode, ListItem, Mark};

/// Builds the wire model of a document.
pub fn to_adf(doc: &Document) -> AdfDocument {
    AdfDocument {
        kind: doc.kind.clone(),
        version: doc.version,
        content: doc.blocks.iter().map(block_to_adf).collect(),
    }
}

/// Encodes a document as ADF JSON, indented when `pretty` is set.
pub fn to_json(doc: &Document, pretty: bool) -> Result<String, FormatError> {
    let adf = to_adf(doc);
    let encoded = if pretty {
        serde_json::to_string_pretty(&adf)
    } else {
        serde_json::to_string(&adf)
    };
    encoded.map_err(|err| FormatError::SerializationError(err.to_string()))
}

/// Encodes a document as a JSON value, for callers that embed it in a larger payload.
pub fn to_value(doc: &Document) -> Result<serde_json::Value, FormatError> {
    serde_json::to_value(to_adf(doc))
        .map_err(|err| FormatError::SerializationError(err.to_string()))
}

fn block_to_adf(block: &Block) -> AdfNode {
    match block {
        Block::Heading { level, inline } => AdfNode::Heading {
            attrs: HeadingAttrs { level: *level },
            content: inline_to_adf(inline),
        },
        Block::Paragraph { inline } => AdfNode::Paragraph {
            content: inline_to_adf(inline),
        },
        Block::BulletList(list) => list_to_adf(list),
    }
}

fn list_to_adf(list: &BulletList) -> AdfNode {
    AdfNode::BulletList {
        content: list.items.iter().map(item_to_adf).collect(),
    }
}

fn item_to_adf(item: &ListItem) -> AdfNode {
    let mut content = vec![AdfNode::Paragraph {
        content: inline_to_adf(&item.inline),
    }];
    if let Some(children) = &item.children {
        content.push(list_to_adf(children));
    }
    AdfNode::ListItem { content }
}

fn inline_to_adf(inline: &[InlineNode]) -> Vec<AdfNode> {
    inline
        .iter()
        .map(|node| AdfNode::Text {
            text: node.text.clone(),
            marks: node.mark.iter().map(mark_to_adf).collect(),
        })
        .collect()
}

fn mark_to_adf(mark: &Mark) -> AdfMark {
    match mark {
        Mark::Strong => AdfMark::Strong,
        Mark::Em => AdfMark::Em,
        Mark::Code => AdfMark::Code,
        Mark::Link { href } => AdfMark::Link {
            attrs: LinkAttrs { href: href.clone() },
        },
    }
}
