//! Treeviz formatter for the document tree
//!
//! Treeviz is a visual representation of the document tree, one node per line.
//! Nesting is drawn with box connectors, two columns per level.
//!
//! So the format is :
//! <prefix><connector> <icon> <label> (label truncated to 30 characters)
//!
//! Example:
//!
//! ```text
//! ⧉ Document (doc v1, 3 blocks)
//! ├─ § h1 Release notes
//! ├─ ¶ Para bold and italic and cod…
//! └─ ☰ 2 items
//!   ├─ • A
//!   │ └─ ☰ 2 items
//!   │   ├─ • B
//!   │   └─ • C
//!   └─ • D
//! ```
//!
//! With `inlines=true` every heading, paragraph and list item also lists its
//! inline runs, using the mark name as icon key (see [`super::icons`]).

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{Block, BulletList, Document, InlineNode, ListItem};
use std::collections::HashMap;

const LABEL_WIDTH: usize = 30;

/// A rendered node before connectors are applied.
struct TreeNode {
    icon: &'static str,
    label: String,
    children: Vec<TreeNode>,
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= LABEL_WIDTH {
        return text.to_string();
    }
    let head: String = text.chars().take(LABEL_WIDTH - 1).collect();
    format!("{head}…")
}

fn inline_text(inline: &[InlineNode]) -> String {
    inline.iter().map(|node| node.text.as_str()).collect()
}

fn inline_nodes(inline: &[InlineNode]) -> Vec<TreeNode> {
    inline
        .iter()
        .map(|node| {
            let key = node.mark.as_ref().map_or("Text", |mark| mark.name());
            TreeNode {
                icon: get_icon(key),
                label: truncate(&node.text),
                children: Vec::new(),
            }
        })
        .collect()
}

fn list_node(list: &BulletList, inlines: bool) -> TreeNode {
    TreeNode {
        icon: get_icon("BulletList"),
        label: format!("{} items", list.items.len()),
        children: list
            .items
            .iter()
            .map(|item| item_node(item, inlines))
            .collect(),
    }
}

fn item_node(item: &ListItem, inlines: bool) -> TreeNode {
    let mut children = if inlines {
        inline_nodes(&item.inline)
    } else {
        Vec::new()
    };
    if let Some(nested) = &item.children {
        children.push(list_node(nested, inlines));
    }
    TreeNode {
        icon: get_icon("ListItem"),
        label: truncate(&inline_text(&item.inline)),
        children,
    }
}

fn block_node(block: &Block, inlines: bool) -> TreeNode {
    let icon = get_icon(block.node_type());
    match block {
        Block::Heading { level, inline } => TreeNode {
            icon,
            label: truncate(&format!("h{level} {}", inline_text(inline))),
            children: if inlines { inline_nodes(inline) } else { Vec::new() },
        },
        Block::Paragraph { inline } => TreeNode {
            icon,
            label: truncate(&inline_text(inline)),
            children: if inlines { inline_nodes(inline) } else { Vec::new() },
        },
        Block::BulletList(list) => list_node(list, inlines),
    }
}

fn render(nodes: &[TreeNode], prefix: &str, output: &mut String) {
    for (index, node) in nodes.iter().enumerate() {
        let is_last = index == nodes.len() - 1;
        let connector = if is_last { "└─" } else { "├─" };
        output.push_str(&format!("{prefix}{connector} {} {}\n", node.icon, node.label));

        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        render(&node.children, &child_prefix, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_params(doc, &HashMap::new())
}

/// Convert a document to treeviz string with optional parameters
///
/// # Parameters
///
/// - `"inlines"`: When set to `"true"`, lists the inline runs of every
///   heading, paragraph and list item as children.
pub fn to_treeviz_str_with_params(doc: &Document, params: &HashMap<String, String>) -> String {
    let inlines = params
        .get("inlines")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);

    let mut output = format!(
        "{} Document ({} v{}, {} blocks)\n",
        get_icon("Document"),
        doc.kind,
        doc.version,
        doc.blocks.len()
    );

    let nodes: Vec<TreeNode> = doc
        .blocks
        .iter()
        .map(|block| block_node(block, inlines))
        .collect();
    render(&nodes, "", &mut output);
    output
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_params(doc, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::markdown::parser::parse_from_markdown;

    #[test]
    fn renders_nested_lists() {
        let doc = parse_from_markdown("# Notes\n\n* A\n  * B\n  * C\n* D");
        insta::assert_snapshot!(to_treeviz_str(&doc), @r"
        ⧉ Document (doc v1, 2 blocks)
        ├─ § h1 Notes
        └─ ☰ 2 items
          ├─ • A
          │ └─ ☰ 2 items
          │   ├─ • B
          │   └─ • C
          └─ • D
        ");
    }

    #[test]
    fn inlines_param_lists_marked_runs() {
        let doc = parse_from_markdown("Some **bold** text");
        let mut params = HashMap::new();
        params.insert("inlines".to_string(), "true".to_string());
        assert_eq!(
            to_treeviz_str_with_params(&doc, &params),
            "⧉ Document (doc v1, 1 blocks)\n\
             └─ ¶ Some bold text\n\
             \x20 ├─ ◦ Some \n\
             \x20 ├─ 𝐁 bold\n\
             \x20 └─ ◦  text\n"
        );
    }

    #[test]
    fn long_labels_are_truncated() {
        let doc = parse_from_markdown(&"x".repeat(50));
        let output = to_treeviz_str(&doc);
        let line = output.lines().nth(1).unwrap();
        assert!(line.ends_with('…'));
        assert_eq!(line.chars().count(), "└─ ¶ ".chars().count() + LABEL_WIDTH);
    }

    #[test]
    fn empty_document_is_header_only() {
        assert_eq!(
            to_treeviz_str(&Document::empty()),
            "⧉ Document (doc v1, 0 blocks)\n"
        );
    }
}
