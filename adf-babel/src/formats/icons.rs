//! Shared icon mapping for tree visualization
//!
//! One icon per document node kind, plus one per inline mark, so the tree
//! views stay consistent wherever they are rendered.

/// Get the Unicode icon for a given node type
///
/// Block kinds use the names returned by [`crate::ir::nodes::Block::node_type`];
/// inline runs use `Text` or the mark name (`strong`, `em`, `code`, `link`).
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Heading" => "§",
        "Paragraph" => "¶",
        "BulletList" => "☰",
        "ListItem" => "•",
        "Text" => "◦",
        "strong" => "𝐁",
        "em" => "𝐼",
        "code" => "ƒ",
        "link" => "⊕",
        _ => "○",
    }
}
