//! Rebuilds a nested bullet list from flat, indented list lines.
//!
//! # The High-Level Concept
//!
//! Markdown encodes list nesting only as leading whitespace. The segmenter turns
//! each bullet line into a `(text, indent)` pair; this module reconstructs the
//! tree. A stack keeps the chain of "open" items from the current top-level item
//! down to the most recent one. A new line closes every open item at the same or
//! a deeper level, then opens itself under whatever is left on top.
//!
//! # The Algorithm
//!
//! 1. **Initialization:** an empty stack of `(item, level)` and an empty list of
//!    top-level items.
//!
//! 2. **For each line:**
//!    - Build the item (its inline content comes from the caller).
//!    - Close items while the top of the stack has `level >= indent`.
//!    - Push the new item. If something remains under it, that entry is its parent.
//!
//! 3. **Closing an item** pops it and hands it to the entry below, which appends
//!    it to its nested list (created on first child). An item with nothing below
//!    it is a top-level item and goes to the output.
//!
//! 4. **Completion:** close everything left on the stack.
//!
//! Items are only ever owned by one container. An item stays on the stack until
//! its subtree is complete, so children land in their parent in arrival order.
//!
//! # Irregular Indentation
//!
//! Equal indentation after a deeper item makes a sibling at that level. An
//! indented line with no shallower open item (the first line is indented, or
//! the indentation drops below every open level) becomes a top-level item.
//! That is never an error.
//!
//! ```text
//! * A            A
//!   * B          ├─ B
//!   * C          └─ C
//! * D            D
//! ```

use crate::ir::events::ListLine;
use crate::ir::nodes::{InlineNode, ListItem};
use log::debug;

/// An item whose subtree is still being built.
#[derive(Debug)]
struct OpenItem {
    item: ListItem,
    level: usize,
}

/// Pops the top open item and attaches it to its parent, or to `roots` when it
/// has none.
fn close_top(stack: &mut Vec<OpenItem>, roots: &mut Vec<ListItem>) {
    let Some(open) = stack.pop() else {
        return;
    };
    match stack.last_mut() {
        Some(parent) => parent.item.push_child(open.item),
        None => roots.push(open.item),
    }
}

/// Converts flat list lines into top-level list items.
///
/// `inline` turns each line's raw text into inline content; pass
/// [`crate::formats::markdown::inline::tokenize`] for Markdown semantics.
///
/// # Example
///
/// ```ignore
/// let lines = vec![ListLine::new("A", 0), ListLine::new("B", 1)];
/// let items = lines_to_tree(&lines, |text| vec![InlineNode::plain(text)]);
/// assert_eq!(items.len(), 1);
/// assert!(items[0].children.is_some());
/// ```
pub fn lines_to_tree<F>(lines: &[ListLine], mut inline: F) -> Vec<ListItem>
where
    F: FnMut(&str) -> Vec<InlineNode>,
{
    let mut roots = Vec::new();
    let mut stack: Vec<OpenItem> = Vec::new();

    for line in lines {
        let item = ListItem::new(inline(&line.text));

        while stack.last().is_some_and(|open| open.level >= line.indent) {
            close_top(&mut stack, &mut roots);
        }

        if stack.is_empty() && line.indent > 0 {
            debug!(
                "list: no parent for '{}' at indent {}, promoting to top level",
                line.text, line.indent
            );
        }

        stack.push(OpenItem {
            item,
            level: line.indent,
        });
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }

    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(entries: &[(&str, usize)]) -> Vec<ListLine> {
        entries
            .iter()
            .map(|(text, indent)| ListLine::new(*text, *indent))
            .collect()
    }

    fn build(entries: &[(&str, usize)]) -> Vec<ListItem> {
        lines_to_tree(&lines(entries), |text| vec![InlineNode::plain(text)])
    }

    fn label(item: &ListItem) -> &str {
        &item.inline[0].text
    }

    fn child_labels(item: &ListItem) -> Vec<&str> {
        item.children
            .as_ref()
            .map(|list| list.items.iter().map(label).collect())
            .unwrap_or_default()
    }

    #[test]
    fn flat_items_stay_flat() {
        let items = build(&[("a", 0), ("b", 0), ("c", 0)]);
        assert_eq!(items.iter().map(label).collect::<Vec<_>>(), ["a", "b", "c"]);
        assert!(items.iter().all(|item| item.children.is_none()));
    }

    #[test]
    fn siblings_share_one_nested_list() {
        let items = build(&[("A", 0), ("B", 1), ("C", 1), ("D", 0)]);
        assert_eq!(items.len(), 2);
        assert_eq!(label(&items[0]), "A");
        assert_eq!(child_labels(&items[0]), ["B", "C"]);
        assert_eq!(label(&items[1]), "D");
        assert!(items[1].children.is_none());
    }

    #[test]
    fn deep_nesting_and_return() {
        let items = build(&[("a", 0), ("b", 1), ("c", 2), ("d", 1)]);
        assert_eq!(items.len(), 1);
        assert_eq!(child_labels(&items[0]), ["b", "d"]);
        let b = &items[0].children.as_ref().unwrap().items[0];
        assert_eq!(child_labels(b), ["c"]);
    }

    #[test]
    fn first_line_indented_is_promoted() {
        let items = build(&[("x", 2), ("y", 3), ("z", 0)]);
        assert_eq!(items.len(), 2);
        assert_eq!(label(&items[0]), "x");
        assert_eq!(child_labels(&items[0]), ["y"]);
        assert_eq!(label(&items[1]), "z");
    }

    #[test]
    fn skipped_levels_attach_to_nearest_open_item() {
        let items = build(&[("a", 0), ("b", 3)]);
        assert_eq!(items.len(), 1);
        assert_eq!(child_labels(&items[0]), ["b"]);
    }

    #[test]
    fn drop_below_every_open_level_is_promoted() {
        let items = build(&[("x", 3), ("y", 1)]);
        assert_eq!(items.iter().map(label).collect::<Vec<_>>(), ["x", "y"]);
    }

    #[test]
    fn empty_input_has_no_items() {
        assert!(build(&[]).is_empty());
    }
}
