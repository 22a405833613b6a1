//! Inline tokenizer
//!
//! Turns the raw text of a heading, paragraph or list item into a sequence of
//! [`InlineNode`]s. There is no grammar: each construct has a finder returning
//! the leftmost match in the remaining text, and finders are consulted in a
//! fixed precedence.
//!
//! 1. Code span, `` `code` ``. The interior is literal.
//! 2. Link, `[label](href)`. The label is literal.
//! 3. Otherwise the remaining text goes through the emphasis pass and the scan ends.
//!
//! Text in front of a code span or link also goes through the emphasis pass,
//! which prefers the leftmost `**strong**` anywhere in its run over any
//! `*em*`. Unmatched delimiters stay in the output as plain text.
//!
//! All delimiters are ASCII, so every byte offset found here is a char boundary.

use crate::ir::nodes::{InlineNode, Mark};
use log::trace;

/// A construct found in a text run: its byte range and the node it becomes.
#[derive(Debug)]
struct Span {
    start: usize,
    end: usize,
    node: InlineNode,
}

/// Tokenizes `text` into inline nodes.
///
/// Empty text yields no nodes; any other text yields at least one.
pub fn tokenize(text: &str) -> Vec<InlineNode> {
    let mut nodes = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some(span) = find_code_span(rest).or_else(|| find_link(rest)) else {
            emphasis_pass(rest, &mut nodes);
            break;
        };
        trace!("inline: {} at {}..{}", span.node.text, span.start, span.end);
        emphasis_pass(&rest[..span.start], &mut nodes);
        nodes.push(span.node);
        rest = &rest[span.end..];
    }

    nodes
}

fn emphasis_pass(text: &str, nodes: &mut Vec<InlineNode>) {
    let mut rest = text;

    while !rest.is_empty() {
        let Some(span) = find_strong(rest).or_else(|| find_em(rest)) else {
            nodes.push(InlineNode::plain(rest));
            break;
        };
        if span.start > 0 {
            nodes.push(InlineNode::plain(&rest[..span.start]));
        }
        nodes.push(span.node);
        rest = &rest[span.end..];
    }
}

fn find_byte(bytes: &[u8], needle: u8, from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|b| *b == needle)
        .map(|offset| from + offset)
}

/// Leftmost `` `…` `` with a non-empty interior.
fn find_code_span(text: &str) -> Option<Span> {
    let bytes = text.as_bytes();
    let mut from = 0;

    while let Some(open) = find_byte(bytes, b'`', from) {
        let close = find_byte(bytes, b'`', open + 1)?;
        if close > open + 1 {
            return Some(Span {
                start: open,
                end: close + 1,
                node: InlineNode::marked(&text[open + 1..close], Mark::Code),
            });
        }
        from = close;
    }

    None
}

/// Leftmost `[label](href)`; the label holds no `]` and the href no `)`.
fn find_link(text: &str) -> Option<Span> {
    let bytes = text.as_bytes();
    let mut from = 0;

    while let Some(open) = find_byte(bytes, b'[', from) {
        from = open + 1;
        let Some(label_end) = find_byte(bytes, b']', open + 1) else {
            return None;
        };
        if label_end == open + 1 || bytes.get(label_end + 1) != Some(&b'(') {
            continue;
        }
        let href_start = label_end + 2;
        let Some(href_end) = find_byte(bytes, b')', href_start) else {
            continue;
        };
        if href_end == href_start {
            continue;
        }
        return Some(Span {
            start: open,
            end: href_end + 1,
            node: InlineNode::marked(
                &text[open + 1..label_end],
                Mark::Link {
                    href: text[href_start..href_end].to_string(),
                },
            ),
        });
    }

    None
}

/// Leftmost `**…**` whose content is non-empty and free of `*`.
fn find_strong(text: &str) -> Option<Span> {
    let bytes = text.as_bytes();
    let mut from = 0;

    while let Some(open) = find_byte(bytes, b'*', from) {
        from = open + 1;
        if bytes.get(open + 1) != Some(&b'*') {
            continue;
        }
        let content_start = open + 2;
        let close = find_byte(bytes, b'*', content_start)?;
        if close > content_start && bytes.get(close + 1) == Some(&b'*') {
            return Some(Span {
                start: open,
                end: close + 2,
                node: InlineNode::marked(&text[content_start..close], Mark::Strong),
            });
        }
    }

    None
}

/// Leftmost `*…*` that is not part of a `**` pair on either side.
fn find_em(text: &str) -> Option<Span> {
    let bytes = text.as_bytes();
    let mut from = 0;

    while let Some(open) = find_byte(bytes, b'*', from) {
        from = open + 1;
        if open > 0 && bytes[open - 1] == b'*' {
            continue;
        }
        let close = find_byte(bytes, b'*', open + 1)?;
        if close > open + 1 && bytes.get(close + 1) != Some(&b'*') {
            return Some(Span {
                start: open,
                end: close + 1,
                node: InlineNode::marked(&text[open + 1..close], Mark::Em),
            });
        }
    }

    None
}
