//! Markdown parsing (Markdown → Document)
//!
//! Pipeline: Markdown string → preprocess → segment into [`RawBlock`]s →
//! resolve each block (inline tokenization, list nesting) → [`Document`].
//!
//! The segmenter is a three-state machine over lines. Each line is classified
//! in a fixed priority order (blank, heading, bullet, plain text) and the
//! paragraph and list accumulators are flushed at the boundaries that
//! classification implies. Nothing here can fail: input that does not match a
//! construct degrades to paragraph text.

use super::inline::tokenize;
use super::preprocess::preprocess;
use crate::common::flat_to_nested::lines_to_tree;
use crate::ir::events::{ListLine, RawBlock};
use crate::ir::nodes::{Block, BulletList, Document};
use log::debug;
use std::mem;

const MAX_HEADING_LEVEL: usize = 6;

/// Leading whitespace characters per list nesting level.
const INDENT_WIDTH: usize = 2;

/// Converts Markdown to a document tree.
///
/// Whitespace-only input short-circuits to the empty document.
pub fn parse_from_markdown(source: &str) -> Document {
    if is_blank(source) {
        return Document::empty();
    }
    let normalized = preprocess(source);
    assemble(segment(&normalized))
}

/// Resolves raw blocks into a document, dropping any that end up without content.
pub fn assemble(raw_blocks: Vec<RawBlock>) -> Document {
    let blocks = raw_blocks
        .into_iter()
        .map(resolve_block)
        .filter(|block| !block.is_empty())
        .collect();
    Document::new(blocks)
}

fn resolve_block(raw: RawBlock) -> Block {
    match raw {
        RawBlock::Heading { level, text } => Block::Heading {
            level,
            inline: tokenize(&text),
        },
        RawBlock::Paragraph(text) => Block::Paragraph {
            inline: tokenize(&text),
        },
        RawBlock::List(lines) => Block::BulletList(BulletList {
            items: lines_to_tree(&lines, tokenize),
        }),
    }
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Splits on `\n`, dropping every trailing `\r` of each line.
///
/// `str::lines` only removes a single `\r` before the newline, so `a\r\r\n`
/// would keep one and change meaning on a second pass.
pub(crate) fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    source.split('\n').map(|line| line.trim_end_matches('\r'))
}

/// Splits a heading line into its marker count and trimmed text.
///
/// A heading is a run of `#` at the very start of the line, one space, then
/// non-empty text. The marker count is returned unclamped.
pub(crate) fn heading_parts(line: &str) -> Option<(usize, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 {
        return None;
    }
    let text = line[hashes..].strip_prefix(' ')?.trim();
    if text.is_empty() {
        None
    } else {
        Some((hashes, text))
    }
}

/// Splits a bullet line into its leading whitespace width and trimmed text.
///
/// A marker with nothing after it is an empty item, with or without trailing
/// whitespace, so trimming the end of the text never changes its meaning.
pub(crate) fn list_parts(line: &str) -> Option<(usize, &str)> {
    let leading = line
        .bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();
    let rest = line[leading..].strip_prefix('*')?;
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some((leading, rest.trim()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    None,
    InParagraph,
    InList,
}

/// Line classifier and block accumulator.
#[derive(Debug)]
struct Segmenter {
    state: State,
    paragraph: Vec<String>,
    list: Vec<ListLine>,
    blocks: Vec<RawBlock>,
}

impl Segmenter {
    fn new() -> Self {
        Segmenter {
            state: State::None,
            paragraph: Vec::new(),
            list: Vec::new(),
            blocks: Vec::new(),
        }
    }

    fn feed(&mut self, line: &str) {
        if is_blank(line) {
            self.flush_paragraph();
            self.flush_list();
            self.state = State::None;
        } else if let Some((hashes, text)) = heading_parts(line) {
            self.flush_paragraph();
            self.flush_list();
            let level = hashes.min(MAX_HEADING_LEVEL) as u8;
            self.blocks.push(RawBlock::Heading {
                level,
                text: text.to_string(),
            });
            self.state = State::None;
        } else if let Some((leading, text)) = list_parts(line) {
            self.flush_paragraph();
            self.list.push(ListLine::new(text, leading / INDENT_WIDTH));
            self.state = State::InList;
        } else {
            if self.state == State::InList {
                self.flush_list();
            }
            self.paragraph.push(line.trim().to_string());
            self.state = State::InParagraph;
        }
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = mem::take(&mut self.paragraph).join(" ").trim().to_string();
        if !text.is_empty() {
            debug!("segmenter: paragraph of {} bytes", text.len());
            self.blocks.push(RawBlock::Paragraph(text));
        }
    }

    fn flush_list(&mut self) {
        if self.list.is_empty() {
            return;
        }
        let lines = mem::take(&mut self.list);
        debug!("segmenter: list run of {} lines", lines.len());
        self.blocks.push(RawBlock::List(lines));
    }

    fn finish(mut self) -> Vec<RawBlock> {
        self.flush_paragraph();
        self.flush_list();
        self.blocks
    }
}

/// Partitions normalized Markdown into raw blocks, in document order.
pub fn segment(source: &str) -> Vec<RawBlock> {
    let mut segmenter = Segmenter::new();
    for line in split_lines(source) {
        segmenter.feed(line);
    }
    segmenter.finish()
}
