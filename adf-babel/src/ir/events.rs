//! Defines the flat block stream emitted by the Markdown segmenter.

use std::fmt;

/// A bullet line as seen by the segmenter: raw text plus its nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLine {
    pub text: String,
    pub indent: usize,
}

impl ListLine {
    pub fn new(text: impl Into<String>, indent: usize) -> Self {
        ListLine {
            text: text.into(),
            indent,
        }
    }
}

/// A block before inline tokenization and list nesting.
///
/// The segmenter produces these in document order. Text is kept raw so the
/// stream can be inspected independently of the inline tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawBlock {
    Heading { level: u8, text: String },
    Paragraph(String),
    /// A run of consecutive bullet lines between two flush boundaries.
    List(Vec<ListLine>),
}

impl fmt::Display for RawBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawBlock::Heading { level, text } => write!(f, "heading({level}) {text}"),
            RawBlock::Paragraph(text) => write!(f, "paragraph {text}"),
            RawBlock::List(lines) => {
                write!(f, "list[{}]", lines.len())?;
                for line in lines {
                    write!(f, "\n  {}- {}", "  ".repeat(line.indent), line.text)?;
                }
                Ok(())
            }
        }
    }
}
