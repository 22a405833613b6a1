//! Markdown format implementation
//!
//! This module implements import of a small Markdown dialect into the document tree.
//! Export back to Markdown is not supported.
//!
//! # Library Choice
//!
//! No Markdown crate is used. The accepted dialect is deliberately narrow and its
//! edge-case behavior (lenient list indentation, literal link labels, strong
//! before emphasis) differs from CommonMark, so a CommonMark parser would need
//! as much post-processing as the hand-written pipeline costs.
//!
//! # Element Mapping Table
//!
//! | Markdown                  | Document node                  | Notes                                   |
//! |---------------------------|--------------------------------|-----------------------------------------|
//! | `#` … `######` + space    | `Block::Heading`               | More than six `#` clamp to level 6      |
//! | Consecutive text lines    | `Block::Paragraph`             | Lines joined with a single space        |
//! | `* item`                  | `Block::BulletList`            | Two leading spaces per nesting level    |
//! | `**bold**`                | `Mark::Strong`                 |                                         |
//! | `*italic*`                | `Mark::Em`                     |                                         |
//! | `` `code` ``              | `Mark::Code`                   | Interior literal                        |
//! | `[text](url)`             | `Mark::Link`                   | Label literal                           |
//!
//! Anything else (tables, images, quotes, ordered lists, escapes) is paragraph text.
//!
//! # Pipeline
//!
//! - [`preprocess`]: spacing normalization, total and idempotent.
//! - [`parser::segment`]: line classification into raw blocks.
//! - [`crate::common::flat_to_nested`]: list nesting from indentation.
//! - [`inline::tokenize`]: inline marks.
//! - [`parser::assemble`]: wraps everything into a [`Document`].

pub mod inline;
pub mod parser;
pub mod preprocess;

pub use preprocess::preprocess;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown subset (headings, paragraphs, bullet lists, inline marks)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_from_markdown(source))
    }
}
