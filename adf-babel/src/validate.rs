//! Structural validation of documents against the ADF subset
//!
//! Conversion never produces errors, but a tree decoded from foreign ADF JSON
//! can hold things ADF rejects. [`StructuralValidator`] walks the tree and
//! reports each problem with a JSON-pointer-like path into the ADF encoding,
//! so `/content/2/content/0` is the first inline node of the third block.
//!
//! Checks:
//! - envelope `type` is `doc` and `version` is `1`
//! - heading levels are within 1..=6
//! - headings and top-level paragraphs have inline content
//! - bullet lists have at least one item
//! - text nodes are not empty
//!
//! Paragraphs inside list items may be empty: `* ` on its own is a valid item.

use crate::ir::nodes::{Block, BulletList, Document, InlineNode, DOC_KIND, DOC_VERSION};
use std::fmt;

/// A single problem found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{}: {}", path, self.message)
    }
}

/// Result of validating one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Something that can check a document.
pub trait Validator: Send + Sync {
    fn validate(&self, doc: &Document) -> ValidationReport;
}

/// Checks the tree shape rules ADF imposes on the supported node kinds.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl Validator for StructuralValidator {
    fn validate(&self, doc: &Document) -> ValidationReport {
        let mut report = ValidationReport::default();

        if doc.kind != DOC_KIND {
            report.push(
                "/type",
                format!("expected '{DOC_KIND}', found '{}'", doc.kind),
            );
        }
        if doc.version != DOC_VERSION {
            report.push(
                "/version",
                format!("expected {DOC_VERSION}, found {}", doc.version),
            );
        }

        for (index, block) in doc.blocks.iter().enumerate() {
            check_block(block, &format!("/content/{index}"), &mut report);
        }

        report
    }
}

fn check_block(block: &Block, path: &str, report: &mut ValidationReport) {
    match block {
        Block::Heading { level, inline } => {
            if !(1..=6).contains(level) {
                report.push(
                    format!("{path}/attrs/level"),
                    format!("heading level {level} outside 1..=6"),
                );
            }
            if inline.is_empty() {
                report.push(path, "heading has no content");
            }
            check_inline(inline, path, report);
        }
        Block::Paragraph { inline } => {
            if inline.is_empty() {
                report.push(path, "paragraph has no content");
            }
            check_inline(inline, path, report);
        }
        Block::BulletList(list) => check_list(list, path, report),
    }
}

fn check_list(list: &BulletList, path: &str, report: &mut ValidationReport) {
    if list.items.is_empty() {
        report.push(path, "bulletList has no items");
    }
    for (index, item) in list.items.iter().enumerate() {
        let item_path = format!("{path}/content/{index}");
        check_inline(&item.inline, &format!("{item_path}/content/0"), report);
        if let Some(children) = &item.children {
            check_list(children, &format!("{item_path}/content/1"), report);
        }
    }
}

fn check_inline(inline: &[InlineNode], path: &str, report: &mut ValidationReport) {
    for (index, node) in inline.iter().enumerate() {
        if node.text.is_empty() {
            report.push(format!("{path}/content/{index}"), "text node is empty");
        }
    }
}
