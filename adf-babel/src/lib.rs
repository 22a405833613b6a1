//! Markdown to Atlassian Document Format conversion
//!
//!     This crate converts a small Markdown dialect into the document tree used by
//!     Jira and Confluence rich text fields (ADF), and encodes that tree as ADF JSON.
//!
//!     Conversion is total: every input produces a document. Constructs that do not
//!     match degrade to literal text, odd list indentation falls back to the top
//!     level and heading levels clamp to 6. Only the surrounding machinery (format
//!     lookup, ADF decoding, remote conversion) can fail.
//!
//!     This is a pure lib, that is, it powers the adf cli but is shell agnostic: no
//!     code here prints, reads env vars or touches files.
//!
//! Architecture
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── markdown            # preprocess → segment → nest lists → tokenize inline
//!     │   ├── adf                 # serde wire model, serializer, parser
//!     │   └── treeviz             # tree visualization of the IR
//!     ├── ir                      # Document tree and the segmenter's raw block stream
//!     ├── common                  # List nesting from flat indented lines
//!     ├── inspect.rs              # Per-stage views used by `adf inspect`
//!     ├── validate.rs             # Structural checks against the ADF subset
//!     ├── remote.rs               # Remote converter seam with local fallback
//!     └── template.rs             # Ticket template metadata and sections
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── markdown/<testname>.rs
//!     └── adf/<testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Core Algorithms
//!
//!     The interesting part is rebuilding nested lists from flat indentation
//!     (./common/flat_to_nested.rs) and resolving competing inline constructs
//!     without a grammar (./formats/markdown/inline.rs). Everything else is line
//!     classification and a direct mapping onto ADF nodes.
pub mod error;
pub mod format;
pub mod formats;
pub mod inspect;
pub mod registry;
pub mod remote;
pub mod template;
pub mod validate;

pub mod common;
pub mod ir;

pub use error::FormatError;
pub use format::Format;
pub use ir::nodes::Document;
pub use registry::FormatRegistry;
pub use validate::{StructuralValidator, ValidationReport, Validator};

/// Converts Markdown into a document tree.
///
/// Never fails; blank input gives the empty `doc` envelope.
pub fn convert(markdown: &str) -> Document {
    formats::markdown::parser::parse_from_markdown(markdown)
}

/// Converts Markdown straight to ADF JSON.
pub fn convert_to_json(markdown: &str, pretty: bool) -> Result<String, FormatError> {
    formats::adf::to_json(&convert(markdown), pretty)
}
