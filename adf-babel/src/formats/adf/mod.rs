//! Atlassian Document Format (ADF) implementation
//!
//! ADF is the typed JSON tree used for rich text fields by Jira and Confluence.
//! Only the subset the document tree can express is supported: `heading`,
//! `paragraph`, `bulletList`, `listItem` and `text` nodes, with the `strong`,
//! `em`, `code` and `link` marks.
//!
//! # Library Choice
//!
//! The wire types in [`schema`] derive `serde` and are encoded with
//! `serde_json`. Internally tagged enums give the `"type"` discriminator for
//! free, so neither direction walks raw `serde_json::Value`s.
//!
//! # Parameters
//!
//! - `pretty`: `true` (default) for indented output, `false` for a single line.

pub mod parser;
pub mod schema;
pub mod serializer;

pub use parser::{parse_adf_json, parse_adf_value};
pub use serializer::{to_adf, to_json, to_value};

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// Format implementation for ADF JSON
pub struct AdfFormat;

impl Format for AdfFormat {
    fn name(&self) -> &str {
        "adf"
    }

    fn description(&self) -> &str {
        "Atlassian Document Format JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json", "adf"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parse_adf_json(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        to_json(doc, true)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut pretty = true;
        for (key, value) in options {
            match key.as_str() {
                "pretty" => pretty = parse_bool(key, value)?,
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Unknown adf parameter '{other}'"
                    )))
                }
            }
        }
        to_json(doc, pretty)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, FormatError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(FormatError::SerializationError(format!(
            "Invalid value '{value}' for '{key}', expected true or false"
        ))),
    }
}
