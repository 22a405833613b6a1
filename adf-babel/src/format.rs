//! The seam between the CLI and individual formats
//!
//! A format reads text into a [`Document`], writes a [`Document`] out as text,
//! or both. Every capability defaults to "not supported", so a format only
//! overrides what it actually does.

use crate::error::FormatError;
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// A named, extension-aware document format.
///
/// ```ignore
/// struct PlainText;
///
/// impl Format for PlainText {
///     fn name(&self) -> &str {
///         "plain"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str) -> Result<Document, FormatError> {
///         Ok(adf_babel::convert(source))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// Registry key, also accepted by `--from` and `--to`.
    fn name(&self) -> &str;

    /// One line for `--list-formats`.
    fn description(&self) -> &str {
        ""
    }

    /// Extensions without the dot, lowercase.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serializes with format parameters. The default accepts no parameters
    /// at all and otherwise defers to [`Format::serialize`].
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if !options.is_empty() {
            let keys: Vec<&str> = options.keys().map(String::as_str).collect();
            return Err(FormatError::NotSupported(format!(
                "Format '{}' takes no parameters (got {})",
                self.name(),
                keys.join(", ")
            )));
        }
        self.serialize(doc)
    }
}
