//! Name → format lookup
//!
//! The CLI never names a concrete format type: it resolves `--from` / `--to`
//! (or a file extension) here and goes through the [`Format`] trait object.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;
use std::collections::HashMap;
use std::path::Path;

/// Formats keyed by [`Format::name`].
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let doc = registry.parse("# Title", "markdown")?;
/// let json = registry.serialize(&doc, "adf")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Adds `format`, replacing any format registered under the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Registered names in alphabetical order.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Picks the format claiming the extension of `filename`, ignoring case.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension.as_str()))
            .map(|format| format.name().to_string())
    }

    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        let target = self.get(format)?;
        if !target.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        target.parse(source)
    }

    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(doc, format, &HashMap::new())
    }

    /// Serializes through `format`, handing it `options` (e.g. `pretty`).
    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let target = self.get(format)?;
        if !target.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        target.serialize_with_options(doc, options)
    }

    /// Markdown in, ADF in and out, treeviz out.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(crate::formats::markdown::MarkdownFormat);
        registry.register(crate::formats::adf::AdfFormat);
        registry.register(crate::formats::treeviz::TreevizFormat);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::{Block, InlineNode};

    /// Reads every line as a paragraph and writes back a block count.
    struct LineFormat;

    impl Format for LineFormat {
        fn name(&self) -> &str {
            "lines"
        }
        fn file_extensions(&self) -> &[&str] {
            &["txt"]
        }
        fn supports_parsing(&self) -> bool {
            true
        }
        fn supports_serialization(&self) -> bool {
            true
        }
        fn parse(&self, source: &str) -> Result<Document, FormatError> {
            Ok(Document::new(
                source
                    .lines()
                    .map(|line| Block::Paragraph {
                        inline: vec![InlineNode::plain(line)],
                    })
                    .collect(),
            ))
        }
        fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
            Ok(format!("{} blocks", doc.blocks.len()))
        }
    }

    #[test]
    fn empty_registry_knows_nothing() {
        let registry = FormatRegistry::new();
        assert!(registry.list_formats().is_empty());
        assert!(registry.detect_format_from_filename("a.md").is_none());
    }

    #[test]
    fn registered_format_round_trips() {
        let mut registry = FormatRegistry::new();
        registry.register(LineFormat);
        registry.register(LineFormat);

        assert_eq!(registry.list_formats(), vec!["lines"]);
        let doc = registry.parse("a\nb", "lines").unwrap();
        assert_eq!(registry.serialize(&doc, "lines").unwrap(), "2 blocks");
    }

    #[test]
    fn unknown_format_is_reported_by_name() {
        let registry = FormatRegistry::new();
        match registry.parse("input", "rst").unwrap_err() {
            FormatError::FormatNotFound(name) => assert_eq!(name, "rst"),
            other => panic!("Expected FormatNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn options_need_format_support() {
        let mut registry = FormatRegistry::new();
        registry.register(LineFormat);

        let mut options = HashMap::new();
        options.insert("pretty".to_string(), "false".to_string());
        assert!(registry
            .serialize_with_options(&Document::empty(), "lines", &options)
            .is_err());
    }

    #[test]
    fn defaults_cover_markdown_adf_and_treeviz() {
        let registry = FormatRegistry::default();
        assert_eq!(registry.list_formats(), vec!["adf", "markdown", "treeviz"]);
        assert!(matches!(
            registry.serialize(&Document::empty(), "markdown"),
            Err(FormatError::NotSupported(_))
        ));
        assert!(matches!(
            registry.parse("x", "treeviz"),
            Err(FormatError::NotSupported(_))
        ));
    }

    #[test]
    fn detects_formats_by_extension() {
        let registry = FormatRegistry::with_defaults();
        let detect = |name: &str| registry.detect_format_from_filename(name);

        assert_eq!(detect("notes.md").as_deref(), Some("markdown"));
        assert_eq!(detect("/tickets/EM-12.MARKDOWN").as_deref(), Some("markdown"));
        assert_eq!(detect("body.json").as_deref(), Some("adf"));
        assert_eq!(detect("dump.tree").as_deref(), Some("treeviz"));
        assert_eq!(detect("notes.rst"), None);
        assert_eq!(detect("README"), None);
    }
}
