//! Core data structures for the document tree.
//!
//! Every node is owned by its parent container. There is no node identity or
//! sharing: a [`Document`] is built once per conversion and handed back whole.

/// Tag written as the document `type` in the ADF envelope.
pub const DOC_KIND: &str = "doc";

/// The only ADF envelope version this crate produces or accepts.
pub const DOC_VERSION: u32 = 1;

/// Represents the root of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub kind: String,
    pub version: u32,
    pub blocks: Vec<Block>,
}

impl Document {
    /// Creates a `doc`/version 1 document holding the given blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        Document {
            kind: DOC_KIND.to_string(),
            version: DOC_VERSION,
            blocks,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

/// A top-level structural unit of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, inline: Vec<InlineNode> },
    Paragraph { inline: Vec<InlineNode> },
    BulletList(BulletList),
}

impl Block {
    /// Name of the node kind, as used by the tree visualisation.
    pub fn node_type(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "Heading",
            Block::Paragraph { .. } => "Paragraph",
            Block::BulletList(_) => "BulletList",
        }
    }

    /// Whether this block would serialize to nothing useful.
    ///
    /// Lists are never considered empty here, even without items.
    pub fn is_empty(&self) -> bool {
        match self {
            Block::Heading { inline, .. } | Block::Paragraph { inline } => inline.is_empty(),
            Block::BulletList(_) => false,
        }
    }
}

/// An unordered list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulletList {
    pub items: Vec<ListItem>,
}

/// A list item: its own inline content plus at most one nested list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    pub inline: Vec<InlineNode>,
    pub children: Option<BulletList>,
}

impl ListItem {
    pub fn new(inline: Vec<InlineNode>) -> Self {
        ListItem {
            inline,
            children: None,
        }
    }

    /// Appends `child` to this item's nested list, creating the list on first use.
    pub fn push_child(&mut self, child: ListItem) {
        self.children
            .get_or_insert_with(BulletList::default)
            .items
            .push(child);
    }
}

/// A run of text carrying zero or one style mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineNode {
    pub text: String,
    pub mark: Option<Mark>,
}

impl InlineNode {
    pub fn plain(text: impl Into<String>) -> Self {
        InlineNode {
            text: text.into(),
            mark: None,
        }
    }

    pub fn marked(text: impl Into<String>, mark: Mark) -> Self {
        InlineNode {
            text: text.into(),
            mark: Some(mark),
        }
    }
}

/// Inline style annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    Strong,
    Em,
    Code,
    Link { href: String },
}

impl Mark {
    /// The ADF mark type name.
    pub fn name(&self) -> &'static str {
        match self {
            Mark::Strong => "strong",
            Mark::Em => "em",
            Mark::Code => "code",
            Mark::Link { .. } => "link",
        }
    }
}
