//! Document root, metadata and the rendered-document envelope

use serde::{Deserialize, Serialize};

use crate::node::Node;

/// A complete parsed document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (resolved title, author handle, direction)
    pub meta: DocumentMeta,
    /// Document content nodes, in source order (with the documented
    /// conclusion/snapshot exceptions)
    pub nodes: Vec<Node>,
}

/// Document metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Document title. Exactly one title is rendered: a `<h1>` found in the
    /// body wins over the caller-supplied title and is removed from the body.
    pub title: String,
    /// Author/brand handle shown on the cover and footer (without `@`)
    pub author_handle: String,
    /// Base text direction for the body
    pub direction: Direction,
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self {
            title: String::new(),
            author_handle: String::new(),
            direction: Direction::Rtl,
        }
    }
}

/// Base text direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Right-to-left (Arabic-first layouts, the default)
    Rtl,
    /// Left-to-right
    Ltr,
}

impl Direction {
    /// Direction from a two-letter language code; `en` is LTR, everything
    /// else defaults to RTL.
    pub fn from_lang(lang: &str) -> Self {
        if lang.eq_ignore_ascii_case("en") {
            Direction::Ltr
        } else {
            Direction::Rtl
        }
    }
}

/// Template variant selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    /// Single-column, direction-aware document with cover page
    Classic,
    /// Condensed study summary with chip TOC and term highlighting
    Ultra,
    /// Per-segment bilingual cards with optional glossary table
    Dual,
    /// Single flowing sheet with computed metrics
    TextSheet,
    /// Verbatim monospace tree outline
    Mindmap,
    /// Classic plus multi-level table of contents and back-links
    StudyPro,
}

impl Template {
    /// Filename prefix for documents produced by this template
    pub fn file_kind(&self) -> &'static str {
        match self {
            Template::Classic => "document",
            Template::Ultra => "summary",
            Template::Dual => "translation",
            Template::TextSheet => "text_sheet",
            Template::Mindmap => "mindmap",
            Template::StudyPro => "study_pro",
        }
    }
}

/// A rendered, paginated document
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// The binary document
    pub bytes: Vec<u8>,
    /// Suggested filename (`{kind}_{random-hex-8}.pdf`)
    pub filename: String,
    /// MIME content type of `bytes`
    pub content_type: &'static str,
}

impl Document {
    /// Create an empty document with metadata
    pub fn new(meta: DocumentMeta) -> Self {
        Self {
            meta,
            nodes: Vec::new(),
        }
    }

    /// Add a node to the document
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Check if the document has no content nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the number of content nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
