//! Structural nodes of the document model
//!
//! This module defines the node-level elements the classifier and model
//! builder produce: headings, paragraphs, lists, bilingual grids, Q&A
//! pairs, blockquotes and glossary tables.

use serde::{Deserialize, Serialize};

use crate::glossary::GlossaryEntry;
use crate::inline::Inline;

/// One classified structural unit of output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A section heading
    Heading(Heading),
    /// A paragraph of inline content
    Paragraph(Paragraph),
    /// An ordered, unordered or emoji-led list
    List(List),
    /// A paired English/Arabic block rendered side by side
    BilingualGrid(BilingualGrid),
    /// A question/answer pair
    QaBlock(QaBlock),
    /// A quoted block (the conclusion lands here)
    Blockquote(Blockquote),
    /// A merged terminology table
    GlossaryTable(GlossaryTable),
}

/// A section heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1 = document title, 2/3 = sections)
    pub level: u8,
    /// Heading text content
    pub text: Vec<Inline>,
    /// Stable anchor id for table-of-contents linking (`sec2_N`, `sec3_N_M`)
    pub anchor: Option<String>,
}

/// A paragraph node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline content within the paragraph
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    /// Paragraph from a single plain-text run
    pub fn from_inlines(inlines: Vec<Inline>) -> Self {
        Self { inlines }
    }
}

/// A list node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Kind of list
    pub kind: ListKind,
    /// List items, each an inline run. Emoji items keep their leading glyph
    /// as part of the run.
    pub items: Vec<Vec<Inline>>,
}

/// List kind variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListKind {
    /// Numbered list (Latin or Arabic-Indic digits in source)
    Ordered,
    /// Bullet list (`-`, `•`, `–`, `—`, `▪`, `·` in source)
    Unordered,
    /// Emoji-led list; items carry their own glyph
    Emoji,
}

/// A paired English/Arabic text block
///
/// Holds the raw (normalized) text of each side; the templates split it
/// into paragraphs and parse inline formatting at render time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BilingualGrid {
    /// English side (rendered left, LTR)
    pub english: String,
    /// Arabic side (rendered right, RTL)
    pub arabic: String,
}

/// A one-line question/answer pair (`❓ question — ✅ answer` in source)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaBlock {
    /// The question, without the leading `❓`
    pub question: Vec<Inline>,
    /// The answer, without the leading `✅`
    pub answer: Vec<Inline>,
}

/// A quoted block containing nested nodes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Blockquote {
    /// Quoted content
    pub content: Vec<Node>,
}

/// A terminology table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GlossaryTable {
    /// Merged, deduplicated entries
    pub entries: Vec<GlossaryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_default() {
        let para = Paragraph::default();
        assert!(para.inlines.is_empty());
    }

    #[test]
    fn test_heading_anchor() {
        let h = Heading {
            level: 2,
            text: vec![Inline::text("Methods")],
            anchor: Some("sec2_1".to_string()),
        };
        assert_eq!(h.anchor.as_deref(), Some("sec2_1"));
    }

    #[test]
    fn test_list_kinds() {
        let list = List {
            kind: ListKind::Emoji,
            items: vec![vec![Inline::text("💡 idea")]],
        };
        assert_eq!(list.kind, ListKind::Emoji);
        assert_eq!(list.items.len(), 1);
    }

    #[test]
    fn test_blockquote_nests_nodes() {
        let quote = Blockquote {
            content: vec![Node::Paragraph(Paragraph {
                inlines: vec![Inline::text("🎯 الخلاصة الكبرى: النوم مهم")],
            })],
        };
        assert_eq!(quote.content.len(), 1);
    }
}
