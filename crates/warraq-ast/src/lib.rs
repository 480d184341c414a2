//! warraq-ast - Document model definitions
//!
//! This crate provides the model types shared across the warraq pipeline:
//! structural nodes produced by the classifier, bilingual segments from the
//! bracket-tag grammar, glossary entries, and the render envelope.

pub mod document;
pub mod glossary;
pub mod inline;
pub mod node;
pub mod segment;

pub use document::{Direction, Document, DocumentMeta, RenderedDocument, Template};
pub use glossary::{normalize_term, GlossaryEntry};
pub use inline::{plain_text, FormatType, Inline};
pub use node::{
    BilingualGrid, Blockquote, GlossaryTable, Heading, List, ListKind, Node, Paragraph, QaBlock,
};
pub use segment::{PublishNode, Segment};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
