//! warraq-core - markup normalization and document model building
//!
//! This crate turns raw, semi-structured bilingual study text into the
//! warraq document model:
//!
//! 1. [`normalize::normalize`] cleans the raw text (idempotent).
//! 2. [`builder::build_document`] classifies lines into an ordered node
//!    tree, or [`bilingual::parse_segments`] extracts bilingual segments
//!    from the bracket-tag grammar.
//!
//! Parsing never fails: every line is classified (the plain-paragraph rule
//! is a total catch-all) and malformed bracket blocks degrade to the
//! generic paragraph path.
//!
//! # Example
//!
//! ```
//! use warraq_ast::{Direction, Node};
//! use warraq_core::{builder, normalize};
//!
//! let raw = "<h1>Demo</h1>\n- point one\n- point two";
//! let doc = builder::build_document(
//!     &normalize::normalize(raw),
//!     "fallback title",
//!     "study_bot",
//!     Direction::Rtl,
//! );
//! assert_eq!(doc.meta.title, "Demo");
//! assert!(matches!(doc.nodes[0], Node::List(_)));
//! ```

pub mod bilingual;
pub mod builder;
pub mod classify;
pub mod inline;
pub mod normalize;
pub mod publish;

pub use bilingual::parse_segments;
pub use builder::{build_document, build_nodes, extract_title};
pub use classify::{classify_line, LineClass};
pub use inline::parse_inlines;
pub use normalize::normalize;
pub use publish::publish_nodes;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
