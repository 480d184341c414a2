//! warraq-pdf - template rendering and PDF generation
//!
//! # Architecture
//!
//! Document production runs in three stages:
//!
//! 1. **Templates** - map the document model (or bilingual segments) into
//!    Typst markup, in one of six variants
//! 2. **Compiler** - compiles Typst markup to PDF bytes
//! 3. **Pipeline** - the end-to-end call: normalize, parse, merge the
//!    glossary, render, compile, and fall back to a minimal preformatted
//!    rendering if the styled markup fails
//!
//! # Example
//!
//! ```ignore
//! use warraq_ast::Template;
//! use warraq_pdf::{render_document, RenderRequest};
//!
//! let mut request = RenderRequest::new(raw_text, "Demo", "study_bot");
//! request.template = Template::Classic;
//! let doc = render_document(&request, None)?;
//! std::fs::write(&doc.filename, &doc.bytes)?;
//! ```

mod compiler;
mod error;
mod pipeline;
pub mod templates;

pub use compiler::Compiler;
pub use error::{PdfError, Result};
pub use pipeline::{render_document, RenderRequest, CONTENT_TYPE_PDF};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
