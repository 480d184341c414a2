//! warraq-glossary - terminology detection, merging and enrichment
//!
//! Builds the glossary attached to dual-language documents:
//!
//! - [`detect::find_terms_in_text`] spots known terms in English text via
//!   1–4 word n-grams over a cached lexicon.
//! - [`merge::merge`] combines AI-supplied and locally detected entries
//!   into a set keyed by normalized term (first entry wins).
//! - [`enrich::enrich`] fills missing translations/definitions from an
//!   external lookup; failures never block document production.
//!
//! The optional `enrich-http` feature adds a blocking HTTP lookup client
//! with a bounded timeout.

pub mod detect;
pub mod enrich;
pub mod error;
pub mod lexicon;
pub mod merge;

pub use detect::{find_terms, find_terms_in_text, DEFAULT_LIMIT};
pub use enrich::{enrich, TermLookup};
pub use error::{GlossaryError, Result};
pub use lexicon::Lexicon;
pub use merge::{extract_tagged_json, merge};

#[cfg(feature = "enrich-http")]
pub use enrich::HttpLookup;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
