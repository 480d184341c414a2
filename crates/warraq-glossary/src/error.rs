//! Error types for glossary operations

use thiserror::Error;

/// Result type for glossary operations
pub type Result<T> = std::result::Result<T, GlossaryError>;

/// Errors that can occur during glossary loading or enrichment
#[derive(Error, Debug)]
pub enum GlossaryError {
    /// Lexicon cache file could not be read or parsed
    #[error("Lexicon cache error: {0}")]
    Cache(String),

    /// External lookup failed or timed out
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
