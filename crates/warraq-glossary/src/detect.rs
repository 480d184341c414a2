//! Local term detection
//!
//! Generates 1–4 word n-grams from cleaned English text and keeps those
//! present in the lexicon, capped to bound glossary size.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use warraq_ast::{normalize_term, GlossaryEntry};

use crate::lexicon::Lexicon;

/// Default cap on detected entries
pub const DEFAULT_LIMIT: usize = 64;

const MAX_NGRAM: usize = 4;

fn punct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // keep hyphens: many terms are hyphenated (case-control, cross-sectional)
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9\-\s]").unwrap())
}

/// Detect lexicon terms in English text, preserving first-seen order.
pub fn find_terms(text: &str, lexicon: &Lexicon, limit: usize) -> Vec<GlossaryEntry> {
    let cleaned = punct_re().replace_all(text, " ");
    let words: Vec<&str> = cleaned.split_whitespace().collect();

    let mut found = Vec::new();
    let mut seen = HashSet::new();
    'outer: for n in 1..=MAX_NGRAM.min(words.len()) {
        for window in words.windows(n) {
            let key = normalize_term(&window.join(" "));
            if let Some(entry) = lexicon.get(&key) {
                if seen.insert(key) {
                    found.push(entry.clone());
                    if found.len() >= limit {
                        break 'outer;
                    }
                }
            }
        }
    }
    found
}

/// Detect terms against the process-wide lexicon with the default cap.
pub fn find_terms_in_text(text: &str) -> Vec<GlossaryEntry> {
    find_terms(text, crate::lexicon::global(), DEFAULT_LIMIT)
}
