//! Glossary merging
//!
//! Merged glossaries are sets keyed by normalized term: iterating the
//! inputs in order, the first entry for a key wins and later duplicates
//! are dropped entirely.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use warraq_ast::{normalize_term, GlossaryEntry};

/// Merge entry lists; first entry per normalized term wins.
pub fn merge(lists: &[&[GlossaryEntry]]) -> Vec<GlossaryEntry> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for list in lists {
        for entry in *list {
            let key = normalize_term(&entry.term);
            if key.is_empty() || !seen.insert(key) {
                continue;
            }
            out.push(entry.clone());
        }
    }
    out
}

fn glossary_json_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)\[GLOSSARY_JSON\](.*?)\[/GLOSSARY_JSON\]").unwrap())
}

/// Extract an AI-supplied `[GLOSSARY_JSON]…[/GLOSSARY_JSON]` entry array.
///
/// A missing block or malformed JSON yields an empty list; glossary
/// content is always optional.
pub fn extract_tagged_json(text: &str) -> Vec<GlossaryEntry> {
    let Some(caps) = glossary_json_re().captures(text) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<GlossaryEntry>>(caps[1].trim()) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("ignoring malformed glossary JSON block: {}", e);
            Vec::new()
        }
    }
}
