//! Glossary entries shared between the detector, merger and renderer

use serde::{Deserialize, Serialize};

/// One terminology entry
///
/// The merge key is the normalized term (trimmed, inner whitespace
/// collapsed, lowercased); post-merge the entry set is unique by that key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GlossaryEntry {
    /// English term as it appears in text
    pub term: String,
    /// Arabic rendering of the term (may be empty before enrichment)
    #[serde(default)]
    pub arabic: String,
    /// Short definition (may be empty before enrichment)
    #[serde(default)]
    pub definition: String,
}

impl GlossaryEntry {
    /// Entry with all three fields
    pub fn new(
        term: impl Into<String>,
        arabic: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            arabic: arabic.into(),
            definition: definition.into(),
        }
    }

    /// Entry with only the term; translation and definition to be filled
    /// by enrichment, or left blank.
    pub fn bare(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Default::default()
        }
    }

    /// True if either the translation or the definition is still missing
    pub fn needs_enrichment(&self) -> bool {
        self.arabic.is_empty() || self.definition.is_empty()
    }
}

/// Normalize a term for use as a merge/index key
pub fn normalize_term(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  Odds   Ratio "), "odds ratio");
        assert_eq!(normalize_term("Bias"), "bias");
    }

    #[test]
    fn test_needs_enrichment() {
        assert!(GlossaryEntry::bare("Bias").needs_enrichment());
        assert!(!GlossaryEntry::new("Bias", "انحياز", "خطأ منهجي").needs_enrichment());
    }

    #[test]
    fn test_missing_fields_default_on_deserialize() {
        let entry: GlossaryEntry = serde_json::from_str(r#"{"term":"Incidence"}"#).unwrap();
        assert_eq!(entry.term, "Incidence");
        assert!(entry.arabic.is_empty());
    }
}
