//! Glossary enrichment
//!
//! Fills missing `arabic`/`definition` fields on merged entries from an
//! external lookup, keyed by normalized term. Only blank fields are
//! filled; populated values are never overwritten. Lookup failure is
//! logged and skipped — enrichment never blocks document production.

use std::collections::HashMap;

use warraq_ast::{normalize_term, GlossaryEntry};

use crate::error::Result;

/// A batch terminology lookup service
pub trait TermLookup {
    /// Resolve a batch of terms to entries. Implementations should bound
    /// their own timeouts; errors are treated as "no data".
    fn lookup(&self, terms: &[String]) -> Result<Vec<GlossaryEntry>>;
}

/// Fill blank fields of `entries` in place from the lookup.
///
/// Terms with both fields populated are not sent. Returns the number of
/// entries that received at least one field.
pub fn enrich(entries: &mut [GlossaryEntry], lookup: &dyn TermLookup) -> usize {
    let missing: Vec<String> = entries
        .iter()
        .filter(|e| e.needs_enrichment())
        .map(|e| e.term.clone())
        .collect();
    if missing.is_empty() {
        return 0;
    }

    let resolved = match lookup.lookup(&missing) {
        Ok(resolved) => resolved,
        Err(e) => {
            log::warn!("glossary enrichment skipped: {}", e);
            return 0;
        }
    };

    let index: HashMap<String, &GlossaryEntry> = resolved
        .iter()
        .map(|e| (normalize_term(&e.term), e))
        .collect();

    let mut touched = 0;
    for entry in entries.iter_mut() {
        let Some(found) = index.get(&normalize_term(&entry.term)) else {
            continue;
        };
        let mut changed = false;
        if entry.arabic.is_empty() && !found.arabic.is_empty() {
            entry.arabic = found.arabic.clone();
            changed = true;
        }
        if entry.definition.is_empty() && !found.definition.is_empty() {
            entry.definition = found.definition.clone();
            changed = true;
        }
        if changed {
            touched += 1;
        }
    }
    touched
}

#[cfg(feature = "enrich-http")]
pub use self::http::{hydrate_from_sources, HttpLookup};

#[cfg(feature = "enrich-http")]
mod http {
    use std::time::Duration;

    use reqwest::blocking::Client;
    use warraq_ast::GlossaryEntry;

    use crate::error::{GlossaryError, Result};
    use crate::lexicon::Lexicon;
    use super::TermLookup;

    /// Lookup client posting a term batch to a JSON endpoint.
    ///
    /// The endpoint accepts `{"terms": [...]}` and returns an array of
    /// `{term, arabic, definition}` objects.
    #[derive(Debug, Clone)]
    pub struct HttpLookup {
        endpoint: String,
        client: Client,
    }

    impl HttpLookup {
        /// Client with the default 10-second timeout
        pub fn new(endpoint: impl Into<String>) -> Self {
            Self::with_timeout(endpoint, Duration::from_secs(10))
        }

        /// Client with a custom request timeout
        pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
            let client = Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client");
            Self {
                endpoint: endpoint.into(),
                client,
            }
        }

        /// The configured endpoint URL
        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }
    }

    impl TermLookup for HttpLookup {
        fn lookup(&self, terms: &[String]) -> Result<Vec<GlossaryEntry>> {
            let response = self
                .client
                .post(&self.endpoint)
                .json(&serde_json::json!({ "terms": terms }))
                .send()
                .map_err(|e| GlossaryError::Lookup(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(GlossaryError::Lookup(format!("HTTP {}", status.as_u16())));
            }
            response
                .json::<Vec<GlossaryEntry>>()
                .map_err(|e| GlossaryError::Lookup(e.to_string()))
        }
    }

    /// Fetch lexicon extensions from raw JSON URLs. Failures per URL are
    /// logged and skipped; the result holds whatever was retrievable.
    pub fn hydrate_from_sources(urls: &[String], timeout: Duration) -> Lexicon {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        let mut entries = Vec::new();
        for url in urls {
            let fetched: std::result::Result<Vec<GlossaryEntry>, String> = client
                .get(url)
                .send()
                .and_then(|r| r.error_for_status())
                .and_then(|r| r.json())
                .map_err(|e| e.to_string());
            match fetched {
                Ok(mut batch) => entries.append(&mut batch),
                Err(e) => log::warn!("lexicon source {} skipped: {}", url, e),
            }
        }
        Lexicon::from_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GlossaryError;

    struct FixedLookup(Vec<GlossaryEntry>);

    impl TermLookup for FixedLookup {
        fn lookup(&self, _terms: &[String]) -> Result<Vec<GlossaryEntry>> {
            Ok(self.0.clone())
        }
    }

    struct FailingLookup;

    impl TermLookup for FailingLookup {
        fn lookup(&self, _terms: &[String]) -> Result<Vec<GlossaryEntry>> {
            Err(GlossaryError::Lookup("timed out".to_string()))
        }
    }

    #[test]
    fn test_enrich_fills_only_blank_fields() {
        let mut entries = vec![
            GlossaryEntry::new("Bias", "انحياز", ""),
            GlossaryEntry::bare("Incidence"),
        ];
        let lookup = FixedLookup(vec![
            GlossaryEntry::new("bias", "SHOULD NOT OVERWRITE", "خطأ منهجي"),
            GlossaryEntry::new("incidence", "الحدوث", "حالات جديدة"),
        ]);
        let touched = enrich(&mut entries, &lookup);
        assert_eq!(touched, 2);
        assert_eq!(entries[0].arabic, "انحياز");
        assert_eq!(entries[0].definition, "خطأ منهجي");
        assert_eq!(entries[1].arabic, "الحدوث");
    }

    #[test]
    fn test_enrich_failure_leaves_fields_blank() {
        let mut entries = vec![GlossaryEntry::bare("Bias")];
        let touched = enrich(&mut entries, &FailingLookup);
        assert_eq!(touched, 0);
        assert!(entries[0].arabic.is_empty());
        assert!(entries[0].definition.is_empty());
    }

    #[test]
    fn test_fully_populated_entries_skip_lookup() {
        struct PanickingLookup;
        impl TermLookup for PanickingLookup {
            fn lookup(&self, _terms: &[String]) -> Result<Vec<GlossaryEntry>> {
                panic!("must not be called");
            }
        }
        let mut entries = vec![GlossaryEntry::new("Bias", "انحياز", "خطأ")];
        assert_eq!(enrich(&mut entries, &PanickingLookup), 0);
    }
}
