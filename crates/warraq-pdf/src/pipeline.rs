//! End-to-end document pipeline
//!
//! Normalize → parse (segments or nodes) → merge glossary → render the
//! template markup → compile to PDF. A render failure never escapes:
//! the pipeline falls back to a minimal title + preformatted rendering of
//! the same content, so every call yields a document. Each invocation is
//! a pure function of its inputs; concurrent renders need no locking.

use warraq_ast::{Direction, GlossaryEntry, Node, RenderedDocument, Segment, Template};
use warraq_core::{build_nodes, extract_title, normalize, parse_segments};
use warraq_glossary::{enrich, extract_tagged_json, find_terms_in_text, merge, TermLookup};

use crate::compiler::Compiler;
use crate::error::Result;
use crate::templates::{self, raw_string, RenderContext};

/// MIME type of all rendered documents
pub const CONTENT_TYPE_PDF: &str = "application/pdf";

/// Everything the pipeline needs for one render
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Raw input text in the markup grammar
    pub text: String,
    /// Caller-supplied title (a body `<h1>` overrides it)
    pub title: String,
    /// Author/brand handle, without the `@`
    pub author_handle: String,
    /// Template variant to render
    pub template: Template,
    /// Base direction of the body
    pub direction: Direction,
    /// Glossary entries the caller already has (e.g. AI-supplied)
    pub glossary_seed: Vec<GlossaryEntry>,
}

impl RenderRequest {
    /// Request with defaults: classic template, RTL, no seed glossary.
    pub fn new(text: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: title.into(),
            author_handle: author.into(),
            template: Template::Classic,
            direction: Direction::Rtl,
            glossary_seed: Vec::new(),
        }
    }
}

/// Render a document end to end.
///
/// The only error this returns is the fallback rendering itself failing
/// (an allocation-level condition); malformed input always degrades to a
/// valid document instead.
pub fn render_document(
    request: &RenderRequest,
    lookup: Option<&dyn TermLookup>,
) -> Result<RenderedDocument> {
    let normalized = normalize(&request.text);
    let (extracted, body) = extract_title(&normalized);
    let title = extracted.unwrap_or_else(|| request.title.clone());

    let mut template = request.template;
    let mut nodes: Vec<Node> = Vec::new();
    let mut segments: Vec<Segment> = Vec::new();
    let mut glossary: Vec<GlossaryEntry> = Vec::new();

    match template {
        Template::Mindmap | Template::TextSheet => {
            // raw-line variants work straight off the normalized body
        }
        Template::Dual => {
            segments = parse_segments(&body);
            if segments.is_empty() {
                // no bilingual layout possible; use the generic model
                template = Template::Classic;
                nodes = build_nodes(&strip_glossary_block(&body));
            } else {
                glossary = build_glossary(request, &body, &segments, lookup);
            }
        }
        _ => {
            nodes = build_nodes(&strip_glossary_block(&body));
        }
    }

    let ctx = RenderContext {
        title: &title,
        author_handle: &request.author_handle,
        direction: request.direction,
        nodes: &nodes,
        segments: &segments,
        glossary: &glossary,
        raw_text: &body,
    };
    let markup = templates::render(template, &ctx);

    match Compiler::compile(&markup) {
        Ok(bytes) => Ok(RenderedDocument {
            bytes,
            filename: filename(template.file_kind()),
            content_type: CONTENT_TYPE_PDF,
        }),
        Err(e) => {
            log::warn!("template render failed, using fallback: {}", e);
            let bytes = Compiler::compile(&fallback_markup(&title, &body))?;
            Ok(RenderedDocument {
                bytes,
                filename: filename("fallback_document"),
                content_type: CONTENT_TYPE_PDF,
            })
        }
    }
}

/// Merge AI-supplied, tagged-JSON and locally detected glossary entries,
/// then enrich blanks if a lookup is available.
fn build_glossary(
    request: &RenderRequest,
    body: &str,
    segments: &[Segment],
    lookup: Option<&dyn TermLookup>,
) -> Vec<GlossaryEntry> {
    let tagged = extract_tagged_json(body);
    let english: String = segments
        .iter()
        .map(|s| s.english.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let local = find_terms_in_text(&english);
    let mut merged = merge(&[&request.glossary_seed, &tagged, &local]);
    if let Some(lookup) = lookup {
        enrich(&mut merged, lookup);
    }
    merged
}

/// Drop a `[GLOSSARY_JSON]` payload before node building; it is data for
/// the merger, not document content.
fn strip_glossary_block(text: &str) -> String {
    use std::sync::OnceLock;
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        regex::Regex::new(r"(?is)\[GLOSSARY_JSON\].*?\[/GLOSSARY_JSON\]").unwrap()
    });
    re.replace_all(text, "").into_owned()
}

/// Minimal rendering used when the styled markup fails to compile:
/// the title plus the content, preformatted.
fn fallback_markup(title: &str, body: &str) -> String {
    format!(
        "= {}\n\n#raw(block: true, \"{}\")\n",
        templates::escape_content(title),
        raw_string(body),
    )
}

/// `{kind}_{random-hex-8}.pdf`
fn filename(kind: &str) -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}.pdf", kind, &hex[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_shape() {
        let name = filename("document");
        assert!(name.starts_with("document_"));
        assert!(name.ends_with(".pdf"));
        assert_eq!(name.len(), "document_".len() + 8 + ".pdf".len());
    }

    #[test]
    fn test_classic_end_to_end() {
        let request = RenderRequest::new(
            "<h1>Demo</h1>\n- point one\n- point two; point three",
            "Demo",
            "study_bot",
        );
        let doc = render_document(&request, None).expect("render");
        assert!(doc.bytes.starts_with(b"%PDF"));
        assert!(doc.filename.starts_with("document_"));
        assert_eq!(doc.content_type, "application/pdf");
    }

    #[test]
    fn test_dual_falls_back_to_classic_without_segments() {
        let mut request = RenderRequest::new("Plain text without tags.", "T", "study_bot");
        request.template = Template::Dual;
        let doc = render_document(&request, None).expect("render");
        // no bilingual layout: the generic document kind is used
        assert!(doc.filename.starts_with("document_"));
    }

    #[test]
    fn test_dual_with_segments_and_glossary() {
        let mut request = RenderRequest::new(
            "[HEAD_EN]Advantages[/HEAD_EN][ENG]A cohort study tracks incidence.[/ENG][ARB]الدراسة الأترابية تتبع الحدوث.[/ARB]",
            "مقارنة",
            "study_bot",
        );
        request.template = Template::Dual;
        let doc = render_document(&request, None).expect("render");
        assert!(doc.bytes.starts_with(b"%PDF"));
        assert!(doc.filename.starts_with("translation_"));
    }

    #[test]
    fn test_mindmap_end_to_end() {
        let mut request = RenderRequest::new("Root\n  Leaf A\n  Leaf B", "Map", "study_bot");
        request.template = Template::Mindmap;
        let doc = render_document(&request, None).expect("render");
        assert!(doc.filename.starts_with("mindmap_"));
    }

    #[test]
    fn test_deliberately_broken_markup_still_yields_document() {
        // a title full of markup-active characters stresses the escaper;
        // whatever happens, a non-empty document must come back
        let request = RenderRequest::new(
            "#assert(false)\n[ENG]unterminated",
            "bad #input] *here*",
            "study_bot",
        );
        let doc = render_document(&request, None).expect("must always produce a document");
        assert!(!doc.bytes.is_empty());
        assert!(!doc.filename.is_empty());
    }

    #[test]
    fn test_glossary_built_for_dual() {
        let mut request = RenderRequest::new(
            "[ENG]Bias affects the odds ratio.[/ENG][ARB]الانحياز يؤثر.[/ARB]",
            "T",
            "study_bot",
        );
        request.template = Template::Dual;
        request.glossary_seed = vec![GlossaryEntry::new("Sampling", "معاينة", "اختيار عينة")];
        let segments = parse_segments(&normalize(&request.text));
        let glossary = build_glossary(&request, &request.text, &segments, None);
        let terms: Vec<&str> = glossary.iter().map(|e| e.term.as_str()).collect();
        assert!(terms.contains(&"Sampling"));
        assert!(terms.contains(&"Bias"));
        assert!(terms.contains(&"Odds Ratio"));
    }
}
