//! Bilingual segment parser
//!
//! Extracts `{english, arabic, heading_en, heading_ar, takeaways}` tuples
//! from the dedicated bracket-tag grammar:
//!
//! ```text
//! [HEAD_EN]…[/HEAD_EN]        (optional)
//! [HEAD_AR]…[/HEAD_AR]        (optional)
//! [ENG]…[/ENG]                (required)
//! [ARB]…[/ARB]                (required)
//! [TAKEAWAYS_AR]…[/TAKEAWAYS_AR]  (optional, attaches to this segment)
//! ```
//!
//! An unterminated block simply never matches and falls through to the
//! generic paragraph path. Zero matches return an empty list and the
//! caller uses the generic document model instead.

use std::sync::OnceLock;

use regex::Regex;
use warraq_ast::Segment;

fn segment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?is)(?:\[HEAD_EN\](.*?)\[/HEAD_EN\]\s*)?(?:\[HEAD_AR\](.*?)\[/HEAD_AR\]\s*)?\[ENG\](.*?)\[/ENG\]\s*\[ARB\](.*?)\[/ARB\](?:\s*\[TAKEAWAYS_AR\](.*?)\[/TAKEAWAYS_AR\])?",
        )
        .unwrap()
    })
}

fn stray_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\[/?(?:HEAD_EN|HEAD_AR|ENG|ARB|TAKEAWAYS_AR|GLOSSARY_JSON)\]").unwrap()
    })
}

fn takeaway_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\s\-•]*(?:[0-9٠-٩]+[.)])?\s*").unwrap())
}

/// Fixed bidirectional heading-inference table.
///
/// When exactly one of the two headings is present, the other side is
/// looked up here; a miss leaves it blank and the renderer omits it.
const HEADING_PAIRS: &[(&str, &str)] = &[
    ("Types of Studies", "أنواع الدراسات"),
    ("Study Design", "تصميم الدراسة"),
    ("Advantages", "المزايا"),
    ("Disadvantages", "العيوب"),
];

/// Strip leaked tag tokens from an extracted payload and tidy whitespace
fn clean_payload(s: &str) -> String {
    let s = stray_tag_re().replace_all(s, "").into_owned();
    static BLANKS_RE: OnceLock<Regex> = OnceLock::new();
    let blanks = BLANKS_RE.get_or_init(|| Regex::new(r"\n{3,}").unwrap());
    blanks.replace_all(&s, "\n\n").trim().to_string()
}

/// Infer the missing heading side from the fixed table.
fn infer_headings(en: Option<String>, ar: Option<String>) -> (Option<String>, Option<String>) {
    match (en, ar) {
        (Some(en), None) => {
            let key = en.trim().to_lowercase();
            let ar = HEADING_PAIRS
                .iter()
                .find(|(e, _)| key.starts_with(&e.to_lowercase()))
                .map(|(_, a)| a.to_string());
            (Some(en), ar)
        }
        (None, Some(ar)) => {
            let key = ar.trim();
            let en = HEADING_PAIRS
                .iter()
                .find(|(_, a)| *a == key)
                .map(|(e, _)| e.to_string());
            (en, Some(ar))
        }
        other => other,
    }
}

/// Parse all bilingual segments from normalized text, in source order.
pub fn parse_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    for caps in segment_re().captures_iter(text) {
        let head_en = caps
            .get(1)
            .map(|m| clean_payload(m.as_str()))
            .filter(|s| !s.is_empty());
        let head_ar = caps
            .get(2)
            .map(|m| clean_payload(m.as_str()))
            .filter(|s| !s.is_empty());
        let (heading_en, heading_ar) = infer_headings(head_en, head_ar);

        let takeaways = caps
            .get(5)
            .map(|m| parse_takeaways(m.as_str()))
            .unwrap_or_default();

        segments.push(Segment {
            english: clean_payload(&caps[3]),
            arabic: clean_payload(&caps[4]),
            heading_en,
            heading_ar,
            takeaways,
        });
    }
    segments
}

/// One takeaway per non-empty line, leading list markers stripped.
fn parse_takeaways(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|ln| takeaway_marker_re().replace(ln, "").into_owned())
        .map(|ln| clean_payload(&ln))
        .filter(|ln| !ln.is_empty())
        .collect()
}
