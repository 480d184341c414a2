//! Markup normalizer
//!
//! Cleans raw generated text before classification: strips leaked
//! instruction fragments, re-flows wrapped prose, fixes emoji spacing and
//! drops repeated lines. The whole pass is idempotent:
//! `normalize(normalize(x)) == normalize(x)`.
//!
//! Lines strictly inside well-formed bracket-tag blocks (`[ENG]…[/ENG]`
//! and friends) are passed through untouched except spacing.

use std::sync::OnceLock;

use regex::Regex;

/// Bracket tags whose interiors must survive normalization intact
pub const BLOCK_TAGS: &[&str] = &[
    "HEAD_EN",
    "HEAD_AR",
    "ENG",
    "ARB",
    "TAKEAWAYS_AR",
    "CONCLUSION",
    "GLOSSARY_JSON",
];

/// The fixed bullet/heading emoji catalogue
pub const EMOJI_BULLETS: &[&str] = &[
    "✅", "⚠️", "💡", "📌", "🧠", "🔍", "🔎", "📈", "📚", "🧩", "🎯", "🚀", "📖", "🏥", "🔬",
    "📝", "📊", "🔄", "❓", "#️⃣", "🗂️",
];

/// Known leaked instruction fragments; any line matching one is dropped
const ARTIFACT_PATTERNS: &[&str] = &[
    r"ABSOLUTE\s+OUTPUT\s+SHAPE.*",
    r"MEDICAL\s+CONSISTENCY.*",
    r"ADD\s+A\s+FINAL\s+GLOSSARY.*",
    r"Optionally\s+append\s+key\s+takeaways.*",
    r"Then\s+output\s+EXACTLY.*",
    r"turn\s+inline\s+enumerations.*",
    r"Use\s+<b>.*only.*highlight.*",
    r"Maintain\s+strict\s+1:1.*",
    r"Keep\s+bullets/numbering.*",
    r"Source\s+text:.*",
    r"^---$",
];

fn artifact_res() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        ARTIFACT_PATTERNS
            .iter()
            .map(|p| Regex::new(&format!("(?im){}", p)).unwrap())
            .collect()
    })
}

/// Alternation pattern matching any catalogue emoji, for embedding
pub(crate) fn emoji_alternation() -> String {
    EMOJI_BULLETS
        .iter()
        .map(|g| regex::escape(g))
        .collect::<Vec<_>>()
        .join("|")
}

/// Normalize raw text: artifacts → line joining → spacing → dedupe.
pub fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let text = strip_artifacts(&text);
    let text = join_wrapped_lines(&text);
    let text = normalize_spacing(&text);
    let text = dedupe_lines(&text);
    text.trim().to_string()
}

/// Remove leaked instruction lines, tree glyphs, symbol noise and
/// unpaired bracket-tag remnants.
pub fn strip_artifacts(text: &str) -> String {
    let mut s = text.to_string();
    for re in artifact_res() {
        s = re.replace_all(&s, "").into_owned();
    }
    s = s.replace("└─", "").replace("├─", "").replace('│', "");
    s = s.replace(['\u{2122}', '\u{00AE}', '\u{00A9}'], "");
    strip_unpaired_tags(&s)
}

/// Drop tag tokens that have no matching counterpart: a closer with no
/// opener is a remnant, and vice versa. Balanced pairs are left alone.
fn strip_unpaired_tags(text: &str) -> String {
    let mut s = text.to_string();
    for tag in BLOCK_TAGS {
        let open = format!("[{}]", tag);
        let close = format!("[/{}]", tag);
        let opens = count_ci(&s, &open);
        let closes = count_ci(&s, &close);
        if opens > 0 && closes == 0 {
            s = remove_ci(&s, &open);
        } else if closes > 0 && opens == 0 {
            s = remove_ci(&s, &close);
        }
    }
    s
}

fn count_ci(haystack: &str, needle: &str) -> usize {
    let h = haystack.to_lowercase();
    let n = needle.to_lowercase();
    h.matches(&n).count()
}

fn remove_ci(haystack: &str, needle: &str) -> String {
    let re = Regex::new(&format!("(?i){}", regex::escape(needle))).unwrap();
    re.replace_all(haystack, "").into_owned()
}

/// Per-line pass over the text that leaves bracket-tag interiors alone.
///
/// `f` receives each maximal run of unprotected lines (joined by `\n`) and
/// returns its replacement.
fn map_unprotected_chunks(text: &str, f: impl Fn(&str) -> String) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut chunk: Vec<&str> = Vec::new();
    let mut depth: i32 = 0;

    let flush = |chunk: &mut Vec<&str>, out: &mut Vec<String>, f: &dyn Fn(&str) -> String| {
        if !chunk.is_empty() {
            out.push(f(&chunk.join("\n")));
            chunk.clear();
        }
    };

    for line in text.split('\n') {
        let delta = tag_depth_delta(line);
        let touches_tag = delta != 0 || contains_any_tag(line);
        if depth > 0 || touches_tag {
            flush(&mut chunk, &mut out, &f);
            out.push(line.to_string());
        } else {
            chunk.push(line);
        }
        depth = (depth + delta).max(0);
    }
    flush(&mut chunk, &mut out, &f);
    out.join("\n")
}

fn tag_depth_delta(line: &str) -> i32 {
    let lower = line.to_lowercase();
    let mut delta = 0i32;
    for tag in BLOCK_TAGS {
        let t = tag.to_lowercase();
        delta += lower.matches(&format!("[{}]", t)).count() as i32;
        delta -= lower.matches(&format!("[/{}]", t)).count() as i32;
    }
    delta
}

fn contains_any_tag(line: &str) -> bool {
    let lower = line.to_lowercase();
    BLOCK_TAGS.iter().any(|tag| {
        let t = tag.to_lowercase();
        lower.contains(&format!("[{}]", t)) || lower.contains(&format!("[/{}]", t))
    })
}

/// Join hyphen-broken words across newlines and merge runs of very short
/// lines (≤3 words, no terminal punctuation) into the following content.
/// Also normalizes `•`/`·`-only bullets to `- `.
pub fn join_wrapped_lines(text: &str) -> String {
    map_unprotected_chunks(text, |chunk| {
        static HYPHEN_RE: OnceLock<Regex> = OnceLock::new();
        let hyphen = HYPHEN_RE.get_or_init(|| Regex::new(r"(\w)-[ \t]*\n[ \t]*(\w)").unwrap());
        let s = hyphen.replace_all(chunk, "$1-$2").into_owned();

        let mut rebuilt: Vec<String> = Vec::new();
        let mut buf: Vec<&str> = Vec::new();
        for line in s.split('\n') {
            let t = line.trim();
            if t.is_empty() {
                if !buf.is_empty() {
                    rebuilt.push(buf.join(" "));
                    buf.clear();
                }
                rebuilt.push(String::new());
                continue;
            }
            if is_mergeable_fragment(t) {
                buf.push(t);
                continue;
            }
            if buf.is_empty() || is_structural_line(t) {
                // never merge a short run into a list item or tag line
                if !buf.is_empty() {
                    rebuilt.push(buf.join(" "));
                    buf.clear();
                }
                rebuilt.push(t.to_string());
            } else {
                // short run re-flows into the following content line
                buf.push(t);
                rebuilt.push(buf.join(" "));
                buf.clear();
            }
        }
        if !buf.is_empty() {
            rebuilt.push(buf.join(" "));
        }

        static DOT_BULLET_RE: OnceLock<Regex> = OnceLock::new();
        let dot_bullet = DOT_BULLET_RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*[•·][ \t]*").unwrap());
        dot_bullet.replace_all(&rebuilt.join("\n"), "- ").into_owned()
    })
}

/// A line that looks like a wrapped fragment rather than a structural line
fn is_mergeable_fragment(t: &str) -> bool {
    static TERMINAL_RE: OnceLock<Regex> = OnceLock::new();
    let terminal = TERMINAL_RE.get_or_init(|| Regex::new(r"[.!?؛:،]$").unwrap());
    if t.split_whitespace().count() > 3 || terminal.is_match(t) {
        return false;
    }
    !is_structural_line(t)
}

/// Bullets, numbering, tags and emoji items never take part in re-flow
fn is_structural_line(t: &str) -> bool {
    if t.starts_with(['-', '•', '–', '—', '▪', '·', '<', '[', '#']) {
        return true;
    }
    if t.chars().next().is_some_and(|c| c.is_ascii_digit() || ('\u{0660}'..='\u{0669}').contains(&c))
    {
        return true;
    }
    EMOJI_BULLETS.iter().any(|g| t.starts_with(g))
}

/// Exactly one space after any catalogue emoji; 3+ blank lines collapse to 2.
pub fn normalize_spacing(text: &str) -> String {
    static EMOJI_SPACE_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMOJI_SPACE_RE.get_or_init(|| {
        Regex::new(&format!("({})[ \\t]*(\\S)", emoji_alternation())).unwrap()
    });
    let s = re.replace_all(text, "$1 $2").into_owned();

    static BLANKS_RE: OnceLock<Regex> = OnceLock::new();
    let blanks = BLANKS_RE.get_or_init(|| Regex::new(r"\n{3,}").unwrap());
    blanks.replace_all(&s, "\n\n").into_owned()
}

/// Remove a line whose tag-stripped, whitespace-collapsed, lowercased form
/// already occurred; keeps the first occurrence's original formatting.
pub fn dedupe_lines(text: &str) -> String {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap());
    static HEADING_RE: OnceLock<Regex> = OnceLock::new();
    let heading_re =
        HEADING_RE.get_or_init(|| Regex::new(r"(?i)^\s*<h[1-3]>.*</h[1-3]>\s*$").unwrap());

    let mut seen = std::collections::HashSet::new();
    let mut kept: Vec<&str> = Vec::new();
    let mut depth: i32 = 0;
    for line in text.split('\n') {
        // heading lines legitimately repeat contents entries; they are
        // structure, not repetition
        let protected = depth > 0 || contains_any_tag(line) || heading_re.is_match(line);
        let delta = tag_depth_delta(line);
        depth = (depth + delta).max(0);
        if protected {
            kept.push(line);
            continue;
        }
        let stripped = tag_re.replace_all(line, "");
        let key = stripped
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if key.is_empty() {
            // keep blanks, but never runs of them
            if kept.last().is_some_and(|l| l.trim().is_empty()) {
                continue;
            }
            kept.push("");
            continue;
        }
        if seen.insert(key) {
            kept.push(line);
        }
    }
    kept.join("\n")
}
