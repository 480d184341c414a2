//! Line classifier
//!
//! Classifies one logical line into a tagged variant. The priority order
//! below is the contract; it resolves every ambiguity deterministically
//! and rule 10 is a total catch-all, so no line is ever unclassified.
//!
//! Priority order (first match wins):
//!  1. blank line
//!  2. explicit heading tag (`<h1>`/`<h2>`/`<h3>`)
//!  3. "Contents"-style heading (literal allow-list, English + Arabic)
//!  4. "Executive Snapshot" heading (literal allow-list)
//!  5. one-line Q&A (`❓ question — ✅ answer`)
//!  6. numbered item (Latin or Arabic-Indic digits, `.`/`)` separator)
//!  7. bulleted item (`-`, `•`, `–`, `—`, `▪`, `·`)
//!  8. emoji-prefixed item (fixed catalogue, glyph preserved)
//!  9. single-line `<blockquote>`
//! 10. plain line

use std::sync::OnceLock;

use regex::Regex;

use crate::normalize::emoji_alternation;
pub use crate::normalize::EMOJI_BULLETS;

/// Classification result for one logical line
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass {
    /// Empty or whitespace-only line
    Blank,
    /// `<h1>`–`<h3>` heading tag with its inner text
    HtmlHeading { level: u8, text: String },
    /// A heading that opens a table-of-contents run
    ContentsHeading,
    /// The "Executive Snapshot" heading (its block is dropped)
    SnapshotHeading,
    /// `❓ question — ✅ answer` on one line
    QaOneLiner { question: String, answer: String },
    /// `1.` / `1)` / `١.` item body
    NumberedItem { body: String },
    /// `- ` / `• ` item body
    BulletItem { body: String },
    /// Catalogue-emoji item; the glyph is kept
    EmojiItem { glyph: String, body: String },
    /// One-line `<blockquote>…</blockquote>`
    QuoteLine { text: String },
    /// Anything else
    Plain,
}

/// Literal headings that open a contents run.
///
/// These are a product decision carried over verbatim, not a general rule:
/// only these exact strings collapse into an inline enumeration.
pub const CONTENTS_HEADINGS: &[&str] =
    &["Contents", "Document Contents", "محتويات المستند", "محتويات"];

/// Literal heading whose block is dropped entirely
pub const SNAPSHOT_HEADING: &str = "executive snapshot";

/// Section headings that terminate a dropped snapshot block
pub const SECTION_STOP_HEADINGS: &[&str] = &[
    "Complete Outline",
    "Concepts & Definitions",
    "Key Facts & Numbers",
    "Symbols & Notation",
    "Formulas & Calculations",
    "Processes & Steps",
    "Examples & Analogies",
    "Common Pitfalls",
    "Q&A Checkpoints",
    "Final Takeaway",
    "المخطط الكامل",
    "المفاهيم والتعاريف",
    "حقائق وأرقام",
    "الرموز والاصطلاحات",
    "معادلات وحسابات",
    "العمليات والخطوات",
    "أمثلة وتشبيهات",
    "مزالق شائعة",
    "أسئلة ومراجعات",
    "الخلاصة النهائية",
];

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*<h([1-3])>(.*?)</h[1-3]>\s*$").unwrap())
}

fn qa_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*❓\s*(.*?)\s*[—–-]\s*✅?\s*(.*?)\s*$").unwrap())
}

fn numbered_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*[0-9٠-٩]+[.)]\s+(.*)$").unwrap())
}

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*[-•–—▪·]\s+(.*)$").unwrap())
}

fn emoji_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^\s*({})\s+(.*)$", emoji_alternation())).unwrap()
    })
}

fn quote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*<blockquote>(.*?)</blockquote>\s*$").unwrap())
}

/// Classify one line, testing the rules in the documented priority order.
pub fn classify_line(line: &str) -> LineClass {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineClass::Blank;
    }

    if let Some(caps) = heading_re().captures(trimmed) {
        let level: u8 = caps[1].parse().unwrap_or(2);
        let text = caps[2].trim().to_string();
        if level == 2 && text.to_lowercase() == SNAPSHOT_HEADING {
            return LineClass::SnapshotHeading;
        }
        return LineClass::HtmlHeading { level, text };
    }

    if CONTENTS_HEADINGS.contains(&trimmed) {
        return LineClass::ContentsHeading;
    }

    if trimmed.to_lowercase() == SNAPSHOT_HEADING {
        return LineClass::SnapshotHeading;
    }

    if let Some(caps) = qa_re().captures(trimmed) {
        let question = caps[1].trim().to_string();
        let answer = caps[2].trim().to_string();
        if !question.is_empty() && !answer.is_empty() {
            return LineClass::QaOneLiner { question, answer };
        }
    }

    if let Some(caps) = numbered_re().captures(trimmed) {
        return LineClass::NumberedItem {
            body: caps[1].trim().to_string(),
        };
    }

    if let Some(caps) = bullet_re().captures(trimmed) {
        return LineClass::BulletItem {
            body: caps[1].trim().to_string(),
        };
    }

    if let Some(caps) = emoji_re().captures(trimmed) {
        return LineClass::EmojiItem {
            glyph: caps[1].to_string(),
            body: caps[2].trim().to_string(),
        };
    }

    if let Some(caps) = quote_re().captures(trimmed) {
        return LineClass::QuoteLine {
            text: caps[1].trim().to_string(),
        };
    }

    LineClass::Plain
}

/// Split a list-item body on `;`/`؛` into one-idea-per-item clauses.
///
/// Returns at least one clause; callers replicate the item marker when the
/// split produces siblings.
pub fn split_semicolon_clauses(body: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s*[;؛]\s+").unwrap());
    let parts: Vec<String> = re
        .split(body.trim())
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        vec![body.trim().to_string()]
    } else {
        parts
    }
}

/// True if the trimmed line is one of the known section-stop headings
pub fn is_stop_heading(line: &str) -> bool {
    let t = line.trim();
    SECTION_STOP_HEADINGS.contains(&t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank() {
        assert_eq!(classify_line("   "), LineClass::Blank);
    }

    #[test]
    fn test_html_headings() {
        assert_eq!(
            classify_line("<h2>Study Design</h2>"),
            LineClass::HtmlHeading {
                level: 2,
                text: "Study Design".to_string()
            }
        );
        assert_eq!(
            classify_line("<H3>Cohorts</H3>"),
            LineClass::HtmlHeading {
                level: 3,
                text: "Cohorts".to_string()
            }
        );
    }

    #[test]
    fn test_contents_literals() {
        assert_eq!(classify_line("Contents"), LineClass::ContentsHeading);
        assert_eq!(classify_line("محتويات المستند"), LineClass::ContentsHeading);
        // not in the allow-list
        assert_eq!(classify_line("Table of Contents"), LineClass::Plain);
    }

    #[test]
    fn test_snapshot_literals() {
        assert_eq!(classify_line("Executive Snapshot"), LineClass::SnapshotHeading);
        assert_eq!(
            classify_line("<h2>Executive Snapshot</h2>"),
            LineClass::SnapshotHeading
        );
    }

    #[test]
    fn test_qa_one_liner() {
        assert_eq!(
            classify_line("❓ What is bias? — ✅ A systematic error."),
            LineClass::QaOneLiner {
                question: "What is bias?".to_string(),
                answer: "A systematic error.".to_string()
            }
        );
    }

    #[test]
    fn test_numbered_latin_and_arabic_indic() {
        assert_eq!(
            classify_line("1. First point"),
            LineClass::NumberedItem {
                body: "First point".to_string()
            }
        );
        assert_eq!(
            classify_line("٢) نقطة ثانية"),
            LineClass::NumberedItem {
                body: "نقطة ثانية".to_string()
            }
        );
    }

    #[test]
    fn test_bullets() {
        for line in ["- a", "• a", "– a", "— a", "▪ a", "· a"] {
            assert_eq!(
                classify_line(line),
                LineClass::BulletItem {
                    body: "a".to_string()
                },
                "line: {line}"
            );
        }
    }

    #[test]
    fn test_emoji_item_keeps_glyph() {
        assert_eq!(
            classify_line("💡 key idea"),
            LineClass::EmojiItem {
                glyph: "💡".to_string(),
                body: "key idea".to_string()
            }
        );
    }

    #[test]
    fn test_qa_wins_over_emoji() {
        // ❓ is also in the emoji catalogue; the Q&A rule is tested first
        assert!(matches!(
            classify_line("❓ q — ✅ a"),
            LineClass::QaOneLiner { .. }
        ));
        assert!(matches!(
            classify_line("❓ open question with no answer"),
            LineClass::EmojiItem { .. }
        ));
    }

    #[test]
    fn test_plain_catch_all() {
        assert_eq!(classify_line("Just a sentence."), LineClass::Plain);
        assert_eq!(classify_line("<video>x</video>"), LineClass::Plain);
    }

    #[test]
    fn test_split_semicolon_clauses() {
        assert_eq!(
            split_semicolon_clauses("دواء: جرعة أولى؛ جرعة ثانية"),
            vec!["دواء: جرعة أولى", "جرعة ثانية"]
        );
        assert_eq!(split_semicolon_clauses("one idea"), vec!["one idea"]);
    }
}
