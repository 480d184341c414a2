//! Inline formatting parser
//!
//! Converts `**bold**` and the inline HTML allow-list into `Inline` trees.
//! Anything outside the allow-list stays literal text, which the templates
//! escape; this is the only path by which styling survives into output.
//!
//! Allow-list: `**…**`/`<strong>` → Bold, `<b>` → Highlight, `<i>`/`<em>`
//! → Italic, `<span>` → Span, `<sup>`/`<sub>`, `<br>` → Break.

use std::sync::OnceLock;

use regex::Regex;
use warraq_ast::{FormatType, Inline};

struct InlineRule {
    re: &'static Regex,
    kind: RuleKind,
}

enum RuleKind {
    Format(FormatType),
    Span,
    Break,
}

fn rules() -> &'static Vec<InlineRule> {
    static BOLD_MD: OnceLock<Regex> = OnceLock::new();
    static STRONG: OnceLock<Regex> = OnceLock::new();
    static B: OnceLock<Regex> = OnceLock::new();
    static I: OnceLock<Regex> = OnceLock::new();
    static EM: OnceLock<Regex> = OnceLock::new();
    static SUP: OnceLock<Regex> = OnceLock::new();
    static SUB: OnceLock<Regex> = OnceLock::new();
    static SPAN: OnceLock<Regex> = OnceLock::new();
    static BR: OnceLock<Regex> = OnceLock::new();
    static RULES: OnceLock<Vec<InlineRule>> = OnceLock::new();

    RULES.get_or_init(|| {
        vec![
            InlineRule {
                re: BOLD_MD.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap()),
                kind: RuleKind::Format(FormatType::Bold),
            },
            InlineRule {
                re: STRONG
                    .get_or_init(|| Regex::new(r"(?is)<strong>(.*?)</strong>").unwrap()),
                kind: RuleKind::Format(FormatType::Bold),
            },
            InlineRule {
                re: B.get_or_init(|| Regex::new(r"(?is)<b>(.*?)</b>").unwrap()),
                kind: RuleKind::Format(FormatType::Highlight),
            },
            InlineRule {
                re: I.get_or_init(|| Regex::new(r"(?is)<i>(.*?)</i>").unwrap()),
                kind: RuleKind::Format(FormatType::Italic),
            },
            InlineRule {
                re: EM.get_or_init(|| Regex::new(r"(?is)<em>(.*?)</em>").unwrap()),
                kind: RuleKind::Format(FormatType::Italic),
            },
            InlineRule {
                re: SUP.get_or_init(|| Regex::new(r"(?is)<sup>(.*?)</sup>").unwrap()),
                kind: RuleKind::Format(FormatType::Superscript),
            },
            InlineRule {
                re: SUB.get_or_init(|| Regex::new(r"(?is)<sub>(.*?)</sub>").unwrap()),
                kind: RuleKind::Format(FormatType::Subscript),
            },
            InlineRule {
                re: SPAN
                    .get_or_init(|| Regex::new(r"(?is)<span[^>]*>(.*?)</span>").unwrap()),
                kind: RuleKind::Span,
            },
            InlineRule {
                re: BR.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").unwrap()),
                kind: RuleKind::Break,
            },
        ]
    })
}

/// Parse inline formatting in text.
///
/// Scans left to right; at each step the earliest match of any rule wins,
/// its content becomes a formatted run, and scanning continues after it.
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut result = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        let earliest = rules()
            .iter()
            .filter_map(|rule| rule.re.captures(remaining).map(|caps| (rule, caps)))
            .min_by_key(|(_, caps)| caps.get(0).unwrap().start());

        match earliest {
            Some((rule, caps)) => {
                let m = caps.get(0).unwrap();
                if m.start() > 0 {
                    result.push(Inline::Text(remaining[..m.start()].to_string()));
                }
                let content = caps.get(1).map(|c| c.as_str()).unwrap_or("");
                match &rule.kind {
                    RuleKind::Format(format) => result.push(Inline::Format(
                        format.clone(),
                        Box::new(Inline::Text(content.to_string())),
                    )),
                    RuleKind::Span => result.push(Inline::Span(vec![Inline::Text(
                        content.to_string(),
                    )])),
                    RuleKind::Break => result.push(Inline::Break),
                }
                remaining = &remaining[m.end()..];
            }
            None => {
                result.push(Inline::Text(remaining.to_string()));
                break;
            }
        }
    }

    if result.is_empty() {
        result.push(Inline::Text(String::new()));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_bold() {
        let inlines = parse_inlines("a **key** term");
        assert_eq!(
            inlines,
            vec![
                Inline::Text("a ".to_string()),
                Inline::Format(FormatType::Bold, Box::new(Inline::Text("key".to_string()))),
                Inline::Text(" term".to_string()),
            ]
        );
    }

    #[test]
    fn test_b_tag_is_highlight() {
        let inlines = parse_inlines("the <b>prevalence</b> rate");
        assert!(matches!(
            &inlines[1],
            Inline::Format(FormatType::Highlight, _)
        ));
    }

    #[test]
    fn test_br_and_unknown_tag() {
        let inlines = parse_inlines("line<br/>next <video>x</video>");
        assert!(inlines.contains(&Inline::Break));
        // unknown tags stay literal
        assert!(inlines
            .iter()
            .any(|i| matches!(i, Inline::Text(t) if t.contains("<video>"))));
    }

    #[test]
    fn test_earliest_match_wins() {
        let inlines = parse_inlines("<em>first</em> then **second**");
        assert!(matches!(
            &inlines[0],
            Inline::Format(FormatType::Italic, _)
        ));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_inlines(""), vec![Inline::Text(String::new())]);
    }
}
