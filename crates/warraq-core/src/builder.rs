//! Document model builder
//!
//! Single forward scan over normalized text producing an ordered node
//! sequence. Node order mirrors source line order with two documented
//! exceptions: a `[CONCLUSION]` block is relocated to the very end, and an
//! "Executive Snapshot" block is dropped entirely.

use std::sync::OnceLock;

use regex::Regex;
use warraq_ast::{
    BilingualGrid, Blockquote, Direction, Document, DocumentMeta, Heading, Inline, List, ListKind,
    Node, Paragraph, QaBlock,
};

use crate::classify::{classify_line, is_stop_heading, split_semicolon_clauses, LineClass};
use crate::inline::parse_inlines;

fn h1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<h1>(.*?)</h1>").unwrap())
}

fn conclusion_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)\[CONCLUSION\](.*?)\[/CONCLUSION\]").unwrap())
}

fn bilingual_pair_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)\[ENG\](.*?)\[/ENG\]\s*\[ARB\](.*?)\[/ARB\]").unwrap())
}

/// Extract the first `<h1>` as a title override, removing it from the body.
///
/// Exactly one title is rendered: an explicit body `<h1>` replaces the
/// caller-supplied title instead of duplicating it.
pub fn extract_title(text: &str) -> (Option<String>, String) {
    if let Some(caps) = h1_re().captures(text) {
        let title = caps[1].trim().to_string();
        let whole = caps.get(0).unwrap();
        let mut body = String::with_capacity(text.len());
        body.push_str(&text[..whole.start()]);
        body.push_str(&text[whole.end()..]);
        return (Some(title), body);
    }
    (None, text.to_string())
}

/// Build a complete document from normalized text.
pub fn build_document(
    text: &str,
    fallback_title: &str,
    author_handle: &str,
    direction: Direction,
) -> Document {
    let (extracted, body) = extract_title(text);
    let title = extracted.unwrap_or_else(|| fallback_title.to_string());
    Document {
        meta: DocumentMeta {
            title,
            author_handle: author_handle.to_string(),
            direction,
        },
        nodes: build_nodes(&body),
    }
}

/// Build the ordered node sequence for a body (title already extracted).
pub fn build_nodes(text: &str) -> Vec<Node> {
    // conclusion first: pulled out and relocated to the end
    let (conclusion, text) = extract_conclusion(text);

    // leftover raw bilingual pairs become grids, appended after the rest
    let mut grids = Vec::new();
    for caps in bilingual_pair_re().captures_iter(&text) {
        grids.push(Node::BilingualGrid(BilingualGrid {
            english: caps[1].trim().to_string(),
            arabic: caps[2].trim().to_string(),
        }));
    }
    let remaining = bilingual_pair_re().replace_all(&text, "").into_owned();

    let mut nodes = scan_lines(&remaining);
    nodes.extend(grids);
    if let Some(quote) = conclusion {
        nodes.push(quote);
    }
    nodes
}

/// Pull out a well-formed conclusion block, rewriting its known English
/// labels to the bilingual emoji-led forms.
fn extract_conclusion(text: &str) -> (Option<Node>, String) {
    let Some(caps) = conclusion_re().captures(text) else {
        return (None, text.to_string());
    };

    static THESIS_RE: OnceLock<Regex> = OnceLock::new();
    static MATTERS_RE: OnceLock<Regex> = OnceLock::new();
    let thesis = THESIS_RE.get_or_init(|| {
        Regex::new(r"(?i)\*\*Thesis Statement\s*/\s*The Big Idea[^:]*:\s*").unwrap()
    });
    let matters =
        MATTERS_RE.get_or_init(|| Regex::new(r"(?i)\*\*Why It Matters[^:]*:\s*").unwrap());

    let inner = caps[1].trim().to_string();
    let inner = thesis.replace_all(&inner, "🎯 الخلاصة الكبرى: ").into_owned();
    let inner = matters.replace_all(&inner, "🚀 لماذا يهم: ").into_owned();

    let mut content = vec![Node::Heading(Heading {
        level: 2,
        text: vec![Inline::text("الخلاصة النهائية")],
        anchor: None,
    })];
    content.extend(scan_lines(&inner));

    let body = conclusion_re().replace_all(text, "").into_owned();
    (Some(Node::Blockquote(Blockquote { content })), body)
}

/// Scanner state: either between blocks or accumulating a list
enum ScanState {
    Default,
    InList(ListKind, Vec<Vec<Inline>>),
}

struct Scanner {
    nodes: Vec<Node>,
    state: ScanState,
    h2_count: usize,
    h3_count: usize,
}

impl Scanner {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            state: ScanState::Default,
            h2_count: 0,
            h3_count: 0,
        }
    }

    fn flush(&mut self) {
        if let ScanState::InList(kind, items) =
            std::mem::replace(&mut self.state, ScanState::Default)
        {
            if !items.is_empty() {
                self.nodes.push(Node::List(List { kind, items }));
            }
        }
    }

    fn push_item(&mut self, kind: ListKind, item: Vec<Inline>) {
        match &mut self.state {
            ScanState::InList(current, items) if *current == kind => items.push(item),
            _ => {
                self.flush();
                self.state = ScanState::InList(kind, vec![item]);
            }
        }
    }

    fn push_heading(&mut self, level: u8, text: &str) {
        self.flush();
        let anchor = match level {
            2 => {
                self.h2_count += 1;
                self.h3_count = 0;
                Some(format!("sec2_{}", self.h2_count))
            }
            3 => {
                self.h3_count += 1;
                Some(format!("sec3_{}_{}", self.h2_count, self.h3_count))
            }
            _ => None,
        };
        self.nodes.push(Node::Heading(Heading {
            level,
            text: parse_inlines(text),
            anchor,
        }));
    }
}

fn scan_lines(text: &str) -> Vec<Node> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut scanner = Scanner::new();
    let mut i = 0;

    while i < lines.len() {
        match classify_line(lines[i]) {
            LineClass::Blank => {
                scanner.flush();
                i += 1;
            }
            LineClass::HtmlHeading { level, text } => {
                scanner.push_heading(level, &text);
                i += 1;
            }
            LineClass::ContentsHeading => {
                scanner.flush();
                i += 1;
                i = collapse_contents_run(&lines, i, &mut scanner);
            }
            LineClass::SnapshotHeading => {
                scanner.flush();
                i += 1;
                i = skip_snapshot_block(&lines, i);
            }
            LineClass::QaOneLiner { question, answer } => {
                scanner.flush();
                scanner.nodes.push(Node::QaBlock(QaBlock {
                    question: parse_inlines(&question),
                    answer: parse_inlines(&answer),
                }));
                i += 1;
            }
            LineClass::NumberedItem { body } => {
                for clause in split_semicolon_clauses(&body) {
                    scanner.push_item(ListKind::Ordered, parse_inlines(&clause));
                }
                i += 1;
            }
            LineClass::BulletItem { body } => {
                for clause in split_semicolon_clauses(&body) {
                    scanner.push_item(ListKind::Unordered, parse_inlines(&clause));
                }
                i += 1;
            }
            LineClass::EmojiItem { glyph, body } => {
                // the marker glyph is replicated onto each exploded clause
                for clause in split_semicolon_clauses(&body) {
                    scanner.push_item(
                        ListKind::Emoji,
                        parse_inlines(&format!("{} {}", glyph, clause)),
                    );
                }
                i += 1;
            }
            LineClass::QuoteLine { text } => {
                scanner.flush();
                scanner.nodes.push(Node::Blockquote(Blockquote {
                    content: vec![Node::Paragraph(Paragraph {
                        inlines: parse_inlines(&text),
                    })],
                }));
                i += 1;
            }
            LineClass::Plain => {
                scanner.flush();
                scanner.nodes.push(Node::Paragraph(Paragraph {
                    inlines: parse_inlines(lines[i].trim()),
                }));
                i += 1;
            }
        }
    }

    scanner.flush();
    scanner.nodes
}

/// Collapse the short lines following a Contents heading into one inline
/// enumerated paragraph: `1) A · 2) B · …`. Any Executive Snapshot line in
/// the run is filtered out.
fn collapse_contents_run(lines: &[&str], mut i: usize, scanner: &mut Scanner) -> usize {
    let mut items: Vec<String> = Vec::new();
    while i < lines.len() {
        let raw = lines[i].trim();
        if raw.is_empty() || raw.to_lowercase().starts_with("<h2>") {
            break;
        }
        let item = raw.trim_matches(['-', '•', ' ']).trim();
        if !item.is_empty() && !item.to_lowercase().starts_with("executive snapshot") {
            items.push(item.to_string());
        }
        i += 1;
    }
    if !items.is_empty() {
        let enumerated = items
            .iter()
            .enumerate()
            .map(|(idx, it)| format!("{}) {}", idx + 1, it))
            .collect::<Vec<_>>()
            .join(" · ");
        scanner.nodes.push(Node::Paragraph(Paragraph {
            inlines: vec![Inline::Text(enumerated)],
        }));
    }
    i
}

/// Skip an Executive Snapshot block: everything up to the next blank line,
/// stop heading, or `<h2>` boundary.
fn skip_snapshot_block(lines: &[&str], mut i: usize) -> usize {
    while i < lines.len() {
        let t = lines[i].trim();
        if t.is_empty() {
            return i + 1;
        }
        if is_stop_heading(t) || t.to_lowercase().starts_with("<h2>") {
            return i;
        }
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use warraq_ast::plain_text;

    fn texts(nodes: &[Node]) -> Vec<String> {
        nodes
            .iter()
            .map(|n| match n {
                Node::Heading(h) => format!("h{}:{}", h.level, plain_text(&h.text)),
                Node::Paragraph(p) => format!("p:{}", plain_text(&p.inlines)),
                Node::List(l) => format!(
                    "list[{}]",
                    l.items
                        .iter()
                        .map(|it| plain_text(it))
                        .collect::<Vec<_>>()
                        .join("|")
                ),
                Node::BilingualGrid(g) => format!("grid:{}/{}", g.english, g.arabic),
                Node::QaBlock(q) => {
                    format!("qa:{}/{}", plain_text(&q.question), plain_text(&q.answer))
                }
                Node::Blockquote(_) => "quote".to_string(),
                Node::GlossaryTable(_) => "glossary".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_extract_title() {
        let (title, body) = extract_title("<h1>Demo</h1>\nrest of body");
        assert_eq!(title.as_deref(), Some("Demo"));
        assert!(!body.contains("<h1>"));
        assert!(body.contains("rest of body"));
    }

    #[test]
    fn test_heading_anchor_numbering() {
        let nodes = build_nodes("<h2>A</h2>\n<h3>A1</h3>\n<h3>A2</h3>\n<h2>B</h2>\n<h3>B1</h3>");
        let anchors: Vec<_> = nodes
            .iter()
            .filter_map(|n| match n {
                Node::Heading(h) => h.anchor.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(anchors, vec!["sec2_1", "sec3_1_1", "sec3_1_2", "sec2_2", "sec3_2_1"]);
    }

    #[test]
    fn test_list_semicolon_explosion() {
        let nodes = build_nodes("- دواء: جرعة أولى؛ جرعة ثانية");
        assert_eq!(
            texts(&nodes),
            vec!["list[دواء: جرعة أولى|جرعة ثانية]".to_string()]
        );
    }

    #[test]
    fn test_emoji_marker_replicated_on_explosion() {
        let nodes = build_nodes("💡 first idea; second idea");
        assert_eq!(
            texts(&nodes),
            vec!["list[💡 first idea|💡 second idea]".to_string()]
        );
    }

    #[test]
    fn test_conclusion_relocated_to_end() {
        let input = "[CONCLUSION]**Why It Matters**: sleep repairs memory[/CONCLUSION]\nBody paragraph.";
        let nodes = build_nodes(input);
        assert!(matches!(nodes.first(), Some(Node::Paragraph(_))));
        let Some(Node::Blockquote(quote)) = nodes.last() else {
            panic!("conclusion must be the final node");
        };
        // heading + rewritten label
        assert!(matches!(&quote.content[0], Node::Heading(h) if plain_text(&h.text) == "الخلاصة النهائية"));
        let body = texts(&quote.content[1..]);
        assert!(body[0].contains("🚀 لماذا يهم:"), "{body:?}");
    }

    #[test]
    fn test_contents_run_collapses() {
        let input = "Contents\nSectionA\nSectionB\n\n<h2>SectionA</h2>\ntext";
        let nodes = build_nodes(input);
        assert_eq!(
            texts(&nodes)[0],
            "p:1) SectionA · 2) SectionB".to_string()
        );
    }

    #[test]
    fn test_contents_run_filters_snapshot() {
        let input = "Contents\nSectionA\nExecutive Snapshot\nSectionB\n";
        let nodes = build_nodes(input);
        assert_eq!(texts(&nodes)[0], "p:1) SectionA · 2) SectionB");
    }

    #[test]
    fn test_snapshot_block_dropped() {
        let input = "Executive Snapshot\n- filler one\n- filler two\n\nReal paragraph.";
        let nodes = build_nodes(input);
        assert_eq!(texts(&nodes), vec!["p:Real paragraph.".to_string()]);
    }

    #[test]
    fn test_qa_one_liner_becomes_qa_block() {
        let nodes = build_nodes("❓ What is prevalence? — ✅ All current cases.");
        assert_eq!(
            texts(&nodes),
            vec!["qa:What is prevalence?/All current cases.".to_string()]
        );
    }

    #[test]
    fn test_leftover_bilingual_pair_becomes_grid() {
        let nodes = build_nodes("Intro line.\n[ENG]Hello[/ENG][ARB]مرحبا[/ARB]");
        assert_eq!(
            texts(&nodes),
            vec!["p:Intro line.".to_string(), "grid:Hello/مرحبا".to_string()]
        );
    }

    #[test]
    fn test_source_order_preserved_without_exceptions() {
        let input = "<h2>One</h2>\npara a\n- x\n- y\n<h2>Two</h2>\npara b";
        let nodes = build_nodes(input);
        assert_eq!(
            texts(&nodes),
            vec!["h2:One", "p:para a", "list[x|y]", "h2:Two", "p:para b"]
        );
    }

    #[test]
    fn test_end_to_end_demo_list() {
        let (title, body) = extract_title("<h1>Demo</h1>\n- point one\n- point two; point three");
        assert_eq!(title.as_deref(), Some("Demo"));
        let nodes = build_nodes(&body);
        assert_eq!(
            texts(&nodes),
            vec!["list[point one|point two|point three]".to_string()]
        );
    }
}
