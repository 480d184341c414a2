//! Classic template
//!
//! Single-column, direction-aware document: accent cover page, boxed
//! section headings, emoji icon-headings, ordered/unordered/emoji lists,
//! two-column bilingual grids (Arabic right, English left) and the
//! conclusion blockquote. RTL by default, LTR when the language is
//! English.

use std::sync::OnceLock;

use regex::Regex;
use warraq_ast::{Inline, List, ListKind, Node, Paragraph};
use warraq_core::classify::EMOJI_BULLETS;
use warraq_core::parse_inlines;

use super::{
    cover_page, escape_string, footer_settings, glossary_table, text_settings, transpile_inlines,
    RenderContext, ACCENT, BORDER, LIGHT_BG, PRIMARY,
};

pub(super) fn render(ctx: &RenderContext) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "#set document(title: \"{}\")\n",
        escape_string(ctx.title)
    ));
    out.push_str("#set page(paper: \"a4\", margin: 2.5cm)\n");
    out.push_str(text_settings(ctx.direction));
    out.push_str("#set par(leading: 0.85em, justify: true)\n");
    out.push_str(&heading_rules());
    out.push_str(&cover_page(ctx.title, ctx.author_handle, PRIMARY));
    out.push_str(&footer_settings(ctx.author_handle));
    out.push_str(&render_nodes(ctx.nodes));
    out
}

/// Show rules for the boxed h2 / accent h3 look
pub(super) fn heading_rules() -> String {
    format!(
        "#show heading.where(level: 2): it => block(width: 100%, above: 20pt, below: 10pt, \
         fill: rgb(\"#eef5ff\"), inset: 10pt, radius: 10pt, stroke: 1pt + rgb(\"#d7e6ff\"))[\
         #text(size: 17pt, weight: 800, fill: rgb(\"{PRIMARY}\"))[#it.body]]\n\
         #show heading.where(level: 3): it => block(above: 14pt, below: 6pt)[\
         #text(size: 13pt, weight: 800, fill: rgb(\"{ACCENT}\"))[#it.body]]\n"
    )
}

/// Render a node sequence in the classic idiom.
pub(super) fn render_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        out.push_str(&render_node(node));
    }
    out
}

fn render_node(node: &Node) -> String {
    match node {
        Node::Heading(h) => {
            let marker = "=".repeat(h.level.clamp(1, 6) as usize);
            let anchor = h
                .anchor
                .as_ref()
                .map(|a| format!(" <{}>", a))
                .unwrap_or_default();
            format!("{} {}{}\n\n", marker, transpile_inlines(&h.text), anchor)
        }

        Node::Paragraph(p) => match icon_heading_parts(p) {
            Some((lead, content)) => {
                let mut block = format!(
                    "#block(above: 12pt, below: 4pt)[#text(size: 13pt, weight: 800, fill: rgb(\"{ACCENT}\"))[{lead}]]\n"
                );
                if !content.trim().is_empty() {
                    block.push_str(&format!("#pad(x: 16pt)[{}]\n\n", content));
                } else {
                    block.push('\n');
                }
                block
            }
            None => format!("{}\n\n", transpile_inlines(&p.inlines)),
        },

        Node::List(list) => render_list(list),

        // a one-line Q&A renders as two paragraphs
        Node::QaBlock(qa) => format!(
            "#strong[❓ {}]\n\n✅ {}\n\n",
            transpile_inlines(&qa.question),
            transpile_inlines(&qa.answer)
        ),

        Node::BilingualGrid(grid) => {
            let english = paragraphs_markup(&grid.english);
            let arabic = styled_arabic_block(&grid.arabic);
            format!(
                "#block(width: 100%, fill: rgb(\"{LIGHT_BG}\"), stroke: 1pt + rgb(\"{BORDER}\"), radius: 10pt, inset: 12pt)[\n\
                 #grid(columns: (1fr, 1fr), column-gutter: 14pt,\n\
                 [#set text(dir: ltr, lang: \"en\")\n{english}],\n\
                 [#set text(dir: rtl, lang: \"ar\")\n{arabic}],\n)]\n\n"
            )
        }

        Node::Blockquote(quote) => {
            let inner = render_nodes(&quote.content);
            format!("#quote(block: true)[\n{}]\n\n", inner)
        }

        Node::GlossaryTable(table) => glossary_table(&table.entries),
    }
}

fn render_list(list: &List) -> String {
    let mut out = String::new();
    match list.kind {
        ListKind::Ordered => {
            for item in &list.items {
                out.push_str(&format!("+ {}\n", transpile_inlines(item)));
            }
        }
        ListKind::Unordered => {
            for item in &list.items {
                out.push_str(&format!("- {}\n", transpile_inlines(item)));
            }
        }
        ListKind::Emoji => {
            // the glyph is the bullet; suppress the decorative marker
            out.push_str("#list(marker: none,\n");
            for item in &list.items {
                out.push_str(&format!("  [{}],\n", transpile_inlines(item)));
            }
            out.push_str(")\n");
        }
    }
    out.push('\n');
    out
}

/// Detect an icon heading: a paragraph whose text starts with a catalogue
/// emoji followed by a bold run, e.g. `💡 **Key Idea:** content`.
///
/// Returns (lead markup, trailing content markup).
fn icon_heading_parts(p: &Paragraph) -> Option<(String, String)> {
    let (first, rest) = p.inlines.split_first()?;
    let Inline::Text(prefix) = first else {
        return None;
    };
    let glyph = EMOJI_BULLETS
        .iter()
        .find(|g| prefix.trim_start().starts_with(*g))?;
    // only the bare glyph (and optional bullet dash) may precede the bold run
    let between = prefix.trim_start().trim_start_matches(*glyph).trim();
    if !between.is_empty() {
        return None;
    }
    let (bold, content) = rest.split_first()?;
    let Inline::Format(warraq_ast::FormatType::Bold, heading) = bold else {
        return None;
    };

    let lead = format!("{} {}", glyph, transpile_inlines(&[(**heading).clone()]));
    let mut body = transpile_inlines(content);
    if let Some(stripped) = body.trim_start().strip_prefix(':') {
        body = stripped.trim_start().to_string();
    }
    Some((lead, body))
}

/// Split raw text on blank lines into transpiled paragraphs.
pub(super) fn paragraphs_markup(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| transpile_inlines(&parse_inlines(l)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Arabic column with the `✅ الخلاصة:` / `🔍 التفاصيل:` labels styled.
fn styled_arabic_block(text: &str) -> String {
    static SUMMARY_RE: OnceLock<Regex> = OnceLock::new();
    static DETAILS_RE: OnceLock<Regex> = OnceLock::new();
    let summary =
        SUMMARY_RE.get_or_init(|| Regex::new(r"\*{0,2}\s*(?:✅\s*)?الخلاصة\s*:\s*\*{0,2}").unwrap());
    let details =
        DETAILS_RE.get_or_init(|| Regex::new(r"\*{0,2}\s*(?:🔍\s*)?التفاصيل\s*:\s*\*{0,2}").unwrap());

    let mut out = String::new();
    for line in text.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(m) = summary.find(line) {
            out.push_str(&label_line("✅ الخلاصة:", &line[m.end()..]));
        } else if let Some(m) = details.find(line) {
            out.push_str(&label_line("🔍 التفاصيل:", &line[m.end()..]));
        } else {
            out.push_str(&transpile_inlines(&parse_inlines(line)));
            out.push_str("\n\n");
        }
    }
    out
}

fn label_line(label: &str, rest: &str) -> String {
    let mut s = format!("#text(weight: 700, fill: rgb(\"{ACCENT}\"))[{label}]\n\n");
    let rest = rest.trim();
    if !rest.is_empty() {
        s.push_str(&transpile_inlines(&parse_inlines(rest)));
        s.push_str("\n\n");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use warraq_ast::{BilingualGrid, Direction, Heading, QaBlock};

    fn ctx<'a>(nodes: &'a [Node]) -> RenderContext<'a> {
        RenderContext {
            title: "Demo",
            author_handle: "study_bot",
            direction: Direction::Rtl,
            nodes,
            segments: &[],
            glossary: &[],
            raw_text: "",
        }
    }

    #[test]
    fn test_title_rendered_once() {
        let nodes = vec![Node::Paragraph(Paragraph {
            inlines: vec![Inline::text("body")],
        })];
        let markup = render(&ctx(&nodes));
        assert_eq!(markup.matches("[Demo]").count(), 1);
        assert!(markup.contains("#set document(title: \"Demo\")"));
    }

    #[test]
    fn test_heading_keeps_anchor() {
        let nodes = vec![Node::Heading(Heading {
            level: 2,
            text: vec![Inline::text("Methods")],
            anchor: Some("sec2_1".to_string()),
        })];
        let markup = render_nodes(&nodes);
        assert!(markup.contains("== Methods <sec2_1>"));
    }

    #[test]
    fn test_qa_block_renders_as_two_paragraphs() {
        let nodes = vec![Node::QaBlock(QaBlock {
            question: vec![Inline::text("What is bias?")],
            answer: vec![Inline::text("A systematic error.")],
        })];
        let markup = render_nodes(&nodes);
        assert!(markup.contains("#strong[❓ What is bias?]\n\n✅ A systematic error."));
    }

    #[test]
    fn test_emoji_list_suppresses_marker() {
        let nodes = vec![Node::List(List {
            kind: ListKind::Emoji,
            items: vec![vec![Inline::text("💡 idea")]],
        })];
        let markup = render_nodes(&nodes);
        assert!(markup.contains("marker: none"));
        assert!(markup.contains("💡 idea"));
    }

    #[test]
    fn test_icon_heading_detection() {
        let p = Paragraph {
            inlines: parse_inlines("💡 **Key Idea:** sleep consolidates memory"),
        };
        let (lead, content) = icon_heading_parts(&p).expect("icon heading");
        assert!(lead.contains("💡"));
        assert!(lead.contains("Key Idea"));
        assert!(content.contains("sleep consolidates memory"));
    }

    #[test]
    fn test_plain_paragraph_is_not_icon_heading() {
        let p = Paragraph {
            inlines: parse_inlines("An ordinary sentence with **bold** inside."),
        };
        assert!(icon_heading_parts(&p).is_none());
    }

    #[test]
    fn test_bilingual_grid_sides_and_directions() {
        let nodes = vec![Node::BilingualGrid(BilingualGrid {
            english: "English text".to_string(),
            arabic: "✅ الخلاصة: نص عربي".to_string(),
        })];
        let markup = render_nodes(&nodes);
        let ltr = markup.find("dir: ltr").unwrap();
        let rtl = markup.find("dir: rtl").unwrap();
        assert!(ltr < rtl, "English column must come first (left)");
        assert!(markup.contains("✅ الخلاصة:"));
    }
}
