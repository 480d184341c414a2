//! Dual-language template
//!
//! One card per bilingual segment: English block on top, Arabic below,
//! optional takeaways. Advantage/disadvantage headings with equal-length
//! itemized sides additionally render a zipped two-column comparison
//! table. The merged glossary renders as a table at the end.

use std::sync::OnceLock;

use regex::Regex;
use warraq_ast::Segment;
use warraq_core::parse_inlines;

use super::{
    escape_content, escape_string, glossary_table, transpile_inlines, RenderContext, NAVY,
};

fn adv_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*(advantages|disadvantages|pros|cons)\b").unwrap())
}

fn numbered_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:[0-9٠-٩]+[.)]|[-•])\s*(.*)$").unwrap())
}

fn category_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `Key: a, b` or Arabic inclusion verbs standing in for the colon
    RE.get_or_init(|| {
        Regex::new(r"^(?P<k>[^:：]+?)\s*(?:[:：]|(?:تشمل|تضم|تشتمل\s+على|تتضمن)\s+)(?P<v>.+)$")
            .unwrap()
    })
}

pub(super) fn render(ctx: &RenderContext) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "#set document(title: \"{}\")\n",
        escape_string(ctx.title)
    ));
    out.push_str("#set page(paper: \"a4\", margin: 2.2cm)\n");
    out.push_str("#set text(size: 11pt, lang: \"ar\", dir: rtl)\n");
    out.push_str("#set par(leading: 0.8em)\n");

    out.push_str(&format!(
        "#box(fill: rgb(\"#e3f2ff\"), radius: 12pt, inset: (x: 12pt, y: 6pt))[#text(size: 9.5pt, fill: rgb(\"{NAVY}\"), tracking: 0.5pt)[Bilingual Study Suite]]\n\
         #v(6pt)\n#text(size: 26pt, weight: 800, fill: rgb(\"{NAVY}\"))[{}]\n\
         #v(2pt)\n#text(size: 10.5pt, fill: luma(100))[إعداد: \\@{} · #datetime.today().display()]\n#v(12pt)\n",
        escape_content(ctx.title),
        escape_content(ctx.author_handle),
    ));

    for (idx, segment) in ctx.segments.iter().enumerate() {
        out.push_str(&segment_card(idx + 1, segment));
    }

    out.push_str(&glossary_table(ctx.glossary));
    out
}

fn segment_card(index: usize, segment: &Segment) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "#text(weight: 700, fill: rgb(\"{NAVY}\"))[Segment {index}]\n#v(4pt)\n"
    ));

    // English block, LTR
    body.push_str("#block[#set text(dir: ltr, lang: \"en\")\n");
    if let Some(head) = &segment.heading_en {
        body.push_str(&format!("#strong[{}]\n\n", escape_content(head)));
    }
    body.push_str(&column_content(&segment.english));
    body.push_str("]\n");

    // Arabic block, RTL, separated
    body.push_str("#line(length: 100%, stroke: (paint: luma(190), dash: \"dashed\"))\n");
    body.push_str("#block[#set text(dir: rtl, lang: \"ar\")\n");
    if let Some(head) = &segment.heading_ar {
        body.push_str(&format!("#strong[{}]\n\n", escape_content(head)));
    }
    body.push_str(&column_content(&segment.arabic));
    body.push_str("]\n");

    if is_comparison_heading(segment) {
        if let Some(table) = comparison_table(&segment.english, &segment.arabic) {
            body.push_str(&table);
        }
    }

    if !segment.takeaways.is_empty() {
        body.push_str("#v(4pt)\n#set text(dir: rtl, lang: \"ar\")\n");
        for takeaway in &segment.takeaways {
            body.push_str(&format!("- {}\n", escape_content(takeaway)));
        }
    }

    format!(
        "#block(width: 100%, stroke: 1pt + rgb(\"#e8eef6\"), radius: 12pt, inset: 12pt, above: 10pt, below: 10pt)[\n{}]\n",
        body
    )
}

fn is_comparison_heading(segment: &Segment) -> bool {
    segment
        .heading_en
        .as_deref()
        .is_some_and(|h| adv_heading_re().is_match(h))
}

/// Zip equal-length itemized sides into an EN/AR comparison table.
fn comparison_table(english: &str, arabic: &str) -> Option<String> {
    let en_items = parse_items(english);
    let ar_items = parse_items(arabic);
    if en_items.is_empty() || en_items.len() != ar_items.len() {
        return None;
    }
    let mut out = String::from(
        "#v(6pt)\n#table(\n  columns: (1fr, 1fr),\n  stroke: 0.5pt + rgb(\"#e8eef6\"),\n  inset: 8pt,\n",
    );
    for (en, ar) in en_items.iter().zip(&ar_items) {
        out.push_str(&format!(
            "  [#set text(dir: ltr, lang: \"en\"); {}], [#set text(dir: rtl, lang: \"ar\"); {}],\n",
            escape_content(en),
            escape_content(ar),
        ));
    }
    out.push_str(")\n");
    Some(out)
}

fn parse_items(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            numbered_item_re()
                .captures(line.trim())
                .map(|caps| caps[1].trim().to_string())
        })
        .filter(|item| !item.is_empty())
        .collect()
}

/// Format one column's text: numbered/bulleted runs become lists,
/// `Key: a, b; Other: c` category lines become nested lists, everything
/// else becomes paragraphs.
fn column_content(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() {
            i += 1;
            continue;
        }
        if let Some(block) = category_block(line) {
            out.push_str(&block);
            i += 1;
            continue;
        }
        if numbered_item_re().is_match(line) {
            while i < lines.len() {
                let Some(caps) = numbered_item_re().captures(lines[i].trim()) else {
                    break;
                };
                out.push_str(&format!("- {}\n", inline_markup(caps[1].trim())));
                i += 1;
            }
            out.push('\n');
            continue;
        }
        out.push_str(&format!("{}\n\n", inline_markup(line)));
        i += 1;
    }
    out
}

/// `Key: a, b (c); Other: d` → nested list, one top item per category.
fn category_block(line: &str) -> Option<String> {
    static SEMI_RE: OnceLock<Regex> = OnceLock::new();
    static PAREN_RE: OnceLock<Regex> = OnceLock::new();
    static COMMA_RE: OnceLock<Regex> = OnceLock::new();
    let semi = SEMI_RE.get_or_init(|| Regex::new(r"[;؛]").unwrap());
    let paren = PAREN_RE.get_or_init(|| Regex::new(r"\(([^)]*)\)").unwrap());
    let comma = COMMA_RE.get_or_init(|| Regex::new(r"[،,]").unwrap());

    // a category line needs at least two categories or one with sub-items
    if !semi.is_match(line) {
        return None;
    }
    let mut items = Vec::new();
    for cat in semi.split(line).map(str::trim).filter(|c| !c.is_empty()) {
        let caps = category_re().captures(cat)?;
        let key = caps.name("k")?.as_str().trim();
        let value = paren.replace_all(caps.name("v")?.as_str(), ", $1");
        let subs: Vec<String> = comma
            .split(&value)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("  - {}", inline_markup(s)))
            .collect();
        if subs.is_empty() {
            return None;
        }
        items.push(format!("- #strong[{}]\n{}", inline_markup(key), subs.join("\n")));
    }
    if items.is_empty() {
        None
    } else {
        Some(format!("{}\n\n", items.join("\n")))
    }
}

fn inline_markup(text: &str) -> String {
    transpile_inlines(&parse_inlines(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use warraq_ast::{Direction, GlossaryEntry};

    fn ctx<'a>(segments: &'a [Segment], glossary: &'a [GlossaryEntry]) -> RenderContext<'a> {
        RenderContext {
            title: "دراسة ثنائية اللغة",
            author_handle: "study_bot",
            direction: Direction::Rtl,
            nodes: &[],
            segments,
            glossary,
            raw_text: "",
        }
    }

    #[test]
    fn test_one_card_per_segment() {
        let segments = vec![
            Segment::new("one", "واحد"),
            Segment::new("two", "اثنان"),
        ];
        let markup = render(&ctx(&segments, &[]));
        assert!(markup.contains("Segment 1"));
        assert!(markup.contains("Segment 2"));
        assert!(markup.contains("واحد"));
    }

    #[test]
    fn test_takeaways_render_as_list() {
        let segments = vec![Segment {
            takeaways: vec!["نقطة أولى".to_string(), "نقطة ثانية".to_string()],
            ..Segment::new("e", "ع")
        }];
        let markup = render(&ctx(&segments, &[]));
        assert!(markup.contains("- نقطة أولى"));
        assert!(markup.contains("- نقطة ثانية"));
    }

    #[test]
    fn test_comparison_table_for_equal_advantage_lists() {
        let segments = vec![Segment {
            heading_en: Some("Advantages".to_string()),
            ..Segment::new("1) cheap\n2) fast", "1) رخيصة\n2) سريعة")
        }];
        let markup = render(&ctx(&segments, &[]));
        assert!(markup.contains("#table("));
        assert!(markup.contains("cheap"));
        assert!(markup.contains("رخيصة"));
    }

    #[test]
    fn test_no_comparison_table_when_lengths_differ() {
        let segments = vec![Segment {
            heading_en: Some("Advantages".to_string()),
            ..Segment::new("1) cheap\n2) fast", "1) رخيصة")
        }];
        let markup = render(&ctx(&segments, &[]));
        assert!(!markup.contains("#table("));
    }

    #[test]
    fn test_category_line_becomes_nested_list() {
        let out = column_content("Designs: cohort, case-control; Measures: odds ratio");
        assert!(out.contains("#strong[Designs]"));
        assert!(out.contains("  - cohort"));
        assert!(out.contains("#strong[Measures]"));
    }

    #[test]
    fn test_glossary_table_rendered() {
        let glossary = vec![GlossaryEntry::new("Bias", "انحياز", "خطأ منهجي")];
        let markup = render(&ctx(&[], &glossary));
        assert!(markup.contains("المصطلحات الطبية"));
        assert!(markup.contains("انحياز"));
    }
}
