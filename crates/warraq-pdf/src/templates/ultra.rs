//! Ultra template
//!
//! Condensed study summary: chip-style inline table of contents, fixed
//! domain-vocabulary and equation highlighting, Q&A cards, arrow-chain
//! pill sequences and fact boxes. Sections come from known heading
//! literals or explicit `<h2>` headings; "Complete Outline" sections are
//! skipped entirely.

use std::sync::OnceLock;

use regex::Regex;
use warraq_ast::{plain_text, Node};
use warraq_core::classify::SECTION_STOP_HEADINGS;

use super::{
    escape_content, escape_string, glossary_table, text_settings, transpile_inlines,
    RenderContext, NAVY,
};

/// Section titles dropped wholesale (their content is an outline duplicate)
const SKIP_SECTIONS: &[&str] = &["complete outline", "المخطط الكامل"];

/// Phrase-tier vocabulary, highlighted as term chips
const HIGHLIGHT_PHRASES: &[&str] = &[
    "Prevalence Rate",
    "Incidence Rate",
    "Prevalence Ratio",
    "Prevalence Odds Ratio",
    "Cross-sectional study",
    "Case-control study",
    "Cohort study",
    "Confidence Interval",
    "Temporal relationship",
    "Risk factor",
    "Public health planning",
    "Hypothesis generation",
];

/// Word-tier vocabulary, highlighted inline
const HIGHLIGHT_WORDS: &[&str] = &[
    "Prevalence",
    "Incidence",
    "Odds Ratio",
    "Risk",
    "Cross-sectional",
    "Study",
    "Case-control",
    "Cohort",
    "Exposure",
    "Outcome",
    "Rate",
    "Ratio",
    "Duration",
    "Etiology",
    "Bias",
    "Sensitivity",
    "Specificity",
    "Hypothesis",
    "Causality",
    "Temporal",
    "Distribution",
];

fn phrase_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let mut phrases: Vec<&str> = HIGHLIGHT_PHRASES.to_vec();
        // longest first so "Prevalence Odds Ratio" wins over "Odds Ratio"
        phrases.sort_by_key(|p| std::cmp::Reverse(p.len()));
        let alt = phrases
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!("(?i){}", alt)).unwrap()
    })
}

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alt = HIGHLIGHT_WORDS
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b(?:{})\b", alt)).unwrap()
    })
}

fn equation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z][A-Za-z ]{0,12}=\s*[^\n]+").unwrap())
}

fn toc_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\)\s").unwrap())
}

fn arrow_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"→|->").unwrap())
}

pub(super) fn render(ctx: &RenderContext) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "#set document(title: \"{}\")\n",
        escape_string(ctx.title)
    ));
    out.push_str("#set page(paper: \"a4\", margin: 1.8cm)\n");
    out.push_str(text_settings(ctx.direction));
    out.push_str("#set par(leading: 0.8em)\n");

    // cover header
    out.push_str(&format!(
        "#align(center)[#text(size: 28pt, weight: 800, fill: rgb(\"{NAVY}\"))[{}]\n\
         #v(4pt)\n#text(size: 10pt, fill: luma(110), tracking: 1.5pt)[BY \\@{}]]\n#v(10pt)\n",
        escape_content(ctx.title),
        escape_content(ctx.author_handle),
    ));

    // chip TOC from an inline `1) … · 2) …` enumeration near the top
    if let Some(toc) = find_inline_toc(ctx.nodes) {
        out.push_str("#align(center)[\n");
        let chips: Vec<String> = toc
            .split(" · ")
            .filter(|c| !c.trim().is_empty())
            .map(|c| chip(c.trim()))
            .collect();
        out.push_str(&chips.join(" #h(6pt) "));
        out.push_str("\n]\n#v(14pt)\n");
    }

    out.push_str(&render_sections(ctx.nodes));
    out.push_str(&glossary_table(ctx.glossary));
    out
}

fn chip(text: &str) -> String {
    format!(
        "#box(fill: rgb(\"#dbeafe\"), stroke: 0.5pt + rgb(\"#93c5fd\"), radius: 10pt, inset: (x: 10pt, y: 5pt))[#text(size: 9pt, weight: 600, fill: rgb(\"#1d4ed8\"))[{}]]",
        escape_content(text)
    )
}

/// The first paragraph among the leading nodes that looks like an inline
/// enumerated table of contents.
fn find_inline_toc(nodes: &[Node]) -> Option<String> {
    nodes.iter().take(8).find_map(|node| match node {
        Node::Paragraph(p) => {
            let text = plain_text(&p.inlines);
            toc_line_re().is_match(text.trim()).then(|| text.trim().to_string())
        }
        _ => None,
    })
}

/// A node that opens a section: an explicit heading, or a paragraph whose
/// entire text is one of the known section-heading literals.
fn section_title(node: &Node) -> Option<String> {
    match node {
        Node::Heading(h) if h.level == 2 => Some(plain_text(&h.text)),
        Node::Paragraph(p) => {
            let text = plain_text(&p.inlines);
            let trimmed = text.trim();
            SECTION_STOP_HEADINGS
                .contains(&trimmed)
                .then(|| trimmed.to_string())
        }
        _ => None,
    }
}

fn render_sections(nodes: &[Node]) -> String {
    let mut out = String::new();
    let mut skipping = false;
    let mut first_toc_seen = false;

    for node in nodes {
        if let Some(title) = section_title(node) {
            skipping = SKIP_SECTIONS.contains(&title.to_lowercase().as_str());
            if !skipping {
                out.push_str(&format!(
                    "#v(14pt)\n#text(size: 15pt, weight: 800, fill: rgb(\"{NAVY}\"))[#text(fill: rgb(\"#3b82f6\"))[◆] {}]\n#v(4pt)\n#line(length: 100%, stroke: 0.5pt + luma(200))\n#v(6pt)\n",
                    escape_content(&title)
                ));
            }
            continue;
        }
        if skipping {
            continue;
        }
        // the chip TOC already rendered the first enumeration line
        if !first_toc_seen {
            if let Node::Paragraph(p) = node {
                if toc_line_re().is_match(plain_text(&p.inlines).trim()) {
                    first_toc_seen = true;
                    continue;
                }
            }
        }
        out.push_str(&render_section_node(node));
    }
    out
}

fn render_section_node(node: &Node) -> String {
    match node {
        Node::QaBlock(qa) => format!(
            "#block(width: 100%, fill: rgb(\"#eff6ff\"), stroke: 1pt + rgb(\"#bfdbfe\"), radius: 10pt, inset: 12pt)[\n\
             #strong[❓ {}]\n\n✅ {}\n]\n\n",
            highlight(&plain_text(&qa.question)),
            highlight(&plain_text(&qa.answer)),
        ),

        Node::List(list) => {
            let mut out = String::from("#list(marker: none,\n");
            for item in &list.items {
                let text = plain_text(item);
                let text = text.trim();
                // every bullet leads with a glyph; default to 📚
                let lead = if starts_with_catalogue_emoji(text) || text.starts_with('#') {
                    text.to_string()
                } else {
                    format!("📚 {}", text)
                };
                out.push_str(&format!("  [{}],\n", highlight(&lead)));
            }
            out.push_str(")\n\n");
            out
        }

        Node::Paragraph(p) => {
            let text = plain_text(&p.inlines);
            let trimmed = text.trim();
            if arrow_re().is_match(trimmed) {
                return flow_pills(trimmed);
            }
            if let Some(fact) = trimmed.strip_prefix('#') {
                return fact_box(fact.trim_start_matches('#').trim());
            }
            format!("{}\n\n", highlight(trimmed))
        }

        Node::Blockquote(quote) => {
            let inner: String = quote
                .content
                .iter()
                .map(render_section_node)
                .collect();
            format!(
                "#block(width: 100%, fill: rgb(\"#fef3c7\"), stroke: 1pt + rgb(\"#fcd34d\"), radius: 10pt, inset: 12pt)[#emph[{}]]\n\n",
                inner.trim()
            )
        }

        Node::Heading(h) => format!(
            "#text(size: 13pt, weight: 700, fill: rgb(\"#1d4ed8\"))[{}]\n\n",
            transpile_inlines(&h.text)
        ),

        Node::BilingualGrid(grid) => format!(
            "{}\n\n{}\n\n",
            highlight(grid.english.trim()),
            escape_content(grid.arabic.trim())
        ),

        Node::GlossaryTable(table) => glossary_table(&table.entries),
    }
}

/// `A → B → C` rendered as a pill sequence
fn flow_pills(text: &str) -> String {
    let steps: Vec<&str> = arrow_re()
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let pills: Vec<String> = steps
        .iter()
        .map(|s| {
            format!(
                "#box(fill: rgb(\"#fde68a\"), radius: 10pt, inset: (x: 10pt, y: 5pt))[#text(size: 9.5pt, weight: 600, fill: rgb(\"#92400e\"))[{}]]",
                escape_content(s)
            )
        })
        .collect();
    format!("{}\n\n", pills.join(" #text(fill: luma(140))[→] "))
}

/// `# …` fact line rendered as an accent box
fn fact_box(text: &str) -> String {
    format!(
        "#block(width: 100%, fill: rgb(\"#e0f2fe\"), stroke: (left: 3pt + rgb(\"#0369a1\")), inset: 10pt, radius: 6pt)[#strong[FACT] {}]\n\n",
        highlight(text)
    )
}

fn starts_with_catalogue_emoji(text: &str) -> bool {
    warraq_core::classify::EMOJI_BULLETS
        .iter()
        .any(|g| text.starts_with(g))
}

/// Highlight domain phrases, words and `X = …` equations in plain text,
/// escaping everything else.
fn highlight(text: &str) -> String {
    // equations take the whole tail of the line; check them first
    if let Some(m) = equation_re().find(text) {
        let before = highlight_terms(&text[..m.start()]);
        return format!(
            "{}#box(fill: rgb(\"#ede9fe\"), radius: 6pt, inset: (x: 6pt, y: 2pt))[#text(weight: 700, fill: rgb(\"#5b21b6\"))[{}]]",
            before,
            escape_content(m.as_str().trim())
        );
    }
    highlight_terms(text)
}

fn highlight_terms(text: &str) -> String {
    let mut out = String::new();
    let mut last = 0;
    for m in phrase_re().find_iter(text) {
        out.push_str(&highlight_words(&text[last..m.start()]));
        out.push_str(&format!(
            "#box(fill: rgb(\"#dbeafe\"), radius: 6pt, inset: (x: 6pt, y: 2pt))[#text(weight: 700, fill: rgb(\"#1d4ed8\"))[{}]]",
            escape_content(m.as_str())
        ));
        last = m.end();
    }
    out.push_str(&highlight_words(&text[last..]));
    out
}

fn highlight_words(text: &str) -> String {
    let mut out = String::new();
    let mut last = 0;
    for m in word_re().find_iter(text) {
        out.push_str(&escape_content(&text[last..m.start()]));
        out.push_str(&format!(
            "#box(fill: rgb(\"#fee2e2\"), radius: 4pt, inset: (x: 4pt, y: 1pt))[#text(weight: 700, fill: rgb(\"#991b1b\"))[{}]]",
            escape_content(m.as_str())
        ));
        last = m.end();
    }
    out.push_str(&escape_content(&text[last..]));
    out
}
