//! Text-sheet template
//!
//! One flowing sheet built straight from raw lines: a hero header, chips
//! for the first few headings, computed metrics (words, highlights,
//! paragraphs), then heading/subheading/bullet/paragraph blocks picked by
//! lightweight line heuristics.

use std::sync::OnceLock;

use regex::Regex;
use warraq_core::parse_inlines;

use super::{escape_content, escape_string, transpile_inlines, RenderContext};

/// Markers that make a line a bullet for this sheet's heuristics
const BULLET_MARKERS: &[&str] = &[
    "- ", "•", "▪", "–", "—", "*", "❓", "✅", "⚠️", "🔥", "🎯", "🧠", "🧪", "🚀", "📌",
];

/// Chips shown when the text has no headings of its own
const DEFAULT_CHIPS: &[&str] = &["Study Essentials", "Quick Review", "Action Points"];

#[derive(Debug, PartialEq)]
enum SheetLine {
    Blank,
    Heading(String),
    Subheading(String),
    Bullet(String),
    Paragraph(String),
}

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\w؀-ۿ']+").unwrap())
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(?:[.,]\d+)?").unwrap())
}

fn lead_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([^:：]+)([:：])(.*)$").unwrap())
}

/// Classify one raw line for the sheet layout.
fn sheet_line(line: &str) -> SheetLine {
    let stripped = line.trim();
    if stripped.is_empty() {
        return SheetLine::Blank;
    }
    if stripped.starts_with("# ") || stripped.starts_with("## ") {
        return SheetLine::Heading(stripped.trim_start_matches('#').trim().to_string());
    }
    if stripped.starts_with("### ") || stripped.starts_with("#### ") {
        return SheetLine::Subheading(stripped.trim_start_matches('#').trim().to_string());
    }
    if BULLET_MARKERS.iter().any(|m| stripped.starts_with(m)) {
        let body = stripped
            .trim_start_matches(['-', '•', '▪', '–', '—', '*', ' '])
            .trim();
        return SheetLine::Bullet(body.to_string());
    }
    if stripped.ends_with(':') && stripped.chars().count() <= 60 {
        return SheetLine::Heading(stripped.trim_end_matches(':').trim().to_string());
    }
    if stripped.chars().count() <= 52
        && stripped.chars().any(|c| c.is_alphabetic())
        && stripped == stripped.to_uppercase()
    {
        return SheetLine::Heading(stripped.to_string());
    }
    SheetLine::Paragraph(stripped.to_string())
}

pub(super) fn render(ctx: &RenderContext) -> String {
    let lines: Vec<SheetLine> = ctx.raw_text.lines().map(sheet_line).collect();

    let word_count: usize = ctx
        .raw_text
        .lines()
        .map(|l| word_re().find_iter(l).count())
        .sum();
    let bullet_count = lines.iter().filter(|l| matches!(l, SheetLine::Bullet(_))).count();
    let paragraph_count = lines
        .iter()
        .filter(|l| !matches!(l, SheetLine::Blank | SheetLine::Bullet(_)))
        .count()
        .max(1);

    let mut chips: Vec<String> = lines
        .iter()
        .filter_map(|l| match l {
            SheetLine::Heading(t) | SheetLine::Subheading(t) => Some(t.clone()),
            _ => None,
        })
        .take(5)
        .collect();
    if chips.is_empty() {
        chips = DEFAULT_CHIPS.iter().map(|s| s.to_string()).collect();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "#set document(title: \"{}\")\n",
        escape_string(ctx.title)
    ));
    out.push_str("#set page(paper: \"a4\", margin: 1.6cm)\n");
    out.push_str("#set text(size: 11pt)\n#set par(leading: 0.9em)\n");

    // hero header
    out.push_str(&format!(
        "#block(width: 100%, fill: rgb(\"#3b82f6\"), radius: 14pt, inset: 20pt)[\n\
         #set text(fill: white)\n\
         #text(size: 26pt, weight: 700)[{}]\n\
         #v(4pt)\n#text(size: 10pt)[Auto-generated study sheet]\n\
         #v(8pt)\n#text(size: 9pt)[\\@{} · #datetime.today().display()]\n]\n#v(10pt)\n",
        escape_content(ctx.title),
        escape_content(ctx.author_handle),
    ));

    // heading chips
    let chip_markup: Vec<String> = chips
        .iter()
        .map(|c| {
            format!(
                "#box(fill: rgb(\"#eef2ff\"), stroke: 0.5pt + rgb(\"#c7d2fe\"), radius: 10pt, inset: (x: 10pt, y: 5pt))[#text(size: 9pt, weight: 600, fill: rgb(\"#1d4ed8\"))[{}]]",
                escape_content(c)
            )
        })
        .collect();
    out.push_str(&chip_markup.join(" #h(5pt) "));
    out.push_str("\n#v(10pt)\n");

    // metrics tiles
    out.push_str(&format!(
        "#grid(columns: (1fr, 1fr, 1fr), column-gutter: 10pt,\n\
         {},\n{},\n{},\n)\n#v(12pt)\n",
        metric_tile("WORDS", word_count),
        metric_tile("HIGHLIGHTS", bullet_count),
        metric_tile("PARAGRAPHS", paragraph_count),
    ));

    // body blocks; consecutive bullets group into one list
    let mut in_list = false;
    for line in &lines {
        match line {
            SheetLine::Blank => {
                in_list = false;
            }
            SheetLine::Heading(t) => {
                in_list = false;
                out.push_str(&format!(
                    "#v(10pt)\n#text(size: 15pt, weight: 700, fill: rgb(\"#1e1b4b\"))[{}]\n#v(4pt)\n",
                    escape_content(t)
                ));
            }
            SheetLine::Subheading(t) => {
                in_list = false;
                out.push_str(&format!(
                    "#v(6pt)\n#text(size: 12.5pt, weight: 600, fill: rgb(\"#312e81\"))[{}]\n#v(2pt)\n",
                    escape_content(t)
                ));
            }
            SheetLine::Bullet(t) => {
                if !in_list {
                    out.push('\n');
                    in_list = true;
                }
                out.push_str(&format!("- {}\n", auto_style(t)));
            }
            SheetLine::Paragraph(t) => {
                in_list = false;
                out.push_str(&format!("{}\n\n", auto_style(t)));
            }
        }
    }

    out.push_str(
        "#v(16pt)\n#line(length: 100%, stroke: 0.5pt + luma(200))\n\
         #text(size: 8.5pt, fill: luma(120))[Smart Study Tools · Generated #datetime.today().display()]\n",
    );
    out
}

fn metric_tile(label: &str, value: usize) -> String {
    format!(
        "block(width: 100%, fill: rgb(\"#f8fafc\"), stroke: 0.5pt + rgb(\"#cbd5e1\"), radius: 10pt, inset: 10pt)[#align(center)[#text(size: 8pt, tracking: 1pt, fill: luma(110))[{}]\n#text(size: 16pt, weight: 700)[{}]]]",
        label, value
    )
}

/// Bold a short `Lead:` prefix and put numbers in accent boxes.
fn auto_style(text: &str) -> String {
    let (lead, rest) = match lead_re().captures(text) {
        Some(caps) if caps[1].trim().chars().count() <= 56 => (
            Some((caps[1].trim().to_string(), caps[2].to_string())),
            caps[3].trim().to_string(),
        ),
        _ => (None, text.to_string()),
    };

    let styled_rest = style_numbers(&rest);
    match lead {
        Some((lead, colon)) => {
            let mut s = format!("#strong[{}]{}", inline_markup(&lead), colon);
            if !styled_rest.is_empty() {
                s.push(' ');
                s.push_str(&styled_rest);
            }
            s
        }
        None => styled_rest,
    }
}

fn style_numbers(text: &str) -> String {
    let mut out = String::new();
    let mut last = 0;
    for m in number_re().find_iter(text) {
        out.push_str(&inline_markup(&text[last..m.start()]));
        out.push_str(&format!(
            "#box(fill: rgb(\"#fde68a\"), radius: 4pt, inset: (x: 4pt, y: 1pt))[#text(weight: 700, fill: rgb(\"#92400e\"))[{}]]",
            m.as_str()
        ));
        last = m.end();
    }
    out.push_str(&inline_markup(&text[last..]));
    out
}

fn inline_markup(text: &str) -> String {
    transpile_inlines(&parse_inlines(text))
}
