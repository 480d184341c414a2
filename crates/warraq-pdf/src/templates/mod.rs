//! Template renderer
//!
//! Maps the document model (or segment list) plus a template selector into
//! Typst markup. Six variants share the same contract: all content is
//! escaped; only inline formatting that survived the parser's allow-list
//! becomes styling; the title is resolved exactly once upstream.

mod classic;
mod dual;
mod mindmap;
mod sheet;
mod study;
mod ultra;

use warraq_ast::{
    Direction, FormatType, GlossaryEntry, Inline, Node, Segment, Template,
};

/// Everything a template variant needs to render
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Resolved document title (body `<h1>` wins over the caller's title)
    pub title: &'a str,
    /// Author/brand handle, without the `@`
    pub author_handle: &'a str,
    /// Base direction of the body
    pub direction: Direction,
    /// Structural nodes (empty for the raw-text variants)
    pub nodes: &'a [Node],
    /// Bilingual segments (dual variant)
    pub segments: &'a [Segment],
    /// Merged glossary (dual variant)
    pub glossary: &'a [GlossaryEntry],
    /// Normalized body text (text-sheet and mindmap variants)
    pub raw_text: &'a str,
}

/// Render the styled intermediate markup for a template variant.
pub fn render(template: Template, ctx: &RenderContext) -> String {
    match template {
        Template::Classic => classic::render(ctx),
        Template::Ultra => ultra::render(ctx),
        Template::Dual => dual::render(ctx),
        Template::TextSheet => sheet::render(ctx),
        Template::Mindmap => mindmap::render(ctx),
        Template::StudyPro => study::render(ctx),
    }
}

// Shared palette, carried across the variants
pub(crate) const PRIMARY: &str = "#005a9c";
pub(crate) const ACCENT: &str = "#00838f";
pub(crate) const LIGHT_BG: &str = "#f7f9fc";
pub(crate) const BORDER: &str = "#e0e5ec";
pub(crate) const NAVY: &str = "#0f3460";

/// Escape Typst-active characters in content text.
pub(crate) fn escape_content(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '#' | '*' | '_' | '[' | ']' | '$' | '`' | '<' | '>' | '@' | '~' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    // a double slash would start a line comment
    let out = out.replace("//", "\\/\\/");
    // leading list/heading markers would re-parse as structure
    out.split('\n')
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.starts_with(['=', '-', '+', '/']) {
                let offset = line.len() - trimmed.len();
                format!("{}\\{}", &line[..offset], trimmed)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape special characters in Typst string literals.
pub(crate) fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// String-literal escape that also encodes line breaks and tabs, for
/// multi-line content passed to `#raw`.
pub(crate) fn raw_string(s: &str) -> String {
    escape_string(s)
        .replace('\n', "\\n")
        .replace('\r', "")
        .replace('\t', "\\t")
}

/// Transpile an inline run to Typst markup.
pub(crate) fn transpile_inlines(inlines: &[Inline]) -> String {
    inlines.iter().map(transpile_inline).collect()
}

fn transpile_inline(inline: &Inline) -> String {
    match inline {
        Inline::Text(text) => escape_content(text),
        Inline::Format(format, content) => {
            let inner = transpile_inline(content);
            match format {
                FormatType::Bold => format!("#strong[{}]", inner),
                FormatType::Italic => format!("#emph[{}]", inner),
                FormatType::Highlight => format!("#highlight[{}]", inner),
                FormatType::Superscript => format!("#super[{}]", inner),
                FormatType::Subscript => format!("#sub[{}]", inner),
            }
        }
        Inline::Span(inlines) => transpile_inlines(inlines),
        Inline::Break => " \\\n".to_string(),
    }
}

/// `#set text(...)` preamble for a direction
pub(crate) fn text_settings(direction: Direction) -> &'static str {
    match direction {
        Direction::Rtl => "#set text(size: 11pt, lang: \"ar\", dir: rtl)\n",
        Direction::Ltr => "#set text(size: 11pt, lang: \"en\", dir: ltr)\n",
    }
}

/// A distinct, accent-filled cover page: title, author handle, date.
pub(crate) fn cover_page(title: &str, author_handle: &str, fill: &str) -> String {
    format!(
        "#page(fill: rgb(\"{fill}\"), numbering: none)[\n\
         #set text(fill: white)\n\
         #align(center + horizon)[\n\
         #text(size: 34pt, weight: 800)[{title}]\n\
         #v(16pt)\n\
         #line(length: 42%, stroke: 2pt + white)\n\
         #v(16pt)\n\
         #text(size: 12pt)[Generated by \\@{author}]\n\
         #linebreak()\n\
         #text(size: 11pt)[#datetime.today().display()]\n\
         ]\n]\n",
        fill = fill,
        title = escape_content(title),
        author = escape_content(author_handle),
    )
}

/// Page-numbered footer carrying the author handle. The cover suppresses
/// it by being emitted before this set rule takes effect.
pub(crate) fn footer_settings(author_handle: &str) -> String {
    format!(
        "#set page(footer: context align(center, text(size: 9pt, fill: luma(120))[Generated by \\@{} | #counter(page).display(\"1\")]))\n",
        escape_content(author_handle)
    )
}

/// Three-column glossary table (term, Arabic, definition)
pub(crate) fn glossary_table(entries: &[GlossaryEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    out.push_str(&format!(
        "#v(18pt)\n#text(size: 16pt, weight: 800, fill: rgb(\"{NAVY}\"))[📚 المصطلحات الطبية]\n#v(6pt)\n"
    ));
    out.push_str("#table(\n  columns: (22%, 22%, 56%),\n  stroke: 0.5pt + rgb(\"#dfe6e9\"),\n  inset: 8pt,\n");
    out.push_str("  table.header([Term], [المصطلح], [التعريف]),\n");
    for entry in entries {
        out.push_str(&format!(
            "  [{}], [#set text(dir: rtl); {}], [{}],\n",
            escape_content(&entry.term),
            escape_content(&entry.arabic),
            escape_content(&entry.definition),
        ));
    }
    out.push_str(")\n");
    out
}
