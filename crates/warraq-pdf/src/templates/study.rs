//! Study-pro template
//!
//! Classic body plus study navigation: a dedicated multi-level contents
//! page built from the `sec2_N`/`sec3_N_M` heading anchors, and a
//! back-to-contents link after every anchored heading.

use warraq_ast::{plain_text, Node};

use super::classic::{heading_rules, render_nodes};
use super::{cover_page, escape_content, escape_string, footer_settings, text_settings, RenderContext, NAVY};

pub(super) fn render(ctx: &RenderContext) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "#set document(title: \"{}\")\n",
        escape_string(ctx.title)
    ));
    out.push_str("#set page(paper: \"a4\", margin: 2cm)\n");
    out.push_str(text_settings(ctx.direction));
    out.push_str("#set par(leading: 0.85em, justify: true)\n");
    out.push_str(&heading_rules());
    out.push_str(&cover_page(ctx.title, ctx.author_handle, NAVY));
    out.push_str(&footer_settings(ctx.author_handle));

    out.push_str(&contents_page(ctx.nodes));
    out.push_str(&body_with_backlinks(ctx.nodes));
    out
}

/// The contents page: h2 entries with nested h3 entries, all linked.
fn contents_page(nodes: &[Node]) -> String {
    let mut entries = String::new();
    for node in nodes {
        let Node::Heading(h) = node else { continue };
        let Some(anchor) = &h.anchor else { continue };
        let text = escape_content(&plain_text(&h.text));
        match h.level {
            2 => entries.push_str(&format!(
                "#link(<{anchor}>)[#text(fill: rgb(\"#1e90ff\"))[{text}]]\n\n"
            )),
            3 => entries.push_str(&format!(
                "#pad(x: 14pt)[#link(<{anchor}>)[#text(size: 10pt, fill: rgb(\"#1e90ff\"))[· {text}]]]\n\n"
            )),
            _ => {}
        }
    }
    if entries.is_empty() {
        entries.push_str("—\n");
    }
    format!(
        "#heading(level: 2, outlined: false)[محتويات المستند] <toc>\n#v(8pt)\n{}#pagebreak()\n",
        entries
    )
}

/// Classic rendering, with a back-to-contents link injected after every
/// anchored heading.
fn body_with_backlinks(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        let chunk = render_nodes(std::slice::from_ref(node));
        out.push_str(&chunk);
        if let Node::Heading(h) = node {
            if h.anchor.is_some() {
                let size = if h.level == 3 { "8pt" } else { "9pt" };
                out.push_str(&format!(
                    "#link(<toc>)[#text(size: {size}, fill: luma(120))[⬆︎ رجوع للفهرس]]\n\n"
                ));
            }
        }
    }
    out
}
