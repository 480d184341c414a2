//! Mindmap template
//!
//! Verbatim monospace rendering of a pre-formatted tree outline. No node
//! parsing happens here: the outline glyph art is the content.

use super::{escape_content, escape_string, raw_string, RenderContext};

pub(super) fn render(ctx: &RenderContext) -> String {
    format!(
        "#set document(title: \"{title_str}\")\n\
         #set page(paper: \"a4\", margin: 1.5cm)\n\
         #align(center)[#text(size: 22pt, weight: 700, fill: rgb(\"#2c3e50\"))[🧠 خريطة ذهنية: {title}]]\n\
         #v(4pt)\n#line(length: 100%, stroke: 1.5pt + rgb(\"#005a9c\"))\n#v(10pt)\n\
         #block(width: 100%, fill: rgb(\"#f7f9fc\"), stroke: 1pt + rgb(\"#e0e5ec\"), radius: 8pt, inset: 14pt)[\n\
         #raw(block: true, \"{content}\")\n]\n",
        title_str = escape_string(ctx.title),
        title = escape_content(ctx.title),
        content = raw_string(ctx.raw_text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use warraq_ast::Direction;

    #[test]
    fn test_outline_passed_verbatim() {
        let outline = "Root\n  Branch A\n    Leaf\n  Branch B";
        let ctx = RenderContext {
            title: "Map",
            author_handle: "study_bot",
            direction: Direction::Ltr,
            nodes: &[],
            segments: &[],
            glossary: &[],
            raw_text: outline,
        };
        let markup = render(&ctx);
        assert!(markup.contains("#raw(block: true,"));
        assert!(markup.contains("Branch A"));
        assert!(markup.contains("خريطة ذهنية"));
    }
}
