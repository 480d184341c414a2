//! Inline elements for document content
//!
//! This module defines inline-level elements that appear within nodes,
//! such as text runs, formatting, and line breaks.

use serde::{Deserialize, Serialize};

/// Inline-level content element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    /// Plain text content
    Text(String),
    /// Formatted content (bold, italic, etc.)
    Format(FormatType, Box<Inline>),
    /// A span containing multiple inline elements
    Span(Vec<Inline>),
    /// A line break
    Break,
}

/// Text formatting types
///
/// `Bold` corresponds to `**…**` / `<strong>` in source markup, while
/// `Highlight` corresponds to `<b>`, which the templates render as a
/// marked/highlighted run rather than plain weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormatType {
    /// Bold text
    Bold,
    /// Italic text
    Italic,
    /// Highlighted text
    Highlight,
    /// Superscript text
    Superscript,
    /// Subscript text
    Subscript,
}

impl Inline {
    /// Convenience constructor for a plain text run
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text(s.into())
    }

    /// Concatenate the raw text content of this inline, dropping formatting
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(t) => t.clone(),
            Inline::Format(_, inner) => inner.plain_text(),
            Inline::Span(items) => items.iter().map(Inline::plain_text).collect(),
            Inline::Break => "\n".to_string(),
        }
    }
}

/// Concatenate the raw text of a run of inlines
pub fn plain_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::plain_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_inline() {
        let inline = Inline::text("Hello");
        assert_eq!(inline, Inline::Text("Hello".to_string()));
    }

    #[test]
    fn test_formatted_text() {
        let bold = Inline::Format(FormatType::Bold, Box::new(Inline::text("important")));
        if let Inline::Format(FormatType::Bold, inner) = bold {
            assert_eq!(*inner, Inline::Text("important".to_string()));
        } else {
            panic!("Expected Bold format");
        }
    }

    #[test]
    fn test_plain_text_flattens_formatting() {
        let run = vec![
            Inline::text("the "),
            Inline::Format(FormatType::Highlight, Box::new(Inline::text("key"))),
            Inline::text(" term"),
        ];
        assert_eq!(plain_text(&run), "the key term");
    }
}
