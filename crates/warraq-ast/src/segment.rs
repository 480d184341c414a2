//! Bilingual segments and the web-publishing node contract

use serde::{Deserialize, Serialize};

/// A paired English/Arabic text block extracted from the bracket-tag
/// grammar, with optional per-segment headings and takeaways.
///
/// Segment identity is its position in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    /// English body text
    pub english: String,
    /// Arabic body text
    pub arabic: String,
    /// Optional English heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_en: Option<String>,
    /// Optional Arabic heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_ar: Option<String>,
    /// Key takeaways (Arabic), one per line in source, markers stripped
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub takeaways: Vec<String>,
}

impl Segment {
    /// Segment with just the two required sides
    pub fn new(english: impl Into<String>, arabic: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            arabic: arabic.into(),
            ..Default::default()
        }
    }
}

/// Simplified node shape handed to an external web-publishing collaborator.
///
/// Only the shape is a contract: an ordered list of these, serialized with
/// camelCase field names and empty fields omitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishNode {
    /// Section heading, if the segment carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// English body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_text: Option<String>,
    /// Arabic body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arabic_text: Option<String>,
    /// Takeaway list items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_items: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_defaults() {
        let seg = Segment::new("A", "ب");
        assert_eq!(seg.english, "A");
        assert_eq!(seg.arabic, "ب");
        assert!(seg.heading_en.is_none());
        assert!(seg.takeaways.is_empty());
    }

    #[test]
    fn test_publish_node_camel_case_omits_empty() {
        let node = PublishNode {
            heading: Some("Advantages".to_string()),
            english_text: Some("text".to_string()),
            arabic_text: None,
            list_items: None,
        };
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("englishText"));
        assert!(!json.contains("arabicText"));
        assert!(!json.contains("listItems"));
    }
}
