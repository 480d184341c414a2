//! Web-publishing projection
//!
//! Flattens bilingual segments into the simplified ordered node list an
//! external publishing collaborator consumes. Only the shape is a
//! contract; see `warraq_ast::PublishNode`.

use warraq_ast::{PublishNode, Segment};

/// Project segments into publish nodes, one per segment, in order.
pub fn publish_nodes(segments: &[Segment]) -> Vec<PublishNode> {
    segments
        .iter()
        .map(|seg| {
            let heading = seg
                .heading_en
                .clone()
                .or_else(|| seg.heading_ar.clone())
                .filter(|h| !h.is_empty());
            PublishNode {
                heading,
                english_text: non_empty(&seg.english),
                arabic_text: non_empty(&seg.arabic),
                list_items: if seg.takeaways.is_empty() {
                    None
                } else {
                    Some(seg.takeaways.clone())
                },
            }
        })
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_keeps_order_and_drops_empty_fields() {
        let segments = vec![
            Segment {
                heading_en: Some("Advantages".to_string()),
                english: "fast".to_string(),
                arabic: "سريع".to_string(),
                takeaways: vec!["نقطة".to_string()],
                ..Default::default()
            },
            Segment::new("plain", ""),
        ];
        let nodes = publish_nodes(&segments);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].heading.as_deref(), Some("Advantages"));
        assert_eq!(nodes[0].list_items.as_ref().unwrap().len(), 1);
        assert!(nodes[1].heading.is_none());
        assert!(nodes[1].arabic_text.is_none());
        assert_eq!(nodes[1].english_text.as_deref(), Some("plain"));
    }

    #[test]
    fn test_arabic_heading_used_when_english_missing() {
        let segments = vec![Segment {
            heading_ar: Some("العيوب".to_string()),
            english: "e".to_string(),
            arabic: "ع".to_string(),
            ..Default::default()
        }];
        let nodes = publish_nodes(&segments);
        assert_eq!(nodes[0].heading.as_deref(), Some("العيوب"));
    }
}
