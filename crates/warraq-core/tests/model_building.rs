//! End-to-end tests for the normalize → classify → build pipeline

use warraq_ast::{Direction, Node};
use warraq_core::{build_document, build_nodes, normalize, parse_segments};

#[test]
fn test_normalization_is_idempotent_on_messy_input() {
    let messy = concat!(
        "Epidemiology\nis the\nstudy of disease-\ndistribution in populations.\n",
        "\n\n\n",
        "✅key fact without spacing\n",
        "- same line\n- same line\n",
        "Source text: leaked instruction\n",
        "[ENG]\npaired\ncontent\n[/ENG]\n[ARB]محتوى[/ARB]\n",
        "[/TAKEAWAYS_AR]\n",
    );
    let once = normalize(messy);
    let twice = normalize(&once);
    assert_eq!(once, twice);
    // artifacts are gone, pairs survive
    assert!(!once.contains("Source text:"));
    assert!(!once.contains("[/TAKEAWAYS_AR]"));
    assert!(once.contains("[ENG]"));
}

#[test]
fn test_node_order_mirrors_source_without_exceptions() {
    let input = "<h2>First</h2>\nparagraph one\n- item a\n- item b\n<h2>Second</h2>\nparagraph two";
    let nodes = build_nodes(input);
    let kinds: Vec<&str> = nodes
        .iter()
        .map(|n| match n {
            Node::Heading(_) => "heading",
            Node::Paragraph(_) => "paragraph",
            Node::List(_) => "list",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["heading", "paragraph", "list", "heading", "paragraph"]
    );
}

#[test]
fn test_conclusion_is_final_node_regardless_of_position() {
    for input in [
        "[CONCLUSION]wrap-up[/CONCLUSION]\nbody one\nbody two",
        "body one\n[CONCLUSION]wrap-up[/CONCLUSION]\nbody two",
        "body one\nbody two\n[CONCLUSION]wrap-up[/CONCLUSION]",
    ] {
        let nodes = build_nodes(&normalize(input));
        assert!(
            matches!(nodes.last(), Some(Node::Blockquote(_))),
            "input: {input}"
        );
        assert_eq!(
            nodes
                .iter()
                .filter(|n| matches!(n, Node::Blockquote(_)))
                .count(),
            1
        );
    }
}

#[test]
fn test_full_document_resolves_single_title() {
    let doc = build_document(
        &normalize("<h1>Real Title</h1>\nSome body text."),
        "Caller Title",
        "study_bot",
        Direction::Rtl,
    );
    assert_eq!(doc.meta.title, "Real Title");
    // the h1 is removed from the body, not duplicated as a node
    assert!(!doc
        .nodes
        .iter()
        .any(|n| matches!(n, Node::Heading(h) if h.level == 1)));
}

#[test]
fn test_bilingual_and_generic_paths_share_normalized_input() {
    let raw = "[HEAD_EN]Advantages[/HEAD_EN][ENG]cheap; fast[/ENG][ARB]رخيص؛ سريع[/ARB]";
    let normalized = normalize(raw);
    let segments = parse_segments(&normalized);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].heading_ar.as_deref(), Some("المزايا"));

    // the same text also classifies through the generic path
    let nodes = build_nodes(&normalized);
    assert!(nodes
        .iter()
        .any(|n| matches!(n, Node::BilingualGrid(_))));
}

#[test]
fn test_nodes_serialize_to_json() {
    let nodes = build_nodes("<h2>Section</h2>\n- a; b");
    let json = serde_json::to_string(&nodes).unwrap();
    assert!(json.contains("Heading"));
    assert!(json.contains("sec2_1"));
}
