//! End-to-end transcript -> snapshot tests.
//!
//! Windowing, frequency analysis and graph building through the public
//! pipeline, checked against hand-computed graphs.

use std::time::Duration;

use pretty_assertions::assert_eq;

use e2e_tests::{create_test_transcript, exact_pipeline, numbered_transcript};
use transcript_topics::{segment_entries, TopicPipeline};
use transcript_types::{AnalysisConfig, LinkClass, NodeGroup, NodeId};

#[test]
fn test_twelve_entries_make_two_segments() {
    let transcript = numbered_transcript(12);
    let segments = segment_entries(transcript.entries(), 10);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].len(), 10);
    assert_eq!(segments[1].len(), 2);
    assert_eq!(segments[1].source_range, 10..12);

    let snapshot = exact_pipeline(10, 8).compute(&transcript, None);
    assert_eq!(
        snapshot.node_ids(),
        vec![NodeId::Segment(0), NodeId::Segment(1), NodeId::Start, NodeId::End]
    );

    let structural: Vec<(NodeId, NodeId, LinkClass)> = snapshot
        .links
        .iter()
        .filter(|l| l.class != LinkClass::Association)
        .map(|l| (l.source.clone(), l.target.clone(), l.class))
        .collect();
    assert_eq!(
        structural,
        vec![
            (NodeId::Segment(0), NodeId::Segment(1), LinkClass::Chain),
            (NodeId::Start, NodeId::Segment(0), LinkClass::Anchor),
            (NodeId::Segment(1), NodeId::End, LinkClass::Anchor),
        ]
    );
}

#[test]
fn test_segment_title_is_space_joined_window() {
    let transcript = create_test_transcript(&["hello", "there", "general"], Duration::from_secs(1));
    let snapshot = exact_pipeline(2, 8).compute(&transcript, None);
    assert_eq!(snapshot.node(&NodeId::Segment(0)).unwrap().title(), "hello there");
    assert_eq!(snapshot.node(&NodeId::Segment(1)).unwrap().title(), "general");
}

#[test]
fn test_representative_surface_form_titles_keyword() {
    let first = "YouTube ".repeat(5);
    let second = "youtube ".repeat(4);
    let transcript =
        create_test_transcript(&[first.trim(), second.trim()], Duration::from_secs(2));

    let snapshot = exact_pipeline(10, 8).compute(&transcript, None);
    let keyword = snapshot
        .node(&NodeId::keyword("youtube"))
        .expect("keyword node");
    assert_eq!(keyword.title(), "YouTube");
    assert_eq!(keyword.weight(), 9);
    assert_eq!(keyword.group(), NodeGroup::Keyword);

    // nine mentions in the segment title plus one self-link
    let associations = snapshot
        .links
        .iter()
        .filter(|l| l.class == LinkClass::Association)
        .count();
    assert_eq!(associations, 10);
}

#[test]
fn test_recompute_is_idempotent() {
    let transcript = create_test_transcript(
        &[
            "ownership and borrowing in rust",
            "borrowing rules keep ownership clear",
            "ownership moves values, borrowing lends them",
            "lifetimes describe borrowing scopes",
        ],
        Duration::from_secs(3),
    );
    let pipeline = exact_pipeline(2, 2);
    let a = pipeline.compute(&transcript, Some(7.5));
    let b = pipeline.compute(&transcript, Some(7.5));
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_every_link_endpoint_exists() {
    let transcript = create_test_transcript(
        &[
            "tokio runtime tokio tasks",
            "the runtime schedules tokio tasks",
            "tasks yield to the runtime",
            "tokio tokio tokio",
        ],
        Duration::from_secs(1),
    );
    let pipeline = exact_pipeline(3, 2);
    for at in [None, Some(0.0), Some(1.0), Some(2.0), Some(3.0)] {
        let snapshot = pipeline.compute(&transcript, at);
        assert!(snapshot.validate().is_ok(), "invalid snapshot at {at:?}");
    }
}

#[test]
fn test_empty_view_has_no_anchors() {
    let transcript = numbered_transcript(5);
    let snapshot = exact_pipeline(10, 8).compute(&transcript, Some(-0.5));
    assert!(snapshot.nodes.is_empty());
    assert!(snapshot.links.is_empty());
}

#[test]
fn test_default_pipeline_stems_variants_together() {
    let transcript = create_test_transcript(
        &[
            "compilers compile code",
            "the compiler compiled it",
            "compiling with compilers",
            "a compiler again and compilers",
        ],
        Duration::from_secs(1),
    );
    let pipeline = TopicPipeline::new(AnalysisConfig {
        frequency_threshold: 3,
        ..AnalysisConfig::default()
    })
    .unwrap();
    let snapshot = pipeline.compute(&transcript, None);
    let keywords: Vec<&str> = snapshot.keywords().map(|k| k.title()).collect();
    assert_eq!(keywords, vec!["compilers"]);
}
