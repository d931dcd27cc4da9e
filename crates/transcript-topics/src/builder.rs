//! Graph construction from segments and frequency analysis.
//!
//! ## Node order
//!
//! Segments first (by index), then the start/end anchors, then keywords in
//! first-seen order. The order is stable, so recomputing from the same input
//! yields an identical snapshot.
//!
//! ## Links
//!
//! - **Chain**: segment i -> segment i+1
//! - **Anchor**: start -> first segment, last segment -> end
//! - **Association**: any node whose title mentions a frequent stem -> that
//!   stem's keyword node, once per mention. Keyword titles are scanned too, so
//!   every keyword links to itself.

use tracing::{debug, instrument};

use transcript_types::{Anchor, GraphLink, GraphNode, GraphSnapshot, NodeId};

use crate::frequency::FrequencyAnalysis;
use crate::text::{Stemmer, Tokenizer};
use crate::window::Segment;

/// Builds a [`GraphSnapshot`] from one analysis pass.
pub struct GraphBuilder<'a> {
    tokenizer: &'a dyn Tokenizer,
    stemmer: &'a dyn Stemmer,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(tokenizer: &'a dyn Tokenizer, stemmer: &'a dyn Stemmer) -> Self {
        Self { tokenizer, stemmer }
    }

    #[instrument(skip_all, fields(segments = segments.len()))]
    pub fn build(&self, segments: &[Segment], analysis: &FrequencyAnalysis) -> GraphSnapshot {
        let nodes = self.nodes(segments, analysis);
        let mut links = timeline_links(segments);
        let structural = links.len();
        links.extend(self.association_links(&nodes, analysis));

        debug!(
            nodes = nodes.len(),
            structural_links = structural,
            association_links = links.len() - structural,
            "Built topic graph"
        );
        GraphSnapshot::new(nodes, links)
    }

    fn nodes(&self, segments: &[Segment], analysis: &FrequencyAnalysis) -> Vec<GraphNode> {
        let mut nodes: Vec<GraphNode> = segments
            .iter()
            .map(|s| GraphNode::Segment {
                index: s.index,
                title: s.text.clone(),
            })
            .collect();

        if !segments.is_empty() {
            nodes.push(GraphNode::Anchor(Anchor::Start));
            nodes.push(GraphNode::Anchor(Anchor::End));
        }

        nodes.extend(analysis.frequent_words().iter().map(|w| GraphNode::Keyword {
            stem: w.stem.clone(),
            title: w.title.clone(),
            weight: w.count,
        }));
        nodes
    }

    fn association_links(
        &self,
        nodes: &[GraphNode],
        analysis: &FrequencyAnalysis,
    ) -> Vec<GraphLink> {
        let mut links = Vec::new();
        for node in nodes {
            let id = node.id();
            for token in self.tokenizer.tokenize(node.title()) {
                let stem = self.stemmer.stem(&token);
                if analysis.is_frequent(&stem) {
                    links.push(GraphLink::association(id.clone(), &stem));
                }
            }
        }
        links
    }
}

/// Chain links between consecutive segments, bracketed by anchor links.
pub fn timeline_links(segments: &[Segment]) -> Vec<GraphLink> {
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return Vec::new();
    };

    let mut links: Vec<GraphLink> = segments
        .windows(2)
        .map(|pair| GraphLink::chain(pair[0].index, pair[1].index))
        .collect();
    links.push(GraphLink::anchor(NodeId::Start, NodeId::Segment(first.index)));
    links.push(GraphLink::anchor(NodeId::Segment(last.index), NodeId::End));
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common_words::CommonWords;
    use crate::frequency::analyze;
    use crate::text::{LowercaseStemmer, WordTokenizer};
    use transcript_types::{AnalysisConfig, LinkClass};

    fn segment(index: usize, text: &str) -> Segment {
        Segment {
            index,
            text: text.to_string(),
            source_range: index..index + 1,
        }
    }

    fn build(segments: &[Segment], threshold: u32) -> GraphSnapshot {
        let config = AnalysisConfig {
            frequency_threshold: threshold,
            ..AnalysisConfig::default()
        };
        let common = CommonWords::from_stems(Vec::<String>::new());
        let analysis = analyze(
            segments.iter().map(|s| s.text.as_str()),
            &WordTokenizer,
            &LowercaseStemmer,
            &common,
            &config,
        );
        GraphBuilder::new(&WordTokenizer, &LowercaseStemmer).build(segments, &analysis)
    }

    #[test]
    fn test_empty_segments_yield_empty_graph() {
        let snapshot = build(&[], 0);
        assert!(snapshot.nodes.is_empty());
        assert!(snapshot.links.is_empty());
    }

    #[test]
    fn test_two_segments_chain_with_anchors() {
        let snapshot = build(&[segment(0, "a b"), segment(1, "c d")], 8);
        assert_eq!(snapshot.nodes.len(), 4);
        let pairs: Vec<(NodeId, NodeId)> = snapshot
            .links
            .iter()
            .map(|l| (l.source.clone(), l.target.clone()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (NodeId::Segment(0), NodeId::Segment(1)),
                (NodeId::Start, NodeId::Segment(0)),
                (NodeId::Segment(1), NodeId::End),
            ]
        );
        assert_eq!(snapshot.links[0].class, LinkClass::Chain);
        assert_eq!(snapshot.links[1].class, LinkClass::Anchor);
    }

    #[test]
    fn test_single_segment_brackets_itself() {
        let snapshot = build(&[segment(0, "only")], 8);
        assert_eq!(snapshot.links.len(), 2);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_association_links_per_mention_and_self_link() {
        let segments = [
            segment(0, "tokio tokio runtime"),
            segment(1, "tokio again"),
        ];
        let snapshot = build(&segments, 2);

        let keyword = snapshot.node(&NodeId::keyword("tokio")).unwrap();
        assert_eq!(keyword.title(), "tokio");
        assert_eq!(keyword.weight(), 3);

        let assoc: Vec<&GraphLink> = snapshot
            .links
            .iter()
            .filter(|l| l.class == LinkClass::Association)
            .collect();
        // two mentions in segment 0, one in segment 1, one self-link
        assert_eq!(assoc.len(), 4);
        assert_eq!(
            assoc
                .iter()
                .filter(|l| l.source == NodeId::Segment(0))
                .count(),
            2
        );
        assert!(assoc.iter().any(|l| l.is_self_link()));
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_node_order() {
        let snapshot = build(&[segment(0, "zebra zebra zebra")], 2);
        let ids = snapshot.node_ids();
        assert_eq!(
            ids,
            vec![
                NodeId::Segment(0),
                NodeId::Start,
                NodeId::End,
                NodeId::keyword("zebra")
            ]
        );
    }
}
