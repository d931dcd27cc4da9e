//! Graph snapshot data model.
//!
//! A snapshot is the complete node/link set derived from the visible part of
//! a transcript. It is rebuilt wholesale on every recompute; only the layout
//! state survives between snapshots (keyed by [`NodeId`]).

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TranscriptError;

/// Identity of a graph node.
///
/// Serialized as the segment index (integer), `"start"`, `"end"`, or the
/// keyword stem. Only JSON numbers name segments; every string other than the
/// two anchors is a keyword, digits included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    /// Window index of a dialogue segment
    Segment(usize),
    /// Synthetic marker before the first segment
    Start,
    /// Synthetic marker after the last segment
    End,
    /// Stem of a frequent keyword
    Keyword(String),
}

impl NodeId {
    /// Ids reserved for anchors; a keyword stem may never take one of these.
    pub const RESERVED: [&'static str; 2] = ["start", "end"];

    pub fn keyword(stem: impl Into<String>) -> Self {
        NodeId::Keyword(stem.into())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Segment(index) => write!(f, "{index}"),
            NodeId::Start => write!(f, "start"),
            NodeId::End => write!(f, "end"),
            NodeId::Keyword(stem) => write!(f, "{stem}"),
        }
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        NodeId::Segment(index)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        match value {
            "start" => NodeId::Start,
            "end" => NodeId::End,
            other => NodeId::Keyword(other.to_string()),
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NodeId::Segment(index) => serializer.serialize_u64(*index as u64),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NodeIdVisitor;

        impl Visitor<'_> for NodeIdVisitor {
            type Value = NodeId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a segment index or a node name")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<NodeId, E> {
                Ok(NodeId::Segment(v as usize))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<NodeId, E> {
                usize::try_from(v)
                    .map(NodeId::Segment)
                    .map_err(|_| E::custom(format!("negative segment index {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<NodeId, E> {
                Ok(NodeId::from(v))
            }
        }

        deserializer.deserialize_any(NodeIdVisitor)
    }
}

/// Visual/physical group of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum NodeGroup {
    /// Segments and anchors (group 1)
    Timeline,
    /// Frequent keywords (group 2)
    Keyword,
}

impl From<NodeGroup> for u8 {
    fn from(group: NodeGroup) -> Self {
        match group {
            NodeGroup::Timeline => 1,
            NodeGroup::Keyword => 2,
        }
    }
}

impl TryFrom<u8> for NodeGroup {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(NodeGroup::Timeline),
            2 => Ok(NodeGroup::Keyword),
            other => Err(format!("unknown node group {other}")),
        }
    }
}

/// Which end of the segment chain an anchor marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Start,
    End,
}

/// A node of the topic graph.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphNode {
    /// A window of consecutive transcript entries
    Segment { index: usize, title: String },
    /// Start/end marker bracketing the segment chain
    Anchor(Anchor),
    /// A frequent stem, titled by its most common surface form
    Keyword {
        stem: String,
        title: String,
        weight: u32,
    },
}

impl GraphNode {
    pub fn id(&self) -> NodeId {
        match self {
            GraphNode::Segment { index, .. } => NodeId::Segment(*index),
            GraphNode::Anchor(Anchor::Start) => NodeId::Start,
            GraphNode::Anchor(Anchor::End) => NodeId::End,
            GraphNode::Keyword { stem, .. } => NodeId::Keyword(stem.clone()),
        }
    }

    pub fn group(&self) -> NodeGroup {
        match self {
            GraphNode::Keyword { .. } => NodeGroup::Keyword,
            _ => NodeGroup::Timeline,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            GraphNode::Segment { title, .. } | GraphNode::Keyword { title, .. } => title,
            GraphNode::Anchor(Anchor::Start) => "Start",
            GraphNode::Anchor(Anchor::End) => "End",
        }
    }

    /// Keyword occurrence count; timeline nodes carry no weight.
    pub fn weight(&self) -> u32 {
        match self {
            GraphNode::Keyword { weight, .. } => *weight,
            _ => 0,
        }
    }

    /// Radius the renderer draws the node with.
    pub fn radius(&self) -> f64 {
        match self {
            GraphNode::Keyword { weight, .. } => f64::from(*weight),
            GraphNode::Anchor(_) => 10.0,
            GraphNode::Segment { .. } => 5.0,
        }
    }

    /// Fill color hint; anchors are colored, the rest follow the group palette.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            GraphNode::Anchor(Anchor::Start) => Some("green"),
            GraphNode::Anchor(Anchor::End) => Some("red"),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct NodeRecord<'a> {
    id: NodeId,
    group: NodeGroup,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<u32>,
    radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'static str>,
}

impl Serialize for GraphNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeRecord {
            id: self.id(),
            group: self.group(),
            title: self.title(),
            weight: matches!(self, GraphNode::Keyword { .. }).then(|| self.weight()),
            radius: self.radius(),
            color: self.color(),
        }
        .serialize(serializer)
    }
}

/// Role of a link in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkClass {
    /// Consecutive segments
    Chain,
    /// Anchor to first segment, last segment to anchor
    Anchor,
    /// Node whose title mentions a frequent stem, to that keyword
    Association,
}

/// A directed link between two nodes of the same snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: NodeId,
    pub target: NodeId,
    pub class: LinkClass,
    pub width: f64,
    pub color: String,
}

impl GraphLink {
    pub fn new(source: NodeId, target: NodeId, class: LinkClass) -> Self {
        let (width, color) = match class {
            LinkClass::Chain | LinkClass::Anchor => (3.0, "#000"),
            LinkClass::Association => (1.0, "#999"),
        };
        Self {
            source,
            target,
            class,
            width,
            color: color.to_string(),
        }
    }

    pub fn chain(source: usize, target: usize) -> Self {
        Self::new(NodeId::Segment(source), NodeId::Segment(target), LinkClass::Chain)
    }

    pub fn anchor(source: NodeId, target: NodeId) -> Self {
        Self::new(source, target, LinkClass::Anchor)
    }

    pub fn association(source: NodeId, stem: &str) -> Self {
        Self::new(source, NodeId::keyword(stem), LinkClass::Association)
    }

    /// True when the link starts and ends at the same node.
    pub fn is_self_link(&self) -> bool {
        self.source == self.target
    }
}

/// Complete node/link set for one recompute pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<GraphNode>, links: Vec<GraphLink>) -> Self {
        Self { nodes, links }
    }

    /// Snapshot with no nodes, used for "no graph" states.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.id() == id)
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(GraphNode::id).collect()
    }

    pub fn segment_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, GraphNode::Segment { .. }))
            .count()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes
            .iter()
            .filter(|n| matches!(n, GraphNode::Keyword { .. }))
    }

    /// Check id uniqueness and that every link resolves within this snapshot.
    pub fn validate(&self) -> Result<(), TranscriptError> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let id = node.id();
            if !ids.insert(id.clone()) {
                return Err(TranscriptError::InvalidInput(format!(
                    "duplicate node id {id}"
                )));
            }
        }
        for link in &self.links {
            for end in [&link.source, &link.target] {
                if !ids.contains(end) {
                    return Err(TranscriptError::InvalidInput(format!(
                        "link {} -> {} references missing node {end}",
                        link.source, link.target
                    )));
                }
            }
        }
        Ok(())
    }
}
