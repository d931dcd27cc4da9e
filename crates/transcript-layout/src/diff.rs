//! Incremental reconciliation of consecutive snapshots.
//!
//! Node identity is the only thing carried across recomputes. The diff says
//! which ids need fresh particles, which keep theirs, and which are gone.

use std::collections::HashSet;

use tracing::debug;

use transcript_types::{GraphLink, GraphNode, NodeId};

/// Enter/update/exit sets between two snapshots, keyed by node id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// Ids only in the new snapshot, in new-snapshot order
    pub to_create: Vec<NodeId>,
    /// Ids in both snapshots, in new-snapshot order
    pub to_update: Vec<NodeId>,
    /// Ids only in the previous snapshot, in previous order
    pub to_remove: Vec<NodeId>,
}

impl SnapshotDiff {
    /// True when the node set is unchanged.
    pub fn is_unchanged(&self) -> bool {
        self.to_create.is_empty() && self.to_remove.is_empty()
    }
}

/// Compare the previous node ids with the next node list.
pub fn diff_nodes(previous: &[NodeId], next: &[GraphNode]) -> SnapshotDiff {
    let before: HashSet<&NodeId> = previous.iter().collect();
    let next_ids: Vec<NodeId> = next.iter().map(GraphNode::id).collect();
    let after: HashSet<&NodeId> = next_ids.iter().collect();

    let mut diff = SnapshotDiff::default();
    for id in &next_ids {
        if before.contains(id) {
            diff.to_update.push(id.clone());
        } else {
            diff.to_create.push(id.clone());
        }
    }
    diff.to_remove = previous
        .iter()
        .filter(|id| !after.contains(id))
        .cloned()
        .collect();

    debug!(
        create = diff.to_create.len(),
        update = diff.to_update.len(),
        remove = diff.to_remove.len(),
        "Diffed snapshot nodes"
    );
    diff
}

/// Drop links whose source or target is not in `nodes`.
pub fn prune_links(links: &[GraphLink], nodes: &[GraphNode]) -> Vec<GraphLink> {
    let ids: HashSet<NodeId> = nodes.iter().map(GraphNode::id).collect();
    let kept: Vec<GraphLink> = links
        .iter()
        .filter(|l| ids.contains(&l.source) && ids.contains(&l.target))
        .cloned()
        .collect();

    let dropped = links.len() - kept.len();
    if dropped > 0 {
        debug!(dropped = dropped, "Pruned orphaned links");
    }
    kept
}
