//! # transcript-layout
//!
//! Continuous force-directed layout for topic graph snapshots.
//!
//! Snapshots are reconciled by node id, so a node that survives a recompute
//! keeps its position and velocity. Each tick applies link springs, pairwise
//! charge and a centering force, then integrates with velocity decay. Dragged
//! nodes are pinned until released.

pub mod diff;
pub mod error;
pub mod force;
pub mod particle;
pub mod seed;
pub mod simulation;

pub use diff::{diff_nodes, prune_links, SnapshotDiff};
pub use error::LayoutError;
pub use force::ForcePolicy;
pub use particle::{Particle, ParticleStore};
pub use seed::Seeder;
pub use simulation::{Frame, NodePosition, Simulation};
