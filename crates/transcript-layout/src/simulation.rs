//! Force-directed layout simulation.
//!
//! The simulation is long-lived: snapshots are swapped in and the particles
//! of surviving nodes keep their positions and velocities. Energy (alpha)
//! decays towards a target each tick; the simulation is idle once alpha
//! drops below its floor.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, trace};

use transcript_types::{GraphLink, GraphSnapshot, LayoutConfig, NodeId};

use crate::diff::{diff_nodes, prune_links, SnapshotDiff};
use crate::error::LayoutError;
use crate::force::{apply_center, apply_charge, apply_springs, ForcePolicy, Spring};
use crate::particle::{Particle, ParticleStore};
use crate::seed::Seeder;

/// Position of one node in a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePosition {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

/// Positions after one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub alpha: f64,
    pub positions: Vec<NodePosition>,
}

pub struct Simulation {
    config: LayoutConfig,
    policy: ForcePolicy,
    seeder: Seeder,
    particles: ParticleStore,
    links: Vec<GraphLink>,
    springs: Vec<Spring>,
    charges: Vec<f64>,
    alpha: f64,
    alpha_target: f64,
    dragging: HashSet<NodeId>,
    ticks: u64,
}

impl Simulation {
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate().map_err(LayoutError::InvalidConfig)?;
        let seeder = Seeder::new(config.seed, config.center());
        Ok(Self {
            policy: ForcePolicy::from_config(&config),
            seeder,
            particles: ParticleStore::new(),
            links: Vec::new(),
            springs: Vec::new(),
            charges: Vec::new(),
            alpha: 1.0,
            alpha_target: 0.0,
            dragging: HashSet::new(),
            ticks: 0,
            config,
        })
    }

    /// Swap in a new snapshot.
    ///
    /// Surviving nodes keep their particles; new nodes are seeded; removed
    /// nodes and any links touching them are dropped. Energy resets to 1
    /// when the node or link set changed.
    pub fn set_snapshot(&mut self, snapshot: &GraphSnapshot) -> SnapshotDiff {
        let diff = diff_nodes(self.particles.ids(), &snapshot.nodes);
        let links = prune_links(&snapshot.links, &snapshot.nodes);
        let changed = !diff.is_unchanged() || links != self.links;

        let next_ids = snapshot.node_ids();
        self.particles
            .reconcile(&diff, &next_ids, &links, &mut self.seeder);

        for id in &diff.to_remove {
            self.dragging.remove(id);
        }
        if self.dragging.is_empty() {
            self.alpha_target = 0.0;
        }

        self.charges = snapshot.nodes.iter().map(|n| self.policy.charge(n)).collect();
        self.springs = self.resolve_springs(snapshot, &links);
        self.links = links;

        if changed {
            self.alpha = 1.0;
            info!(
                nodes = next_ids.len(),
                links = self.links.len(),
                created = diff.to_create.len(),
                removed = diff.to_remove.len(),
                "Simulation restarted with new snapshot"
            );
        }
        diff
    }

    fn resolve_springs(&self, snapshot: &GraphSnapshot, links: &[GraphLink]) -> Vec<Spring> {
        let slots: Vec<(usize, usize)> = links
            .iter()
            .filter_map(|l| Some((self.particles.slot(&l.source)?, self.particles.slot(&l.target)?)))
            .collect();

        let mut degree = vec![0usize; self.particles.len()];
        for &(s, t) in &slots {
            degree[s] += 1;
            degree[t] += 1;
        }

        slots
            .into_iter()
            .map(|(s, t)| {
                let strength = self
                    .policy
                    .link_strength(&snapshot.nodes[s], &snapshot.nodes[t]);
                Spring::new(s, t, strength, &degree)
            })
            .collect()
    }

    /// Run one physics step regardless of energy.
    pub fn step(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

        let alpha = self.alpha;
        let distance = self.policy.link_distance;
        let center = self.config.center();
        let velocity_decay = self.config.velocity_decay;

        let particles = self.particles.particles_mut();
        apply_springs(particles, &self.springs, distance, alpha, &mut self.seeder);
        apply_charge(particles, &self.charges, alpha, &mut self.seeder);
        apply_center(particles, center);
        for particle in particles.iter_mut() {
            particle.integrate(velocity_decay);
        }

        self.ticks += 1;
        trace!(tick = self.ticks, alpha = alpha, "Simulation step");
    }

    /// Step if the simulation still has energy.
    ///
    /// Returns whether a step was taken.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.step();
        if !self.is_running() {
            debug!(ticks = self.ticks, "Simulation settled");
        }
        true
    }

    /// Step until settled or `max_ticks` steps were taken. Returns the steps run.
    pub fn run(&mut self, max_ticks: u64) -> u64 {
        let mut steps = 0;
        while steps < max_ticks && self.tick() {
            steps += 1;
        }
        steps
    }

    pub fn is_running(&self) -> bool {
        self.alpha >= self.config.alpha_min
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn alpha_target(&self) -> f64 {
        self.alpha_target
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn particle(&self, id: &NodeId) -> Option<&Particle> {
        self.particles.get(id)
    }

    /// Links currently driving the simulation, orphans already removed.
    pub fn links(&self) -> &[GraphLink] {
        &self.links
    }

    pub fn positions(&self) -> Vec<NodePosition> {
        self.particles
            .iter()
            .map(|(id, p)| NodePosition {
                id: id.clone(),
                x: p.x,
                y: p.y,
            })
            .collect()
    }

    pub fn frame(&self) -> Frame {
        Frame {
            tick: self.ticks,
            alpha: self.alpha,
            positions: self.positions(),
        }
    }

    /// Pin `id` where it is and keep the simulation warm while dragging.
    ///
    /// Returns false (and does nothing) for unknown ids.
    pub fn drag_start(&mut self, id: &NodeId) -> bool {
        let Some(particle) = self.particles.get_mut(id) else {
            debug!(node = %id, "Ignoring drag start for unknown node");
            return false;
        };
        particle.pin = Some((particle.x, particle.y));
        self.dragging.insert(id.clone());
        self.alpha_target = self.config.drag_alpha_target;
        if self.alpha < self.config.alpha_min {
            // resume from the floor so the first tick runs
            self.alpha = self.config.alpha_min;
        }
        debug!(node = %id, "Drag started");
        true
    }

    /// Move the pin of a dragged node.
    pub fn drag_move(&mut self, id: &NodeId, x: f64, y: f64) -> bool {
        if !self.dragging.contains(id) {
            return false;
        }
        match self.particles.get_mut(id) {
            Some(particle) => {
                particle.pin = Some((x, y));
                true
            }
            None => false,
        }
    }

    /// Release a dragged node. Energy then decays back to idle once no
    /// drags remain.
    pub fn drag_end(&mut self, id: &NodeId) -> bool {
        if !self.dragging.remove(id) {
            return false;
        }
        if let Some(particle) = self.particles.get_mut(id) {
            particle.pin = None;
        }
        if self.dragging.is_empty() {
            self.alpha_target = 0.0;
        }
        debug!(node = %id, "Drag ended");
        true
    }

    pub fn is_dragging(&self, id: &NodeId) -> bool {
        self.dragging.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcript_types::{Anchor, GraphNode};

    fn config() -> LayoutConfig {
        LayoutConfig {
            seed: Some(7),
            ..LayoutConfig::default()
        }
    }

    fn chain(n: usize) -> GraphSnapshot {
        let mut nodes: Vec<GraphNode> = (0..n)
            .map(|index| GraphNode::Segment {
                index,
                title: format!("segment {index}"),
            })
            .collect();
        nodes.push(GraphNode::Anchor(Anchor::Start));
        nodes.push(GraphNode::Anchor(Anchor::End));
        let mut links: Vec<GraphLink> = (1..n).map(|i| GraphLink::chain(i - 1, i)).collect();
        links.push(GraphLink::anchor(NodeId::Start, NodeId::Segment(0)));
        links.push(GraphLink::anchor(NodeId::Segment(n - 1), NodeId::End));
        GraphSnapshot::new(nodes, links)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = Simulation::new(LayoutConfig {
            width: 0.0,
            ..config()
        });
        assert!(matches!(result, Err(LayoutError::InvalidConfig(_))));
    }

    #[test]
    fn test_snapshot_change_resets_alpha() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.set_snapshot(&chain(3));
        sim.run(50);
        assert!(sim.alpha() < 1.0);

        sim.set_snapshot(&chain(4));
        assert_eq!(sim.alpha(), 1.0);
    }

    #[test]
    fn test_identical_snapshot_keeps_alpha() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.set_snapshot(&chain(3));
        sim.run(50);
        let alpha = sim.alpha();
        let diff = sim.set_snapshot(&chain(3));
        assert!(diff.is_unchanged());
        assert_eq!(sim.alpha(), alpha);
    }

    #[test]
    fn test_surviving_nodes_keep_position() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.set_snapshot(&chain(3));
        sim.run(20);
        let before = *sim.particle(&NodeId::Segment(1)).unwrap();

        let diff = sim.set_snapshot(&chain(4));
        assert_eq!(diff.to_create, vec![NodeId::Segment(3)]);
        assert_eq!(*sim.particle(&NodeId::Segment(1)).unwrap(), before);
    }

    #[test]
    fn test_orphan_links_are_dropped() {
        let mut sim = Simulation::new(config()).unwrap();
        let mut snapshot = chain(2);
        snapshot
            .links
            .push(GraphLink::association(NodeId::Segment(0), "missing"));
        sim.set_snapshot(&snapshot);
        assert_eq!(sim.links().len(), 3);
        sim.run(10);
        assert!(sim.positions().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_simulation_settles() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.set_snapshot(&chain(5));
        let steps = sim.run(10_000);
        assert!(!sim.is_running());
        assert!(steps < 10_000);
        assert!(!sim.tick());
    }

    #[test]
    fn test_drag_pins_and_release_decays() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.set_snapshot(&chain(5));
        sim.run(10_000);
        assert!(!sim.is_running());

        let id = NodeId::Segment(3);
        assert!(sim.drag_start(&id));
        assert!(sim.drag_move(&id, 100.0, 200.0));
        for _ in 0..30 {
            sim.tick();
            let p = sim.particle(&id).unwrap();
            assert_eq!((p.x, p.y), (100.0, 200.0));
        }

        assert!(sim.drag_end(&id));
        assert!(!sim.particle(&id).unwrap().is_pinned());
        let released = sim.alpha();
        assert!(released > 0.0);
        assert_eq!(sim.alpha_target(), 0.0);

        sim.tick();
        assert!(sim.alpha() < released);
    }

    #[test]
    fn test_unknown_drag_is_ignored() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.set_snapshot(&chain(2));
        let ghost = NodeId::keyword("ghost");
        assert!(!sim.drag_start(&ghost));
        assert!(!sim.drag_move(&ghost, 1.0, 1.0));
        assert!(!sim.drag_end(&ghost));
        assert_eq!(sim.alpha_target(), 0.0);
    }

    #[test]
    fn test_removed_dragged_node_releases_target() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.set_snapshot(&chain(4));
        assert!(sim.drag_start(&NodeId::Segment(3)));
        sim.set_snapshot(&chain(2));
        assert!(!sim.is_dragging(&NodeId::Segment(3)));
        assert_eq!(sim.alpha_target(), 0.0);
    }

    #[test]
    fn test_frame_lists_every_node() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.set_snapshot(&chain(2));
        sim.tick();
        let frame = sim.frame();
        assert_eq!(frame.tick, 1);
        assert_eq!(frame.positions.len(), 4);
        assert_eq!(frame.positions[0].id, NodeId::Segment(0));
    }
}
