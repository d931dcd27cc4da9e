//! Per-node physical state, stored by node id.

use std::collections::HashMap;

use transcript_types::{GraphLink, NodeId};

use crate::diff::SnapshotDiff;
use crate::seed::Seeder;

/// Position, velocity and optional pin of one node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Fixed position while dragged
    pub pin: Option<(f64, f64)>,
}

impl Particle {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }

    /// Advance one step. A pinned particle snaps to its pin and stops.
    pub(crate) fn integrate(&mut self, velocity_decay: f64) {
        match self.pin {
            Some((px, py)) => {
                self.x = px;
                self.y = py;
                self.vx = 0.0;
                self.vy = 0.0;
            }
            None => {
                self.vx *= 1.0 - velocity_decay;
                self.vy *= 1.0 - velocity_decay;
                self.x += self.vx;
                self.y += self.vy;
            }
        }
    }
}

/// Particles in snapshot node order, addressable by id.
///
/// Reconciling against a diff keeps the particle of every surviving id,
/// seeds particles for new ids and drops the rest.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    ids: Vec<NodeId>,
    particles: Vec<Particle>,
    index: HashMap<NodeId, usize>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &NodeId) -> Option<&Particle> {
        self.index.get(id).map(|&slot| &self.particles[slot])
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut Particle> {
        self.index.get(id).map(|&slot| &mut self.particles[slot])
    }

    /// Slot of `id` in node order.
    pub fn slot(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Ids in node order.
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Particle)> {
        self.ids.iter().zip(self.particles.iter())
    }

    /// Rebuild storage in the order of `next_ids`.
    ///
    /// `next_ids` must equal `diff.to_create` and `diff.to_update` merged in
    /// snapshot order. New particles are placed next to a linked particle
    /// that already has a position, falling back to the seeder's spiral.
    pub fn reconcile(
        &mut self,
        diff: &SnapshotDiff,
        next_ids: &[NodeId],
        links: &[GraphLink],
        seeder: &mut Seeder,
    ) {
        let mut placed: HashMap<NodeId, Particle> = HashMap::with_capacity(next_ids.len());
        for id in &diff.to_update {
            if let Some(particle) = self.get(id) {
                placed.insert(id.clone(), *particle);
            }
        }

        for (ordinal, id) in next_ids.iter().enumerate() {
            if placed.contains_key(id) {
                continue;
            }
            let neighbor = links
                .iter()
                .filter_map(|l| {
                    if &l.source == id {
                        Some(&l.target)
                    } else if &l.target == id {
                        Some(&l.source)
                    } else {
                        None
                    }
                })
                .filter(|other| *other != id)
                .find_map(|other| placed.get(other))
                .map(|p| (p.x, p.y));
            let (x, y) = seeder.place(ordinal, neighbor);
            placed.insert(id.clone(), Particle::at(x, y));
        }

        self.ids = next_ids.to_vec();
        self.particles = next_ids
            .iter()
            .map(|id| placed.get(id).copied().unwrap_or_default())
            .collect();
        self.index = self
            .ids
            .iter()
            .enumerate()
            .map(|(slot, id)| (id.clone(), slot))
            .collect();
    }
}
