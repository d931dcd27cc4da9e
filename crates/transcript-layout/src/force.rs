//! Force policy and the three forces applied each tick.
//!
//! Forces only touch velocities (and, for centering, positions); pins are
//! honoured at integration time.

use transcript_types::{GraphNode, LayoutConfig, NodeGroup};

use crate::particle::Particle;
use crate::seed::Seeder;

/// Link and charge strengths derived from node groups.
#[derive(Debug, Clone, PartialEq)]
pub struct ForcePolicy {
    pub link_distance: f64,
    pub timeline_link_strength: f64,
    pub keyword_link_strength: f64,
    pub cross_link_divisor: f64,
    pub timeline_charge: f64,
    pub keyword_charge: f64,
}

impl ForcePolicy {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            link_distance: config.link_distance,
            timeline_link_strength: config.timeline_link_strength,
            keyword_link_strength: config.keyword_link_strength,
            cross_link_divisor: config.cross_link_divisor,
            timeline_charge: config.timeline_charge,
            keyword_charge: config.keyword_charge,
        }
    }

    /// Stiff within the timeline, loose between keywords, and scaled by
    /// keyword weight across groups.
    pub fn link_strength(&self, source: &GraphNode, target: &GraphNode) -> f64 {
        match (source.group(), target.group()) {
            (NodeGroup::Timeline, NodeGroup::Timeline) => self.timeline_link_strength,
            (NodeGroup::Keyword, NodeGroup::Keyword) => self.keyword_link_strength,
            _ => f64::from(source.weight().max(target.weight())) / self.cross_link_divisor,
        }
    }

    pub fn charge(&self, node: &GraphNode) -> f64 {
        match node.group() {
            NodeGroup::Timeline => self.timeline_charge,
            NodeGroup::Keyword => self.keyword_charge,
        }
    }
}

/// A link resolved to particle slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Spring {
    pub source: usize,
    pub target: usize,
    pub strength: f64,
    /// Share of the correction applied to the target
    pub bias: f64,
}

impl Spring {
    /// Resolve bias from per-slot link degrees.
    pub fn new(source: usize, target: usize, strength: f64, degree: &[usize]) -> Self {
        let total = (degree[source] + degree[target]) as f64;
        let bias = if total > 0.0 {
            degree[source] as f64 / total
        } else {
            0.5
        };
        Self {
            source,
            target,
            strength,
            bias,
        }
    }
}

/// Pull linked particles towards `distance` apart.
pub(crate) fn apply_springs(
    particles: &mut [Particle],
    springs: &[Spring],
    distance: f64,
    alpha: f64,
    seeder: &mut Seeder,
) {
    for spring in springs {
        if spring.source == spring.target {
            continue;
        }
        let s = particles[spring.source];
        let t = particles[spring.target];
        let mut dx = t.x + t.vx - s.x - s.vx;
        let mut dy = t.y + t.vy - s.y - s.vy;
        if dx == 0.0 {
            dx = seeder.jiggle();
        }
        if dy == 0.0 {
            dy = seeder.jiggle();
        }
        let length = (dx * dx + dy * dy).sqrt();
        let k = (length - distance) / length * alpha * spring.strength;
        dx *= k;
        dy *= k;

        let target = &mut particles[spring.target];
        target.vx -= dx * spring.bias;
        target.vy -= dy * spring.bias;
        let source = &mut particles[spring.source];
        source.vx += dx * (1.0 - spring.bias);
        source.vy += dy * (1.0 - spring.bias);
    }
}

/// Pairwise charge. Negative strengths repel.
pub(crate) fn apply_charge(
    particles: &mut [Particle],
    charges: &[f64],
    alpha: f64,
    seeder: &mut Seeder,
) {
    const MIN_DISTANCE_SQUARED: f64 = 1.0;

    let n = particles.len();
    for i in 0..n {
        let (mut fx, mut fy) = (0.0, 0.0);
        for j in 0..n {
            if i == j {
                continue;
            }
            let mut dx = particles[j].x - particles[i].x;
            let mut dy = particles[j].y - particles[i].y;
            let mut l = dx * dx + dy * dy;
            if dx == 0.0 {
                dx = seeder.jiggle();
                l += dx * dx;
            }
            if dy == 0.0 {
                dy = seeder.jiggle();
                l += dy * dy;
            }
            if l < MIN_DISTANCE_SQUARED {
                l = (MIN_DISTANCE_SQUARED * l).sqrt();
            }
            let w = charges[j] * alpha / l;
            fx += dx * w;
            fy += dy * w;
        }
        particles[i].vx += fx;
        particles[i].vy += fy;
    }
}

/// Translate every particle so the centroid sits on `center`.
pub(crate) fn apply_center(particles: &mut [Particle], center: (f64, f64)) {
    if particles.is_empty() {
        return;
    }
    let n = particles.len() as f64;
    let sx = particles.iter().map(|p| p.x).sum::<f64>() / n - center.0;
    let sy = particles.iter().map(|p| p.y).sum::<f64>() / n - center.1;
    for p in particles.iter_mut() {
        p.x -= sx;
        p.y -= sy;
    }
}
