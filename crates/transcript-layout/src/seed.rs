//! Initial placement for particles that enter the simulation.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Radius of the jitter around a linked neighbour.
const NEIGHBOR_RADIUS: f64 = 10.0;
/// Scale of the phyllotaxis spiral used when no neighbour is placed yet.
const SPIRAL_RADIUS: f64 = 10.0;

/// Chooses starting coordinates for new particles.
///
/// A new node starts next to a linked node that already has a position, so
/// a growing chain extends from its tail instead of collapsing from the
/// middle. Nodes with no placed neighbour land on a spiral around the
/// centre.
#[derive(Debug)]
pub struct Seeder {
    rng: StdRng,
    center: (f64, f64),
}

impl Seeder {
    /// Seeded for reproducible layouts, or from the OS when `seed` is None.
    pub fn new(seed: Option<u64>, center: (f64, f64)) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng, center }
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    /// Position for the `ordinal`-th node of a snapshot.
    pub fn place(&mut self, ordinal: usize, neighbor: Option<(f64, f64)>) -> (f64, f64) {
        match neighbor {
            Some((nx, ny)) => {
                let angle = self.rng.random_range(0.0..2.0 * PI);
                (
                    nx + NEIGHBOR_RADIUS * angle.cos(),
                    ny + NEIGHBOR_RADIUS * angle.sin(),
                )
            }
            None => {
                let radius = SPIRAL_RADIUS * (0.5 + ordinal as f64).sqrt();
                let angle = ordinal as f64 * PI * (3.0 - 5.0_f64.sqrt());
                (
                    self.center.0 + radius * angle.cos() + self.jitter(1.0),
                    self.center.1 + radius * angle.sin() + self.jitter(1.0),
                )
            }
        }
    }

    /// Tiny random offset used to separate coincident particles.
    pub fn jiggle(&mut self) -> f64 {
        (self.rng.random::<f64>() - 0.5) * 1e-6
    }

    fn jitter(&mut self, scale: f64) -> f64 {
        self.rng.random_range(-scale..scale)
    }
}
