//! Reusable scenarios and force laws.
//!
//! - [`two_body`]: two resting bodies a given distance apart.
//! - [`square_lattice`]: a 2D block of resting particles.
//! - [`jittered_cloud`]: seeded random particles with random velocities.
//! - [`LinearSpring`]: a smooth, bounded pair law.
//! - [`CountingInteractor`]: zero force, counts its invocations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use quark_core::{InitialCondition, Particle, Vector};
use quark_interact::Interactor;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Two unit-mass bodies at rest, centred in a box of side `length`,
/// separated by `distance` along axis 0.
pub fn two_body<const D: usize>(length: f64, distance: f64) -> Vec<InitialCondition<D>> {
    let centre = Vector::from_fn(|_| length / 2.0);
    let half = Vector::axis(0, distance / 2.0);
    vec![
        InitialCondition::at_rest(centre - half, 1.0),
        InitialCondition::at_rest(centre + half, 1.0),
    ]
}

/// `side x side` unit-mass particles at rest, `spacing` apart, with the
/// first one at `(origin, origin)`.
pub fn square_lattice(side: usize, spacing: f64, origin: f64) -> Vec<InitialCondition<2>> {
    (0..side * side)
        .map(|k| {
            let (row, col) = (k / side, k % side);
            let pos = Vector::new([
                origin + row as f64 * spacing,
                origin + col as f64 * spacing,
            ]);
            InitialCondition::at_rest(pos, 1.0)
        })
        .collect()
}

/// `count` particles uniformly placed in `[margin, length - margin)^D`
/// with velocity components in `[-speed, speed)` and masses in `[0.5, 2)`.
pub fn jittered_cloud<const D: usize>(
    count: usize,
    length: f64,
    margin: f64,
    speed: f64,
    seed: u64,
) -> Vec<InitialCondition<D>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let position = Vector::from_fn(|_| rng.random_range(margin..length - margin));
            let velocity = Vector::from_fn(|_| {
                if speed > 0.0 {
                    rng.random_range(-speed..speed)
                } else {
                    0.0
                }
            });
            InitialCondition {
                position,
                velocity,
                mass: rng.random_range(0.5..2.0),
            }
        })
        .collect()
}

/// Hooke spring between every pair: `k·(x_s - x_t)`.
#[derive(Clone, Copy, Debug)]
pub struct LinearSpring {
    pub k: f64,
}

impl<const D: usize> Interactor<D> for LinearSpring {
    fn name(&self) -> &str {
        "spring"
    }

    fn interaction_force(&self, target: &Particle<D>, source: &Particle<D>) -> Vector<D> {
        (source.position() - target.position()) * self.k
    }

    fn potential_energy(&self, a: &Particle<D>, b: &Particle<D>) -> Option<f64> {
        Some(0.5 * self.k * (b.position() - a.position()).sq_magnitude())
    }
}

/// Exerts no force; counts how often it is evaluated.
///
/// Clones share the counter, so a clone kept by the test observes calls
/// made on the copy registered with a simulation.
#[derive(Clone, Debug, Default)]
pub struct CountingInteractor {
    calls: Arc<AtomicU64>,
}

impl CountingInteractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.calls.store(0, Ordering::Relaxed);
    }
}

impl<const D: usize> Interactor<D> for CountingInteractor {
    fn name(&self) -> &str {
        "counting"
    }

    fn interaction_force(&self, _target: &Particle<D>, _source: &Particle<D>) -> Vector<D> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Vector::ZERO
    }
}
