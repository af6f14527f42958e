//! Initial-condition generators.

use quark_core::{InitialCondition, Vector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `count` unit-mass particles at rest, uniformly distributed in
/// `[0, length)^D`.
///
/// Deterministic for a given `seed`. A non-positive or non-finite `length`
/// places every particle at the origin.
pub fn uniform_random<const D: usize>(
    count: usize,
    length: f64,
    seed: u64,
) -> Vec<InitialCondition<D>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let usable = length.is_finite() && length > 0.0;
    (0..count)
        .map(|_| {
            let position = Vector::from_fn(|_| {
                if usable {
                    rng.random_range(0.0..length)
                } else {
                    0.0
                }
            });
            InitialCondition::at_rest(position, 1.0)
        })
        .collect()
}

/// A regular block of particles at rest: `counts[a]` particles along axis
/// `a`, `spacing` apart, starting at `origin`.
///
/// Particles are emitted in row-major order (last axis fastest). Any zero
/// count yields an empty block.
pub fn lattice_block<const D: usize>(
    origin: Vector<D>,
    counts: [usize; D],
    spacing: f64,
    mass: f64,
) -> Vec<InitialCondition<D>> {
    let total: usize = counts.iter().product();
    (0..total)
        .map(|mut k| {
            let mut offset = [0usize; D];
            for axis in (0..D).rev() {
                offset[axis] = k % counts[axis];
                k /= counts[axis];
            }
            let position = Vector::from_fn(|a| origin[a] + offset[a] as f64 * spacing);
            InitialCondition::at_rest(position, mass)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_random_stays_in_domain() {
        let ics = uniform_random::<3>(500, 4.0, 7);
        assert_eq!(ics.len(), 500);
        for ic in &ics {
            assert!(ic.position.iter().all(|&c| (0.0..4.0).contains(&c)));
            assert_eq!(ic.velocity, Vector::ZERO);
            assert_eq!(ic.mass, 1.0);
        }
    }

    #[test]
    fn uniform_random_is_seeded() {
        let a = uniform_random::<2>(20, 1.0, 42);
        let b = uniform_random::<2>(20, 1.0, 42);
        let c = uniform_random::<2>(20, 1.0, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn lattice_block_layout() {
        let ics = lattice_block(Vector::new([1.0, 2.0]), [2, 3], 0.5, 2.0);
        let positions: Vec<[f64; 2]> = ics.iter().map(|ic| ic.position.into_array()).collect();
        assert_eq!(
            positions,
            vec![
                [1.0, 2.0],
                [1.0, 2.5],
                [1.0, 3.0],
                [1.5, 2.0],
                [1.5, 2.5],
                [1.5, 3.0],
            ]
        );
        assert!(ics.iter().all(|ic| ic.mass == 2.0));
    }

    #[test]
    fn empty_lattice_axis_yields_nothing() {
        assert!(lattice_block(Vector::<3>::ZERO, [4, 0, 4], 1.0, 1.0).is_empty());
    }
}
