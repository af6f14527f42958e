//! O(N²) reference force sums.
//!
//! Both functions return one accumulated force per particle, summing
//! registered interactors only (no unary forces), in the same `i > j`
//! pair orientation the engine uses.

use quark_core::{Particle, Vector};
use quark_interact::InteractionRegistry;
use quark_space::CellGrid;

/// Pairwise forces over every pair whose cells are equal or adjacent in
/// `grid`. Particles not on the grid get no force.
///
/// This is exactly the set of pairs the cell list reaches.
pub fn adjacent_pair_forces<const D: usize>(
    particles: &[Particle<D>],
    grid: &CellGrid<D>,
    registry: &InteractionRegistry<D>,
) -> Vec<Vector<D>> {
    let cells: Vec<Option<usize>> = (0..particles.len()).map(|i| grid.cell_of(i)).collect();
    let mut forces = vec![Vector::ZERO; particles.len()];
    for i in 0..particles.len() {
        for j in 0..i {
            let (Some(ci), Some(cj)) = (cells[i], cells[j]) else {
                continue;
            };
            if !grid.are_adjacent(ci, cj) {
                continue;
            }
            let f = registry.pair_force(&particles[i], &particles[j]);
            forces[i] += f;
            forces[j] -= f;
        }
    }
    forces
}

/// Pairwise forces over every pair no further apart than `cutoff`,
/// regardless of cell membership.
pub fn cutoff_pair_forces<const D: usize>(
    particles: &[Particle<D>],
    cutoff: f64,
    registry: &InteractionRegistry<D>,
) -> Vec<Vector<D>> {
    let mut forces = vec![Vector::ZERO; particles.len()];
    for i in 0..particles.len() {
        for j in 0..i {
            let d2 = (particles[i].position() - particles[j].position()).sq_magnitude();
            if d2 > cutoff * cutoff {
                continue;
            }
            let f = registry.pair_force(&particles[i], &particles[j]);
            forces[i] += f;
            forces[j] -= f;
        }
    }
    forces
}

/// Assert two force lists agree component-wise within `tol`, relative to
/// the larger magnitude.
///
/// # Panics
///
/// Panics with the first offending index.
pub fn assert_vectors_close<const D: usize>(actual: &[Vector<D>], expected: &[Vector<D>], tol: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        let scale = a.sq_magnitude().max(e.sq_magnitude()).sqrt().max(1.0);
        let diff = (*a - *e).sq_magnitude().sqrt();
        assert!(
            diff <= tol * scale,
            "particle {i}: got {a}, expected {e} (|diff| = {diff})"
        );
    }
}
