//! The cell-list force pass against O(N²) reference sums.

use proptest::prelude::*;
use quark_core::{Particle, Vector};
use quark_engine::{Simulation, SimulationConfig};
use quark_interact::{pair_fn, Interactor};
use quark_space::BorderPolicy;
use quark_test_utils::{
    adjacent_pair_forces, assert_vectors_close, cutoff_pair_forces, jittered_cloud,
    CountingInteractor, LinearSpring,
};

/// A spring truncated at `cutoff`.
fn truncated_spring<const D: usize>(k: f64, cutoff: f64) -> impl Interactor<D> {
    pair_fn("truncated-spring", move |t: &Particle<D>, s: &Particle<D>| {
        let r = s.position() - t.position();
        if r.sq_magnitude() > cutoff * cutoff {
            Vector::ZERO
        } else {
            r * k
        }
    })
}

fn forces<const D: usize>(sim: &Simulation<D>) -> Vec<Vector<D>> {
    sim.particles().iter().map(Particle::force).collect()
}

#[test]
fn every_adjacent_pair_counted_once() {
    let config = SimulationConfig {
        length: 6.0,
        cutoff_radius: 1.0,
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(config, jittered_cloud::<2>(80, 6.0, 0.0, 0.0, 5)).unwrap();
    let counter = CountingInteractor::new();
    sim.register_interactor(counter.clone());
    let evaluated = sim.refresh_forces();

    let grid = sim.grid();
    let n = sim.len();
    let expected = (0..n)
        .flat_map(|i| (0..i).map(move |j| (i, j)))
        .filter(|&(i, j)| match (grid.cell_of(i), grid.cell_of(j)) {
            (Some(a), Some(b)) => grid.are_adjacent(a, b),
            _ => false,
        })
        .count() as u64;
    assert_eq!(evaluated, expected);
    assert_eq!(counter.calls(), expected);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn grid_matches_adjacent_brute_force_2d(
        seed in any::<u64>(),
        count in 2usize..60,
        cutoff in 0.5f64..3.0,
    ) {
        let config = SimulationConfig {
            length: 6.0,
            cutoff_radius: cutoff,
            ..SimulationConfig::default()
        };
        let mut sim = Simulation::new(config, jittered_cloud::<2>(count, 6.0, 0.0, 0.0, seed)).unwrap();
        sim.register_interactor(LinearSpring { k: 0.7 });
        sim.refresh_forces();

        let expected = adjacent_pair_forces(sim.particles(), sim.grid(), sim.registry());
        assert_vectors_close(&forces(&sim), &expected, 1e-10);
    }

    #[test]
    fn truncated_law_matches_cutoff_brute_force_3d(
        seed in any::<u64>(),
        count in 2usize..50,
        cutoff in 0.8f64..2.5,
    ) {
        let config = SimulationConfig {
            length: 5.0,
            cutoff_radius: cutoff,
            ..SimulationConfig::default()
        };
        let mut sim = Simulation::new(config, jittered_cloud::<3>(count, 5.0, 0.0, 0.0, seed)).unwrap();
        sim.register_interactor(truncated_spring::<3>(1.3, cutoff));
        sim.refresh_forces();

        let expected = cutoff_pair_forces(sim.particles(), cutoff, sim.registry());
        assert_vectors_close(&forces(&sim), &expected, 1e-10);
    }

    #[test]
    fn repaired_grid_still_matches_after_steps(
        seed in any::<u64>(),
    ) {
        let config = SimulationConfig {
            length: 8.0,
            cutoff_radius: 1.5,
            border: BorderPolicy::Periodic,
            ..SimulationConfig::default()
        };
        let mut sim = Simulation::new(config, jittered_cloud::<2>(40, 8.0, 0.0, 2.0, seed)).unwrap();
        sim.register_interactor(truncated_spring::<2>(0.5, 1.5));
        for _ in 0..20 {
            sim.step(0.05).unwrap();
        }
        sim.refresh_forces();

        for i in 0..sim.len() {
            prop_assert_eq!(
                sim.grid().cell_of(i),
                Some(sim.grid().locate(&sim.particle(i).position()))
            );
        }
        let expected = cutoff_pair_forces(sim.particles(), 1.5, sim.registry());
        assert_vectors_close(&forces(&sim), &expected, 1e-10);
    }

    #[test]
    fn net_pair_force_is_zero(
        seed in any::<u64>(),
        count in 2usize..40,
    ) {
        let config = SimulationConfig {
            length: 4.0,
            cutoff_radius: 1.0,
            ..SimulationConfig::default()
        };
        let mut sim = Simulation::new(config, jittered_cloud::<2>(count, 4.0, 0.0, 0.0, seed)).unwrap();
        sim.register_interactor(LinearSpring { k: 2.0 });
        sim.refresh_forces();
        let net: Vector<2> = forces(&sim).into_iter().sum();
        prop_assert!(net.sq_magnitude().sqrt() < 1e-9, "net force {}", net);
    }
}
