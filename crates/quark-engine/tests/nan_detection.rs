//! Particles whose position becomes non-finite are dropped from the grid.

use quark_core::{InitialCondition, Particle, Vector};
use quark_engine::{Simulation, SimulationConfig};
use quark_interact::{unary_fn, Gravity};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn infinite_force_loses_only_the_affected_particle() {
    init_logging();
    let config = SimulationConfig {
        length: 10.0,
        cutoff_radius: 2.0,
        ..SimulationConfig::default()
    };
    let ics = vec![
        InitialCondition::at_rest(Vector::new([2.0, 2.0]), 1.0),
        InitialCondition::at_rest(Vector::new([7.0, 7.0]), 1.0),
    ];
    let mut sim = Simulation::new(config, ics).unwrap();
    sim.register_force(unary_fn("runaway", |p: &Particle<2>| {
        if p.id().0 == 1 {
            Vector::new([f64::INFINITY, 0.0])
        } else {
            Vector::ZERO
        }
    }));

    let metrics = sim.step(0.1).unwrap();
    assert_eq!(metrics.lost, 1);
    assert_eq!(metrics.absorbed, 0);
    assert!(sim.is_lost(1));
    assert!(sim.is_absorbed(1));
    assert_eq!(sim.lost_count(), 1);
    assert_eq!(sim.absorbed_count(), 0);
    assert_eq!(sim.grid().cell_of(1), None);

    // The healthy particle is untouched and keeps stepping.
    for _ in 0..3 {
        let metrics = sim.step(0.1).unwrap();
        assert_eq!(metrics.lost, 0);
    }
    assert_eq!(sim.particle(0).position(), Vector::new([2.0, 2.0]));
    assert!(sim.total_momentum().is_finite());
    assert!(sim.kinetic_energy().is_finite());
}

#[test]
fn non_finite_particle_does_not_poison_its_neighbour() {
    init_logging();
    let config = SimulationConfig {
        length: 10.0,
        cutoff_radius: 2.0,
        ..SimulationConfig::default()
    };
    let ics = vec![
        InitialCondition::at_rest(Vector::new([4.5, 5.0]), 1.0),
        InitialCondition::at_rest(Vector::new([5.5, 5.0]), 1.0),
    ];
    let mut sim = Simulation::new(config, ics).unwrap();
    sim.register_interactor(Gravity::new(1.0).unwrap());
    sim.register_force(unary_fn("runaway", |p: &Particle<2>| {
        if p.id().0 == 1 {
            Vector::new([f64::INFINITY, 0.0])
        } else {
            Vector::ZERO
        }
    }));

    let metrics = sim.step(0.01).unwrap();
    assert_eq!(metrics.lost, 1);
    assert_eq!(metrics.pair_evaluations, 0);
    assert!(sim.is_lost(1));
    assert!(!sim.is_absorbed(0));
    assert!(sim.particle(0).velocity().is_finite());
    assert!(sim.particle(0).force().is_finite());

    for _ in 0..5 {
        assert_eq!(sim.step(0.01).unwrap().lost, 0);
    }
    assert!(!sim.is_lost(0));
    assert_eq!(sim.lost_count(), 1);
    assert_eq!(sim.active_count(), 1);
    assert!(sim.particle(0).position().is_finite());
    assert_eq!(sim.grid().occupancy(), 1);
}
