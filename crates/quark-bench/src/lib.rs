//! Benchmark profiles for the Quark particle simulator.
//!
//! - [`falling_block`]: a 2D Lennard-Jones block under a uniform field
//!   inside reflexive walls
//! - [`gas`]: uniformly random 3D particles with Lennard-Jones and
//!   periodic borders

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use quark_core::Vector;
use quark_engine::{lattice_block, ConfigError, Simulation, SimulationConfig};
use quark_interact::{LennardJones, UniformField};
use quark_space::BorderPolicy;

/// A `side x side` block of particles at the Lennard-Jones equilibrium
/// spacing, in a box of side `4·side`, falling under a field of 0.5.
pub fn falling_block(side: usize) -> Result<Simulation<2>, ConfigError> {
    let lj = LennardJones::default();
    let length = 4.0 * side as f64;
    let origin = Vector::new([length / 4.0, length / 2.0]);
    let block = lattice_block(origin, [side, side], lj.equilibrium_distance(), 1.0);
    let config = SimulationConfig {
        length,
        cutoff_radius: 2.5,
        border: BorderPolicy::Reflexive,
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(config, block)?;
    sim.register_interactor(lj);
    sim.register_force(UniformField::downward(0.5)?);
    Ok(sim)
}

/// `count` particles placed at random (seeded) in a periodic 3D box
/// sized for a reduced density of about 0.1.
pub fn gas(count: usize, seed: u64) -> Result<Simulation<3>, ConfigError> {
    let length = (count as f64 / 0.1).cbrt().max(2.5);
    let config = SimulationConfig {
        length,
        cutoff_radius: 2.5,
        border: BorderPolicy::Periodic,
        seed,
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::random(config, count)?;
    // Random placement overlaps; a small sigma keeps early forces moderate.
    sim.register_interactor(LennardJones::new(0.3, 1.0)?);
    Ok(sim)
}
