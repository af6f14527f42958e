//! Quark: cell-list molecular dynamics and N-body simulation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Quark sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use quark::prelude::*;
//!
//! // A 4x4 block of Lennard-Jones particles falling under a weak field.
//! let spacing = LennardJones::default().equilibrium_distance();
//! let block = lattice_block(Vector::new([4.0, 6.0]), [4, 4], spacing, 1.0);
//! let config = SimulationConfig {
//!     length: 20.0,
//!     cutoff_radius: 2.5,
//!     border: BorderPolicy::Reflexive,
//!     ..Default::default()
//! };
//! let mut sim = Simulation::<2>::new(config, block).unwrap();
//! sim.register_interactor(LennardJones::default());
//! sim.register_force(UniformField::downward(0.1).unwrap());
//!
//! for _ in 0..100 {
//!     sim.step(1e-3).unwrap();
//! }
//! assert_eq!(sim.step_count(), StepId(100));
//! assert_eq!(sim.absorbed_count(), 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `quark-core` | `Vector`, `Particle`, ids, the particle factory |
//! | [`space`] | `quark-space` | Cells, the cell grid, border policies |
//! | [`interact`] | `quark-interact` | Interactor and force traits, built-in laws |
//! | [`engine`] | `quark-engine` | Simulation loop, configuration, observers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Vectors, particles and ids (`quark-core`).
pub use quark_core as types;

/// The cell list and border policies (`quark-space`).
///
/// [`space::CellGrid`] partitions the domain; [`space::BorderPolicy`]
/// decides what happens at its faces.
pub use quark_space as space;

/// Force laws (`quark-interact`).
///
/// Implement [`interact::Interactor`] for pair laws and
/// [`interact::Force`] for single-particle laws.
pub use quark_interact as interact;

/// The simulation loop (`quark-engine`).
pub use quark_engine as engine;

/// Common imports for typical Quark usage.
///
/// ```rust
/// use quark::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use quark_core::{InitialCondition, Particle, ParticleId, StepId, Vector};

    // Space
    pub use quark_space::BorderPolicy;

    // Force laws
    pub use quark_interact::{
        pair_fn, unary_fn, Force, Gravity, Interactor, LennardJones, NoInteraction,
        UniformField,
    };

    // Engine
    pub use quark_engine::{
        lattice_block, uniform_random, ChannelObserver, ConfigError, FnObserver, Observer,
        Simulation, SimulationConfig, SimulationView, StepError, StepMetrics, ThermostatConfig,
        WallConfig,
    };
}
