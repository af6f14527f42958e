//! Simulation engine for Quark particle systems.
//!
//! [`Simulation`] owns the particles, the [`CellGrid`](quark_space::CellGrid)
//! and the registered force laws, and advances the system with a
//! Störmer-Verlet (velocity-Verlet) step:
//!
//! 1. drift positions by a full step using the current force,
//! 2. recompute every force through the cell list,
//! 3. kick velocities with the average of old and new force,
//! 4. repair stale cell membership under the active border policy,
//! 5. notify observers with a read-only [`SimulationView`].
//!
//! Everything runs on the caller's thread and is deterministic for a given
//! configuration, initial state and sequence of step sizes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod init;
mod integrator;
pub mod metrics;
pub mod observer;
pub mod simulation;
pub mod thermostat;

pub use config::{ConfigError, SimulationConfig, ThermostatConfig, WallConfig};
pub use init::{lattice_block, uniform_random};
pub use metrics::StepMetrics;
pub use observer::{ChannelObserver, FnObserver, Observer, OwnedSnapshot, SimulationView};
pub use simulation::{Simulation, StepError};
pub use thermostat::Thermostat;
