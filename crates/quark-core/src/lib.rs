//! Core types for the Quark particle simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the data every other layer passes around: the fixed-size [`Vector`],
//! the [`Particle`] record, strongly-typed identifiers and the errors
//! raised when a particle is constructed from invalid initial conditions.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod particle;
pub mod vector;

pub use error::ParticleError;
pub use id::{CellCoord, ParticleId, StepId};
pub use particle::{InitialCondition, Particle, ParticleFactory};
pub use vector::Vector;
