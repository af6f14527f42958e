//! Spatial partitioning for Quark simulations.
//!
//! The domain `[0, L)^D` is cut into a regular grid of cubes whose side is
//! the interaction cutoff radius `R`. Any two particles closer than `R`
//! then sit in the same cell or in adjacent cells, so pairwise force
//! evaluation only needs to visit the `3^D` cells around each particle.
//!
//! - [`CellGrid`]: the cell list, its precomputed neighbour offset table,
//!   and the stage/flush protocol for membership changes.
//! - [`Cell`]: one grid cube holding particle indices.
//! - [`BorderPolicy`]: what happens to a particle that leaves the domain.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod border;
pub mod cell;
pub mod error;
pub mod grid;

pub use border::{BorderPolicy, Placement};
pub use cell::Cell;
pub use error::SpaceError;
pub use grid::{CellGrid, Neighbours, MAX_CELLS};
