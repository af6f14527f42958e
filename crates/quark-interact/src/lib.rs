//! Force laws for Quark simulations.
//!
//! Two extension points feed the engine's force pass:
//!
//! - [`Interactor`]: a symmetric two-particle law, evaluated once per
//!   unordered pair of particles in neighbouring cells.
//! - [`Force`]: a law depending on a single particle (external fields).
//!
//! Both are stored as owned trait objects in an [`InteractionRegistry`].
//! Reference implementations cover Newtonian [`Gravity`],
//! [`LennardJones`], a [`UniformField`], the [`WallRepulsion`] used by the
//! reflexive border and the inert [`NoInteraction`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod gravity;
pub mod interactor;
pub mod lennard_jones;
pub mod registry;
pub mod wall;

pub use error::InteractionError;
pub use field::UniformField;
pub use gravity::{Gravity, GRAVITATIONAL_CONSTANT};
pub use interactor::{pair_fn, unary_fn, Force, Interactor, NoInteraction, PairFn, UnaryFn};
pub use lennard_jones::LennardJones;
pub use registry::InteractionRegistry;
pub use wall::WallRepulsion;
