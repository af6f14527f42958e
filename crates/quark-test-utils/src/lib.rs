//! Test fixtures and reference computations for Quark development.
//!
//! - [`fixtures`]: canonical initial-condition sets (two bodies, lattice
//!   blocks, jittered clouds) and instrumented force laws.
//! - [`reference`]: O(N²) force sums to check the cell-list pass against.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod reference;

pub use fixtures::{
    jittered_cloud, square_lattice, two_body, CountingInteractor, LinearSpring,
};
pub use reference::{adjacent_pair_forces, assert_vectors_close, cutoff_pair_forces};
