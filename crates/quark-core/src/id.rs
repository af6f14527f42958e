//! Strongly-typed identifiers and the [`CellCoord`] type alias.

use std::fmt;

/// Identity of a particle, assigned once at creation.
///
/// Ids come from a [`ParticleFactory`](crate::ParticleFactory) counter and
/// are never reused or reset for the lifetime of that factory. They are
/// distinct from the particle *index*, which is the particle's slot in the
/// simulation's particle array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ParticleId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Monotonically increasing step counter.
///
/// Incremented each time the simulation advances one time step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Integer coordinate of a grid cell, one component per axis.
pub type CellCoord<const D: usize> = [i32; D];
