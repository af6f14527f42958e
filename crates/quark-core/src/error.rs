//! Error types for particle construction.

use std::error::Error;
use std::fmt;

/// Reasons a set of initial conditions cannot become a [`Particle`](crate::Particle).
#[derive(Clone, Debug, PartialEq)]
pub enum ParticleError {
    /// Mass is zero or negative. The integrator divides by mass.
    NonPositiveMass {
        /// The rejected mass.
        mass: f64,
    },
    /// Mass is NaN or infinite.
    NonFiniteMass {
        /// The rejected mass.
        mass: f64,
    },
    /// A position component is NaN or infinite.
    NonFinitePosition {
        /// First offending axis.
        axis: usize,
    },
    /// A velocity component is NaN or infinite.
    NonFiniteVelocity {
        /// First offending axis.
        axis: usize,
    },
}

impl fmt::Display for ParticleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMass { mass } => write!(f, "mass must be positive, got {mass}"),
            Self::NonFiniteMass { mass } => write!(f, "mass must be finite, got {mass}"),
            Self::NonFinitePosition { axis } => {
                write!(f, "position is not finite on axis {axis}")
            }
            Self::NonFiniteVelocity { axis } => {
                write!(f, "velocity is not finite on axis {axis}")
            }
        }
    }
}

impl Error for ParticleError {}
