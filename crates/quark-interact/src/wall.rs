//! The short-range wall push behind the reflexive border.

use crate::error::{require_positive, InteractionError};
use crate::interactor::Force;
use quark_core::{Particle, Vector};

/// Repulsion from the faces of the domain `[0, L)^D`.
///
/// Each face acts as a purely repulsive (WCA-truncated) Lennard-Jones
/// surface: at wall distance `w < 2^(1/6)·σ` the particle is pushed
/// inward with magnitude `24ε/w · (2(σ/w)^12 - (σ/w)^6)`. The force is
/// zero and continuous at the cutoff. `w` is floored at `σ/2`, which keeps
/// the push finite for particles touching or already past a face.
///
/// The push only approximates a rigid wall; a fast particle can still
/// tunnel out of the domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallRepulsion {
    length: f64,
    sigma: f64,
    epsilon: f64,
    cutoff: f64,
}

impl WallRepulsion {
    /// Walls at `0` and `length` on every axis.
    ///
    /// # Errors
    ///
    /// All three parameters must be finite and strictly positive.
    pub fn new(length: f64, sigma: f64, epsilon: f64) -> Result<Self, InteractionError> {
        let length = require_positive("wall", "length", length)?;
        let sigma = require_positive("wall", "sigma", sigma)?;
        let epsilon = require_positive("wall", "epsilon", epsilon)?;
        Ok(Self {
            length,
            sigma,
            epsilon,
            cutoff: 2f64.powf(1.0 / 6.0) * sigma,
        })
    }

    /// Distance from a face beyond which the wall exerts no force.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Magnitude of the push at wall distance `w`.
    fn push(&self, w: f64) -> f64 {
        if w >= self.cutoff {
            return 0.0;
        }
        let w = w.max(0.5 * self.sigma);
        let s2 = (self.sigma / w).powi(2);
        let s6 = s2 * s2 * s2;
        24.0 * self.epsilon / w * (2.0 * s6 * s6 - s6)
    }
}

impl<const D: usize> Force<D> for WallRepulsion {
    fn name(&self) -> &str {
        "wall"
    }

    fn force(&self, particle: &Particle<D>) -> Vector<D> {
        let x = particle.position();
        Vector::from_fn(|axis| self.push(x[axis]) - self.push(self.length - x[axis]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quark_core::{InitialCondition, ParticleFactory};

    fn at(pos: [f64; 2]) -> Particle<2> {
        ParticleFactory::new()
            .create(InitialCondition::at_rest(Vector::new(pos), 1.0))
            .unwrap()
    }

    fn wall() -> WallRepulsion {
        WallRepulsion::new(10.0, 1.0, 1.0).unwrap()
    }

    #[test]
    fn interior_feels_nothing() {
        assert_eq!(wall().force(&at([5.0, 5.0])), Vector::ZERO);
    }

    #[test]
    fn pushes_away_from_lower_face() {
        let f = wall().force(&at([0.8, 5.0]));
        assert!(f[0] > 0.0);
        assert_eq!(f[1], 0.0);
    }

    #[test]
    fn pushes_away_from_upper_face() {
        let f = wall().force(&at([5.0, 9.3]));
        assert!(f[1] < 0.0);
        assert_eq!(f[0], 0.0);
    }

    #[test]
    fn zero_at_cutoff() {
        let w = wall();
        let f = w.force(&at([w.cutoff(), 5.0]));
        assert_eq!(f, Vector::ZERO);
        assert!(w.push(w.cutoff() - 1e-9).abs() < 1e-6);
    }

    #[test]
    fn escaped_particle_pushed_back_finitely() {
        let f = wall().force(&at([-0.5, 10.5]));
        assert!(f.is_finite());
        assert!(f[0] > 0.0);
        assert!(f[1] < 0.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(WallRepulsion::new(0.0, 1.0, 1.0).is_err());
        assert!(WallRepulsion::new(1.0, -1.0, 1.0).is_err());
        assert!(WallRepulsion::new(1.0, 1.0, f64::NAN).is_err());
    }
}
