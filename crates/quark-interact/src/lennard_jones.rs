//! The 12-6 Lennard-Jones interaction.

use crate::error::{require_positive, InteractionError};
use crate::interactor::Interactor;
use quark_core::{Particle, Vector};

/// Lennard-Jones 12-6 pair law.
///
/// With `s6 = (σ/d)^6` the potential is `4ε (s6² - s6)` and the force on
/// `target` is `24ε/d² · s6 · (1 - 2·s6) · r` where `r = x_s - x_t`.
/// Pairs closer than `2^(1/6)·σ` repel, pairs further apart attract.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LennardJones {
    sigma: f64,
    epsilon: f64,
}

impl LennardJones {
    /// Build a law with particle size `sigma` and well depth `epsilon`.
    ///
    /// # Errors
    ///
    /// Both parameters must be finite and strictly positive.
    pub fn new(sigma: f64, epsilon: f64) -> Result<Self, InteractionError> {
        Ok(Self {
            sigma: require_positive("lennard-jones", "sigma", sigma)?,
            epsilon: require_positive("lennard-jones", "epsilon", epsilon)?,
        })
    }

    /// Particle size.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Well depth.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Separation at which the force vanishes (the potential minimum).
    pub fn equilibrium_distance(&self) -> f64 {
        2f64.powf(1.0 / 6.0) * self.sigma
    }

    fn s6(&self, d2: f64) -> f64 {
        let s2 = self.sigma * self.sigma / d2;
        s2 * s2 * s2
    }
}

impl Default for LennardJones {
    /// Reduced units: `σ = ε = 1`.
    fn default() -> Self {
        Self {
            sigma: 1.0,
            epsilon: 1.0,
        }
    }
}

impl<const D: usize> Interactor<D> for LennardJones {
    fn name(&self) -> &str {
        "lennard-jones"
    }

    fn interaction_force(&self, target: &Particle<D>, source: &Particle<D>) -> Vector<D> {
        let r = source.position() - target.position();
        let d2 = r.sq_magnitude();
        if d2 == 0.0 {
            return Vector::ZERO;
        }
        let s6 = self.s6(d2);
        r * (24.0 * self.epsilon / d2 * s6 * (1.0 - 2.0 * s6))
    }

    fn potential_energy(&self, a: &Particle<D>, b: &Particle<D>) -> Option<f64> {
        let d2 = (b.position() - a.position()).sq_magnitude();
        if d2 == 0.0 {
            return None;
        }
        let s6 = self.s6(d2);
        Some(4.0 * self.epsilon * (s6 * s6 - s6))
    }
}
