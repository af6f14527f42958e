//! Newtonian gravity between point masses.

use crate::error::{require_positive, InteractionError};
use crate::interactor::Interactor;
use quark_core::{Particle, Vector};

/// Newton's gravitational constant in SI units (m³ kg⁻¹ s⁻²).
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

/// Pairwise Newtonian attraction.
///
/// The force on `target` is `G * m_t * m_s / d³` along the separation
/// vector `r = x_s - x_t`, with `d³ = (d²)^1.5`, so its magnitude is
/// `G * m_t * m_s / d²`. Coincident particles have no defined direction
/// and feel no force.
///
/// ```
/// use quark_core::{InitialCondition, ParticleFactory, Vector};
/// use quark_interact::{Gravity, Interactor};
///
/// let mut factory = ParticleFactory::new();
/// let a = factory.create(InitialCondition::at_rest(Vector::new([0.0, 0.0]), 1.0)).unwrap();
/// let b = factory.create(InitialCondition::at_rest(Vector::new([2.0, 0.0]), 1.0)).unwrap();
/// let gravity = Gravity::new(1.0).unwrap();
/// assert_eq!(gravity.interaction_force(&a, &b), Vector::new([0.25, 0.0]));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gravity {
    g: f64,
}

impl Gravity {
    /// Gravity with coupling constant `g`.
    ///
    /// # Errors
    ///
    /// `g` must be finite and strictly positive.
    pub fn new(g: f64) -> Result<Self, InteractionError> {
        Ok(Self {
            g: require_positive("gravity", "g", g)?,
        })
    }

    /// Gravity with the SI value of [`GRAVITATIONAL_CONSTANT`].
    pub fn newtonian() -> Self {
        Self {
            g: GRAVITATIONAL_CONSTANT,
        }
    }

    /// The coupling constant.
    pub fn g(&self) -> f64 {
        self.g
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::newtonian()
    }
}

impl<const D: usize> Interactor<D> for Gravity {
    fn name(&self) -> &str {
        "gravity"
    }

    fn interaction_force(&self, target: &Particle<D>, source: &Particle<D>) -> Vector<D> {
        let r = source.position() - target.position();
        let d2 = r.sq_magnitude();
        if d2 == 0.0 {
            return Vector::ZERO;
        }
        let d3 = d2.powf(1.5);
        r * (self.g * (target.mass() * source.mass()) / d3)
    }

    fn potential_energy(&self, a: &Particle<D>, b: &Particle<D>) -> Option<f64> {
        let d2 = (b.position() - a.position()).sq_magnitude();
        if d2 == 0.0 {
            return None;
        }
        Some(-self.g * (a.mass() * b.mass()) / d2.sqrt())
    }
}
