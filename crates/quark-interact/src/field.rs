//! Uniform external fields.

use crate::error::InteractionError;
use crate::interactor::Force;
use quark_core::{Particle, Vector};

/// A constant field pulling every particle with force `-g · mass` along one
/// axis.
///
/// An axis outside the simulation's dimensionality contributes nothing.
///
/// ```
/// use quark_core::{InitialCondition, ParticleFactory, Vector};
/// use quark_interact::{Force, UniformField};
///
/// let mut factory = ParticleFactory::new();
/// let p = factory.create(InitialCondition::at_rest(Vector::new([0.5, 0.5]), 2.0)).unwrap();
/// let field = UniformField::downward(9.81).unwrap();
/// assert_eq!(field.force(&p), Vector::new([0.0, -19.62]));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformField {
    g: f64,
    axis: usize,
}

impl UniformField {
    /// A field of strength `g` along `axis`.
    ///
    /// Negative `g` reverses the pull.
    ///
    /// # Errors
    ///
    /// `g` must be finite.
    pub fn new(g: f64, axis: usize) -> Result<Self, InteractionError> {
        if !g.is_finite() {
            return Err(InteractionError::InvalidParameter {
                law: "uniform-field",
                parameter: "g",
                value: g,
            });
        }
        Ok(Self { g, axis })
    }

    /// A field along axis 1, the conventional "down" of the falling-block
    /// scenario.
    ///
    /// # Errors
    ///
    /// `g` must be finite.
    pub fn downward(g: f64) -> Result<Self, InteractionError> {
        Self::new(g, 1)
    }

    /// Field strength.
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Axis the field acts along.
    pub fn axis(&self) -> usize {
        self.axis
    }
}

impl<const D: usize> Force<D> for UniformField {
    fn name(&self) -> &str {
        "uniform-field"
    }

    fn force(&self, particle: &Particle<D>) -> Vector<D> {
        Vector::axis(self.axis, -self.g * particle.mass())
    }
}
