//! The [`Particle`] record and the [`ParticleFactory`] that mints it.

use crate::error::ParticleError;
use crate::id::ParticleId;
use crate::vector::Vector;

/// Position, velocity and mass of a particle before it exists.
///
/// Plain data: validation happens when a [`ParticleFactory`] turns it into
/// a [`Particle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitialCondition<const D: usize> {
    /// Starting position.
    pub position: Vector<D>,
    /// Starting velocity.
    pub velocity: Vector<D>,
    /// Mass. Must be finite and strictly positive.
    pub mass: f64,
}

impl<const D: usize> InitialCondition<D> {
    /// A particle of `mass` resting at `position`.
    pub fn at_rest(position: Vector<D>, mass: f64) -> Self {
        Self {
            position,
            velocity: Vector::ZERO,
            mass,
        }
    }

    /// Check the invariants a [`Particle`] relies on.
    pub fn validate(&self) -> Result<(), ParticleError> {
        if !self.mass.is_finite() {
            return Err(ParticleError::NonFiniteMass { mass: self.mass });
        }
        if self.mass <= 0.0 {
            return Err(ParticleError::NonPositiveMass { mass: self.mass });
        }
        if let Some(axis) = self.position.iter().position(|c| !c.is_finite()) {
            return Err(ParticleError::NonFinitePosition { axis });
        }
        if let Some(axis) = self.velocity.iter().position(|c| !c.is_finite()) {
            return Err(ParticleError::NonFiniteVelocity { axis });
        }
        Ok(())
    }
}

/// A point mass.
///
/// The force vector is scratch space for a single step: the engine resets
/// it to zero before every force pass and interactions only ever add to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<const D: usize> {
    id: ParticleId,
    position: Vector<D>,
    velocity: Vector<D>,
    force: Vector<D>,
    mass: f64,
}

impl<const D: usize> Particle<D> {
    /// Identity assigned at creation.
    pub fn id(&self) -> ParticleId {
        self.id
    }

    /// Current position.
    pub fn position(&self) -> Vector<D> {
        self.position
    }

    /// Current velocity.
    pub fn velocity(&self) -> Vector<D> {
        self.velocity
    }

    /// Force accumulated during the current step.
    pub fn force(&self) -> Vector<D> {
        self.force
    }

    /// Mass (always finite and positive).
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Linear momentum `m * v`.
    pub fn momentum(&self) -> Vector<D> {
        self.velocity * self.mass
    }

    /// Kinetic energy `m * |v|^2 / 2`.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.sq_magnitude()
    }

    /// Move the particle by `delta`.
    pub fn displace(&mut self, delta: Vector<D>) {
        self.position += delta;
    }

    /// Overwrite the position (used by periodic wrapping).
    pub fn set_position(&mut self, position: Vector<D>) {
        self.position = position;
    }

    /// Change the velocity by `delta`.
    pub fn accelerate(&mut self, delta: Vector<D>) {
        self.velocity += delta;
    }

    /// Multiply the velocity by `factor`.
    pub fn scale_velocity(&mut self, factor: f64) {
        self.velocity *= factor;
    }

    /// Add `force` to the accumulated force.
    pub fn add_force(&mut self, force: Vector<D>) {
        self.force += force;
    }

    /// Zero the accumulated force.
    pub fn reset_force(&mut self) {
        self.force.reset();
    }
}

/// Mints particles with unique, monotonically increasing ids.
///
/// Each simulation owns one factory; there is no process-wide counter.
///
/// ```
/// use quark_core::{InitialCondition, ParticleFactory, Vector};
///
/// let mut factory = ParticleFactory::new();
/// let a = factory.create(InitialCondition::at_rest(Vector::new([0.0, 0.0]), 1.0)).unwrap();
/// let b = factory.create(InitialCondition::at_rest(Vector::new([1.0, 0.0]), 1.0)).unwrap();
/// assert!(a.id() < b.id());
/// assert!(factory.create(InitialCondition::at_rest(Vector::new([0.0, 0.0]), 0.0)).is_err());
/// ```
#[derive(Debug, Default)]
pub struct ParticleFactory {
    next: u64,
}

impl ParticleFactory {
    /// A factory whose first particle gets id 0.
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Number of particles created so far.
    pub fn issued(&self) -> u64 {
        self.next
    }

    /// Validate `initial` and create a particle with the next id.
    ///
    /// A rejected condition does not consume an id.
    pub fn create<const D: usize>(
        &mut self,
        initial: InitialCondition<D>,
    ) -> Result<Particle<D>, ParticleError> {
        initial.validate()?;
        let id = ParticleId(self.next);
        self.next += 1;
        Ok(Particle {
            id,
            position: initial.position,
            velocity: initial.velocity,
            force: Vector::ZERO,
            mass: initial.mass,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest(x: f64, mass: f64) -> InitialCondition<2> {
        InitialCondition::at_rest(Vector::new([x, 0.0]), mass)
    }

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let mut factory = ParticleFactory::new();
        let ids: Vec<u64> = (0..5)
            .map(|i| factory.create(rest(i as f64, 1.0)).unwrap().id().0)
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(factory.issued(), 5);
    }

    #[test]
    fn rejected_condition_does_not_consume_id() {
        let mut factory = ParticleFactory::new();
        assert!(factory.create(rest(0.0, -1.0)).is_err());
        assert_eq!(factory.create(rest(0.0, 1.0)).unwrap().id(), ParticleId(0));
    }

    #[test]
    fn zero_mass_rejected() {
        assert_eq!(
            rest(0.0, 0.0).validate(),
            Err(ParticleError::NonPositiveMass { mass: 0.0 })
        );
    }

    #[test]
    fn nan_mass_rejected() {
        assert!(matches!(
            rest(0.0, f64::NAN).validate(),
            Err(ParticleError::NonFiniteMass { .. })
        ));
    }

    #[test]
    fn non_finite_position_reports_axis() {
        let ic = InitialCondition::at_rest(Vector::new([0.0, f64::INFINITY]), 1.0);
        assert_eq!(
            ic.validate(),
            Err(ParticleError::NonFinitePosition { axis: 1 })
        );
    }

    #[test]
    fn non_finite_velocity_rejected() {
        let ic = InitialCondition {
            position: Vector::new([0.0, 0.0]),
            velocity: Vector::new([f64::NAN, 0.0]),
            mass: 1.0,
        };
        assert_eq!(
            ic.validate(),
            Err(ParticleError::NonFiniteVelocity { axis: 0 })
        );
    }

    #[test]
    fn force_accumulates_until_reset() {
        let mut p = ParticleFactory::new().create(rest(0.0, 2.0)).unwrap();
        p.add_force(Vector::new([1.0, 0.0]));
        p.add_force(Vector::new([0.5, -1.0]));
        assert_eq!(p.force(), Vector::new([1.5, -1.0]));
        p.reset_force();
        assert_eq!(p.force(), Vector::ZERO);
    }

    #[test]
    fn momentum_and_kinetic_energy() {
        let mut p = ParticleFactory::new().create(rest(0.0, 2.0)).unwrap();
        p.accelerate(Vector::new([3.0, 4.0]));
        assert_eq!(p.momentum(), Vector::new([6.0, 8.0]));
        assert_eq!(p.kinetic_energy(), 25.0);
    }
}
