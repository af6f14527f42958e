//! Periodic velocity-rescaling thermostat.

use quark_core::Particle;

use crate::config::ThermostatConfig;

/// Instantaneous temperature `2·KE / (D·n)` of the particles not marked in
/// `excluded`, with the Boltzmann constant set to 1.
///
/// Zero when no particle is active.
pub fn temperature<const D: usize>(particles: &[Particle<D>], excluded: &[bool]) -> f64 {
    let (ke, n) = particles
        .iter()
        .zip(excluded)
        .filter(|&(_, &out)| !out)
        .fold((0.0, 0usize), |(ke, n), (p, _)| (ke + p.kinetic_energy(), n + 1));
    if n == 0 || D == 0 {
        return 0.0;
    }
    2.0 * ke / (D * n) as f64
}

/// Rescales active velocities towards a target temperature every
/// `period` steps.
///
/// A system at zero temperature is left alone: there is no velocity to
/// scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thermostat {
    config: ThermostatConfig,
}

impl Thermostat {
    /// A thermostat with validated settings.
    pub fn new(config: ThermostatConfig) -> Self {
        Self { config }
    }

    /// The settings in use.
    pub fn config(&self) -> &ThermostatConfig {
        &self.config
    }

    /// Whether the step that just completed with number `step` is a
    /// rescaling step.
    pub fn is_due(&self, step: u64) -> bool {
        self.config.period > 0 && step % self.config.period == 0
    }

    /// Rescale active velocities and return the factor applied, or `None`
    /// if the system has no temperature to scale.
    pub fn rescale<const D: usize>(
        &self,
        particles: &mut [Particle<D>],
        excluded: &[bool],
    ) -> Option<f64> {
        let t = temperature(particles, excluded);
        if t <= 0.0 || !t.is_finite() {
            return None;
        }
        let factor = (self.config.target_temperature / t).sqrt();
        for (p, _) in particles.iter_mut().zip(excluded).filter(|&(_, &out)| !out) {
            p.scale_velocity(factor);
        }
        Some(factor)
    }
}
