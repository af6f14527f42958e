//! Simulation configuration, validation, and error types.
//!
//! [`SimulationConfig`] is the input to
//! [`Simulation::new`](crate::Simulation::new). [`validate()`](SimulationConfig::validate)
//! checks the scalar invariants; the constructor additionally rejects
//! `D == 0`, empty particle sets and invalid initial conditions.

use std::error::Error;
use std::fmt;

use quark_core::ParticleError;
use quark_interact::{InteractionError, WallRepulsion};
use quark_space::{BorderPolicy, SpaceError};

// ── WallConfig ─────────────────────────────────────────────────────

/// Parameters of the push applied near the domain faces under
/// [`BorderPolicy::Reflexive`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallConfig {
    /// Range parameter of the wall potential. Default: 1.0.
    pub sigma: f64,
    /// Strength of the wall potential. Default: 1.0.
    pub epsilon: f64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            epsilon: 1.0,
        }
    }
}

// ── ThermostatConfig ───────────────────────────────────────────────

/// Velocity-rescaling thermostat settings. See [`Thermostat`](crate::Thermostat).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermostatConfig {
    /// Temperature the system is driven towards (Boltzmann constant 1).
    pub target_temperature: f64,
    /// Rescale every `period` steps. Must be at least 1.
    pub period: u64,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a configuration or building a
/// simulation from it.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Grid parameters are unusable.
    Space(SpaceError),
    /// A force law rejected its parameters.
    Interaction(InteractionError),
    /// The simulation was instantiated with `D == 0`.
    ZeroDimensions,
    /// The initial-condition list is empty.
    NoParticles,
    /// An initial condition failed validation.
    InvalidParticle {
        /// Position of the condition in the input list.
        index: usize,
        /// Why it was rejected.
        reason: ParticleError,
    },
    /// Thermostat settings are out of range.
    InvalidThermostat {
        /// Description of which invariant was violated.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "space: {e}"),
            Self::Interaction(e) => write!(f, "interaction: {e}"),
            Self::ZeroDimensions => write!(f, "simulation must have at least one dimension"),
            Self::NoParticles => write!(f, "no particles to simulate"),
            Self::InvalidParticle { index, reason } => {
                write!(f, "initial condition {index}: {reason}")
            }
            Self::InvalidThermostat { reason } => write!(f, "invalid thermostat: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::Interaction(e) => Some(e),
            Self::InvalidParticle { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<InteractionError> for ConfigError {
    fn from(e: InteractionError) -> Self {
        Self::Interaction(e)
    }
}

// ── SimulationConfig ───────────────────────────────────────────────

/// Everything a simulation needs besides its particles and force laws.
///
/// Immutable once the simulation is built, except the border policy,
/// which can be changed between steps with
/// [`Simulation::set_border_policy`](crate::Simulation::set_border_policy).
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Side `L` of the domain `[0, L)^D`. Default: 10.0.
    pub length: f64,
    /// Interaction cutoff `R`, also the cell side. Default: 1.0.
    pub cutoff_radius: f64,
    /// Initial border policy. Default: absorbent.
    pub border: BorderPolicy,
    /// Reflexive wall parameters.
    pub wall: WallConfig,
    /// Optional thermostat. Default: none.
    pub thermostat: Option<ThermostatConfig>,
    /// Seed for [`Simulation::random`](crate::Simulation::random). Default: 0.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            length: 10.0,
            cutoff_radius: 1.0,
            border: BorderPolicy::default(),
            wall: WallConfig::default(),
            thermostat: None,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    /// Validate the scalar invariants.
    ///
    /// Checks, in order: `length`, `cutoff_radius`, `cutoff_radius <=
    /// length`, the wall parameters and the thermostat settings. Cell-count
    /// overflow depends on `D` and is reported by the grid constructor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(SpaceError::InvalidLength { value: self.length }.into());
        }
        if !self.cutoff_radius.is_finite() || self.cutoff_radius <= 0.0 {
            return Err(SpaceError::InvalidCutoff {
                value: self.cutoff_radius,
            }
            .into());
        }
        if self.cutoff_radius > self.length {
            return Err(SpaceError::CutoffExceedsLength {
                cutoff: self.cutoff_radius,
                length: self.length,
            }
            .into());
        }
        self.wall_repulsion()?;
        if let Some(t) = &self.thermostat {
            if !t.target_temperature.is_finite() || t.target_temperature < 0.0 {
                return Err(ConfigError::InvalidThermostat {
                    reason: format!(
                        "target_temperature must be finite and >= 0, got {}",
                        t.target_temperature,
                    ),
                });
            }
            if t.period == 0 {
                return Err(ConfigError::InvalidThermostat {
                    reason: "period must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }

    /// The wall force described by `wall` for this domain.
    pub(crate) fn wall_repulsion(&self) -> Result<WallRepulsion, InteractionError> {
        WallRepulsion::new(self.length, self.wall.sigma, self.wall.epsilon)
    }
}
