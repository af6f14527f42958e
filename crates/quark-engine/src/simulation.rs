//! The simulation orchestrator.
//!
//! [`Simulation`] owns the particle arena, the cell list and every
//! registered force law and observer. Particles are addressed by their
//! index in the arena for the lifetime of the simulation; leaving the
//! domain only clears their cell membership.

use std::error::Error;
use std::fmt;
use std::time::Instant;

use log::{debug, info, trace, warn};
use quark_core::{InitialCondition, Particle, ParticleFactory, StepId, Vector};
use quark_interact::{Force, InteractionRegistry, Interactor, WallRepulsion};
use quark_space::{BorderPolicy, CellGrid, Placement};

use crate::config::{ConfigError, SimulationConfig};
use crate::init::uniform_random;
use crate::integrator;
use crate::metrics::StepMetrics;
use crate::observer::{Observer, SimulationView};
use crate::thermostat::{self, Thermostat};

// Compile-time assertion: Simulation is Send (every boxed law and
// observer is Send).
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation<3>>();
    }
};

// ── StepError ──────────────────────────────────────────────────────

/// Errors returned by [`Simulation::step`].
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The step size is NaN, infinite, zero or negative.
    InvalidDt {
        /// The rejected step size.
        value: f64,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDt { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for StepError {}

// ── Exclusion ──────────────────────────────────────────────────────

/// Why a particle left the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Exclusion {
    Absorbed,
    Lost,
}

// ── Simulation ─────────────────────────────────────────────────────

/// A D-dimensional particle system advanced by velocity-Verlet steps.
///
/// # Example
///
/// ```
/// use quark_core::{InitialCondition, Vector};
/// use quark_engine::{Simulation, SimulationConfig};
/// use quark_interact::Gravity;
///
/// let config = SimulationConfig { length: 10.0, cutoff_radius: 2.0, ..Default::default() };
/// let bodies = vec![
///     InitialCondition::at_rest(Vector::new([4.5, 5.0]), 1.0),
///     InitialCondition::at_rest(Vector::new([5.5, 5.0]), 1.0),
/// ];
/// let mut sim = Simulation::<2>::new(config, bodies).unwrap();
/// sim.register_interactor(Gravity::new(1.0).unwrap());
///
/// let metrics = sim.step(1e-3).unwrap();
/// assert_eq!(metrics.pair_evaluations, 1);
/// assert!(sim.particle(0).position()[0] > 4.5);
/// ```
pub struct Simulation<const D: usize> {
    config: SimulationConfig,
    grid: CellGrid<D>,
    particles: Vec<Particle<D>>,
    exclusions: Vec<Option<Exclusion>>,
    excluded: Vec<bool>,
    registry: InteractionRegistry<D>,
    wall: WallRepulsion,
    border: BorderPolicy,
    thermostat: Option<Thermostat>,
    observers: Vec<Box<dyn Observer<D>>>,
    previous_forces: Vec<Vector<D>>,
    forces_stale: bool,
    factory: ParticleFactory,
    step: StepId,
    elapsed: f64,
    absorbed_total: u64,
    lost_total: u64,
    last_metrics: StepMetrics,
}

impl<const D: usize> Simulation<D> {
    /// Build a simulation from explicit initial conditions.
    ///
    /// Particles get ids `0..N` in input order. Particles starting outside
    /// the domain are handled by the configured border policy right away
    /// (wrapped, or absorbed before the first step). Forces are evaluated
    /// once so the first step starts from a consistent force field.
    /// Registering a law or changing the border policy marks forces stale;
    /// the next [`step`](Self::step) recomputes them before drifting.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroDimensions`] if `D == 0`
    /// - any error of [`SimulationConfig::validate`]
    /// - [`ConfigError::NoParticles`] for an empty input
    /// - [`ConfigError::InvalidParticle`] for the first bad condition
    /// - [`ConfigError::Space`] if the grid cannot be built
    pub fn new(
        config: SimulationConfig,
        initial_conditions: impl IntoIterator<Item = InitialCondition<D>>,
    ) -> Result<Self, ConfigError> {
        if D == 0 {
            return Err(ConfigError::ZeroDimensions);
        }
        config.validate()?;
        let wall = config.wall_repulsion()?;
        let grid = CellGrid::new(config.length, config.cutoff_radius)?;

        let mut factory = ParticleFactory::new();
        let particles = initial_conditions
            .into_iter()
            .enumerate()
            .map(|(index, ic)| {
                factory
                    .create(ic)
                    .map_err(|reason| ConfigError::InvalidParticle { index, reason })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if particles.is_empty() {
            return Err(ConfigError::NoParticles);
        }

        let n = particles.len();
        let mut sim = Self {
            border: config.border,
            thermostat: config.thermostat.map(Thermostat::new),
            config,
            grid,
            particles,
            exclusions: vec![None; n],
            excluded: vec![false; n],
            registry: InteractionRegistry::new(),
            wall,
            observers: Vec::new(),
            previous_forces: Vec::with_capacity(n),
            forces_stale: true,
            factory,
            step: StepId::default(),
            elapsed: 0.0,
            absorbed_total: 0,
            lost_total: 0,
            last_metrics: StepMetrics::default(),
        };
        sim.populate();
        sim.refresh_forces();

        info!(
            "simulation ready: dims={} particles={n} grid={}^{} cutoff={} length={} border={:?} on_grid={}",
            D,
            sim.grid.cells_per_axis(),
            D,
            sim.grid.cutoff(),
            sim.grid.length(),
            sim.border,
            sim.grid.occupancy(),
        );
        Ok(sim)
    }

    /// Build a simulation of `count` unit-mass particles at rest, uniformly
    /// distributed in the domain and seeded from `config.seed`.
    pub fn random(config: SimulationConfig, count: usize) -> Result<Self, ConfigError> {
        let ics = uniform_random(count, config.length, config.seed);
        Self::new(config, ics)
    }

    /// Initial placement of every particle into the grid.
    fn populate(&mut self) {
        let length = self.grid.length();
        for i in 0..self.particles.len() {
            match self.border.resolve(self.particles[i].position(), length) {
                Placement::Inside(p) => {
                    let cell = self.grid.locate(&p);
                    self.grid.stage_insert(i, cell);
                }
                Placement::Wrapped(p) => {
                    self.particles[i].set_position(p);
                    let cell = self.grid.locate(&p);
                    self.grid.stage_insert(i, cell);
                }
                Placement::Escaped => {
                    self.exclude(i, Exclusion::Absorbed);
                }
                Placement::NonFinite => {
                    self.exclude(i, Exclusion::Lost);
                }
            }
        }
        self.grid.flush();
    }

    fn exclude(&mut self, index: usize, why: Exclusion) {
        self.exclusions[index] = Some(why);
        self.excluded[index] = true;
        let id = self.particles[index].id();
        match why {
            Exclusion::Absorbed => {
                self.absorbed_total += 1;
                debug!(
                    "particle {index} (id {id}) absorbed at {}",
                    self.particles[index].position()
                );
            }
            Exclusion::Lost => {
                self.lost_total += 1;
                warn!("particle {index} (id {id}) has a non-finite position, removed from the grid");
            }
        }
    }

    // ── Registration ───────────────────────────────────────────────

    /// Append a pairwise interactor. Takes effect at the next force pass.
    pub fn register_interactor(&mut self, interactor: impl Interactor<D>) {
        self.registry.register_interactor(Box::new(interactor));
        self.forces_stale = true;
    }

    /// Append a unary force. Takes effect at the next force pass.
    pub fn register_force(&mut self, force: impl Force<D>) {
        self.registry.register_force(Box::new(force));
        self.forces_stale = true;
    }

    /// Append an observer, called at the end of every subsequent step.
    pub fn register_observer(&mut self, observer: impl Observer<D>) {
        self.observers.push(Box::new(observer));
    }

    /// Change the border policy from the next step on.
    ///
    /// Already absorbed particles stay absorbed.
    pub fn set_border_policy(&mut self, policy: BorderPolicy) {
        if policy != self.border {
            debug!("border policy {:?} -> {:?}", self.border, policy);
            self.border = policy;
            self.forces_stale = true;
        }
    }

    // ── Stepping ───────────────────────────────────────────────────

    /// Advance the system by `dt`.
    ///
    /// Drift, removal of particles the drift sent to a non-finite
    /// position, force pass, kick, cell repair, optional thermostat, then
    /// observers, in that order.
    ///
    /// # Errors
    ///
    /// [`StepError::InvalidDt`] for a NaN, infinite, zero or negative `dt`;
    /// the state is left untouched.
    pub fn step(&mut self, dt: f64) -> Result<StepMetrics, StepError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(StepError::InvalidDt { value: dt });
        }
        let start = Instant::now();
        let mut metrics = StepMetrics::default();

        if self.forces_stale {
            self.compute_forces();
        }

        integrator::drift(
            &mut self.particles,
            &self.excluded,
            &mut self.previous_forces,
            dt,
        );
        self.cull_non_finite(&mut metrics);

        let t = Instant::now();
        metrics.pair_evaluations = self.compute_forces();
        metrics.force_us = t.elapsed().as_micros() as u64;

        integrator::kick(&mut self.particles, &self.excluded, &self.previous_forces, dt);

        let t = Instant::now();
        self.repair(&mut metrics);
        metrics.repair_us = t.elapsed().as_micros() as u64;

        self.step = StepId(self.step.0 + 1);
        self.elapsed += dt;

        if let Some(thermostat) = &self.thermostat {
            if thermostat.is_due(self.step.0) {
                if let Some(factor) = thermostat.rescale(&mut self.particles, &self.excluded) {
                    trace!("thermostat step {}: velocity scale {factor}", self.step);
                }
            }
        }

        let t = Instant::now();
        let view = SimulationView {
            particles: &self.particles,
            excluded: &self.excluded,
            step: self.step,
            elapsed: self.elapsed,
            border: self.border,
            metrics: &metrics,
        };
        for observer in &mut self.observers {
            observer.observe(&view);
        }
        metrics.observer_us = t.elapsed().as_micros() as u64;
        metrics.total_us = start.elapsed().as_micros() as u64;

        trace!("step {}: {:?}", self.step, metrics);
        self.last_metrics = metrics;
        Ok(metrics)
    }

    /// Recompute every force from the current positions and cell
    /// membership, without advancing time.
    ///
    /// Returns the number of pairs evaluated.
    pub fn refresh_forces(&mut self) -> u64 {
        self.compute_forces()
    }

    /// Reset, then accumulate unary, wall and pairwise forces.
    fn compute_forces(&mut self) -> u64 {
        self.forces_stale = false;
        let reflexive = self.border == BorderPolicy::Reflexive;
        for (p, &out) in self.particles.iter_mut().zip(&self.excluded) {
            p.reset_force();
            if out {
                continue;
            }
            let mut f = self.registry.unary_force(p);
            if reflexive {
                f += Force::<D>::force(&self.wall, p);
            }
            p.add_force(f);
        }

        if !self.registry.has_interactors() {
            return 0;
        }

        let mut pairs = 0u64;
        for c in 0..self.grid.cell_count() {
            let cell = self.grid.cell(c);
            if cell.is_empty() {
                continue;
            }
            let neighbours = self.grid.neighbours(c);
            for i in cell.members() {
                for &n in &neighbours {
                    for j in self.grid.cell(n).members() {
                        if i <= j {
                            continue;
                        }
                        let f = self
                            .registry
                            .pair_force(&self.particles[i], &self.particles[j]);
                        self.particles[i].add_force(f);
                        self.particles[j].add_force(-f);
                        pairs += 1;
                    }
                }
            }
        }
        pairs
    }

    /// Take particles with a non-finite position off the grid so they never
    /// reach the pair loop.
    fn cull_non_finite(&mut self, metrics: &mut StepMetrics) {
        let mut culled = false;
        for i in 0..self.particles.len() {
            if self.excluded[i] || self.particles[i].position().is_finite() {
                continue;
            }
            if let Some(c) = self.grid.cell_of(i) {
                self.grid.stage_move(i, c, None);
            }
            self.exclude(i, Exclusion::Lost);
            metrics.lost += 1;
            culled = true;
        }
        if culled {
            self.grid.flush();
        }
    }

    /// Move every particle whose position no longer matches its cell.
    ///
    /// Members are visited by position so staged moves never disturb the
    /// walk; all cells are flushed at the end.
    fn repair(&mut self, metrics: &mut StepMetrics) {
        let length = self.grid.length();
        for c in 0..self.grid.cell_count() {
            let mut n = 0;
            while let Some(i) = self.grid.cell(c).member_at(n) {
                n += 1;
                match self.border.resolve(self.particles[i].position(), length) {
                    Placement::Inside(p) => {
                        let target = self.grid.locate(&p);
                        if target != c {
                            self.grid.stage_move(i, c, Some(target));
                            metrics.migrations += 1;
                        }
                    }
                    Placement::Wrapped(p) => {
                        self.particles[i].set_position(p);
                        let target = self.grid.locate(&p);
                        if target != c {
                            self.grid.stage_move(i, c, Some(target));
                            metrics.migrations += 1;
                        }
                    }
                    Placement::Escaped => {
                        self.grid.stage_move(i, c, None);
                        self.exclude(i, Exclusion::Absorbed);
                        metrics.absorbed += 1;
                    }
                    Placement::NonFinite => {
                        self.grid.stage_move(i, c, None);
                        self.exclude(i, Exclusion::Lost);
                        metrics.lost += 1;
                    }
                }
            }
        }
        self.grid.flush();
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// The configuration the simulation was built from.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// All particles, including excluded ones, in creation order.
    pub fn particles(&self) -> &[Particle<D>] {
        &self.particles
    }

    /// Particle `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    pub fn particle(&self, index: usize) -> &Particle<D> {
        &self.particles[index]
    }

    /// Number of particles, excluded ones included.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Always `false`: a simulation holds at least one particle.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The cell list.
    pub fn grid(&self) -> &CellGrid<D> {
        &self.grid
    }

    /// The registered force laws.
    pub fn registry(&self) -> &InteractionRegistry<D> {
        &self.registry
    }

    /// Border policy in effect.
    pub fn border_policy(&self) -> BorderPolicy {
        self.border
    }

    /// Number of completed steps.
    pub fn step_count(&self) -> StepId {
        self.step
    }

    /// Simulated time since construction.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of ids issued, equal to the particle count.
    pub fn ids_issued(&self) -> u64 {
        self.factory.issued()
    }

    /// Whether particle `index` was absorbed by the border or lost to a
    /// non-finite position. Out-of-range indices report `false`.
    pub fn is_absorbed(&self, index: usize) -> bool {
        self.excluded.get(index).copied().unwrap_or(false)
    }

    /// Whether particle `index` was dropped for a non-finite position.
    pub fn is_lost(&self, index: usize) -> bool {
        matches!(self.exclusions.get(index), Some(Some(Exclusion::Lost)))
    }

    /// Particles absorbed by the border so far.
    pub fn absorbed_count(&self) -> u64 {
        self.absorbed_total
    }

    /// Particles dropped for non-finite positions so far.
    pub fn lost_count(&self) -> u64 {
        self.lost_total
    }

    /// Particles still on the grid.
    pub fn active_count(&self) -> usize {
        self.exclusions.iter().filter(|e| e.is_none()).count()
    }

    /// Total momentum of the particles still on the grid.
    pub fn total_momentum(&self) -> Vector<D> {
        self.active().map(Particle::momentum).sum()
    }

    /// Total kinetic energy of the particles still on the grid.
    pub fn kinetic_energy(&self) -> f64 {
        self.active().map(Particle::kinetic_energy).sum()
    }

    /// Sum of the pair potentials over every neighbouring pair, for the
    /// interactors that report one.
    pub fn potential_energy(&self) -> f64 {
        let mut total = 0.0;
        for c in 0..self.grid.cell_count() {
            let neighbours = self.grid.neighbours(c);
            for i in self.grid.cell(c).members() {
                for &n in &neighbours {
                    for j in self.grid.cell(n).members().filter(|&j| i > j) {
                        total += self.registry.potential(&self.particles[i], &self.particles[j]);
                    }
                }
            }
        }
        total
    }

    /// Instantaneous temperature `2·KE / (D·n_active)`.
    pub fn temperature(&self) -> f64 {
        thermostat::temperature(&self.particles, &self.excluded)
    }

    /// Metrics of the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Borrowed read-only view, as observers receive it.
    pub fn view(&self) -> SimulationView<'_, D> {
        SimulationView {
            particles: &self.particles,
            excluded: &self.excluded,
            step: self.step,
            elapsed: self.elapsed,
            border: self.border,
            metrics: &self.last_metrics,
        }
    }

    fn active(&self) -> impl Iterator<Item = &Particle<D>> {
        self.particles
            .iter()
            .zip(&self.excluded)
            .filter(|&(_, &out)| !out)
            .map(|(p, _)| p)
    }
}

impl<const D: usize> fmt::Debug for Simulation<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("dims", &D)
            .field("particles", &self.particles.len())
            .field("cells_per_axis", &self.grid.cells_per_axis())
            .field("border", &self.border)
            .field("registry", &self.registry)
            .field("observers", &self.observers.len())
            .field("step", &self.step)
            .finish()
    }
}
