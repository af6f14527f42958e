//! Owned collection of the force laws a simulation evaluates.

use crate::interactor::{Force, Interactor};
use quark_core::{Particle, Vector};

/// The interactors and unary forces registered with a simulation.
///
/// Both lists are evaluated in registration order, so force summation is
/// reproducible. An empty registry yields zero force everywhere.
pub struct InteractionRegistry<const D: usize> {
    interactors: Vec<Box<dyn Interactor<D>>>,
    forces: Vec<Box<dyn Force<D>>>,
}

impl<const D: usize> Default for InteractionRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> InteractionRegistry<D> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            interactors: Vec::new(),
            forces: Vec::new(),
        }
    }

    /// Add a pairwise interactor.
    pub fn register_interactor(&mut self, interactor: Box<dyn Interactor<D>>) {
        self.interactors.push(interactor);
    }

    /// Add a unary force.
    pub fn register_force(&mut self, force: Box<dyn Force<D>>) {
        self.forces.push(force);
    }

    /// Number of pairwise interactors.
    pub fn interactor_count(&self) -> usize {
        self.interactors.len()
    }

    /// Number of unary forces.
    pub fn force_count(&self) -> usize {
        self.forces.len()
    }

    /// Whether no interactor is registered (the pair loop can be skipped).
    pub fn has_interactors(&self) -> bool {
        !self.interactors.is_empty()
    }

    /// Names of every registered law, interactors first.
    pub fn names(&self) -> Vec<&str> {
        self.interactors
            .iter()
            .map(|i| i.name())
            .chain(self.forces.iter().map(|f| f.name()))
            .collect()
    }

    /// Sum of every interactor's force of `source` on `target`.
    pub fn pair_force(&self, target: &Particle<D>, source: &Particle<D>) -> Vector<D> {
        self.interactors
            .iter()
            .map(|i| i.interaction_force(target, source))
            .sum()
    }

    /// Sum of every unary force on `particle`.
    pub fn unary_force(&self, particle: &Particle<D>) -> Vector<D> {
        self.forces.iter().map(|f| f.force(particle)).sum()
    }

    /// Sum of the pair potentials that report one.
    pub fn potential(&self, a: &Particle<D>, b: &Particle<D>) -> f64 {
        self.interactors
            .iter()
            .filter_map(|i| i.potential_energy(a, b))
            .sum()
    }
}

impl<const D: usize> std::fmt::Debug for InteractionRegistry<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionRegistry")
            .field(
                "interactors",
                &self.interactors.iter().map(|i| i.name()).collect::<Vec<_>>(),
            )
            .field(
                "forces",
                &self.forces.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
