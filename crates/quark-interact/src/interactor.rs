//! The [`Interactor`] and [`Force`] traits and their closure adapters.

use quark_core::{Particle, Vector};

/// A symmetric two-particle force law.
///
/// # Contract
///
/// - `interaction_force(target, source)` is the force `source` exerts on
///   `target`.
/// - The law must be antisymmetric:
///   `interaction_force(a, b) == -interaction_force(b, a)`. The engine
///   evaluates each unordered pair once, adds the result to the target and
///   its negation to the source.
/// - Evaluation must be deterministic and must not depend on call order.
///
/// # Object safety
///
/// This trait is object-safe; the registry stores interactors as
/// `Box<dyn Interactor<D>>`.
///
/// # Examples
///
/// A linear spring pulling every pair together:
///
/// ```
/// use quark_core::{InitialCondition, Particle, ParticleFactory, Vector};
/// use quark_interact::Interactor;
///
/// struct Spring {
///     k: f64,
/// }
///
/// impl<const D: usize> Interactor<D> for Spring {
///     fn name(&self) -> &str { "spring" }
///
///     fn interaction_force(&self, target: &Particle<D>, source: &Particle<D>) -> Vector<D> {
///         (source.position() - target.position()) * self.k
///     }
/// }
///
/// let mut factory = ParticleFactory::new();
/// let a = factory.create(InitialCondition::at_rest(Vector::new([0.0, 0.0]), 1.0)).unwrap();
/// let b = factory.create(InitialCondition::at_rest(Vector::new([2.0, 0.0]), 1.0)).unwrap();
/// let spring = Spring { k: 0.5 };
/// assert_eq!(spring.interaction_force(&a, &b), Vector::new([1.0, 0.0]));
/// assert_eq!(spring.interaction_force(&b, &a), Vector::new([-1.0, 0.0]));
/// ```
pub trait Interactor<const D: usize>: Send + 'static {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Force exerted by `source` on `target`.
    fn interaction_force(&self, target: &Particle<D>, source: &Particle<D>) -> Vector<D>;

    /// Pair potential energy, if the law derives from a potential.
    ///
    /// Default: `None` (no energy contribution is reported).
    fn potential_energy(&self, _a: &Particle<D>, _b: &Particle<D>) -> Option<f64> {
        None
    }
}

/// A force law depending on a single particle, such as an external field.
///
/// Unary forces are summed independently of pairwise interactors and are
/// applied to every particle still on the grid.
pub trait Force<const D: usize>: Send + 'static {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Force applied to `particle`.
    fn force(&self, particle: &Particle<D>) -> Vector<D>;
}

// ── NoInteraction ──────────────────────────────────────────────────

/// The inert interactor: every pair feels zero force.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInteraction;

impl<const D: usize> Interactor<D> for NoInteraction {
    fn name(&self) -> &str {
        "none"
    }

    fn interaction_force(&self, _target: &Particle<D>, _source: &Particle<D>) -> Vector<D> {
        Vector::ZERO
    }

    fn potential_energy(&self, _a: &Particle<D>, _b: &Particle<D>) -> Option<f64> {
        Some(0.0)
    }
}

// ── Closure adapters ───────────────────────────────────────────────

/// An [`Interactor`] backed by a closure. Build with [`pair_fn`].
pub struct PairFn<F> {
    name: String,
    f: F,
}

/// Wrap a closure `f(target, source) -> force` as an [`Interactor`].
///
/// The closure must honour the antisymmetry contract of [`Interactor`].
pub fn pair_fn<F>(name: impl Into<String>, f: F) -> PairFn<F> {
    PairFn {
        name: name.into(),
        f,
    }
}

impl<const D: usize, F> Interactor<D> for PairFn<F>
where
    F: Fn(&Particle<D>, &Particle<D>) -> Vector<D> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn interaction_force(&self, target: &Particle<D>, source: &Particle<D>) -> Vector<D> {
        (self.f)(target, source)
    }
}

/// A [`Force`] backed by a closure. Build with [`unary_fn`].
pub struct UnaryFn<F> {
    name: String,
    f: F,
}

/// Wrap a closure `f(particle) -> force` as a [`Force`].
pub fn unary_fn<F>(name: impl Into<String>, f: F) -> UnaryFn<F> {
    UnaryFn {
        name: name.into(),
        f,
    }
}

impl<const D: usize, F> Force<D> for UnaryFn<F>
where
    F: Fn(&Particle<D>) -> Vector<D> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn force(&self, particle: &Particle<D>) -> Vector<D> {
        (self.f)(particle)
    }
}
