//! Domain border (boundary) policies.

use quark_core::Vector;

/// How the simulation treats a particle that leaves `[0, L)^D`.
///
/// | Policy | Position | Cell assignment |
/// |---|---|---|
/// | `Absorbent` | unchanged | none: the particle leaves the grid for good |
/// | `Periodic` | wrapped modulo `L` per axis | the wrapped position |
/// | `Reflexive` | unchanged | clamped to the edge cell; the engine adds a wall push |
///
/// # Examples
///
/// ```
/// use quark_core::Vector;
/// use quark_space::{BorderPolicy, Placement};
///
/// let outside = Vector::new([1.25, 0.5]);
/// assert_eq!(BorderPolicy::Absorbent.resolve(outside, 1.0), Placement::Escaped);
/// assert_eq!(
///     BorderPolicy::Periodic.resolve(outside, 1.0),
///     Placement::Wrapped(Vector::new([0.25, 0.5])),
/// );
/// assert_eq!(BorderPolicy::Reflexive.resolve(outside, 1.0), Placement::Inside(outside));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BorderPolicy {
    /// Out-of-domain particles are excluded from all cells.
    #[default]
    Absorbent,
    /// Out-of-domain particles re-enter on the opposite side.
    Periodic,
    /// Particles are pushed back by a short-range wall force.
    Reflexive,
}

/// Outcome of applying a [`BorderPolicy`] to a position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement<const D: usize> {
    /// The position is usable as is.
    Inside(Vector<D>),
    /// The position was wrapped into the domain and must be written back.
    Wrapped(Vector<D>),
    /// The particle left the domain under [`BorderPolicy::Absorbent`].
    Escaped,
    /// The position has a NaN or infinite component.
    NonFinite,
}

impl<const D: usize> Placement<D> {
    /// The in-domain position, if the particle stays on the grid.
    pub fn position(&self) -> Option<Vector<D>> {
        match self {
            Self::Inside(p) | Self::Wrapped(p) => Some(*p),
            Self::Escaped | Self::NonFinite => None,
        }
    }
}

impl BorderPolicy {
    /// Apply the policy to `position` in a domain of side `length`.
    pub fn resolve<const D: usize>(self, position: Vector<D>, length: f64) -> Placement<D> {
        if !position.is_finite() {
            return Placement::NonFinite;
        }
        match self {
            Self::Absorbent => {
                if position.iter().all(|&c| (0.0..length).contains(&c)) {
                    Placement::Inside(position)
                } else {
                    Placement::Escaped
                }
            }
            Self::Periodic => {
                if position.iter().all(|&c| (0.0..length).contains(&c)) {
                    Placement::Inside(position)
                } else {
                    Placement::Wrapped(position.map(|c| wrap_axis(c, length)))
                }
            }
            Self::Reflexive => Placement::Inside(position),
        }
    }
}

/// Wrap a coordinate into `[0, length)`.
///
/// `rem_euclid` can round a tiny negative value up to exactly `length`;
/// that case maps to 0.
pub(crate) fn wrap_axis(c: f64, length: f64) -> f64 {
    let w = c.rem_euclid(length);
    if w >= length {
        0.0
    } else {
        w
    }
}
