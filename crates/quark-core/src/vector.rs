//! The fixed-size [`Vector`] used for positions, velocities and forces.

use std::fmt;
use std::iter::Sum;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// An ordered tuple of `D` real numbers with componentwise arithmetic.
///
/// `Vector` has no identity beyond its values and no behavior beyond
/// arithmetic. [`sq_magnitude`](Self::sq_magnitude) stops before the square
/// root: force laws work with squared distances and take roots only where
/// the physics needs one.
///
/// # Examples
///
/// ```
/// use quark_core::Vector;
///
/// let a = Vector::new([1.0, 2.0, 3.0]);
/// let b = Vector::new([4.0, 5.0, 6.0]);
/// assert_eq!(a + b, Vector::new([5.0, 7.0, 9.0]));
/// assert_eq!((b - a).sq_magnitude(), 27.0);
/// assert_eq!(-a * 2.0, Vector::new([-2.0, -4.0, -6.0]));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector<const D: usize>([f64; D]);

impl<const D: usize> Vector<D> {
    /// The zero vector.
    pub const ZERO: Self = Self([0.0; D]);

    /// Build a vector from its components.
    pub const fn new(components: [f64; D]) -> Self {
        Self(components)
    }

    /// The zero vector.
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Build a vector by evaluating `f` once per axis, in axis order.
    pub fn from_fn(f: impl FnMut(usize) -> f64) -> Self {
        Self(std::array::from_fn(f))
    }

    /// A vector with `value` on `axis` and zero elsewhere.
    ///
    /// Returns the zero vector if `axis >= D`.
    pub fn axis(axis: usize, value: f64) -> Self {
        let mut v = Self::ZERO;
        if let Some(c) = v.0.get_mut(axis) {
            *c = value;
        }
        v
    }

    /// Number of components (`D`).
    pub const fn dim(&self) -> usize {
        D
    }

    /// Borrow the components.
    pub fn as_array(&self) -> &[f64; D] {
        &self.0
    }

    /// Consume the vector and return its components.
    pub fn into_array(self) -> [f64; D] {
        self.0
    }

    /// Iterate over the components in axis order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Sum of the squared components.
    pub fn sq_magnitude(&self) -> f64 {
        self.0.iter().map(|c| c * c).sum()
    }

    /// Dot product with `other`.
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    /// Reset every component to zero in place.
    pub fn reset(&mut self) {
        self.0 = [0.0; D];
    }

    /// `true` if no component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Apply `f` to every component.
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self(self.0.map(&mut f))
    }
}

impl<const D: usize> Default for Vector<D> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const D: usize> From<[f64; D]> for Vector<D> {
    fn from(components: [f64; D]) -> Self {
        Self(components)
    }
}

impl<const D: usize> From<Vector<D>> for [f64; D] {
    fn from(v: Vector<D>) -> Self {
        v.0
    }
}

impl<const D: usize> fmt::Display for Vector<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "]")
    }
}

impl<const D: usize> Index<usize> for Vector<D> {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.0[axis]
    }
}

impl<const D: usize> IndexMut<usize> for Vector<D> {
    fn index_mut(&mut self, axis: usize) -> &mut f64 {
        &mut self.0[axis]
    }
}

// ── Arithmetic ─────────────────────────────────────────────────────

impl<const D: usize> Neg for Vector<D> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<const D: usize> Add for Vector<D> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<const D: usize> Sub for Vector<D> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<const D: usize> Mul<f64> for Vector<D> {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        self.map(|c| c * s)
    }
}

impl<const D: usize> Mul<Vector<D>> for f64 {
    type Output = Vector<D>;

    fn mul(self, v: Vector<D>) -> Vector<D> {
        v * self
    }
}

impl<const D: usize> Div<f64> for Vector<D> {
    type Output = Self;

    fn div(self, s: f64) -> Self {
        self.map(|c| c / s)
    }
}

impl<const D: usize> AddAssign for Vector<D> {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}

impl<const D: usize> SubAssign for Vector<D> {
    fn sub_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a -= b;
        }
    }
}

impl<const D: usize> MulAssign<f64> for Vector<D> {
    fn mul_assign(&mut self, s: f64) {
        for c in &mut self.0 {
            *c *= s;
        }
    }
}

impl<const D: usize> DivAssign<f64> for Vector<D> {
    fn div_assign(&mut self, s: f64) {
        for c in &mut self.0 {
            *c /= s;
        }
    }
}

impl<const D: usize> Sum for Vector<D> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, v| acc + v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_zero() {
        let v = Vector::<3>::default();
        assert_eq!(v, Vector::new([0.0, 0.0, 0.0]));
        assert_eq!(v.sq_magnitude(), 0.0);
    }

    #[test]
    fn arithmetic_touches_every_component() {
        let a = Vector::new([1.0, 2.0, 3.0]);
        let b = Vector::new([4.0, 5.0, 6.0]);
        assert_eq!(-b, Vector::new([-4.0, -5.0, -6.0]));
        assert_eq!(a - b, Vector::new([-3.0, -3.0, -3.0]));
        assert_eq!(a * 2.0, Vector::new([2.0, 4.0, 6.0]));
        assert_eq!(a / 2.0, Vector::new([0.5, 1.0, 1.5]));
        assert_eq!(0.5 * a, a / 2.0);
    }

    #[test]
    fn compound_assignment_touches_last_component() {
        let mut v = Vector::new([1.0, 2.0, 3.0]);
        v -= Vector::new([4.0, 5.0, 6.0]);
        assert_eq!(v, Vector::new([-3.0, -3.0, -3.0]));
        v += Vector::new([4.0, 5.0, 6.0]);
        assert_eq!(v, Vector::new([1.0, 2.0, 3.0]));
        v *= 2.0;
        assert_eq!(v, Vector::new([2.0, 4.0, 6.0]));
        v /= 4.0;
        assert_eq!(v, Vector::new([0.5, 1.0, 1.5]));
    }

    #[test]
    fn reset_zeroes_all_components() {
        let mut v = Vector::new([7.0, -1.0, 2.5, 9.0]);
        v.reset();
        assert_eq!(v, Vector::ZERO);
    }

    #[test]
    fn axis_outside_dimension_is_zero() {
        assert_eq!(Vector::<2>::axis(1, 3.0), Vector::new([0.0, 3.0]));
        assert_eq!(Vector::<2>::axis(5, 3.0), Vector::ZERO);
    }

    #[test]
    fn sum_of_vectors() {
        let total: Vector<2> = [Vector::new([1.0, 2.0]), Vector::new([3.0, -4.0])]
            .into_iter()
            .sum();
        assert_eq!(total, Vector::new([4.0, -2.0]));
    }

    #[test]
    fn display_lists_components() {
        assert_eq!(Vector::new([1.0, 2.5]).to_string(), "[1, 2.5]");
    }

    #[test]
    fn non_finite_detected() {
        assert!(Vector::new([1.0, 2.0]).is_finite());
        assert!(!Vector::new([1.0, f64::NAN]).is_finite());
        assert!(!Vector::new([f64::INFINITY, 0.0]).is_finite());
    }

    proptest! {
        #[test]
        fn sq_magnitude_is_self_dot(a in -1e3f64..1e3, b in -1e3f64..1e3, c in -1e3f64..1e3) {
            let v = Vector::new([a, b, c]);
            prop_assert!((v.sq_magnitude() - v.dot(&v)).abs() <= 1e-9 * v.sq_magnitude().max(1.0));
            prop_assert!(v.sq_magnitude() >= 0.0);
        }

        #[test]
        fn negation_cancels(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            let v = Vector::new([a, b]);
            prop_assert_eq!(v + (-v), Vector::ZERO);
        }
    }
}
