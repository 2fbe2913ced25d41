use core::fmt;
use core::ops::{BitAnd, BitOr, BitXor, Not};

use super::Vector;
use crate::simd::Lane;

/// Per-lane predicate with the layout of a [`Vector<T, N>`].
///
/// Every lane is all-ones (true) or all-zeros (false). Masks come out of the
/// comparison methods and the combinators below; they are consumed by
/// [`select`](Mask::select) and the reductions.
///
/// ```
/// use tiervec::Vector;
///
/// let a = Vector::<i32, 8>::from_array([1, -2, 3, -4, 5, -6, 7, -8]);
/// let neg = a.cmp_lt(Vector::zero());
/// assert!(neg.any());
/// assert!(!neg.all());
/// let abs = neg.select(Vector::zero() - a, a);
/// assert_eq!(abs.to_array(), [1, 2, 3, 4, 5, 6, 7, 8]);
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Mask<T: Lane, const N: usize> {
    bits: Vector<T, N>,
}

impl<T: Lane, const N: usize> Mask<T, N> {
    /// Wrap comparison output. Lanes must be all-ones or all-zeros.
    #[inline]
    pub(crate) fn from_lanes_unchecked(bits: Vector<T, N>) -> Self {
        Self { bits }
    }

    /// Every lane set to `b`.
    #[inline]
    pub fn splat(b: bool) -> Self {
        Self::from_lanes_unchecked(Vector::splat(T::mask(b)))
    }

    pub fn from_array(flags: [bool; N]) -> Self {
        Self::from_lanes_unchecked(Vector::from_array(flags.map(T::mask)))
    }

    /// Per lane: `on` where set, `off` where clear.
    #[inline]
    pub fn select(self, on: Vector<T, N>, off: Vector<T, N>) -> Vector<T, N> {
        on.zip3(off, self.bits, T::vblend)
    }

    pub fn any(self) -> bool {
        self.bits.lanes.iter().any(|l| l.is_set())
    }

    pub fn all(self) -> bool {
        self.bits.lanes.iter().all(|l| l.is_set())
    }

    /// Lane `i`, with `i` taken modulo `N`.
    #[inline]
    pub fn test(self, i: usize) -> bool {
        self.bits.lanes[i % N].is_set()
    }

    pub fn to_array(self) -> [bool; N] {
        self.bits.lanes.map(|l| l.is_set())
    }

    /// The raw lane patterns: `T::ones()` for set lanes, zero otherwise.
    #[inline]
    pub fn to_vector(self) -> Vector<T, N> {
        self.bits
    }
}

impl<T: Lane, const N: usize> fmt::Debug for Mask<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Mask").field(&self.to_array()).finish()
    }
}

// Set float lanes are NaN patterns: compare the flags, not the lane values.
impl<T: Lane, const N: usize> PartialEq for Mask<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl<T: Lane, const N: usize> Eq for Mask<T, N> {}

impl<T: Lane, const N: usize> BitAnd for Mask<T, N> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::from_lanes_unchecked(self.bits & rhs.bits)
    }
}

impl<T: Lane, const N: usize> BitOr for Mask<T, N> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from_lanes_unchecked(self.bits | rhs.bits)
    }
}

impl<T: Lane, const N: usize> BitXor for Mask<T, N> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self::from_lanes_unchecked(self.bits ^ rhs.bits)
    }
}

impl<T: Lane, const N: usize> Not for Mask<T, N> {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_lanes_unchecked(!self.bits)
    }
}
