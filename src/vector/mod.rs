pub mod aliases;
mod engine;
mod float;
mod mask;
mod ops;
mod permute;
mod shift;

use core::fmt;
use core::ops::{Index, IndexMut};

use crate::simd::Lane;

pub use aliases::*;
pub use mask::Mask;

/// Errors at the slice boundary of the vector API.
///
/// Every numeric operation is total; only conversions from and to
/// runtime-sized slices can fail.
///
/// ```
/// use tiervec::{VectorError, F32x8};
///
/// let err = F32x8::from_slice(&[1.0; 3]).unwrap_err();
/// assert_eq!(err, VectorError::LengthMismatch { expected: 8, actual: 3 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorError {
    /// The slice length differs from the number of lanes or base vectors.
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorError::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for VectorError {}

#[cold]
pub(crate) fn length_mismatch(expected: usize, actual: usize) -> VectorError {
    #[cfg(feature = "tracing")]
    tracing::debug!(expected, actual, "vector slice length mismatch");
    VectorError::LengthMismatch { expected, actual }
}

/// Fixed-width vector of `N` lanes of `T`.
///
/// Lanes are stored in order and viewed as `N / T::LANES` base vectors of
/// the active tier. `N` must be a non-zero multiple of the native lane count;
/// any other width fails to build. Widths of 32 or 64 bytes are valid on
/// every tier.
///
/// # Examples
///
/// ```
/// use tiervec::Vector;
///
/// let a = Vector::<u32, 8>::from_array([1, 2, 3, 4, 5, 6, 7, 8]);
/// let b = Vector::splat(10);
/// let c = a + b;
/// assert_eq!(c[0], 11);
/// assert_eq!(c.to_array()[7], 18);
/// ```
///
/// A lane count that does not fill whole base vectors is rejected:
///
/// ```compile_fail
/// use tiervec::Vector;
///
/// let _ = Vector::<u32, 3>::from_array([1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(32))]
pub struct Vector<T: Lane, const N: usize> {
    pub(crate) lanes: [T; N],
}

impl<T: Lane, const N: usize> Vector<T, N> {
    /// Build-time check that `N` lanes decompose into whole base vectors.
    pub(crate) const WHOLE: () = assert!(
        N > 0
            && N % T::LANES == 0
            && core::mem::size_of::<T::Reg>() == T::LANES * core::mem::size_of::<T>()
            && core::mem::align_of::<T::Reg>() <= 32,
        "lane count must be a non-zero multiple of the native lane count"
    );

    /// Number of base vectors making up the vector.
    pub const REGISTERS: usize = N / T::LANES;

    /// Number of lanes.
    pub const LEN: usize = N;

    /// Create a vector from its lanes.
    #[inline]
    pub fn from_array(lanes: [T; N]) -> Self {
        let () = Self::WHOLE;
        Self { lanes }
    }

    /// All lanes zero (all bits clear).
    #[inline]
    pub fn zero() -> Self {
        Self::from_array([T::default(); N])
    }

    /// Copy `N` lanes out of a slice of exactly that length.
    pub fn from_slice(src: &[T]) -> Result<Self, VectorError> {
        let lanes: [T; N] = src.try_into().map_err(|_| length_mismatch(N, src.len()))?;
        Ok(Self::from_array(lanes))
    }

    /// Copy the lanes into a slice of exactly `N` elements.
    pub fn write_to_slice(&self, dst: &mut [T]) -> Result<(), VectorError> {
        if dst.len() != N {
            return Err(length_mismatch(N, dst.len()));
        }
        dst.copy_from_slice(&self.lanes);
        Ok(())
    }

    #[inline]
    pub fn to_array(self) -> [T; N] {
        self.lanes
    }

    #[inline]
    pub fn as_array(&self) -> &[T; N] {
        &self.lanes
    }

    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl<T: Lane, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Lane, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(lanes: [T; N]) -> Self {
        Self::from_array(lanes)
    }
}

impl<T: Lane, const N: usize> From<Vector<T, N>> for [T; N] {
    fn from(v: Vector<T, N>) -> Self {
        v.lanes
    }
}

impl<T: Lane, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.lanes[i]
    }
}

impl<T: Lane, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.lanes[i]
    }
}
