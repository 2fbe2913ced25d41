//! Decomposition of a [`Vector`] into base vectors and recomposition of
//! kernel results.
//!
//! Every elementwise operation funnels through [`map`](Vector::map),
//! [`zip`](Vector::zip) or [`zip3`](Vector::zip3). The trip count is the
//! associated constant `REGISTERS`, so the loops unroll completely; a vector
//! of exactly one base vector skips the loop and calls the kernel once.

use core::slice;

use super::{length_mismatch, Vector, VectorError};
use crate::simd::Lane;

impl<T: Lane, const N: usize> Vector<T, N> {
    #[inline(always)]
    fn is_single() -> bool {
        Self::REGISTERS == 1
    }

    /// The single base vector of a one-register vector.
    #[inline(always)]
    fn single_mut(&mut self) -> &mut T::Reg {
        &mut self.base_vectors_mut()[0]
    }

    /// Constituent base vectors, in lane order.
    ///
    /// ```
    /// use tiervec::{tier, Vector};
    ///
    /// let v = Vector::<u16, 32>::splat(3);
    /// assert_eq!(v.base_vectors().len(), 64 / tier::REGISTER_BYTES);
    /// ```
    #[inline]
    pub fn base_vectors(&self) -> &[T::Reg] {
        let () = Self::WHOLE;
        // SAFETY: `Lane` guarantees `Reg` is `LANES` lanes in memory order
        // with alignment at most 32; `WHOLE` guarantees `N` is a multiple of
        // `LANES`, and the storage is 32-byte aligned.
        unsafe { slice::from_raw_parts(self.lanes.as_ptr().cast::<T::Reg>(), Self::REGISTERS) }
    }

    /// Mutable view of the constituent base vectors.
    #[inline]
    pub fn base_vectors_mut(&mut self) -> &mut [T::Reg] {
        let () = Self::WHOLE;
        // SAFETY: as in `base_vectors`; every bit pattern of a `Reg` is a
        // valid sequence of lanes.
        unsafe { slice::from_raw_parts_mut(self.lanes.as_mut_ptr().cast::<T::Reg>(), Self::REGISTERS) }
    }

    /// Recompose a vector from `N / T::LANES` base vectors.
    pub fn from_base_vectors(regs: &[T::Reg]) -> Result<Self, VectorError> {
        if regs.len() != Self::REGISTERS {
            return Err(length_mismatch(Self::REGISTERS, regs.len()));
        }
        let mut out = Self::zero();
        out.base_vectors_mut().copy_from_slice(regs);
        Ok(out)
    }

    /// Wrap one native register. Only valid when `N == T::LANES`.
    #[inline]
    pub fn from_native(reg: T::Reg) -> Self {
        const { assert!(N == T::LANES, "from_native needs exactly one base vector") };
        let mut out = Self::zero();
        *out.single_mut() = reg;
        out
    }

    /// Copy `reg` into every constituent base vector.
    #[inline]
    pub fn fill(reg: T::Reg) -> Self {
        let mut out = Self::zero();
        for r in out.base_vectors_mut() {
            *r = reg;
        }
        out
    }

    /// Broadcast `v` to every lane.
    #[inline]
    pub fn splat(v: T) -> Self {
        Self::fill(T::vsplat(v))
    }

    /// Apply a base-vector kernel to every constituent.
    #[inline]
    pub fn map(self, op: impl Fn(T::Reg) -> T::Reg) -> Self {
        let mut out = self;
        if Self::is_single() {
            let r = out.single_mut();
            *r = op(*r);
            return out;
        }
        for r in out.base_vectors_mut() {
            *r = op(*r);
        }
        out
    }

    /// Apply a two-operand kernel to each pair of corresponding constituents.
    #[inline]
    pub fn zip(self, rhs: Self, op: impl Fn(T::Reg, T::Reg) -> T::Reg) -> Self {
        let mut out = self;
        if Self::is_single() {
            let r = out.single_mut();
            *r = op(*r, rhs.base_vectors()[0]);
            return out;
        }
        for (r, b) in out.base_vectors_mut().iter_mut().zip(rhs.base_vectors()) {
            *r = op(*r, *b);
        }
        out
    }

    /// Apply a three-operand kernel to each triple of corresponding constituents.
    #[inline]
    pub fn zip3(self, b: Self, c: Self, op: impl Fn(T::Reg, T::Reg, T::Reg) -> T::Reg) -> Self {
        let mut out = self;
        if Self::is_single() {
            let r = out.single_mut();
            *r = op(*r, b.base_vectors()[0], c.base_vectors()[0]);
            return out;
        }
        let (b, c) = (b.base_vectors(), c.base_vectors());
        for (i, r) in out.base_vectors_mut().iter_mut().enumerate() {
            *r = op(*r, b[i], c[i]);
        }
        out
    }
}
