use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, DivAssign,
    Mul, MulAssign, Not, Sub, SubAssign,
};

use super::{Mask, Vector};
use crate::simd::{FloatLane, Lane};

/// Elementwise binary operator plus its compound-assignment form, both
/// lowering to one kernel per base vector.
macro_rules! impl_binary_op {
    ($bound:ident, $trait:ident :: $method:ident, $assign:ident :: $assign_method:ident, $kernel:ident) => {
        impl<T: $bound, const N: usize> $trait for Vector<T, N> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                self.zip(rhs, T::$kernel)
            }
        }

        impl<T: $bound, const N: usize> $assign for Vector<T, N> {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                *self = self.zip(rhs, T::$kernel);
            }
        }
    };
}

// ── Arithmetic ──────────────────────────────────────────────────────

impl_binary_op!(Lane, Add::add, AddAssign::add_assign, vadd);
impl_binary_op!(Lane, Sub::sub, SubAssign::sub_assign, vsub);
impl_binary_op!(FloatLane, Mul::mul, MulAssign::mul_assign, vmul);
impl_binary_op!(FloatLane, Div::div, DivAssign::div_assign, vdiv);

// ── Bitwise ─────────────────────────────────────────────────────────

impl_binary_op!(Lane, BitAnd::bitand, BitAndAssign::bitand_assign, vand);
impl_binary_op!(Lane, BitOr::bitor, BitOrAssign::bitor_assign, vor);
impl_binary_op!(Lane, BitXor::bitxor, BitXorAssign::bitxor_assign, vxor);

impl<T: Lane, const N: usize> Not for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        let ones = T::vsplat(T::ones());
        self.map(|a| T::vxor(a, ones))
    }
}

impl<T: Lane, const N: usize> Vector<T, N> {
    /// `self & !rhs`, lane by lane.
    #[inline]
    pub fn and_not(self, rhs: Self) -> Self {
        self.zip(rhs, T::vand_not)
    }

    // ── Comparisons ─────────────────────────────────────────────────
    //
    // Floats compare ordered: any comparison involving NaN is false,
    // except `cmp_ne`, which is its negation.
    //
    // Cost per base vector of `cmp_eq` / `cmp_lt`: one compare on NEON
    // (`cmeq` / `cmgt` / `fcmgt`) and for signed and float lanes on x86;
    // unsigned x86 lanes add two `xor`s for the sign bias. 64-bit lanes on
    // SSE2 take three instructions for `eq` (one `pcmpeqq` from SSE4.1) and
    // go lane by lane for `lt` until SSE4.2's `pcmpgtq`. `cmp_ne` adds a
    // `not`; `cmp_le` / `cmp_ge` are `lt`, `eq` and an `or`.

    #[inline]
    pub fn cmp_eq(self, rhs: Self) -> Mask<T, N> {
        Mask::from_lanes_unchecked(self.zip(rhs, T::vcmp_eq))
    }

    #[inline]
    pub fn cmp_ne(self, rhs: Self) -> Mask<T, N> {
        !self.cmp_eq(rhs)
    }

    #[inline]
    pub fn cmp_lt(self, rhs: Self) -> Mask<T, N> {
        Mask::from_lanes_unchecked(self.zip(rhs, T::vcmp_lt))
    }

    #[inline]
    pub fn cmp_gt(self, rhs: Self) -> Mask<T, N> {
        rhs.cmp_lt(self)
    }

    #[inline]
    pub fn cmp_le(self, rhs: Self) -> Mask<T, N> {
        self.cmp_lt(rhs) | self.cmp_eq(rhs)
    }

    #[inline]
    pub fn cmp_ge(self, rhs: Self) -> Mask<T, N> {
        rhs.cmp_le(self)
    }

    /// Per lane: `on` where `mask` is set, `off` elsewhere.
    ///
    /// Cost per base vector: SSE2 `and`, `andnot`, `or`; SSE4.1 and AVX2 one
    /// `blendv`; NEON one `bsl`.
    #[inline]
    pub fn blend(mask: Mask<T, N>, on: Self, off: Self) -> Self {
        mask.select(on, off)
    }
}
