//! Integer shifts by runtime and by compile-time counts.
//!
//! Both families are total. A right shift by at least the lane width gives
//! zero for unsigned lanes and the sign fill for signed lanes; a left shift
//! by at least the lane width gives zero. Counts are clamped before they
//! reach a kernel, so no tier depends on how its hardware treats
//! out-of-range counts.

use core::ops::{Shl, ShlAssign, Shr, ShrAssign};

use super::Vector;
use crate::simd::IntLane;

impl<T: IntLane, const N: usize> Vector<T, N> {
    /// Right shift every lane by `count`: arithmetic for signed lanes,
    /// logical for unsigned ones.
    ///
    /// x86 has no 8-bit shifts: those lanes cost a 16-bit shift plus a mask
    /// (and a sign fix-up for `i8`). Signed 64-bit lanes are emulated with a
    /// logical shift and a sign fill.
    ///
    /// ```
    /// use tiervec::Vector;
    ///
    /// let a = Vector::<i8, 32>::splat(-128);
    /// assert_eq!(a.shift_r(3).to_array(), [-16; 32]);
    /// assert_eq!(a.shift_r(100).to_array(), [-1; 32]);
    /// ```
    #[inline]
    pub fn shift_r(self, count: u32) -> Self {
        let count = count.min(T::MAX_SHIFT_R);
        self.map(|a| T::vshift_r(a, count))
    }

    /// Left shift every lane by `count`.
    #[inline]
    pub fn shift_l(self, count: u32) -> Self {
        let count = count.min(T::BITS);
        self.map(|a| T::vshift_l(a, count))
    }

    /// Right shift by the constant `C`, `0 <= C <= T::BITS`.
    ///
    /// Out-of-range counts fail to build. `C == 0` is the identity and
    /// `C == T::BITS` is resolved here, so the immediate kernels only see
    /// counts strictly inside the lane width.
    ///
    /// ```
    /// use tiervec::Vector;
    ///
    /// let a = Vector::<u16, 16>::splat(0xF00F);
    /// assert_eq!(a.shift_r_imm::<4>().to_array(), [0x0F00; 16]);
    /// assert_eq!(a.shift_r_imm::<16>().to_array(), [0; 16]);
    /// ```
    ///
    /// A count past the lane width is rejected:
    ///
    /// ```compile_fail
    /// use tiervec::U32x8;
    ///
    /// let _ = U32x8::splat(1).shift_r_imm::<33>();
    /// ```
    #[inline]
    pub fn shift_r_imm<const C: i32>(self) -> Self {
        const { assert!(C >= 0 && (C as u32) <= T::BITS, "shift count out of range") };
        if C == 0 {
            self
        } else if (C as u32) == T::BITS {
            if T::SIGNED {
                self.map(|a| T::vshift_r(a, T::BITS - 1))
            } else {
                Self::zero()
            }
        } else {
            self.map(T::vshift_r_imm::<C>)
        }
    }

    /// Left shift by the constant `C`, `0 <= C <= T::BITS`.
    ///
    /// ```
    /// use tiervec::U32x8;
    ///
    /// assert_eq!(U32x8::splat(3).shift_l_imm::<31>().to_array(), [0x8000_0000; 8]);
    /// ```
    ///
    /// Negative counts fail to build:
    ///
    /// ```compile_fail
    /// use tiervec::U32x8;
    ///
    /// let _ = U32x8::splat(1).shift_l_imm::<-1>();
    /// ```
    #[inline]
    pub fn shift_l_imm<const C: i32>(self) -> Self {
        const { assert!(C >= 0 && (C as u32) <= T::BITS, "shift count out of range") };
        if C == 0 {
            self
        } else if (C as u32) == T::BITS {
            Self::zero()
        } else {
            self.map(T::vshift_l_imm::<C>)
        }
    }
}

impl<T: IntLane, const N: usize> Shr<u32> for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn shr(self, count: u32) -> Self {
        self.shift_r(count)
    }
}

impl<T: IntLane, const N: usize> Shl<u32> for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn shl(self, count: u32) -> Self {
        self.shift_l(count)
    }
}

impl<T: IntLane, const N: usize> ShrAssign<u32> for Vector<T, N> {
    #[inline]
    fn shr_assign(&mut self, count: u32) {
        *self = self.shift_r(count);
    }
}

impl<T: IntLane, const N: usize> ShlAssign<u32> for Vector<T, N> {
    #[inline]
    fn shl_assign(&mut self, count: u32) {
        *self = self.shift_l(count);
    }
}
