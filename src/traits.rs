use core::fmt::Debug;
use num_traits::{Float, PrimInt, Unsigned, Zero};

mod sealed {
    pub trait Sealed {}
}

/// Trait for the ten lane element types.
///
/// Sealed: implemented for `i8`, `u8`, `i16`, `u16`, `i32`, `u32`, `i64`,
/// `u64`, `f32` and `f64` only.
///
/// The `lane_*` methods are the scalar reference semantics of every vector
/// operation. The scalar tier is built from them, and every accelerated tier
/// is tested against them lane by lane.
pub trait Element:
    sealed::Sealed + Copy + Default + PartialEq + PartialOrd + Debug + Send + Sync + 'static
{
    /// Unsigned integer of the same width, used for masks and bitwise ops.
    type Bits: PrimInt + Unsigned + Debug;

    /// Element width in bits.
    const BITS: u32;

    /// Element width in bytes.
    const SIZE: usize = (Self::BITS / 8) as usize;

    fn to_bits(self) -> Self::Bits;
    fn from_bits(bits: Self::Bits) -> Self;

    /// Wrapping addition for integers, IEEE addition for floats.
    fn lane_add(self, rhs: Self) -> Self;

    /// Wrapping subtraction for integers, IEEE subtraction for floats.
    fn lane_sub(self, rhs: Self) -> Self;

    /// All-ones lane pattern.
    #[inline]
    fn ones() -> Self {
        Self::from_bits(!Self::Bits::zero())
    }

    /// Mask lane for `b`: all ones when true, all zeros otherwise.
    #[inline]
    fn mask(b: bool) -> Self {
        if b {
            Self::ones()
        } else {
            Self::from_bits(Self::Bits::zero())
        }
    }

    /// True when any bit of the lane is set.
    #[inline]
    fn is_set(self) -> bool {
        self.to_bits() != Self::Bits::zero()
    }

    #[inline]
    fn lane_and(self, rhs: Self) -> Self {
        Self::from_bits(self.to_bits() & rhs.to_bits())
    }

    #[inline]
    fn lane_or(self, rhs: Self) -> Self {
        Self::from_bits(self.to_bits() | rhs.to_bits())
    }

    #[inline]
    fn lane_xor(self, rhs: Self) -> Self {
        Self::from_bits(self.to_bits() ^ rhs.to_bits())
    }

    /// `self & !rhs`.
    #[inline]
    fn lane_and_not(self, rhs: Self) -> Self {
        Self::from_bits(self.to_bits() & !rhs.to_bits())
    }

    #[inline]
    fn lane_eq(self, rhs: Self) -> Self {
        Self::mask(self == rhs)
    }

    /// Ordered less-than: false whenever either float lane is NaN.
    #[inline]
    fn lane_lt(self, rhs: Self) -> Self {
        Self::mask(self < rhs)
    }

    /// `mask ? on : off`, bit by bit.
    #[inline]
    fn lane_blend(on: Self, off: Self, mask: Self) -> Self {
        let m = mask.to_bits();
        Self::from_bits((on.to_bits() & m) | (off.to_bits() & !m))
    }
}

/// Integer lane elements.
pub trait IntElement: Element + PrimInt {
    const SIGNED: bool;

    /// Largest meaningful right-shift count: `BITS - 1` for signed lanes
    /// (sign fill), `BITS` for unsigned lanes (all zero).
    const MAX_SHIFT_R: u32 = if Self::SIGNED { Self::BITS - 1 } else { Self::BITS };

    /// Right shift: arithmetic for signed, logical for unsigned.
    ///
    /// Total over `count`: counts past the element width saturate to
    /// [`MAX_SHIFT_R`](Self::MAX_SHIFT_R).
    fn lane_shr(self, count: u32) -> Self;

    /// Left shift. Counts at or past the element width give zero.
    fn lane_shl(self, count: u32) -> Self;
}

/// Floating-point lane elements.
pub trait FloatElement: Element + Float {
    /// Magnitude at and beyond which every value of the type is an integer.
    const INTEGRAL_THRESHOLD: Self;

    #[inline]
    fn lane_mul(self, rhs: Self) -> Self {
        self * rhs
    }

    #[inline]
    fn lane_div(self, rhs: Self) -> Self {
        self / rhs
    }

    /// Clears the sign bit, NaN lanes included.
    #[inline]
    fn lane_abs(self) -> Self {
        Float::abs(self)
    }

    #[inline]
    fn lane_ceil(self) -> Self {
        Float::ceil(self)
    }

    /// Exact reciprocal square root, the reference for the estimate.
    #[inline]
    fn lane_rsqrt_e(self) -> Self {
        Self::one() / Float::sqrt(self)
    }

    /// One Newton-Raphson step refining the reciprocal square root estimate
    /// `x` of `a`: `x' = (x * 0.5) * (3 - a * (x * x))`.
    ///
    /// The operation order is part of the contract; accelerated tiers emit
    /// the same sequence of roundings.
    #[inline]
    fn lane_rsqrt_rh(x: Self, a: Self) -> Self {
        let half = Self::one() / (Self::one() + Self::one());
        let three = Self::one() + Self::one() + Self::one();
        let x2 = x * x;
        (x * half) * (three - a * x2)
    }
}

macro_rules! impl_int_element {
    ($($t:ty => $bits:ty, $signed:expr);* $(;)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Element for $t {
                type Bits = $bits;
                const BITS: u32 = <$t>::BITS;

                #[inline] fn to_bits(self) -> $bits { self as $bits }
                #[inline] fn from_bits(bits: $bits) -> $t { bits as $t }
                #[inline] fn lane_add(self, rhs: $t) -> $t { self.wrapping_add(rhs) }
                #[inline] fn lane_sub(self, rhs: $t) -> $t { self.wrapping_sub(rhs) }
            }

            impl IntElement for $t {
                const SIGNED: bool = $signed;

                #[inline]
                fn lane_shr(self, count: u32) -> $t {
                    let count = count.min(Self::MAX_SHIFT_R);
                    if count >= <$t>::BITS { 0 } else { self >> count }
                }

                #[inline]
                fn lane_shl(self, count: u32) -> $t {
                    if count >= <$t>::BITS { 0 } else { self << count }
                }
            }
        )*
    };
}

impl_int_element! {
    i8 => u8, true;
    u8 => u8, false;
    i16 => u16, true;
    u16 => u16, false;
    i32 => u32, true;
    u32 => u32, false;
    i64 => u64, true;
    u64 => u64, false;
}

macro_rules! impl_float_element {
    ($($t:ty => $bits:ty, $threshold:expr);* $(;)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Element for $t {
                type Bits = $bits;
                const BITS: u32 = <$bits>::BITS;

                #[inline] fn to_bits(self) -> $bits { <$t>::to_bits(self) }
                #[inline] fn from_bits(bits: $bits) -> $t { <$t>::from_bits(bits) }
                #[inline] fn lane_add(self, rhs: $t) -> $t { self + rhs }
                #[inline] fn lane_sub(self, rhs: $t) -> $t { self - rhs }
            }

            impl FloatElement for $t {
                const INTEGRAL_THRESHOLD: $t = $threshold;
            }
        )*
    };
}

impl_float_element! {
    f32 => u32, 8_388_608.0;             // 2^23
    f64 => u64, 4_503_599_627_370_496.0; // 2^52
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_shift_saturates_to_sign_fill() {
        assert_eq!((-128_i8).lane_shr(7), -1);
        assert_eq!((-128_i8).lane_shr(8), -1);
        assert_eq!((-128_i8).lane_shr(200), -1);
        assert_eq!(100_i8.lane_shr(200), 0);
        assert_eq!(i64::MIN.lane_shr(64), -1);
    }

    #[test]
    fn unsigned_shift_past_width_is_zero() {
        assert_eq!(0xFF_u8.lane_shr(8), 0);
        assert_eq!(u32::MAX.lane_shr(32), 0);
        assert_eq!(u64::MAX.lane_shr(u32::MAX), 0);
        assert_eq!(u16::MAX.lane_shl(16), 0);
        assert_eq!((-1_i32).lane_shl(31), i32::MIN);
    }

    #[test]
    fn masks_are_all_ones_or_zero() {
        assert_eq!(u8::mask(true), 0xFF);
        assert_eq!(i16::mask(true), -1);
        assert_eq!(f32::mask(true).to_bits(), u32::MAX);
        assert_eq!(f64::mask(false).to_bits(), 0);
        assert!(f32::mask(true).is_set());
        assert!(!(-0.0_f32).lane_and(0.0).is_set());
    }

    #[test]
    fn float_compare_is_ordered() {
        assert!(!f32::NAN.lane_lt(1.0).is_set());
        assert!(!1.0_f64.lane_lt(f64::NAN).is_set());
        assert!(!f64::NAN.lane_eq(f64::NAN).is_set());
        assert!((-0.0_f32).lane_eq(0.0).is_set());
    }

    #[test]
    fn blend_selects_bitwise() {
        assert_eq!(u8::lane_blend(0xAA, 0x55, 0xF0), 0xA5);
        assert_eq!(f32::lane_blend(1.0, 2.0, f32::mask(true)), 1.0);
        assert_eq!(f32::lane_blend(1.0, 2.0, f32::mask(false)), 2.0);
    }

    #[test]
    fn ceil_reference() {
        assert_eq!((-0.3_f32).lane_ceil().to_bits(), (-0.0_f32).to_bits());
        assert_eq!(1.5_f64.lane_ceil(), 2.0);
        assert!(f32::NAN.lane_ceil().is_nan());
    }

    #[test]
    fn rsqrt_rh_fixed_point() {
        // The exact reciprocal square root of 4 is a fixed point of the step.
        assert_eq!(f32::lane_rsqrt_rh(0.5, 4.0), 0.5);
        assert_eq!(f64::lane_rsqrt_rh(0.25, 16.0), 0.25);
    }
}
