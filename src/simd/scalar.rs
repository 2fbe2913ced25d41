//! Lane-by-lane reference implementations.
//!
//! These are the "null" kernels: they define the result of every vector
//! operation. When no acceleration tier is active they back [`Lane`] directly
//! with `[T; L]` registers; on accelerated tiers they remain the oracle the
//! tier kernels are tested against, and the fallback for the few kernels a
//! tier has no instruction sequence for.
//!
//! [`Lane`]: super::Lane

use crate::traits::Element;

/// Bytes in one alignment block. `align` never crosses a block boundary.
pub const BLOCK_BYTES: usize = 16;

/// Apply `f` to every lane.
#[inline]
pub fn foreach<T: Copy, const L: usize>(a: [T; L], f: impl Fn(T) -> T) -> [T; L] {
    let mut out = a;
    for i in 0..L {
        out[i] = f(a[i]);
    }
    out
}

/// Apply `f` to every pair of corresponding lanes.
#[inline]
pub fn foreach2<T: Copy, const L: usize>(a: [T; L], b: [T; L], f: impl Fn(T, T) -> T) -> [T; L] {
    let mut out = a;
    for i in 0..L {
        out[i] = f(a[i], b[i]);
    }
    out
}

/// Apply `f` to every triple of corresponding lanes.
#[inline]
pub fn foreach3<T: Copy, const L: usize>(
    a: [T; L],
    b: [T; L],
    c: [T; L],
    f: impl Fn(T, T, T) -> T,
) -> [T; L] {
    let mut out = a;
    for i in 0..L {
        out[i] = f(a[i], b[i], c[i]);
    }
    out
}

/// Reference `align`: for each 16-byte block, lane `i` of the output is lane
/// `i + shift` of the concatenation of that block of `lower` followed by the
/// same block of `upper`.
///
/// `shift` counts lanes and must not exceed the lanes per block.
/// All three slices have the same length, a multiple of the block lanes.
///
/// ```
/// use tiervec::simd::scalar::align_blocks;
/// let lower: Vec<u32> = (0..8).collect();
/// let upper: Vec<u32> = (10..18).collect();
/// let mut out = [0_u32; 8];
/// align_blocks(&lower, &upper, 1, &mut out);
/// assert_eq!(out, [1, 2, 3, 10, 5, 6, 7, 14]);
/// ```
pub fn align_blocks<T: Element>(lower: &[T], upper: &[T], shift: usize, out: &mut [T]) {
    let block = BLOCK_BYTES / T::SIZE;
    debug_assert!(shift <= block);
    debug_assert_eq!(lower.len(), upper.len());
    debug_assert_eq!(lower.len(), out.len());
    debug_assert_eq!(lower.len() % block, 0);
    for base in (0..out.len()).step_by(block) {
        for i in 0..block {
            let j = i + shift;
            out[base + i] = if j < block {
                lower[base + j]
            } else {
                upper[base + j - block]
            };
        }
    }
}

/// Reference `splat`: every output lane takes the value of lane `lane`.
pub fn splat_lane<T: Copy>(a: &[T], lane: usize, out: &mut [T]) {
    let v = a[lane];
    for o in out.iter_mut() {
        *o = v;
    }
}

// ── Scalar tier ─────────────────────────────────────────────────────

#[cfg(any(
    feature = "force-scalar",
    not(any(
        all(target_arch = "x86_64", target_feature = "sse2"),
        all(target_arch = "aarch64", target_feature = "neon")
    ))
))]
mod tier {
    use super::{align_blocks, foreach, foreach2, foreach3, splat_lane};
    use crate::simd::{FloatLane, IntLane, Lane};
    use crate::traits::{Element, FloatElement, IntElement};

    macro_rules! impl_lane {
        ($($t:ty => $lanes:literal),* $(,)?) => {
            $(
                unsafe impl Lane for $t {
                    type Reg = [$t; $lanes];
                    const LANES: usize = $lanes;

                    #[inline] fn vsplat(v: $t) -> Self::Reg { [v; $lanes] }
                    #[inline] fn vadd(a: Self::Reg, b: Self::Reg) -> Self::Reg { foreach2(a, b, <$t>::lane_add) }
                    #[inline] fn vsub(a: Self::Reg, b: Self::Reg) -> Self::Reg { foreach2(a, b, <$t>::lane_sub) }
                    #[inline] fn vand(a: Self::Reg, b: Self::Reg) -> Self::Reg { foreach2(a, b, <$t>::lane_and) }
                    #[inline] fn vor(a: Self::Reg, b: Self::Reg) -> Self::Reg { foreach2(a, b, <$t>::lane_or) }
                    #[inline] fn vxor(a: Self::Reg, b: Self::Reg) -> Self::Reg { foreach2(a, b, <$t>::lane_xor) }
                    #[inline] fn vand_not(a: Self::Reg, b: Self::Reg) -> Self::Reg { foreach2(a, b, <$t>::lane_and_not) }
                    #[inline] fn vcmp_eq(a: Self::Reg, b: Self::Reg) -> Self::Reg { foreach2(a, b, <$t>::lane_eq) }
                    #[inline] fn vcmp_lt(a: Self::Reg, b: Self::Reg) -> Self::Reg { foreach2(a, b, <$t>::lane_lt) }

                    #[inline]
                    fn vblend(on: Self::Reg, off: Self::Reg, mask: Self::Reg) -> Self::Reg {
                        foreach3(on, off, mask, <$t>::lane_blend)
                    }

                    #[inline]
                    fn valign(lower: Self::Reg, upper: Self::Reg, bytes: usize) -> Self::Reg {
                        let mut out = lower;
                        align_blocks(&lower, &upper, bytes / <$t as Element>::SIZE, &mut out);
                        out
                    }

                    #[inline]
                    fn vsplat_lane(a: Self::Reg, lane: usize) -> Self::Reg {
                        let mut out = a;
                        splat_lane(&a, lane, &mut out);
                        out
                    }

                    #[inline]
                    fn vextract(a: Self::Reg, lane: usize) -> $t {
                        a[lane]
                    }
                }
            )*
        };
    }

    impl_lane! {
        i8 => 16, u8 => 16,
        i16 => 8, u16 => 8,
        i32 => 4, u32 => 4,
        i64 => 2, u64 => 2,
        f32 => 4, f64 => 2,
    }

    macro_rules! impl_int_lane {
        ($($t:ty),*) => {
            $(
                impl IntLane for $t {
                    #[inline]
                    fn vshift_r(a: Self::Reg, count: u32) -> Self::Reg {
                        foreach(a, |x| x.lane_shr(count))
                    }

                    #[inline]
                    fn vshift_l(a: Self::Reg, count: u32) -> Self::Reg {
                        foreach(a, |x| x.lane_shl(count))
                    }

                    #[inline]
                    fn vshift_r_imm<const COUNT: i32>(a: Self::Reg) -> Self::Reg {
                        foreach(a, |x| x.lane_shr(COUNT as u32))
                    }

                    #[inline]
                    fn vshift_l_imm<const COUNT: i32>(a: Self::Reg) -> Self::Reg {
                        foreach(a, |x| x.lane_shl(COUNT as u32))
                    }
                }
            )*
        };
    }

    impl_int_lane!(i8, u8, i16, u16, i32, u32, i64, u64);

    macro_rules! impl_float_lane {
        ($($t:ty),*) => {
            $(
                impl FloatLane for $t {
                    const RSQRT_ESTIMATE_BITS: u32 = <$t>::MANTISSA_DIGITS - 2;

                    #[inline] fn vmul(a: Self::Reg, b: Self::Reg) -> Self::Reg { foreach2(a, b, <$t>::lane_mul) }
                    #[inline] fn vdiv(a: Self::Reg, b: Self::Reg) -> Self::Reg { foreach2(a, b, <$t>::lane_div) }
                    #[inline] fn vabs(a: Self::Reg) -> Self::Reg { foreach(a, <$t>::lane_abs) }
                    #[inline] fn vceil(a: Self::Reg) -> Self::Reg { foreach(a, <$t>::lane_ceil) }
                    #[inline] fn vrsqrt_e(a: Self::Reg) -> Self::Reg { foreach(a, <$t>::lane_rsqrt_e) }

                    #[inline]
                    fn vrsqrt_rh(x: Self::Reg, a: Self::Reg) -> Self::Reg {
                        foreach2(x, a, <$t>::lane_rsqrt_rh)
                    }
                }
            )*
        };
    }

    impl_float_lane!(f32, f64);
}
