//! SSE2 kernels for x86_64, refined by SSSE3 and SSE4.1 where enabled.
//!
//! SSE2 provides 128-bit registers → 16×u8, 8×u16, 4×u32/f32, 2×u64/f64.
//!
//! | kernel              | SSE2                          | SSSE3 / SSE4.1            |
//! |---------------------|-------------------------------|---------------------------|
//! | 8-bit shifts        | 16-bit shift + byte mask      |                           |
//! | signed 64-bit shr   | logical shift + sign fill     |                           |
//! | 64-bit `cmp_eq`     | 32-bit compare + pair and     | `pcmpeqq` (4.1)           |
//! | 64-bit `cmp_lt`     | lane by lane                  | `pcmpgtq` (4.2)           |
//! | `blend`             | and / andnot / or             | `blendv` (4.1)            |
//! | `align`             | byte shifts + or              | `palignr` (SSSE3)         |
//! | 8/16-bit splat lane | extract + broadcast           | `pshufb` (SSSE3)          |
//! | `ceil`              | truncate-and-correct / 2^52   | `roundps` / `roundpd` (4.1) |

use core::arch::x86_64::*;
use core::mem::transmute;

use super::{align_arms, FloatLane, IntLane, Lane};
#[cfg(not(target_feature = "sse4.2"))]
use crate::traits::Element;
#[cfg(not(target_feature = "sse4.1"))]
use crate::traits::FloatElement;

#[inline(always)]
fn count_reg(count: u32) -> __m128i {
    unsafe { _mm_cvtsi32_si128(count as i32) }
}

#[inline(always)]
fn byte_splat(v: u32) -> __m128i {
    unsafe { _mm_set1_epi8(v as u8 as i8) }
}

#[inline(always)]
fn blend_si128(on: __m128i, off: __m128i, mask: __m128i) -> __m128i {
    unsafe {
        #[cfg(target_feature = "sse4.1")]
        {
            _mm_blendv_epi8(off, on, mask)
        }
        #[cfg(not(target_feature = "sse4.1"))]
        {
            _mm_or_si128(_mm_and_si128(mask, on), _mm_andnot_si128(mask, off))
        }
    }
}

#[inline(always)]
fn align_si128(lower: __m128i, upper: __m128i, bytes: usize) -> __m128i {
    unsafe {
        #[cfg(target_feature = "ssse3")]
        macro_rules! window {
            ($b:literal) => {
                _mm_alignr_epi8::<$b>(upper, lower)
            };
        }
        #[cfg(not(target_feature = "ssse3"))]
        macro_rules! window {
            ($b:literal) => {
                _mm_or_si128(_mm_srli_si128::<$b>(lower), _mm_slli_si128::<{ 16 - $b }>(upper))
            };
        }
        align_arms!(bytes, lower, upper, window)
    }
}

// ── Comparisons ─────────────────────────────────────────────────────

#[inline(always)]
fn sign_bias(a: __m128i, bits: u32) -> __m128i {
    unsafe {
        let bias = match bits {
            8 => _mm_set1_epi8(i8::MIN),
            16 => _mm_set1_epi16(i16::MIN),
            32 => _mm_set1_epi32(i32::MIN),
            _ => _mm_set1_epi64x(i64::MIN),
        };
        _mm_xor_si128(a, bias)
    }
}

#[inline(always)]
fn cmp_eq_64(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        #[cfg(target_feature = "sse4.1")]
        {
            _mm_cmpeq_epi64(a, b)
        }
        #[cfg(not(target_feature = "sse4.1"))]
        {
            // both 32-bit halves of a lane must match
            let eq = _mm_cmpeq_epi32(a, b);
            _mm_and_si128(eq, _mm_shuffle_epi32::<0xB1>(eq))
        }
    }
}

#[inline(always)]
fn cmp_lt_i64(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        #[cfg(target_feature = "sse4.2")]
        {
            _mm_cmpgt_epi64(b, a)
        }
        #[cfg(not(target_feature = "sse4.2"))]
        {
            let a: [i64; 2] = transmute(a);
            let b: [i64; 2] = transmute(b);
            transmute([a[0].lane_lt(b[0]), a[1].lane_lt(b[1])])
        }
    }
}

macro_rules! cmp_lt_fns {
    ($($name:ident: $bits:literal => $signed_lt:expr;)*) => {
        $(
            #[inline(always)]
            fn $name(a: __m128i, b: __m128i, unsigned: bool) -> __m128i {
                let (a, b) = if unsigned { (sign_bias(a, $bits), sign_bias(b, $bits)) } else { (a, b) };
                #[allow(unused_unsafe)]
                unsafe { $signed_lt(a, b) }
            }
        )*
    };
}

cmp_lt_fns! {
    cmp_lt_8: 8 => _mm_cmplt_epi8;
    cmp_lt_16: 16 => _mm_cmplt_epi16;
    cmp_lt_32: 32 => _mm_cmplt_epi32;
    cmp_lt_64: 64 => cmp_lt_i64;
}

// ── Shifts ──────────────────────────────────────────────────────────

// No 8-bit shifts exist: shift 16-bit lanes, then clear the bits that
// crossed in from the neighbouring byte.

#[inline(always)]
fn shr_u8(a: __m128i, count: u32) -> __m128i {
    unsafe { _mm_and_si128(_mm_srl_epi16(a, count_reg(count)), byte_splat(0xFF >> count)) }
}

#[inline(always)]
fn shr_u8_imm<const C: i32>(a: __m128i) -> __m128i {
    unsafe { _mm_and_si128(_mm_srli_epi16::<C>(a), byte_splat(0xFF >> C as u32)) }
}

/// Sign-extend a logical shift: `(u ^ m) - m` with `m = 0x80 >> count`.
#[inline(always)]
fn sign_extend_i8(logical: __m128i, count: u32) -> __m128i {
    unsafe {
        let m = byte_splat(0x80 >> count);
        _mm_sub_epi8(_mm_xor_si128(logical, m), m)
    }
}

#[inline(always)]
fn shr_i8(a: __m128i, count: u32) -> __m128i {
    sign_extend_i8(shr_u8(a, count), count)
}

#[inline(always)]
fn shr_i8_imm<const C: i32>(a: __m128i) -> __m128i {
    sign_extend_i8(shr_u8_imm::<C>(a), C as u32)
}

#[inline(always)]
fn shl_8(a: __m128i, count: u32) -> __m128i {
    unsafe { _mm_and_si128(_mm_sll_epi16(a, count_reg(count)), byte_splat(0xFF << count)) }
}

#[inline(always)]
fn shl_8_imm<const C: i32>(a: __m128i) -> __m128i {
    unsafe { _mm_and_si128(_mm_slli_epi16::<C>(a), byte_splat(0xFF << C as u32)) }
}

/// All-ones in every 64-bit lane holding a negative value.
#[inline(always)]
fn sign_fill_i64(a: __m128i) -> __m128i {
    unsafe { _mm_srai_epi32::<31>(_mm_shuffle_epi32::<0xF5>(a)) }
}

// There is no 64-bit arithmetic shift: OR the sign fill into the logical one.

#[inline(always)]
fn shr_i64(a: __m128i, count: u32) -> __m128i {
    unsafe {
        let fill = _mm_sll_epi64(sign_fill_i64(a), count_reg(64 - count));
        _mm_or_si128(_mm_srl_epi64(a, count_reg(count)), fill)
    }
}

#[inline(always)]
fn shr_i64_imm<const C: i32>(a: __m128i) -> __m128i {
    unsafe {
        let fill = _mm_sll_epi64(sign_fill_i64(a), count_reg(64 - C as u32));
        _mm_or_si128(_mm_srli_epi64::<C>(a), fill)
    }
}

macro_rules! shift_fns {
    ($($name:ident($op:ident), $imm:ident($op_imm:ident);)*) => {
        $(
            #[inline(always)]
            fn $name(a: __m128i, count: u32) -> __m128i {
                unsafe { $op(a, count_reg(count)) }
            }

            #[inline(always)]
            fn $imm<const C: i32>(a: __m128i) -> __m128i {
                unsafe { $op_imm::<C>(a) }
            }
        )*
    };
}

shift_fns! {
    shr_u16(_mm_srl_epi16), shr_u16_imm(_mm_srli_epi16);
    shr_i16(_mm_sra_epi16), shr_i16_imm(_mm_srai_epi16);
    shl_16(_mm_sll_epi16), shl_16_imm(_mm_slli_epi16);
    shr_u32(_mm_srl_epi32), shr_u32_imm(_mm_srli_epi32);
    shr_i32(_mm_sra_epi32), shr_i32_imm(_mm_srai_epi32);
    shl_32(_mm_sll_epi32), shl_32_imm(_mm_slli_epi32);
    shr_u64(_mm_srl_epi64), shr_u64_imm(_mm_srli_epi64);
    shl_64(_mm_sll_epi64), shl_64_imm(_mm_slli_epi64);
}

// ── Lane broadcast ──────────────────────────────────────────────────

#[inline(always)]
fn splat_lane_32(a: __m128i, lane: usize) -> __m128i {
    unsafe {
        match lane {
            0 => _mm_shuffle_epi32::<0x00>(a),
            1 => _mm_shuffle_epi32::<0x55>(a),
            2 => _mm_shuffle_epi32::<0xAA>(a),
            _ => _mm_shuffle_epi32::<0xFF>(a),
        }
    }
}

#[inline(always)]
fn splat_lane_64(a: __m128i, lane: usize) -> __m128i {
    unsafe {
        match lane {
            0 => _mm_shuffle_epi32::<0x44>(a),
            _ => _mm_shuffle_epi32::<0xEE>(a),
        }
    }
}

macro_rules! narrow_splat_lane_fns {
    ($($name:ident: $t:ty, $lanes:literal, $set1:ident, $index:expr;)*) => {
        $(
            #[inline(always)]
            fn $name(a: __m128i, lane: usize) -> __m128i {
                unsafe {
                    #[cfg(target_feature = "ssse3")]
                    {
                        _mm_shuffle_epi8(a, $index(lane))
                    }
                    #[cfg(not(target_feature = "ssse3"))]
                    {
                        let lanes: [$t; $lanes] = transmute(a);
                        $set1(lanes[lane])
                    }
                }
            }
        )*
    };
}

narrow_splat_lane_fns! {
    splat_lane_8: i8, 16, _mm_set1_epi8, |lane: usize| _mm_set1_epi8(lane as i8);
    splat_lane_16: i16, 8, _mm_set1_epi16, |lane: usize| _mm_set1_epi16((((2 * lane + 1) << 8) | (2 * lane)) as i16);
}

// ── Integer lanes ───────────────────────────────────────────────────

macro_rules! impl_int_lane {
    ($(
        $t:ty => $lanes:literal, $bits:literal, unsigned: $unsigned:expr,
        set1: $set1:ident($st:ty), add: $add:ident, sub: $sub:ident,
        eq: $eq:ident, lt: $lt:ident, splat_lane: $splat_lane:ident,
        shr: $shr:ident / $shr_imm:ident, shl: $shl:ident / $shl_imm:ident;
    )*) => {
        $(
            unsafe impl Lane for $t {
                type Reg = __m128i;
                const LANES: usize = $lanes;

                #[inline] fn vsplat(v: $t) -> __m128i { unsafe { $set1(v as $st) } }
                #[inline] fn vadd(a: __m128i, b: __m128i) -> __m128i { unsafe { $add(a, b) } }
                #[inline] fn vsub(a: __m128i, b: __m128i) -> __m128i { unsafe { $sub(a, b) } }
                #[inline] fn vand(a: __m128i, b: __m128i) -> __m128i { unsafe { _mm_and_si128(a, b) } }
                #[inline] fn vor(a: __m128i, b: __m128i) -> __m128i { unsafe { _mm_or_si128(a, b) } }
                #[inline] fn vxor(a: __m128i, b: __m128i) -> __m128i { unsafe { _mm_xor_si128(a, b) } }
                #[inline] fn vand_not(a: __m128i, b: __m128i) -> __m128i { unsafe { _mm_andnot_si128(b, a) } }
                #[inline] fn vcmp_eq(a: __m128i, b: __m128i) -> __m128i {
                    #[allow(unused_unsafe)]
                    unsafe { $eq(a, b) }
                }
                #[inline] fn vcmp_lt(a: __m128i, b: __m128i) -> __m128i { $lt(a, b, $unsigned) }
                #[inline] fn vblend(on: __m128i, off: __m128i, mask: __m128i) -> __m128i { blend_si128(on, off, mask) }
                #[inline] fn valign(lower: __m128i, upper: __m128i, bytes: usize) -> __m128i { align_si128(lower, upper, bytes) }
                #[inline] fn vsplat_lane(a: __m128i, lane: usize) -> __m128i { $splat_lane(a, lane) }

                #[inline]
                fn vextract(a: __m128i, lane: usize) -> $t {
                    let lanes: [$t; $lanes] = unsafe { transmute(a) };
                    lanes[lane]
                }
            }

            impl IntLane for $t {
                #[inline] fn vshift_r(a: __m128i, count: u32) -> __m128i { $shr(a, count) }
                #[inline] fn vshift_l(a: __m128i, count: u32) -> __m128i { $shl(a, count) }
                #[inline] fn vshift_r_imm<const COUNT: i32>(a: __m128i) -> __m128i { $shr_imm::<COUNT>(a) }
                #[inline] fn vshift_l_imm<const COUNT: i32>(a: __m128i) -> __m128i { $shl_imm::<COUNT>(a) }
            }
        )*
    };
}

impl_int_lane! {
    i8 => 16, 8, unsigned: false, set1: _mm_set1_epi8(i8), add: _mm_add_epi8, sub: _mm_sub_epi8,
        eq: _mm_cmpeq_epi8, lt: cmp_lt_8, splat_lane: splat_lane_8,
        shr: shr_i8 / shr_i8_imm, shl: shl_8 / shl_8_imm;
    u8 => 16, 8, unsigned: true, set1: _mm_set1_epi8(i8), add: _mm_add_epi8, sub: _mm_sub_epi8,
        eq: _mm_cmpeq_epi8, lt: cmp_lt_8, splat_lane: splat_lane_8,
        shr: shr_u8 / shr_u8_imm, shl: shl_8 / shl_8_imm;
    i16 => 8, 16, unsigned: false, set1: _mm_set1_epi16(i16), add: _mm_add_epi16, sub: _mm_sub_epi16,
        eq: _mm_cmpeq_epi16, lt: cmp_lt_16, splat_lane: splat_lane_16,
        shr: shr_i16 / shr_i16_imm, shl: shl_16 / shl_16_imm;
    u16 => 8, 16, unsigned: true, set1: _mm_set1_epi16(i16), add: _mm_add_epi16, sub: _mm_sub_epi16,
        eq: _mm_cmpeq_epi16, lt: cmp_lt_16, splat_lane: splat_lane_16,
        shr: shr_u16 / shr_u16_imm, shl: shl_16 / shl_16_imm;
    i32 => 4, 32, unsigned: false, set1: _mm_set1_epi32(i32), add: _mm_add_epi32, sub: _mm_sub_epi32,
        eq: _mm_cmpeq_epi32, lt: cmp_lt_32, splat_lane: splat_lane_32,
        shr: shr_i32 / shr_i32_imm, shl: shl_32 / shl_32_imm;
    u32 => 4, 32, unsigned: true, set1: _mm_set1_epi32(i32), add: _mm_add_epi32, sub: _mm_sub_epi32,
        eq: _mm_cmpeq_epi32, lt: cmp_lt_32, splat_lane: splat_lane_32,
        shr: shr_u32 / shr_u32_imm, shl: shl_32 / shl_32_imm;
    i64 => 2, 64, unsigned: false, set1: _mm_set1_epi64x(i64), add: _mm_add_epi64, sub: _mm_sub_epi64,
        eq: cmp_eq_64, lt: cmp_lt_64, splat_lane: splat_lane_64,
        shr: shr_i64 / shr_i64_imm, shl: shl_64 / shl_64_imm;
    u64 => 2, 64, unsigned: true, set1: _mm_set1_epi64x(i64), add: _mm_add_epi64, sub: _mm_sub_epi64,
        eq: cmp_eq_64, lt: cmp_lt_64, splat_lane: splat_lane_64,
        shr: shr_u64 / shr_u64_imm, shl: shl_64 / shl_64_imm;
}

// ── Float lanes ─────────────────────────────────────────────────────

/// Ceil without `roundps`.
///
/// Positive lanes step one ulp towards zero, truncate, and add one; negative
/// lanes truncate. Lanes that are NaN, zero, or at least 2^23 in magnitude
/// are already integral and keep their input.
#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn ceil_ps(a: __m128) -> __m128 {
    unsafe {
        let sign = _mm_set1_ps(-0.0);
        let abs = _mm_andnot_ps(sign, a);
        let exact = _mm_or_ps(
            _mm_cmpnlt_ps(abs, _mm_set1_ps(f32::INTEGRAL_THRESHOLD)),
            _mm_cmpeq_ps(abs, _mm_setzero_ps()),
        );

        let bits = _mm_castps_si128(a);
        let positive = _mm_xor_si128(_mm_srli_epi32::<31>(bits), _mm_set1_epi32(1));
        let stepped = _mm_castsi128_ps(_mm_sub_epi32(bits, positive));
        let t = _mm_add_epi32(_mm_cvttps_epi32(stepped), positive);
        // negative lanes that truncate to zero become -0.0
        let r = _mm_or_ps(_mm_cvtepi32_ps(t), _mm_and_ps(a, sign));

        _mm_or_ps(_mm_and_ps(exact, a), _mm_andnot_ps(exact, r))
    }
}

/// Ceil without `roundpd` or a 64-bit float-to-int conversion.
///
/// Adding and subtracting 2^52 (carrying the sign of the input) rounds to
/// the nearest integer; lanes that rounded down get one added back.
#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn ceil_pd(a: __m128d) -> __m128d {
    unsafe {
        let sign = _mm_set1_pd(-0.0);
        let threshold = _mm_set1_pd(f64::INTEGRAL_THRESHOLD);
        let abs = _mm_andnot_pd(sign, a);
        let exact = _mm_or_pd(_mm_cmpnlt_pd(abs, threshold), _mm_cmpeq_pd(abs, _mm_setzero_pd()));

        let magic = _mm_or_pd(threshold, _mm_and_pd(a, sign));
        let r = _mm_sub_pd(_mm_add_pd(a, magic), magic);
        let r = _mm_add_pd(r, _mm_and_pd(_mm_cmplt_pd(r, a), _mm_set1_pd(1.0)));
        let r = _mm_or_pd(r, _mm_and_pd(a, sign));

        _mm_or_pd(_mm_and_pd(exact, a), _mm_andnot_pd(exact, r))
    }
}

unsafe impl Lane for f32 {
    type Reg = __m128;
    const LANES: usize = 4;

    #[inline] fn vsplat(v: f32) -> __m128 { unsafe { _mm_set1_ps(v) } }
    #[inline] fn vadd(a: __m128, b: __m128) -> __m128 { unsafe { _mm_add_ps(a, b) } }
    #[inline] fn vsub(a: __m128, b: __m128) -> __m128 { unsafe { _mm_sub_ps(a, b) } }
    #[inline] fn vand(a: __m128, b: __m128) -> __m128 { unsafe { _mm_and_ps(a, b) } }
    #[inline] fn vor(a: __m128, b: __m128) -> __m128 { unsafe { _mm_or_ps(a, b) } }
    #[inline] fn vxor(a: __m128, b: __m128) -> __m128 { unsafe { _mm_xor_ps(a, b) } }
    #[inline] fn vand_not(a: __m128, b: __m128) -> __m128 { unsafe { _mm_andnot_ps(b, a) } }
    #[inline] fn vcmp_eq(a: __m128, b: __m128) -> __m128 { unsafe { _mm_cmpeq_ps(a, b) } }
    #[inline] fn vcmp_lt(a: __m128, b: __m128) -> __m128 { unsafe { _mm_cmplt_ps(a, b) } }

    #[inline]
    fn vblend(on: __m128, off: __m128, mask: __m128) -> __m128 {
        unsafe {
            #[cfg(target_feature = "sse4.1")]
            {
                _mm_blendv_ps(off, on, mask)
            }
            #[cfg(not(target_feature = "sse4.1"))]
            {
                _mm_or_ps(_mm_and_ps(mask, on), _mm_andnot_ps(mask, off))
            }
        }
    }

    #[inline]
    fn valign(lower: __m128, upper: __m128, bytes: usize) -> __m128 {
        unsafe {
            let r = align_si128(_mm_castps_si128(lower), _mm_castps_si128(upper), bytes);
            _mm_castsi128_ps(r)
        }
    }

    #[inline]
    fn vsplat_lane(a: __m128, lane: usize) -> __m128 {
        unsafe {
            match lane {
                0 => _mm_shuffle_ps::<0x00>(a, a),
                1 => _mm_shuffle_ps::<0x55>(a, a),
                2 => _mm_shuffle_ps::<0xAA>(a, a),
                _ => _mm_shuffle_ps::<0xFF>(a, a),
            }
        }
    }

    #[inline]
    fn vextract(a: __m128, lane: usize) -> f32 {
        let lanes: [f32; 4] = unsafe { transmute(a) };
        lanes[lane]
    }
}

impl FloatLane for f32 {
    // |relative error| <= 1.5 * 2^-12
    const RSQRT_ESTIMATE_BITS: u32 = 11;

    #[inline] fn vmul(a: __m128, b: __m128) -> __m128 { unsafe { _mm_mul_ps(a, b) } }
    #[inline] fn vdiv(a: __m128, b: __m128) -> __m128 { unsafe { _mm_div_ps(a, b) } }
    #[inline] fn vabs(a: __m128) -> __m128 { unsafe { _mm_andnot_ps(_mm_set1_ps(-0.0), a) } }

    #[inline]
    fn vceil(a: __m128) -> __m128 {
        #[cfg(target_feature = "sse4.1")]
        let r = unsafe { _mm_ceil_ps(a) };
        #[cfg(not(target_feature = "sse4.1"))]
        let r = ceil_ps(a);
        r
    }

    #[inline] fn vrsqrt_e(a: __m128) -> __m128 { unsafe { _mm_rsqrt_ps(a) } }

    #[inline]
    fn vrsqrt_rh(x: __m128, a: __m128) -> __m128 {
        unsafe {
            let x2 = _mm_mul_ps(x, x);
            let r = _mm_sub_ps(_mm_set1_ps(3.0), _mm_mul_ps(a, x2));
            _mm_mul_ps(_mm_mul_ps(x, _mm_set1_ps(0.5)), r)
        }
    }
}

unsafe impl Lane for f64 {
    type Reg = __m128d;
    const LANES: usize = 2;

    #[inline] fn vsplat(v: f64) -> __m128d { unsafe { _mm_set1_pd(v) } }
    #[inline] fn vadd(a: __m128d, b: __m128d) -> __m128d { unsafe { _mm_add_pd(a, b) } }
    #[inline] fn vsub(a: __m128d, b: __m128d) -> __m128d { unsafe { _mm_sub_pd(a, b) } }
    #[inline] fn vand(a: __m128d, b: __m128d) -> __m128d { unsafe { _mm_and_pd(a, b) } }
    #[inline] fn vor(a: __m128d, b: __m128d) -> __m128d { unsafe { _mm_or_pd(a, b) } }
    #[inline] fn vxor(a: __m128d, b: __m128d) -> __m128d { unsafe { _mm_xor_pd(a, b) } }
    #[inline] fn vand_not(a: __m128d, b: __m128d) -> __m128d { unsafe { _mm_andnot_pd(b, a) } }
    #[inline] fn vcmp_eq(a: __m128d, b: __m128d) -> __m128d { unsafe { _mm_cmpeq_pd(a, b) } }
    #[inline] fn vcmp_lt(a: __m128d, b: __m128d) -> __m128d { unsafe { _mm_cmplt_pd(a, b) } }

    #[inline]
    fn vblend(on: __m128d, off: __m128d, mask: __m128d) -> __m128d {
        unsafe {
            #[cfg(target_feature = "sse4.1")]
            {
                _mm_blendv_pd(off, on, mask)
            }
            #[cfg(not(target_feature = "sse4.1"))]
            {
                _mm_or_pd(_mm_and_pd(mask, on), _mm_andnot_pd(mask, off))
            }
        }
    }

    #[inline]
    fn valign(lower: __m128d, upper: __m128d, bytes: usize) -> __m128d {
        unsafe {
            let r = align_si128(_mm_castpd_si128(lower), _mm_castpd_si128(upper), bytes);
            _mm_castsi128_pd(r)
        }
    }

    #[inline]
    fn vsplat_lane(a: __m128d, lane: usize) -> __m128d {
        unsafe {
            match lane {
                0 => _mm_unpacklo_pd(a, a),
                _ => _mm_unpackhi_pd(a, a),
            }
        }
    }

    #[inline]
    fn vextract(a: __m128d, lane: usize) -> f64 {
        let lanes: [f64; 2] = unsafe { transmute(a) };
        lanes[lane]
    }
}

impl FloatLane for f64 {
    // no double-precision estimate instruction; the "estimate" is exact
    const RSQRT_ESTIMATE_BITS: u32 = f64::MANTISSA_DIGITS - 2;

    #[inline] fn vmul(a: __m128d, b: __m128d) -> __m128d { unsafe { _mm_mul_pd(a, b) } }
    #[inline] fn vdiv(a: __m128d, b: __m128d) -> __m128d { unsafe { _mm_div_pd(a, b) } }
    #[inline] fn vabs(a: __m128d) -> __m128d { unsafe { _mm_andnot_pd(_mm_set1_pd(-0.0), a) } }

    #[inline]
    fn vceil(a: __m128d) -> __m128d {
        #[cfg(target_feature = "sse4.1")]
        let r = unsafe { _mm_ceil_pd(a) };
        #[cfg(not(target_feature = "sse4.1"))]
        let r = ceil_pd(a);
        r
    }

    #[inline]
    fn vrsqrt_e(a: __m128d) -> __m128d {
        unsafe { _mm_div_pd(_mm_set1_pd(1.0), _mm_sqrt_pd(a)) }
    }

    #[inline]
    fn vrsqrt_rh(x: __m128d, a: __m128d) -> __m128d {
        unsafe {
            let x2 = _mm_mul_pd(x, x);
            let r = _mm_sub_pd(_mm_set1_pd(3.0), _mm_mul_pd(a, x2));
            _mm_mul_pd(_mm_mul_pd(x, _mm_set1_pd(0.5)), r)
        }
    }
}
