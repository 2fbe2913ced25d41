//! AVX2 kernels for x86_64.
//!
//! AVX2 provides 256-bit registers → 32×u8, 16×u16, 8×u32/f32, 4×u64/f64.
//! Byte-wise cross-lane operations (`palignr`) act on each 128-bit half
//! independently, which is exactly the 16-byte block contract of `valign`.

use core::arch::x86_64::*;
use core::mem::transmute;

use super::{align_arms, FloatLane, IntLane, Lane};

#[inline(always)]
fn count_reg(count: u32) -> __m128i {
    unsafe { _mm_cvtsi32_si128(count as i32) }
}

#[inline(always)]
fn byte_splat(v: u32) -> __m256i {
    unsafe { _mm256_set1_epi8(v as u8 as i8) }
}

#[inline(always)]
fn align_si256(lower: __m256i, upper: __m256i, bytes: usize) -> __m256i {
    unsafe {
        macro_rules! window {
            ($b:literal) => {
                _mm256_alignr_epi8::<$b>(upper, lower)
            };
        }
        align_arms!(bytes, lower, upper, window)
    }
}

/// Flip the sign bit of every lane so signed compares order unsigned values.
#[inline(always)]
fn sign_bias(a: __m256i, bits: u32) -> __m256i {
    unsafe {
        let bias = match bits {
            8 => _mm256_set1_epi8(i8::MIN),
            16 => _mm256_set1_epi16(i16::MIN),
            32 => _mm256_set1_epi32(i32::MIN),
            _ => _mm256_set1_epi64x(i64::MIN),
        };
        _mm256_xor_si256(a, bias)
    }
}

macro_rules! cmp_lt_fns {
    ($($name:ident: $bits:literal => $gt:ident;)*) => {
        $(
            #[inline(always)]
            fn $name(a: __m256i, b: __m256i, unsigned: bool) -> __m256i {
                let (a, b) = if unsigned { (sign_bias(a, $bits), sign_bias(b, $bits)) } else { (a, b) };
                unsafe { $gt(b, a) }
            }
        )*
    };
}

cmp_lt_fns! {
    cmp_lt_8: 8 => _mm256_cmpgt_epi8;
    cmp_lt_16: 16 => _mm256_cmpgt_epi16;
    cmp_lt_32: 32 => _mm256_cmpgt_epi32;
    cmp_lt_64: 64 => _mm256_cmpgt_epi64;
}

// ── Shifts ──────────────────────────────────────────────────────────

#[inline(always)]
fn shr_u8(a: __m256i, count: u32) -> __m256i {
    unsafe { _mm256_and_si256(_mm256_srl_epi16(a, count_reg(count)), byte_splat(0xFF >> count)) }
}

#[inline(always)]
fn shr_u8_imm<const C: i32>(a: __m256i) -> __m256i {
    unsafe { _mm256_and_si256(_mm256_srli_epi16::<C>(a), byte_splat(0xFF >> C as u32)) }
}

#[inline(always)]
fn sign_extend_i8(logical: __m256i, count: u32) -> __m256i {
    unsafe {
        let m = byte_splat(0x80 >> count);
        _mm256_sub_epi8(_mm256_xor_si256(logical, m), m)
    }
}

#[inline(always)]
fn shr_i8(a: __m256i, count: u32) -> __m256i {
    sign_extend_i8(shr_u8(a, count), count)
}

#[inline(always)]
fn shr_i8_imm<const C: i32>(a: __m256i) -> __m256i {
    sign_extend_i8(shr_u8_imm::<C>(a), C as u32)
}

#[inline(always)]
fn shl_8(a: __m256i, count: u32) -> __m256i {
    unsafe { _mm256_and_si256(_mm256_sll_epi16(a, count_reg(count)), byte_splat(0xFF << count)) }
}

#[inline(always)]
fn shl_8_imm<const C: i32>(a: __m256i) -> __m256i {
    unsafe { _mm256_and_si256(_mm256_slli_epi16::<C>(a), byte_splat(0xFF << C as u32)) }
}

#[inline(always)]
fn sign_fill_i64(a: __m256i) -> __m256i {
    unsafe { _mm256_srai_epi32::<31>(_mm256_shuffle_epi32::<0xF5>(a)) }
}

#[inline(always)]
fn shr_i64(a: __m256i, count: u32) -> __m256i {
    unsafe {
        let fill = _mm256_sll_epi64(sign_fill_i64(a), count_reg(64 - count));
        _mm256_or_si256(_mm256_srl_epi64(a, count_reg(count)), fill)
    }
}

#[inline(always)]
fn shr_i64_imm<const C: i32>(a: __m256i) -> __m256i {
    unsafe {
        let fill = _mm256_sll_epi64(sign_fill_i64(a), count_reg(64 - C as u32));
        _mm256_or_si256(_mm256_srli_epi64::<C>(a), fill)
    }
}

macro_rules! shift_fns {
    ($($name:ident($op:ident), $imm:ident($op_imm:ident);)*) => {
        $(
            #[inline(always)]
            fn $name(a: __m256i, count: u32) -> __m256i {
                unsafe { $op(a, count_reg(count)) }
            }

            #[inline(always)]
            fn $imm<const C: i32>(a: __m256i) -> __m256i {
                unsafe { $op_imm::<C>(a) }
            }
        )*
    };
}

shift_fns! {
    shr_u16(_mm256_srl_epi16), shr_u16_imm(_mm256_srli_epi16);
    shr_i16(_mm256_sra_epi16), shr_i16_imm(_mm256_srai_epi16);
    shl_16(_mm256_sll_epi16), shl_16_imm(_mm256_slli_epi16);
    shr_u32(_mm256_srl_epi32), shr_u32_imm(_mm256_srli_epi32);
    shr_i32(_mm256_sra_epi32), shr_i32_imm(_mm256_srai_epi32);
    shl_32(_mm256_sll_epi32), shl_32_imm(_mm256_slli_epi32);
    shr_u64(_mm256_srl_epi64), shr_u64_imm(_mm256_srli_epi64);
    shl_64(_mm256_sll_epi64), shl_64_imm(_mm256_slli_epi64);
}

// ── Lane broadcast ──────────────────────────────────────────────────

#[inline(always)]
fn splat_lane_32(a: __m256i, lane: usize) -> __m256i {
    unsafe { _mm256_permutevar8x32_epi32(a, _mm256_set1_epi32(lane as i32)) }
}

#[inline(always)]
fn splat_lane_64(a: __m256i, lane: usize) -> __m256i {
    unsafe {
        match lane {
            0 => _mm256_permute4x64_epi64::<0x00>(a),
            1 => _mm256_permute4x64_epi64::<0x55>(a),
            2 => _mm256_permute4x64_epi64::<0xAA>(a),
            _ => _mm256_permute4x64_epi64::<0xFF>(a),
        }
    }
}

// `pshufb` cannot cross the 128-bit halves; broadcast through a scalar.

#[inline(always)]
fn splat_lane_8(a: __m256i, lane: usize) -> __m256i {
    let lanes: [i8; 32] = unsafe { transmute(a) };
    unsafe { _mm256_set1_epi8(lanes[lane]) }
}

#[inline(always)]
fn splat_lane_16(a: __m256i, lane: usize) -> __m256i {
    let lanes: [i16; 16] = unsafe { transmute(a) };
    unsafe { _mm256_set1_epi16(lanes[lane]) }
}

// ── Integer lanes ───────────────────────────────────────────────────

macro_rules! impl_int_lane {
    ($(
        $t:ty => $lanes:literal, unsigned: $unsigned:expr,
        set1: $set1:ident($st:ty), add: $add:ident, sub: $sub:ident,
        eq: $eq:ident, lt: $lt:ident, splat_lane: $splat_lane:ident,
        shr: $shr:ident / $shr_imm:ident, shl: $shl:ident / $shl_imm:ident;
    )*) => {
        $(
            unsafe impl Lane for $t {
                type Reg = __m256i;
                const LANES: usize = $lanes;

                #[inline] fn vsplat(v: $t) -> __m256i { unsafe { $set1(v as $st) } }
                #[inline] fn vadd(a: __m256i, b: __m256i) -> __m256i { unsafe { $add(a, b) } }
                #[inline] fn vsub(a: __m256i, b: __m256i) -> __m256i { unsafe { $sub(a, b) } }
                #[inline] fn vand(a: __m256i, b: __m256i) -> __m256i { unsafe { _mm256_and_si256(a, b) } }
                #[inline] fn vor(a: __m256i, b: __m256i) -> __m256i { unsafe { _mm256_or_si256(a, b) } }
                #[inline] fn vxor(a: __m256i, b: __m256i) -> __m256i { unsafe { _mm256_xor_si256(a, b) } }
                #[inline] fn vand_not(a: __m256i, b: __m256i) -> __m256i { unsafe { _mm256_andnot_si256(b, a) } }
                #[inline] fn vcmp_eq(a: __m256i, b: __m256i) -> __m256i { unsafe { $eq(a, b) } }
                #[inline] fn vcmp_lt(a: __m256i, b: __m256i) -> __m256i { $lt(a, b, $unsigned) }

                #[inline]
                fn vblend(on: __m256i, off: __m256i, mask: __m256i) -> __m256i {
                    unsafe { _mm256_blendv_epi8(off, on, mask) }
                }

                #[inline]
                fn valign(lower: __m256i, upper: __m256i, bytes: usize) -> __m256i {
                    align_si256(lower, upper, bytes)
                }

                #[inline] fn vsplat_lane(a: __m256i, lane: usize) -> __m256i { $splat_lane(a, lane) }

                #[inline]
                fn vextract(a: __m256i, lane: usize) -> $t {
                    let lanes: [$t; $lanes] = unsafe { transmute(a) };
                    lanes[lane]
                }
            }

            impl IntLane for $t {
                #[inline] fn vshift_r(a: __m256i, count: u32) -> __m256i { $shr(a, count) }
                #[inline] fn vshift_l(a: __m256i, count: u32) -> __m256i { $shl(a, count) }
                #[inline] fn vshift_r_imm<const COUNT: i32>(a: __m256i) -> __m256i { $shr_imm::<COUNT>(a) }
                #[inline] fn vshift_l_imm<const COUNT: i32>(a: __m256i) -> __m256i { $shl_imm::<COUNT>(a) }
            }
        )*
    };
}

impl_int_lane! {
    i8 => 32, unsigned: false, set1: _mm256_set1_epi8(i8), add: _mm256_add_epi8, sub: _mm256_sub_epi8,
        eq: _mm256_cmpeq_epi8, lt: cmp_lt_8, splat_lane: splat_lane_8,
        shr: shr_i8 / shr_i8_imm, shl: shl_8 / shl_8_imm;
    u8 => 32, unsigned: true, set1: _mm256_set1_epi8(i8), add: _mm256_add_epi8, sub: _mm256_sub_epi8,
        eq: _mm256_cmpeq_epi8, lt: cmp_lt_8, splat_lane: splat_lane_8,
        shr: shr_u8 / shr_u8_imm, shl: shl_8 / shl_8_imm;
    i16 => 16, unsigned: false, set1: _mm256_set1_epi16(i16), add: _mm256_add_epi16, sub: _mm256_sub_epi16,
        eq: _mm256_cmpeq_epi16, lt: cmp_lt_16, splat_lane: splat_lane_16,
        shr: shr_i16 / shr_i16_imm, shl: shl_16 / shl_16_imm;
    u16 => 16, unsigned: true, set1: _mm256_set1_epi16(i16), add: _mm256_add_epi16, sub: _mm256_sub_epi16,
        eq: _mm256_cmpeq_epi16, lt: cmp_lt_16, splat_lane: splat_lane_16,
        shr: shr_u16 / shr_u16_imm, shl: shl_16 / shl_16_imm;
    i32 => 8, unsigned: false, set1: _mm256_set1_epi32(i32), add: _mm256_add_epi32, sub: _mm256_sub_epi32,
        eq: _mm256_cmpeq_epi32, lt: cmp_lt_32, splat_lane: splat_lane_32,
        shr: shr_i32 / shr_i32_imm, shl: shl_32 / shl_32_imm;
    u32 => 8, unsigned: true, set1: _mm256_set1_epi32(i32), add: _mm256_add_epi32, sub: _mm256_sub_epi32,
        eq: _mm256_cmpeq_epi32, lt: cmp_lt_32, splat_lane: splat_lane_32,
        shr: shr_u32 / shr_u32_imm, shl: shl_32 / shl_32_imm;
    i64 => 4, unsigned: false, set1: _mm256_set1_epi64x(i64), add: _mm256_add_epi64, sub: _mm256_sub_epi64,
        eq: _mm256_cmpeq_epi64, lt: cmp_lt_64, splat_lane: splat_lane_64,
        shr: shr_i64 / shr_i64_imm, shl: shl_64 / shl_64_imm;
    u64 => 4, unsigned: true, set1: _mm256_set1_epi64x(i64), add: _mm256_add_epi64, sub: _mm256_sub_epi64,
        eq: _mm256_cmpeq_epi64, lt: cmp_lt_64, splat_lane: splat_lane_64,
        shr: shr_u64 / shr_u64_imm, shl: shl_64 / shl_64_imm;
}

// ── Float lanes ─────────────────────────────────────────────────────

unsafe impl Lane for f32 {
    type Reg = __m256;
    const LANES: usize = 8;

    #[inline] fn vsplat(v: f32) -> __m256 { unsafe { _mm256_set1_ps(v) } }
    #[inline] fn vadd(a: __m256, b: __m256) -> __m256 { unsafe { _mm256_add_ps(a, b) } }
    #[inline] fn vsub(a: __m256, b: __m256) -> __m256 { unsafe { _mm256_sub_ps(a, b) } }
    #[inline] fn vand(a: __m256, b: __m256) -> __m256 { unsafe { _mm256_and_ps(a, b) } }
    #[inline] fn vor(a: __m256, b: __m256) -> __m256 { unsafe { _mm256_or_ps(a, b) } }
    #[inline] fn vxor(a: __m256, b: __m256) -> __m256 { unsafe { _mm256_xor_ps(a, b) } }
    #[inline] fn vand_not(a: __m256, b: __m256) -> __m256 { unsafe { _mm256_andnot_ps(b, a) } }
    #[inline] fn vcmp_eq(a: __m256, b: __m256) -> __m256 { unsafe { _mm256_cmp_ps::<_CMP_EQ_OQ>(a, b) } }
    #[inline] fn vcmp_lt(a: __m256, b: __m256) -> __m256 { unsafe { _mm256_cmp_ps::<_CMP_LT_OQ>(a, b) } }
    #[inline] fn vblend(on: __m256, off: __m256, mask: __m256) -> __m256 { unsafe { _mm256_blendv_ps(off, on, mask) } }

    #[inline]
    fn valign(lower: __m256, upper: __m256, bytes: usize) -> __m256 {
        unsafe {
            let r = align_si256(_mm256_castps_si256(lower), _mm256_castps_si256(upper), bytes);
            _mm256_castsi256_ps(r)
        }
    }

    #[inline]
    fn vsplat_lane(a: __m256, lane: usize) -> __m256 {
        unsafe { _mm256_permutevar8x32_ps(a, _mm256_set1_epi32(lane as i32)) }
    }

    #[inline]
    fn vextract(a: __m256, lane: usize) -> f32 {
        let lanes: [f32; 8] = unsafe { transmute(a) };
        lanes[lane]
    }
}

impl FloatLane for f32 {
    // |relative error| <= 1.5 * 2^-12
    const RSQRT_ESTIMATE_BITS: u32 = 11;

    #[inline] fn vmul(a: __m256, b: __m256) -> __m256 { unsafe { _mm256_mul_ps(a, b) } }
    #[inline] fn vdiv(a: __m256, b: __m256) -> __m256 { unsafe { _mm256_div_ps(a, b) } }
    #[inline] fn vabs(a: __m256) -> __m256 { unsafe { _mm256_andnot_ps(_mm256_set1_ps(-0.0), a) } }
    #[inline] fn vceil(a: __m256) -> __m256 { unsafe { _mm256_ceil_ps(a) } }
    #[inline] fn vrsqrt_e(a: __m256) -> __m256 { unsafe { _mm256_rsqrt_ps(a) } }

    #[inline]
    fn vrsqrt_rh(x: __m256, a: __m256) -> __m256 {
        unsafe {
            let x2 = _mm256_mul_ps(x, x);
            let r = _mm256_sub_ps(_mm256_set1_ps(3.0), _mm256_mul_ps(a, x2));
            _mm256_mul_ps(_mm256_mul_ps(x, _mm256_set1_ps(0.5)), r)
        }
    }
}

unsafe impl Lane for f64 {
    type Reg = __m256d;
    const LANES: usize = 4;

    #[inline] fn vsplat(v: f64) -> __m256d { unsafe { _mm256_set1_pd(v) } }
    #[inline] fn vadd(a: __m256d, b: __m256d) -> __m256d { unsafe { _mm256_add_pd(a, b) } }
    #[inline] fn vsub(a: __m256d, b: __m256d) -> __m256d { unsafe { _mm256_sub_pd(a, b) } }
    #[inline] fn vand(a: __m256d, b: __m256d) -> __m256d { unsafe { _mm256_and_pd(a, b) } }
    #[inline] fn vor(a: __m256d, b: __m256d) -> __m256d { unsafe { _mm256_or_pd(a, b) } }
    #[inline] fn vxor(a: __m256d, b: __m256d) -> __m256d { unsafe { _mm256_xor_pd(a, b) } }
    #[inline] fn vand_not(a: __m256d, b: __m256d) -> __m256d { unsafe { _mm256_andnot_pd(b, a) } }
    #[inline] fn vcmp_eq(a: __m256d, b: __m256d) -> __m256d { unsafe { _mm256_cmp_pd::<_CMP_EQ_OQ>(a, b) } }
    #[inline] fn vcmp_lt(a: __m256d, b: __m256d) -> __m256d { unsafe { _mm256_cmp_pd::<_CMP_LT_OQ>(a, b) } }
    #[inline] fn vblend(on: __m256d, off: __m256d, mask: __m256d) -> __m256d { unsafe { _mm256_blendv_pd(off, on, mask) } }

    #[inline]
    fn valign(lower: __m256d, upper: __m256d, bytes: usize) -> __m256d {
        unsafe {
            let r = align_si256(_mm256_castpd_si256(lower), _mm256_castpd_si256(upper), bytes);
            _mm256_castsi256_pd(r)
        }
    }

    #[inline]
    fn vsplat_lane(a: __m256d, lane: usize) -> __m256d {
        unsafe {
            match lane {
                0 => _mm256_permute4x64_pd::<0x00>(a),
                1 => _mm256_permute4x64_pd::<0x55>(a),
                2 => _mm256_permute4x64_pd::<0xAA>(a),
                _ => _mm256_permute4x64_pd::<0xFF>(a),
            }
        }
    }

    #[inline]
    fn vextract(a: __m256d, lane: usize) -> f64 {
        let lanes: [f64; 4] = unsafe { transmute(a) };
        lanes[lane]
    }
}

impl FloatLane for f64 {
    const RSQRT_ESTIMATE_BITS: u32 = f64::MANTISSA_DIGITS - 2;

    #[inline] fn vmul(a: __m256d, b: __m256d) -> __m256d { unsafe { _mm256_mul_pd(a, b) } }
    #[inline] fn vdiv(a: __m256d, b: __m256d) -> __m256d { unsafe { _mm256_div_pd(a, b) } }
    #[inline] fn vabs(a: __m256d) -> __m256d { unsafe { _mm256_andnot_pd(_mm256_set1_pd(-0.0), a) } }
    #[inline] fn vceil(a: __m256d) -> __m256d { unsafe { _mm256_ceil_pd(a) } }

    #[inline]
    fn vrsqrt_e(a: __m256d) -> __m256d {
        unsafe { _mm256_div_pd(_mm256_set1_pd(1.0), _mm256_sqrt_pd(a)) }
    }

    #[inline]
    fn vrsqrt_rh(x: __m256d, a: __m256d) -> __m256d {
        unsafe {
            let x2 = _mm256_mul_pd(x, x);
            let r = _mm256_sub_pd(_mm256_set1_pd(3.0), _mm256_mul_pd(a, x2));
            _mm256_mul_pd(_mm256_mul_pd(x, _mm256_set1_pd(0.5)), r)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::IntElement;

    #[test]
    fn align_stays_within_halves() {
        let lower: __m256i = unsafe { transmute([0_u32, 1, 2, 3, 4, 5, 6, 7]) };
        let upper: __m256i = unsafe { transmute([10_u32, 11, 12, 13, 14, 15, 16, 17]) };
        let r: [u32; 8] = unsafe { transmute(<u32 as Lane>::valign(lower, upper, 4)) };
        assert_eq!(r, [1, 2, 3, 10, 5, 6, 7, 14]);
    }

    #[test]
    fn splat_lane_crosses_halves() {
        let a: __m256i = unsafe { transmute([0_u64, 1, 2, 3]) };
        let r: [u64; 4] = unsafe { transmute(<u64 as Lane>::vsplat_lane(a, 3)) };
        assert_eq!(r, [3; 4]);
        let a: __m256i = unsafe { transmute(core::array::from_fn::<u8, 32, _>(|i| i as u8)) };
        let r: [u8; 32] = unsafe { transmute(<u8 as Lane>::vsplat_lane(a, 20)) };
        assert_eq!(r, [20; 32]);
    }

    #[test]
    fn signed_64_bit_shift_emulation() {
        let src = [i64::MIN, -5, 5, i64::MAX];
        let a: __m256i = unsafe { transmute(src) };
        for count in 0..=63 {
            let r: [i64; 4] = unsafe { transmute(<i64 as IntLane>::vshift_r(a, count)) };
            for i in 0..4 {
                assert_eq!(r[i], src[i].lane_shr(count), "count={count} lane={i}");
            }
        }
    }
}
