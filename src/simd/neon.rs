//! NEON kernels for aarch64.
//!
//! NEON provides 128-bit registers → 16×u8, 8×u16, 4×u32/f32, 2×u64/f64.
//!
//! Runtime shifts use the register form `vshlq` with a negated count for
//! right shifts: it covers every count from zero to the full lane width.
//! Immediate shifts see only `1 <= COUNT < BITS` and map to `vshrq_n` /
//! `vshlq_n`. Cross-lane kernels go
//! through byte views: `vextq_u8` for `valign` and one table lookup
//! (`vqtbl1q_u8`) for `vsplat_lane`.

use core::arch::aarch64::*;
use core::mem::transmute;

use super::{align_arms, FloatLane, IntLane, Lane};
use crate::traits::Element;

#[inline(always)]
fn align_u8(lower: uint8x16_t, upper: uint8x16_t, bytes: usize) -> uint8x16_t {
    unsafe {
        macro_rules! window {
            ($b:literal) => {
                vextq_u8::<$b>(lower, upper)
            };
        }
        align_arms!(bytes, lower, upper, window)
    }
}

/// Byte indices selecting lane `lane` of `size`-byte lanes, repeated.
#[inline(always)]
fn lane_index(size: usize, lane: usize) -> uint8x16_t {
    unsafe {
        match size {
            1 => vdupq_n_u8(lane as u8),
            2 => transmute(vdupq_n_u16(0x0100 + 0x0202 * lane as u16)),
            4 => transmute(vdupq_n_u32(0x0302_0100 + 0x0404_0404 * lane as u32)),
            _ => transmute(vdupq_n_u64(0x0706_0504_0302_0100 + 0x0808_0808_0808_0808 * lane as u64)),
        }
    }
}

macro_rules! impl_common_lane {
    ($t:ty, $reg:ty, $lanes:literal) => {
        #[inline]
        fn valign(lower: $reg, upper: $reg, bytes: usize) -> $reg {
            unsafe { transmute(align_u8(transmute(lower), transmute(upper), bytes)) }
        }

        #[inline]
        fn vsplat_lane(a: $reg, lane: usize) -> $reg {
            unsafe { transmute(vqtbl1q_u8(transmute(a), lane_index(<$t as Element>::SIZE, lane))) }
        }

        #[inline]
        fn vextract(a: $reg, lane: usize) -> $t {
            let lanes: [$t; $lanes] = unsafe { transmute(a) };
            lanes[lane]
        }
    };
}

/// Immediate-form shift by the constant `$count`.
///
/// The intrinsics reject counts outside their encoding even in dead code, so
/// every count valid for the lane width gets its own arm; the match folds to
/// the one instruction. Anything else takes `$fallback`.
macro_rules! imm_shift {
    (8, $count:expr, $op:ident, $a:expr, $fallback:expr) => {
        imm_shift!(@arms $count, $op, $a, $fallback, [1 2 3 4 5 6 7])
    };
    (16, $count:expr, $op:ident, $a:expr, $fallback:expr) => {
        imm_shift!(@arms $count, $op, $a, $fallback, [1 2 3 4 5 6 7 8 9 10 11 12 13 14 15])
    };
    (32, $count:expr, $op:ident, $a:expr, $fallback:expr) => {
        imm_shift!(@arms $count, $op, $a, $fallback, [
            1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31
        ])
    };
    (64, $count:expr, $op:ident, $a:expr, $fallback:expr) => {
        imm_shift!(@arms $count, $op, $a, $fallback, [
            1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31
            32 33 34 35 36 37 38 39 40 41 42 43 44 45 46 47 48 49 50 51 52 53 54 55 56 57 58 59 60 61 62 63
        ])
    };
    (@arms $count:expr, $op:ident, $a:expr, $fallback:expr, [$($n:literal)*]) => {
        match $count {
            $($n => unsafe { $op::<$n>($a) },)*
            _ => $fallback,
        }
    };
}

// ── Integer lanes ───────────────────────────────────────────────────

macro_rules! impl_int_lane {
    ($(
        $t:ty => $reg:ty, $lanes:literal, $bits:tt, mask: $mask:ty, count: $count:ty {
            dup: $dup:ident, add: $add:ident, sub: $sub:ident,
            and: $and:ident, orr: $orr:ident, eor: $eor:ident, bic: $bic:ident,
            ceq: $ceq:ident, clt: $clt:ident, bsl: $bsl:ident,
            shl: $shl:ident, dup_count: $dup_count:ident, shr_n: $shr_n:ident, shl_n: $shl_n:ident,
        }
    )*) => {
        $(
            unsafe impl Lane for $t {
                type Reg = $reg;
                const LANES: usize = $lanes;

                #[inline] fn vsplat(v: $t) -> $reg { unsafe { $dup(v) } }
                #[inline] fn vadd(a: $reg, b: $reg) -> $reg { unsafe { $add(a, b) } }
                #[inline] fn vsub(a: $reg, b: $reg) -> $reg { unsafe { $sub(a, b) } }
                #[inline] fn vand(a: $reg, b: $reg) -> $reg { unsafe { $and(a, b) } }
                #[inline] fn vor(a: $reg, b: $reg) -> $reg { unsafe { $orr(a, b) } }
                #[inline] fn vxor(a: $reg, b: $reg) -> $reg { unsafe { $eor(a, b) } }
                #[inline] fn vand_not(a: $reg, b: $reg) -> $reg { unsafe { $bic(a, b) } }
                #[inline] fn vcmp_eq(a: $reg, b: $reg) -> $reg { unsafe { transmute($ceq(a, b)) } }
                #[inline] fn vcmp_lt(a: $reg, b: $reg) -> $reg { unsafe { transmute($clt(a, b)) } }

                #[inline]
                fn vblend(on: $reg, off: $reg, mask: $reg) -> $reg {
                    unsafe { $bsl(transmute::<$reg, $mask>(mask), on, off) }
                }

                impl_common_lane!($t, $reg, $lanes);
            }

            impl IntLane for $t {
                #[inline]
                fn vshift_r(a: $reg, count: u32) -> $reg {
                    unsafe { $shl(a, $dup_count(-(count as $count))) }
                }

                #[inline]
                fn vshift_l(a: $reg, count: u32) -> $reg {
                    unsafe { $shl(a, $dup_count(count as $count)) }
                }

                #[inline]
                fn vshift_r_imm<const COUNT: i32>(a: $reg) -> $reg {
                    imm_shift!($bits, COUNT, $shr_n, a, Self::vshift_r(a, COUNT as u32))
                }

                #[inline]
                fn vshift_l_imm<const COUNT: i32>(a: $reg) -> $reg {
                    imm_shift!($bits, COUNT, $shl_n, a, Self::vshift_l(a, COUNT as u32))
                }
            }
        )*
    };
}

impl_int_lane! {
    i8 => int8x16_t, 16, 8, mask: uint8x16_t, count: i8 {
        dup: vdupq_n_s8, add: vaddq_s8, sub: vsubq_s8,
        and: vandq_s8, orr: vorrq_s8, eor: veorq_s8, bic: vbicq_s8,
        ceq: vceqq_s8, clt: vcltq_s8, bsl: vbslq_s8,
        shl: vshlq_s8, dup_count: vdupq_n_s8, shr_n: vshrq_n_s8, shl_n: vshlq_n_s8,
    }
    u8 => uint8x16_t, 16, 8, mask: uint8x16_t, count: i8 {
        dup: vdupq_n_u8, add: vaddq_u8, sub: vsubq_u8,
        and: vandq_u8, orr: vorrq_u8, eor: veorq_u8, bic: vbicq_u8,
        ceq: vceqq_u8, clt: vcltq_u8, bsl: vbslq_u8,
        shl: vshlq_u8, dup_count: vdupq_n_s8, shr_n: vshrq_n_u8, shl_n: vshlq_n_u8,
    }
    i16 => int16x8_t, 8, 16, mask: uint16x8_t, count: i16 {
        dup: vdupq_n_s16, add: vaddq_s16, sub: vsubq_s16,
        and: vandq_s16, orr: vorrq_s16, eor: veorq_s16, bic: vbicq_s16,
        ceq: vceqq_s16, clt: vcltq_s16, bsl: vbslq_s16,
        shl: vshlq_s16, dup_count: vdupq_n_s16, shr_n: vshrq_n_s16, shl_n: vshlq_n_s16,
    }
    u16 => uint16x8_t, 8, 16, mask: uint16x8_t, count: i16 {
        dup: vdupq_n_u16, add: vaddq_u16, sub: vsubq_u16,
        and: vandq_u16, orr: vorrq_u16, eor: veorq_u16, bic: vbicq_u16,
        ceq: vceqq_u16, clt: vcltq_u16, bsl: vbslq_u16,
        shl: vshlq_u16, dup_count: vdupq_n_s16, shr_n: vshrq_n_u16, shl_n: vshlq_n_u16,
    }
    i32 => int32x4_t, 4, 32, mask: uint32x4_t, count: i32 {
        dup: vdupq_n_s32, add: vaddq_s32, sub: vsubq_s32,
        and: vandq_s32, orr: vorrq_s32, eor: veorq_s32, bic: vbicq_s32,
        ceq: vceqq_s32, clt: vcltq_s32, bsl: vbslq_s32,
        shl: vshlq_s32, dup_count: vdupq_n_s32, shr_n: vshrq_n_s32, shl_n: vshlq_n_s32,
    }
    u32 => uint32x4_t, 4, 32, mask: uint32x4_t, count: i32 {
        dup: vdupq_n_u32, add: vaddq_u32, sub: vsubq_u32,
        and: vandq_u32, orr: vorrq_u32, eor: veorq_u32, bic: vbicq_u32,
        ceq: vceqq_u32, clt: vcltq_u32, bsl: vbslq_u32,
        shl: vshlq_u32, dup_count: vdupq_n_s32, shr_n: vshrq_n_u32, shl_n: vshlq_n_u32,
    }
    i64 => int64x2_t, 2, 64, mask: uint64x2_t, count: i64 {
        dup: vdupq_n_s64, add: vaddq_s64, sub: vsubq_s64,
        and: vandq_s64, orr: vorrq_s64, eor: veorq_s64, bic: vbicq_s64,
        ceq: vceqq_s64, clt: vcltq_s64, bsl: vbslq_s64,
        shl: vshlq_s64, dup_count: vdupq_n_s64, shr_n: vshrq_n_s64, shl_n: vshlq_n_s64,
    }
    u64 => uint64x2_t, 2, 64, mask: uint64x2_t, count: i64 {
        dup: vdupq_n_u64, add: vaddq_u64, sub: vsubq_u64,
        and: vandq_u64, orr: vorrq_u64, eor: veorq_u64, bic: vbicq_u64,
        ceq: vceqq_u64, clt: vcltq_u64, bsl: vbslq_u64,
        shl: vshlq_u64, dup_count: vdupq_n_s64, shr_n: vshrq_n_u64, shl_n: vshlq_n_u64,
    }
}

// ── Float lanes ─────────────────────────────────────────────────────

macro_rules! impl_float_lane {
    ($(
        $t:ty => $reg:ty, $lanes:literal, bits: $bits:ty {
            dup: $dup:ident, add: $add:ident, sub: $sub:ident, mul: $mul:ident, div: $div:ident,
            and: $and:ident, orr: $orr:ident, eor: $eor:ident, bic: $bic:ident,
            ceq: $ceq:ident, clt: $clt:ident, bsl: $bsl:ident,
            abs: $abs:ident, ceil: $ceil:ident, rsqrte: $rsqrte:ident, rsqrts: $rsqrts:ident,
        }
    )*) => {
        $(
            unsafe impl Lane for $t {
                type Reg = $reg;
                const LANES: usize = $lanes;

                #[inline] fn vsplat(v: $t) -> $reg { unsafe { $dup(v) } }
                #[inline] fn vadd(a: $reg, b: $reg) -> $reg { unsafe { $add(a, b) } }
                #[inline] fn vsub(a: $reg, b: $reg) -> $reg { unsafe { $sub(a, b) } }

                #[inline]
                fn vand(a: $reg, b: $reg) -> $reg {
                    unsafe { transmute($and(transmute::<$reg, $bits>(a), transmute(b))) }
                }

                #[inline]
                fn vor(a: $reg, b: $reg) -> $reg {
                    unsafe { transmute($orr(transmute::<$reg, $bits>(a), transmute(b))) }
                }

                #[inline]
                fn vxor(a: $reg, b: $reg) -> $reg {
                    unsafe { transmute($eor(transmute::<$reg, $bits>(a), transmute(b))) }
                }

                #[inline]
                fn vand_not(a: $reg, b: $reg) -> $reg {
                    unsafe { transmute($bic(transmute::<$reg, $bits>(a), transmute(b))) }
                }

                #[inline] fn vcmp_eq(a: $reg, b: $reg) -> $reg { unsafe { transmute($ceq(a, b)) } }
                #[inline] fn vcmp_lt(a: $reg, b: $reg) -> $reg { unsafe { transmute($clt(a, b)) } }

                #[inline]
                fn vblend(on: $reg, off: $reg, mask: $reg) -> $reg {
                    unsafe { $bsl(transmute::<$reg, $bits>(mask), on, off) }
                }

                impl_common_lane!($t, $reg, $lanes);
            }

            impl FloatLane for $t {
                // FRSQRTE reads a 256-entry table: close to 8 bits, 7 guaranteed
                const RSQRT_ESTIMATE_BITS: u32 = 7;

                #[inline] fn vmul(a: $reg, b: $reg) -> $reg { unsafe { $mul(a, b) } }
                #[inline] fn vdiv(a: $reg, b: $reg) -> $reg { unsafe { $div(a, b) } }
                #[inline] fn vabs(a: $reg) -> $reg { unsafe { $abs(a) } }
                #[inline] fn vceil(a: $reg) -> $reg { unsafe { $ceil(a) } }
                #[inline] fn vrsqrt_e(a: $reg) -> $reg { unsafe { $rsqrte(a) } }

                /// `x * (3 - (x * x) * a) / 2` with the step fused into `FRSQRTS`.
                #[inline]
                fn vrsqrt_rh(x: $reg, a: $reg) -> $reg {
                    unsafe { $mul(x, $rsqrts($mul(x, x), a)) }
                }
            }
        )*
    };
}

impl_float_lane! {
    f32 => float32x4_t, 4, bits: uint32x4_t {
        dup: vdupq_n_f32, add: vaddq_f32, sub: vsubq_f32, mul: vmulq_f32, div: vdivq_f32,
        and: vandq_u32, orr: vorrq_u32, eor: veorq_u32, bic: vbicq_u32,
        ceq: vceqq_f32, clt: vcltq_f32, bsl: vbslq_f32,
        abs: vabsq_f32, ceil: vrndpq_f32, rsqrte: vrsqrteq_f32, rsqrts: vrsqrtsq_f32,
    }
    f64 => float64x2_t, 2, bits: uint64x2_t {
        dup: vdupq_n_f64, add: vaddq_f64, sub: vsubq_f64, mul: vmulq_f64, div: vdivq_f64,
        and: vandq_u64, orr: vorrq_u64, eor: veorq_u64, bic: vbicq_u64,
        ceq: vceqq_f64, clt: vcltq_f64, bsl: vbslq_f64,
        abs: vabsq_f64, ceil: vrndpq_f64, rsqrte: vrsqrteq_f64, rsqrts: vrsqrtsq_f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_splat_selects_whole_lane() {
        let a: uint16x8_t = unsafe { transmute([0x0100_u16, 0x0302, 0x0504, 0x0706, 0x0908, 0x0B0A, 0x0D0C, 0x0F0E]) };
        for lane in 0..8 {
            let r: [u16; 8] = unsafe { transmute(<u16 as Lane>::vsplat_lane(a, lane)) };
            assert_eq!(r, [0x0100 + 0x0202 * lane as u16; 8]);
        }
    }

    #[test]
    fn register_shift_covers_full_width() {
        let a = <u32 as Lane>::vsplat(u32::MAX);
        let r: [u32; 4] = unsafe { transmute(<u32 as IntLane>::vshift_r(a, 32)) };
        assert_eq!(r, [0; 4]);
        let a = <i8 as Lane>::vsplat(i8::MIN);
        let r: [i8; 16] = unsafe { transmute(<i8 as IntLane>::vshift_r(a, 7)) };
        assert_eq!(r, [-1; 16]);
    }

    #[test]
    fn immediate_shifts_match_register_form() {
        let a = <i64 as Lane>::vsplat(i64::MIN + 12345);
        let imm: [i64; 2] = unsafe { transmute(<i64 as IntLane>::vshift_r_imm::<63>(a)) };
        let reg: [i64; 2] = unsafe { transmute(<i64 as IntLane>::vshift_r(a, 63)) };
        assert_eq!(imm, reg);
        let b = <u8 as Lane>::vsplat(0xB5);
        let imm: [u8; 16] = unsafe { transmute(<u8 as IntLane>::vshift_r_imm::<3>(b)) };
        assert_eq!(imm, [0xB5 >> 3; 16]);
        let imm: [u8; 16] = unsafe { transmute(<u8 as IntLane>::vshift_l_imm::<7>(b)) };
        assert_eq!(imm, [0x80; 16]);
        let c = <u32 as Lane>::vsplat(0xDEAD_BEEF);
        let imm: [u32; 4] = unsafe { transmute(<u32 as IntLane>::vshift_l_imm::<31>(c)) };
        assert_eq!(imm, [0x8000_0000; 4]);
    }
}
