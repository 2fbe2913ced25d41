use proptest::prelude::*;
use tiervec::simd::scalar::align_blocks;
use tiervec::{F32x16, F64x8, I16x32, I32x16, I64x8, IntElement, U64x4, U8x64, Vector};

fn vec_of<T: tiervec::Lane, const N: usize>(v: Vec<T>) -> Vector<T, N> {
    Vector::from_slice(&v).unwrap()
}

proptest! {
    // ── Decomposition ───────────────────────────────────────────────

    #[test]
    fn elementwise_matches_reference(
        a in prop::collection::vec(any::<i16>(), 32),
        b in prop::collection::vec(any::<i16>(), 32),
    ) {
        let (va, vb): (I16x32, I16x32) = (vec_of(a.clone()), vec_of(b.clone()));
        let sum = (va + vb).to_array();
        let lt = va.cmp_lt(vb).to_array();
        for i in 0..32 {
            prop_assert_eq!(sum[i], a[i].wrapping_add(b[i]));
            prop_assert_eq!(lt[i], a[i] < b[i]);
        }
    }

    #[test]
    fn write_then_read_is_identity(a in prop::collection::vec(any::<u8>(), 64)) {
        let v: U8x64 = vec_of(a.clone());
        let mut out = vec![0_u8; 64];
        v.write_to_slice(&mut out).unwrap();
        prop_assert_eq!(out, a);
    }

    // ── Shifts ──────────────────────────────────────────────────────

    #[test]
    fn shift_matches_reference(a in prop::collection::vec(any::<i64>(), 8), count in 0_u32..200) {
        let v: I64x8 = vec_of(a.clone());
        let r = v.shift_r(count).to_array();
        let l = v.shift_l(count).to_array();
        for i in 0..8 {
            prop_assert_eq!(r[i], a[i].lane_shr(count));
            prop_assert_eq!(l[i], a[i].lane_shl(count));
        }
    }

    #[test]
    fn shift_by_zero_is_identity(a in prop::collection::vec(any::<i32>(), 16)) {
        let v: I32x16 = vec_of(a);
        prop_assert_eq!(v.shift_r(0), v);
        prop_assert_eq!(v.shift_l(0), v);
        prop_assert_eq!(v.shift_r_imm::<0>(), v);
    }

    #[test]
    fn shift_right_saturates(a in prop::collection::vec(any::<i32>(), 16), extra in 0_u32..1000) {
        let v: I32x16 = vec_of(a);
        prop_assert_eq!(v.shift_r(31 + extra), v.shift_r_imm::<31>());
        prop_assert_eq!(v.shift_r(32), v.shift_r_imm::<32>());
    }

    #[test]
    fn immediate_and_runtime_shifts_agree(a in prop::collection::vec(any::<u8>(), 64)) {
        let v: U8x64 = vec_of(a);
        prop_assert_eq!(v.shift_r_imm::<3>(), v.shift_r(3));
        prop_assert_eq!(v.shift_l_imm::<5>(), v.shift_l(5));
        prop_assert_eq!(v.shift_r_imm::<8>(), U8x64::zero());
    }

    // ── Floats ──────────────────────────────────────────────────────

    #[test]
    fn ceil_is_idempotent_and_bounds(a in prop::collection::vec(any::<f32>(), 16)) {
        let v: F32x16 = vec_of(a.clone());
        let c = v.ceil();
        let cc = c.ceil().to_array();
        for (i, x) in c.to_array().into_iter().enumerate() {
            prop_assert!(x.to_bits() == cc[i].to_bits() || (x.is_nan() && cc[i].is_nan()));
            if a[i].is_finite() {
                prop_assert!(x >= a[i] && f64::from(x) - f64::from(a[i]) < 1.0);
                prop_assert_eq!(x.to_bits(), a[i].ceil().to_bits());
            }
        }
    }

    #[test]
    fn ceil_matches_reference_f64(a in prop::collection::vec(-1.0e17_f64..1.0e17, 8)) {
        let v: F64x8 = vec_of(a.clone());
        let c = v.ceil().to_array();
        for i in 0..8 {
            prop_assert_eq!(c[i].to_bits(), a[i].ceil().to_bits());
        }
    }

    #[test]
    fn refined_rsqrt_converges(a in prop::collection::vec(1.0e-6_f32..1.0e6, 16)) {
        let v: F32x16 = vec_of(a.clone());
        let r = v.rsqrt_e().rsqrt_rh(v).rsqrt_rh(v).to_array();
        for i in 0..16 {
            let exact = 1.0 / (a[i] as f64).sqrt();
            let rel = ((r[i] as f64 - exact) / exact).abs();
            prop_assert!(rel < 1.0e-6, "rsqrt({}) = {}", a[i], r[i]);
        }
    }

    #[test]
    fn abs_clears_only_the_sign(a in prop::collection::vec(any::<f64>(), 8)) {
        let v: F64x8 = vec_of(a.clone());
        for (i, x) in v.abs().to_array().into_iter().enumerate() {
            prop_assert_eq!(x.to_bits(), a[i].to_bits() & !(1 << 63));
        }
    }

    // ── Cross-lane ──────────────────────────────────────────────────

    #[test]
    fn align_matches_block_reference(
        lower in prop::collection::vec(any::<u8>(), 64),
        upper in prop::collection::vec(any::<u8>(), 64),
    ) {
        let (l, u): (U8x64, U8x64) = (vec_of(lower.clone()), vec_of(upper.clone()));
        let mut want = [0_u8; 64];
        align_blocks(&lower, &upper, 5, &mut want);
        prop_assert_eq!(U8x64::align::<5>(l, u).to_array(), want);
        align_blocks(&lower, &upper, 15, &mut want);
        prop_assert_eq!(U8x64::align::<15>(l, u).to_array(), want);
        prop_assert_eq!(U8x64::align::<16>(l, u), u);
    }

    #[test]
    fn broadcast_and_extract_wrap(a in prop::collection::vec(any::<u64>(), 4), i in 0_usize..64) {
        let v: U64x4 = vec_of(a.clone());
        prop_assert_eq!(v.extract(i), a[i % 4]);
        prop_assert_eq!(v.broadcast(i).to_array(), [a[i % 4]; 4]);
    }

    #[test]
    fn mask_algebra(a in prop::collection::vec(any::<i16>(), 32), b in prop::collection::vec(any::<i16>(), 32)) {
        let (va, vb): (I16x32, I16x32) = (vec_of(a), vec_of(b));
        prop_assert_eq!((va.cmp_lt(vb) | va.cmp_eq(vb)).to_array(), va.cmp_le(vb).to_array());
        prop_assert_eq!((!va.cmp_eq(vb)).to_array(), va.cmp_ne(vb).to_array());
        prop_assert!(!(va.cmp_lt(vb) & va.cmp_gt(vb)).any());
        let lo = va.cmp_lt(vb).select(va, vb);
        prop_assert!(lo.cmp_le(va).all() && lo.cmp_le(vb).all());
    }
}
