//! Every vector operation against the scalar reference, over a boundary
//! corpus: zero, all-ones, min/max, sign bit, alternating bits and, for
//! floats, NaN, infinities, denormals and the integral thresholds.
//!
//! Run with `--features force-scalar` and with `-C target-cpu=native` to
//! cover both the scalar tier and the widest available one.

use num_traits::{Float, NumCast, One};
use tiervec::{Element, FloatElement, FloatLane, IntElement, IntLane, Lane, Vector};

// ── Corpus ──────────────────────────────────────────────────────────

const PATTERNS: [u64; 12] = [
    0,
    u64::MAX,
    1,
    2,
    7,
    0x5555_5555_5555_5555,
    0xAAAA_AAAA_AAAA_AAAA,
    0x0F0F_0F0F_0F0F_0F0F,
    0xF0F0_F0F0_F0F0_F0F0,
    0x0123_4567_89AB_CDEF,
    0xFEDC_BA98_7654_3210,
    0x8000_0000_0000_0001,
];

fn int_corpus<T: IntElement>() -> Vec<T> {
    let mask = if T::BITS == 64 { u64::MAX } else { (1_u64 << T::BITS) - 1 };
    let sign = 1_u64 << (T::BITS - 1);
    let mut out: Vec<T> = PATTERNS
        .iter()
        .map(|p| T::from_bits(<T::Bits as NumCast>::from(p & mask).unwrap()))
        .collect();
    for p in [sign, sign - 1, sign + 1, mask - 1] {
        out.push(T::from_bits(<T::Bits as NumCast>::from(p).unwrap()));
    }
    out
}

fn float_corpus<T: FloatElement>() -> Vec<T> {
    let c = |v: f64| <T as NumCast>::from(v).unwrap();
    let threshold = T::INTEGRAL_THRESHOLD;
    vec![
        T::zero(),
        -T::zero(),
        T::one(),
        -T::one(),
        c(0.5),
        c(-0.5),
        c(1.5),
        c(-2.5),
        c(123.456),
        c(-123.456),
        c(1.0e-7),
        c(-0.999_999),
        threshold,
        -threshold,
        threshold - c(0.5),
        -(threshold - c(0.5)),
        threshold + threshold,
        T::max_value(),
        T::min_value(),
        T::min_positive_value(),
        -T::min_positive_value(),
        <T as Element>::from_bits(<T::Bits as One>::one()),
        -<T as Element>::from_bits(<T::Bits as One>::one()),
        T::infinity(),
        T::neg_infinity(),
        T::nan(),
        -T::nan(),
        c(3.0),
        c(4.0),
        c(1.0e30),
        c(-1.0e30),
        c(0.1),
    ]
}

/// Lane `i` of the `r`-th rotation of the corpus.
fn rotated<T: Lane, const N: usize>(corpus: &[T], r: usize) -> Vector<T, N> {
    Vector::from_array(core::array::from_fn(|i| corpus[(i + r) % corpus.len()]))
}

/// Equal bits, or both NaN.
fn same<T: Element>(a: T, b: T) -> bool {
    #[allow(clippy::eq_op)]
    let nan = |x: T| x != x;
    a.to_bits() == b.to_bits() || (nan(a) && nan(b))
}

fn assert_lanes<T: Element, const N: usize>(op: &str, got: [T; N], want: impl Fn(usize) -> T) {
    for (i, g) in got.into_iter().enumerate() {
        let w = want(i);
        assert!(same(g, w), "{op}: lane {i}: got {g:?}, want {w:?}");
    }
}

fn assert_mask<T: Lane, const N: usize>(op: &str, got: tiervec::Mask<T, N>, want: impl Fn(usize) -> bool) {
    for (i, g) in got.to_array().into_iter().enumerate() {
        assert_eq!(g, want(i), "{op}: lane {i}");
    }
}

// ── Shared operations ───────────────────────────────────────────────

fn check_common<T: Lane, const N: usize>(corpus: &[T]) {
    for r in 0..corpus.len() {
        let a: Vector<T, N> = rotated(corpus, r * N);
        let b: Vector<T, N> = rotated(corpus, r);
        let (x, y) = (a.to_array(), b.to_array());

        assert_lanes("add", (a + b).to_array(), |i| x[i].lane_add(y[i]));
        assert_lanes("sub", (a - b).to_array(), |i| x[i].lane_sub(y[i]));
        assert_lanes("and", (a & b).to_array(), |i| x[i].lane_and(y[i]));
        assert_lanes("or", (a | b).to_array(), |i| x[i].lane_or(y[i]));
        assert_lanes("xor", (a ^ b).to_array(), |i| x[i].lane_xor(y[i]));
        assert_lanes("and_not", a.and_not(b).to_array(), |i| x[i].lane_and_not(y[i]));
        assert_lanes("not", (!a).to_array(), |i| x[i].lane_xor(T::ones()));

        assert_mask("cmp_eq", a.cmp_eq(b), |i| x[i].lane_eq(y[i]).is_set());
        assert_mask("cmp_lt", a.cmp_lt(b), |i| x[i].lane_lt(y[i]).is_set());
        assert_mask("cmp_gt", a.cmp_gt(b), |i| y[i].lane_lt(x[i]).is_set());
        assert_mask("cmp_le", a.cmp_le(b), |i| x[i] <= y[i]);
        assert_mask("cmp_ge", a.cmp_ge(b), |i| x[i] >= y[i]);
        assert_mask("cmp_ne", a.cmp_ne(b), |i| x[i] != y[i]);

        let m = a.cmp_lt(b);
        let sel = m.select(a, b).to_array();
        assert_lanes("select", sel, |i| if x[i] < y[i] { x[i] } else { y[i] });
        assert_lanes("blend", Vector::blend(m, b, a).to_array(), |i| {
            T::lane_blend(y[i], x[i], T::mask(x[i] < y[i]))
        });
    }
}

fn check_cross_lane<T: Lane, const N: usize>(corpus: &[T]) {
    let a: Vector<T, N> = rotated(corpus, 0);
    let b: Vector<T, N> = rotated(corpus, 5);
    let (x, y) = (a.to_array(), b.to_array());

    let mut want = x;
    tiervec::simd::scalar::align_blocks(&x, &y, 1, &mut want);
    assert_lanes("align<1>", Vector::align::<1>(a, b).to_array(), |i| want[i]);
    assert_eq!(Vector::align::<0>(a, b).to_array().map(|v| v.to_bits()), x.map(|v| v.to_bits()));

    for s in 0..N {
        assert_lanes("broadcast", a.broadcast(s).to_array(), |_| x[s]);
        assert!(same(a.extract(s), x[s]), "extract {s}");
    }
    assert_lanes("splat_imm<0>", a.splat_imm::<0>().to_array(), |_| x[0]);
    assert!(same(a.extract_imm::<1>(), x[1]));
}

// ── Integers ────────────────────────────────────────────────────────

fn check_int<T: IntLane, const N: usize>() {
    let corpus = int_corpus::<T>();
    check_common::<T, N>(&corpus);
    check_cross_lane::<T, N>(&corpus);

    for r in 0..corpus.len() {
        let a: Vector<T, N> = rotated(&corpus, r);
        let x = a.to_array();
        for count in 0..=T::BITS + 1 {
            assert_lanes("shift_r", a.shift_r(count).to_array(), |i| x[i].lane_shr(count));
            assert_lanes("shift_l", a.shift_l(count).to_array(), |i| x[i].lane_shl(count));
        }
        assert_lanes("shift_r u32::MAX", a.shift_r(u32::MAX).to_array(), |i| x[i].lane_shr(u32::MAX));
        assert_lanes("shift_l u32::MAX", a.shift_l(u32::MAX).to_array(), |i| x[i].lane_shl(u32::MAX));
    }
}

macro_rules! check_int_imm {
    ($t:ty, $n:literal, [$($c:literal),*]) => {{
        let corpus = int_corpus::<$t>();
        let a: Vector<$t, $n> = rotated(&corpus, 3);
        let x = a.to_array();
        $(
            assert_lanes(concat!("shift_r_imm<", $c, ">"), a.shift_r_imm::<$c>().to_array(), |i| x[i].lane_shr($c));
            assert_lanes(concat!("shift_l_imm<", $c, ">"), a.shift_l_imm::<$c>().to_array(), |i| x[i].lane_shl($c));
        )*
    }};
}

#[test]
fn i8_lanes() {
    check_int::<i8, 32>();
    check_int::<i8, 64>();
    check_int_imm!(i8, 32, [0, 1, 3, 6, 7, 8]);
}

#[test]
fn u8_lanes() {
    check_int::<u8, 32>();
    check_int::<u8, 64>();
    check_int_imm!(u8, 64, [0, 1, 4, 7, 8]);
}

#[test]
fn i16_lanes() {
    check_int::<i16, 16>();
    check_int::<i16, 32>();
    check_int_imm!(i16, 16, [0, 1, 8, 15, 16]);
}

#[test]
fn u16_lanes() {
    check_int::<u16, 16>();
    check_int::<u16, 32>();
    check_int_imm!(u16, 32, [0, 2, 9, 15, 16]);
}

#[test]
fn i32_lanes() {
    check_int::<i32, 8>();
    check_int::<i32, 16>();
    check_int_imm!(i32, 8, [0, 1, 16, 31, 32]);
}

#[test]
fn u32_lanes() {
    check_int::<u32, 8>();
    check_int::<u32, 16>();
    check_int_imm!(u32, 16, [0, 5, 24, 31, 32]);
}

#[test]
fn i64_lanes() {
    check_int::<i64, 4>();
    check_int::<i64, 8>();
    check_int_imm!(i64, 4, [0, 1, 32, 33, 63, 64]);
}

#[test]
fn u64_lanes() {
    check_int::<u64, 4>();
    check_int::<u64, 8>();
    check_int_imm!(u64, 8, [0, 1, 31, 63, 64]);
}

// ── Floats ──────────────────────────────────────────────────────────

fn check_float<T: FloatLane, const N: usize>() {
    let corpus = float_corpus::<T>();
    check_common::<T, N>(&corpus);
    check_cross_lane::<T, N>(&corpus);

    for r in 0..corpus.len() {
        let a: Vector<T, N> = rotated(&corpus, 0);
        let b: Vector<T, N> = rotated(&corpus, r);
        let (x, y) = (a.to_array(), b.to_array());
        assert_lanes("mul", (a * b).to_array(), |i| x[i].lane_mul(y[i]));
        assert_lanes("div", (a / b).to_array(), |i| x[i].lane_div(y[i]));
    }

    for r in 0..corpus.len() {
        let a: Vector<T, N> = rotated(&corpus, r);
        let x = a.to_array();
        assert_lanes("abs", a.abs().to_array(), |i| x[i].lane_abs());
        assert_lanes("ceil", a.ceil().to_array(), |i| x[i].lane_ceil());
        assert_lanes("ceil idempotent", a.ceil().ceil().to_array(), |i| x[i].lane_ceil());
    }
}

fn check_rsqrt<T: FloatLane, const N: usize>() {
    let c = |v: f64| <T as NumCast>::from(v).unwrap();
    let a: Vector<T, N> = Vector::from_array(core::array::from_fn(|i| c(0.001 + i as f64 * 3.7)));
    let exact = |v: T| T::one() / v.sqrt();
    let rel = |got: T, want: T| ((got - want) / want).abs();

    let est = a.rsqrt_e();
    let bound = c(2.0).powi(-(T::RSQRT_ESTIMATE_BITS as i32));
    for (g, v) in est.to_array().into_iter().zip(a.to_array()) {
        assert!(rel(g, exact(v)) <= bound, "rsqrt_e({v:?}) = {g:?}");
    }

    let refined = est.rsqrt_rh(a);
    let mantissa = if T::BITS == 32 { f32::MANTISSA_DIGITS } else { f64::MANTISSA_DIGITS };
    let bits = (2 * T::RSQRT_ESTIMATE_BITS).min(mantissa - 4) as i32;
    // one step squares the relative error and multiplies it by 1.5
    let bound = c(2.0).powi(-bits) * c(1.6);
    for (g, v) in refined.to_array().into_iter().zip(a.to_array()) {
        assert!(rel(g, exact(v)) <= bound, "rsqrt_rh({v:?}) = {g:?}");
    }

    let specials: Vector<T, N> = Vector::from_array(core::array::from_fn(|i| match i % 4 {
        0 => T::infinity(),
        1 => T::zero(),
        2 => -T::one(),
        _ => T::nan(),
    }));
    let s = specials.rsqrt_e().to_array();
    for (i, v) in s.into_iter().enumerate() {
        match i % 4 {
            0 => assert_eq!(v, T::zero(), "rsqrt_e(inf)"),
            1 => assert_eq!(v, T::infinity(), "rsqrt_e(0)"),
            _ => assert!(v.is_nan(), "rsqrt_e of negative or NaN"),
        }
    }
}

/// The refinement step follows the reference operation order exactly,
/// except on NEON where it is fused into `frsqrts`.
#[cfg(not(all(target_arch = "aarch64", target_feature = "neon", not(feature = "force-scalar"))))]
fn check_rsqrt_rh_exact<T: FloatLane, const N: usize>() {
    let corpus = float_corpus::<T>();
    for r in 0..corpus.len() {
        let x: Vector<T, N> = rotated(&corpus, 0);
        let a: Vector<T, N> = rotated(&corpus, r);
        let (xs, as_) = (x.to_array(), a.to_array());
        assert_lanes("rsqrt_rh", x.rsqrt_rh(a).to_array(), |i| T::lane_rsqrt_rh(xs[i], as_[i]));
    }
}

#[cfg(all(target_arch = "aarch64", target_feature = "neon", not(feature = "force-scalar")))]
fn check_rsqrt_rh_exact<T: FloatLane, const N: usize>() {}

#[test]
fn f32_lanes() {
    check_float::<f32, 8>();
    check_float::<f32, 16>();
    check_rsqrt::<f32, 16>();
    check_rsqrt_rh_exact::<f32, 8>();
}

#[test]
fn f64_lanes() {
    check_float::<f64, 4>();
    check_float::<f64, 8>();
    check_rsqrt::<f64, 8>();
    check_rsqrt_rh_exact::<f64, 4>();
}

#[test]
fn ceil_special_values() {
    let a = tiervec::F32x8::from_array([0.0, -0.0, f32::NAN, 8_388_607.5, -0.25, 2.0, -2.0, 1.0e-40]);
    let r = a.ceil().to_array();
    assert_eq!(r[0].to_bits(), 0.0_f32.to_bits());
    assert_eq!(r[1].to_bits(), (-0.0_f32).to_bits());
    assert!(r[2].is_nan());
    assert_eq!(r[3], 8_388_608.0);
    assert_eq!(r[4].to_bits(), (-0.0_f32).to_bits());
    assert_eq!(r[5], 2.0);
    assert_eq!(r[6], -2.0);
    assert_eq!(r[7], 1.0);
}

#[test]
fn decomposition_is_transparent() {
    // one 64-byte vector equals two 32-byte halves processed independently
    let corpus = int_corpus::<u16>();
    let a: Vector<u16, 32> = rotated(&corpus, 0);
    let b: Vector<u16, 32> = rotated(&corpus, 7);
    let whole = (a.shift_r(3) + b).to_array();

    let (x, y) = (a.to_array(), b.to_array());
    for half in [0..16, 16..32] {
        let lo = Vector::<u16, 16>::from_slice(&x[half.clone()]).unwrap();
        let hi = Vector::<u16, 16>::from_slice(&y[half.clone()]).unwrap();
        assert_eq!(&whole[half], &(lo.shift_r(3) + hi).to_array());
    }
}
