use criterion::{criterion_group, criterion_main, Criterion};
use tiervec::{tier, F32x16, F32x8, I16x32, U8x64, U8x32};

// ---------------------------------------------------------------------------
// Helpers: reference loops over plain arrays, the baseline every tier beats
// ---------------------------------------------------------------------------

fn scalar_ceil_mul(a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
    core::array::from_fn(|i| (a[i] * b[i]).ceil())
}

fn scalar_shift_add(a: &[u8; 64], b: &[u8; 64]) -> [u8; 64] {
    core::array::from_fn(|i| (a[i] >> 3).wrapping_add(b[i]))
}

// ---------------------------------------------------------------------------
// Float kernels
// ---------------------------------------------------------------------------

fn ceil_mul(c: &mut Criterion) {
    let mut g = c.benchmark_group(format!("ceil_mul_f32x16/{}", tier::ACTIVE));

    let a: [f32; 16] = core::array::from_fn(|i| i as f32 * 0.37 - 3.0);
    let b: [f32; 16] = core::array::from_fn(|i| 1.0 + i as f32 * 0.11);

    g.bench_function("vector", |bench| {
        let (va, vb) = (F32x16::from_array(a), F32x16::from_array(b));
        bench.iter(|| (std::hint::black_box(va) * std::hint::black_box(vb)).ceil())
    });

    g.bench_function("scalar", |bench| {
        bench.iter(|| scalar_ceil_mul(std::hint::black_box(&a), std::hint::black_box(&b)))
    });

    g.finish();
}

fn rsqrt(c: &mut Criterion) {
    let mut g = c.benchmark_group(format!("rsqrt_f32x8/{}", tier::ACTIVE));
    let a = F32x8::from_array([0.5, 1.0, 2.0, 3.0, 10.0, 100.0, 1.0e4, 1.0e-3]);

    g.bench_function("estimate", |bench| bench.iter(|| std::hint::black_box(a).rsqrt_e()));

    g.bench_function("estimate+refine", |bench| {
        bench.iter(|| {
            let a = std::hint::black_box(a);
            a.rsqrt_e().rsqrt_rh(a)
        })
    });

    g.bench_function("exact", |bench| {
        bench.iter(|| std::hint::black_box(a).to_array().map(|x| 1.0 / x.sqrt()))
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Integer kernels
// ---------------------------------------------------------------------------

fn shift_add(c: &mut Criterion) {
    let mut g = c.benchmark_group(format!("shift_add_u8x64/{}", tier::ACTIVE));

    let a: [u8; 64] = core::array::from_fn(|i| (i * 37) as u8);
    let b: [u8; 64] = core::array::from_fn(|i| (i * 11 + 5) as u8);

    g.bench_function("immediate", |bench| {
        let (va, vb) = (U8x64::from_array(a), U8x64::from_array(b));
        bench.iter(|| std::hint::black_box(va).shift_r_imm::<3>() + std::hint::black_box(vb))
    });

    g.bench_function("runtime", |bench| {
        let (va, vb) = (U8x64::from_array(a), U8x64::from_array(b));
        bench.iter(|| std::hint::black_box(va).shift_r(std::hint::black_box(3)) + vb)
    });

    g.bench_function("scalar", |bench| {
        bench.iter(|| scalar_shift_add(std::hint::black_box(&a), std::hint::black_box(&b)))
    });

    g.finish();
}

fn compare_select(c: &mut Criterion) {
    let mut g = c.benchmark_group(format!("min_i16x32/{}", tier::ACTIVE));
    let a = I16x32::from_array(core::array::from_fn(|i| (i as i16 - 16) * 977));
    let b = I16x32::from_array(core::array::from_fn(|i| (16 - i as i16) * 311));

    g.bench_function("cmp_lt+select", |bench| {
        bench.iter(|| {
            let (a, b) = (std::hint::black_box(a), std::hint::black_box(b));
            a.cmp_lt(b).select(a, b)
        })
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Cross-lane
// ---------------------------------------------------------------------------

fn align_splat(c: &mut Criterion) {
    let mut g = c.benchmark_group(format!("cross_lane_u8x32/{}", tier::ACTIVE));
    let lower = U8x32::from_array(core::array::from_fn(|i| i as u8));
    let upper = U8x32::from_array(core::array::from_fn(|i| 100 + i as u8));

    g.bench_function("align<7>", |bench| {
        bench.iter(|| U8x32::align::<7>(std::hint::black_box(lower), std::hint::black_box(upper)))
    });

    g.bench_function("splat_imm<9>", |bench| bench.iter(|| std::hint::black_box(lower).splat_imm::<9>()));

    g.bench_function("broadcast", |bench| {
        bench.iter(|| std::hint::black_box(lower).broadcast(std::hint::black_box(9)))
    });

    g.finish();
}

criterion_group!(benches, ceil_mul, rsqrt, shift_add, compare_select, align_splat);
criterion_main!(benches);
