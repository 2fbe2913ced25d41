//! # tiervec
//!
//! Portable fixed-width lane vectors, no-std compatible. One generic
//! expression over [`Vector<T, N>`] compiles into the instruction sequence
//! of the SIMD tier the build targets, or into a scalar fallback when no
//! tier is available. Selection happens at build time: there is no runtime
//! CPU detection and no dynamic dispatch.
//!
//! ## Quick start
//!
//! ```
//! use tiervec::{F32x8, U8x32};
//!
//! let a = F32x8::from_array([1.5, -1.5, 2.0, -0.2, 7.9, 0.0, -3.1, 4.0]);
//! let r = (a * F32x8::splat(2.0)).ceil();
//! assert_eq!(r.to_array(), [3.0, -3.0, 4.0, -0.0, 16.0, 0.0, -6.0, 8.0]);
//!
//! let bytes = U8x32::splat(0xF0);
//! assert_eq!(bytes.shift_r_imm::<4>().to_array(), [0x0F; 32]);
//! ```
//!
//! ## Modules
//!
//! - [`vector`]: [`Vector<T, N>`] and [`Mask<T, N>`]. A vector is `N` lanes
//!   held as `N / T::LANES` native registers ("base vectors"); every
//!   operation runs its kernel once per base vector. Arithmetic, bitwise,
//!   comparison and blend, runtime and immediate shifts, per-block `align`,
//!   lane splat and extract, and the float kernels `abs`, `ceil`, `rsqrt_e`
//!   and `rsqrt_rh`.
//!
//! - [`simd`]: the kernel traits [`Lane`], [`IntLane`], [`FloatLane`] and
//!   their per-tier implementations (`sse2`, `avx2`, `neon`, `scalar`).
//!   [`simd::scalar`] is always compiled and holds the reference helpers.
//!
//! - [`tier`]: the build-time [`Tier`] tag, register width and lane counts.
//!
//! - [`traits`]: element trait hierarchy:
//!   - [`Element`]: the ten lane types, with the scalar reference
//!     semantics of every operation (`lane_add`, `lane_lt`, ...)
//!   - [`IntElement`]: integer lanes: shift semantics
//!   - [`FloatElement`]: float lanes: ceil, rsqrt estimate and refinement
//!
//! ## Vector widths
//!
//! `N` must be a non-zero multiple of the native lane count; anything else
//! fails to build. Widths of 32 and 64 bytes (see [`vector::aliases`]) are
//! valid on every tier, 16-byte vectors only on the 16-byte tiers.
//!
//! ## Cargo features
//!
//! | Feature        | Default  | Description |
//! |----------------|----------|-------------|
//! | `std`          | yes      | `std::error::Error` for [`VectorError`]; hardware float math |
//! | `libm`         | baseline | Pure-Rust float math for the scalar reference |
//! | `force-scalar` | no       | Use the scalar tier regardless of target features |
//! | `tracing`      | no       | [`tier::report`] and boundary diagnostics via `tracing` |
//!
//! Wider tiers are enabled with `RUSTFLAGS="-C target-cpu=native"` or
//! explicit `-C target-feature=+avx2`.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod simd;
pub mod tier;
pub mod traits;
pub mod vector;

pub use simd::{BaseVector, FloatLane, IntLane, Lane};
pub use tier::Tier;
pub use traits::{Element, FloatElement, IntElement};
pub use vector::aliases::{
    F32x16, F32x8, F64x4, F64x8, I16x16, I16x32, I32x16, I32x8, I64x4, I64x8, I8x32, I8x64,
    U16x16, U16x32, U32x16, U32x8, U64x4, U64x8, U8x32, U8x64,
};
pub use vector::{Mask, Vector, VectorError};
