//! Aliases for the vector widths that build on every tier.
//!
//! Any width that is a multiple of 32 bytes decomposes into whole base
//! vectors on all tiers (one AVX2 register, two 16-byte registers).

use super::Vector;

// ── 256-bit ─────────────────────────────────────────────────────────

pub type I8x32 = Vector<i8, 32>;
pub type U8x32 = Vector<u8, 32>;
pub type I16x16 = Vector<i16, 16>;
pub type U16x16 = Vector<u16, 16>;
pub type I32x8 = Vector<i32, 8>;
pub type U32x8 = Vector<u32, 8>;
pub type I64x4 = Vector<i64, 4>;
pub type U64x4 = Vector<u64, 4>;
pub type F32x8 = Vector<f32, 8>;
pub type F64x4 = Vector<f64, 4>;

// ── 512-bit ─────────────────────────────────────────────────────────

pub type I8x64 = Vector<i8, 64>;
pub type U8x64 = Vector<u8, 64>;
pub type I16x32 = Vector<i16, 32>;
pub type U16x32 = Vector<u16, 32>;
pub type I32x16 = Vector<i32, 16>;
pub type U32x16 = Vector<u32, 16>;
pub type I64x8 = Vector<i64, 8>;
pub type U64x8 = Vector<u64, 8>;
pub type F32x16 = Vector<f32, 16>;
pub type F64x8 = Vector<f64, 8>;
