//! Base-vector kernels with compile-time tier dispatch.
//!
//! ## Dispatch strategy
//!
//! Each tier module implements [`Lane`] (plus [`IntLane`] / [`FloatLane`])
//! for all ten element types, with `Reg` set to that tier's native register.
//! Exactly one tier module is compiled, selected by `cfg(target_feature)`;
//! the compiler sees one concrete kernel per call site and there is no
//! runtime branching or dynamic dispatch.
//!
//! [`scalar`] is always compiled: it holds the lane-by-lane reference
//! helpers that the scalar tier is built from and that the accelerated tiers
//! are tested against.
//!
//! ## Kernel contract
//!
//! Every kernel operates on exactly one base vector (or a pair/triple) and
//! returns the scalar reference result lane for lane. Integer arithmetic
//! wraps. Comparison kernels return mask registers whose lanes are all-ones
//! or all-zeros. Cross-lane kernels (`valign`) work on 16-byte blocks.
//!
//! ## Architecture support
//!
//! | Arch      | Tier      | Module     |
//! |-----------|-----------|------------|
//! | `x86_64`  | SSE2–4.1  | `sse2`     |
//! | `x86_64`  | AVX2      | `avx2`     |
//! | `aarch64` | NEON      | `neon`     |
//! | other     | scalar    | `scalar`   |

pub mod scalar;

#[cfg(all(
    not(feature = "force-scalar"),
    target_arch = "x86_64",
    target_feature = "sse2",
    not(target_feature = "avx2")
))]
mod sse2;

#[cfg(all(not(feature = "force-scalar"), target_arch = "x86_64", target_feature = "avx2"))]
mod avx2;

#[cfg(all(not(feature = "force-scalar"), target_arch = "aarch64", target_feature = "neon"))]
mod neon;

use crate::traits::{Element, FloatElement, IntElement};

/// Native base vector of `T` on the active tier.
pub type BaseVector<T> = <T as Lane>::Reg;

/// Kernels on one base vector of element type `Self`.
///
/// # Safety
///
/// Implementors guarantee that `Reg` has exactly the size of `LANES`
/// elements, an alignment of at most 32 bytes, holds its lanes in memory
/// order, and that every bit pattern is a valid `Reg`. `Vector` relies on
/// this to view its lane storage as a slice of registers.
pub unsafe trait Lane: Element {
    /// Native register type.
    type Reg: Copy;

    /// Lanes per register on the active tier.
    const LANES: usize;

    /// Broadcast a scalar to every lane.
    fn vsplat(v: Self) -> Self::Reg;

    fn vadd(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn vsub(a: Self::Reg, b: Self::Reg) -> Self::Reg;

    fn vand(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn vor(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn vxor(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    /// `a & !b`.
    fn vand_not(a: Self::Reg, b: Self::Reg) -> Self::Reg;

    fn vcmp_eq(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn vcmp_lt(a: Self::Reg, b: Self::Reg) -> Self::Reg;

    /// Per lane: `mask ? on : off`. `mask` lanes are all-ones or all-zeros.
    fn vblend(on: Self::Reg, off: Self::Reg, mask: Self::Reg) -> Self::Reg;

    /// Within each 16-byte block, the 16 bytes starting at `bytes` of the
    /// concatenation `lower ++ upper`. `bytes <= 16` and is a multiple of
    /// the element size; callers pass a constant.
    fn valign(lower: Self::Reg, upper: Self::Reg, bytes: usize) -> Self::Reg;

    /// Broadcast lane `lane` (`< LANES`, constant at the call site).
    fn vsplat_lane(a: Self::Reg, lane: usize) -> Self::Reg;

    /// Read lane `lane` (`< LANES`).
    fn vextract(a: Self::Reg, lane: usize) -> Self;
}

/// Integer shift kernels.
///
/// Counts reaching a kernel are already normalized: runtime right shifts get
/// `count <= MAX_SHIFT_R`, runtime left shifts `count <= BITS`, and the
/// immediate kernels `1 <= COUNT < BITS`.
pub trait IntLane: Lane + IntElement {
    fn vshift_r(a: Self::Reg, count: u32) -> Self::Reg;
    fn vshift_l(a: Self::Reg, count: u32) -> Self::Reg;
    fn vshift_r_imm<const COUNT: i32>(a: Self::Reg) -> Self::Reg;
    fn vshift_l_imm<const COUNT: i32>(a: Self::Reg) -> Self::Reg;
}

/// Floating-point kernels.
pub trait FloatLane: Lane + FloatElement {
    /// Guaranteed correct bits of [`vrsqrt_e`](Self::vrsqrt_e) on this tier.
    const RSQRT_ESTIMATE_BITS: u32;

    fn vmul(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn vdiv(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn vabs(a: Self::Reg) -> Self::Reg;
    fn vceil(a: Self::Reg) -> Self::Reg;
    fn vrsqrt_e(a: Self::Reg) -> Self::Reg;
    fn vrsqrt_rh(x: Self::Reg, a: Self::Reg) -> Self::Reg;
}

/// Expand `$op!(lit)` for each constant byte offset 1..=15 of a 16-byte
/// block; offsets 0 and 16 return the operands unchanged.
///
/// The offset is a constant at every call site, so the match folds to the
/// single immediate-operand instruction.
#[allow(unused_macros)]
macro_rules! align_arms {
    ($bytes:expr, $lower:expr, $upper:expr, $op:ident) => {
        match $bytes {
            0 => $lower,
            1 => $op!(1),
            2 => $op!(2),
            3 => $op!(3),
            4 => $op!(4),
            5 => $op!(5),
            6 => $op!(6),
            7 => $op!(7),
            8 => $op!(8),
            9 => $op!(9),
            10 => $op!(10),
            11 => $op!(11),
            12 => $op!(12),
            13 => $op!(13),
            14 => $op!(14),
            15 => $op!(15),
            _ => $upper,
        }
    };
}

#[allow(unused_imports)]
pub(crate) use align_arms;
