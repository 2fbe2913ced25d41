//! Compile-time instruction-set tier selection.
//!
//! Exactly one tier is compiled into a build. On x86_64 the widest enabled
//! instruction set wins: AVX2 > SSE4.1 > SSSE3 > SSE2. On aarch64 NEON is
//! used. Everything else, and any build with the `force-scalar` feature,
//! gets the scalar tier.
//!
//! Enable wider tiers with `-C target-cpu=native` or
//! `-C target-feature=+avx2` etc.
//!
//! | Tier     | register | u8 lanes | u32/f32 lanes | u64/f64 lanes |
//! |----------|----------|----------|---------------|---------------|
//! | `Scalar` | 16 B     | 16       | 4             | 2             |
//! | `Sse2`   | 16 B     | 16       | 4             | 2             |
//! | `Ssse3`  | 16 B     | 16       | 4             | 2             |
//! | `Sse41`  | 16 B     | 16       | 4             | 2             |
//! | `Avx2`   | 32 B     | 32       | 8             | 4             |
//! | `Neon`   | 16 B     | 16       | 4             | 2             |

use core::fmt;

use crate::simd::Lane;

/// Vector instruction-set tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Lane-by-lane reference implementation.
    Scalar,
    /// x86_64 baseline, 128-bit.
    Sse2,
    /// SSE2 plus `palignr` / `pshufb`.
    Ssse3,
    /// SSSE3 plus `roundps`, `blendv`, `pcmpeqq`.
    Sse41,
    /// 256-bit integer and float registers.
    Avx2,
    /// aarch64 Advanced SIMD, 128-bit.
    Neon,
}

impl Tier {
    /// Width of one base vector in bytes.
    pub const fn register_bytes(self) -> usize {
        match self {
            Tier::Avx2 => 32,
            _ => 16,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Tier::Scalar => "scalar",
            Tier::Sse2 => "sse2",
            Tier::Ssse3 => "ssse3",
            Tier::Sse41 => "sse4.1",
            Tier::Avx2 => "avx2",
            Tier::Neon => "neon",
        }
    }

    /// True for every tier except the scalar one.
    pub const fn is_accelerated(self) -> bool {
        !matches!(self, Tier::Scalar)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The tier compiled into this build.
pub const ACTIVE: Tier = if cfg!(feature = "force-scalar") {
    Tier::Scalar
} else if cfg!(all(target_arch = "x86_64", target_feature = "avx2")) {
    Tier::Avx2
} else if cfg!(all(target_arch = "x86_64", target_feature = "sse4.1")) {
    Tier::Sse41
} else if cfg!(all(target_arch = "x86_64", target_feature = "ssse3")) {
    Tier::Ssse3
} else if cfg!(all(target_arch = "x86_64", target_feature = "sse2")) {
    Tier::Sse2
} else if cfg!(all(target_arch = "aarch64", target_feature = "neon")) {
    Tier::Neon
} else {
    Tier::Scalar
};

/// Width of one base vector of the active tier, in bytes.
pub const REGISTER_BYTES: usize = ACTIVE.register_bytes();

/// Native lane count of `T` on the active tier.
///
/// ```
/// use tiervec::tier;
/// assert_eq!(tier::lanes::<u8>(), tier::REGISTER_BYTES);
/// assert_eq!(tier::lanes::<f64>() * 8, tier::REGISTER_BYTES);
/// ```
pub const fn lanes<T: Lane>() -> usize {
    T::LANES
}

/// Emit one `tracing` event describing the active tier.
#[cfg(feature = "tracing")]
pub fn report() {
    tracing::debug!(
        tier = %ACTIVE,
        register_bytes = REGISTER_BYTES,
        f32_lanes = lanes::<f32>(),
        f64_lanes = lanes::<f64>(),
        "vector tier selected at build time"
    );
}
