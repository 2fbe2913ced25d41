//! Cross-lane operations: align, splat, broadcast, extract.

use super::Vector;
use crate::simd::scalar::BLOCK_BYTES;
use crate::simd::Lane;

impl<T: Lane, const N: usize> Vector<T, N> {
    /// Lanes per 16-byte alignment block.
    pub const BLOCK_LANES: usize = BLOCK_BYTES / T::SIZE;

    /// Sliding window over the concatenation `lower ++ upper`, per 16-byte
    /// block.
    ///
    /// Within every block, lane `i` of the result is lane `i + S` of that
    /// block of `lower` followed by the same block of `upper`. `S == 0`
    /// returns `lower` and `S == BLOCK_LANES` returns `upper`; larger values
    /// fail to build.
    ///
    /// Blocks are aligned independently: this is not a shift across the
    /// whole vector.
    ///
    /// ```
    /// use tiervec::Vector;
    ///
    /// let lower = Vector::<u32, 8>::from_array([0, 1, 2, 3, 4, 5, 6, 7]);
    /// let upper = Vector::<u32, 8>::from_array([10, 11, 12, 13, 14, 15, 16, 17]);
    /// let r = Vector::align::<1>(lower, upper);
    /// assert_eq!(r.to_array(), [1, 2, 3, 10, 5, 6, 7, 14]);
    /// ```
    ///
    /// An offset past the block fails to build:
    ///
    /// ```compile_fail
    /// use tiervec::U32x8;
    ///
    /// let _ = U32x8::align::<5>(U32x8::splat(0), U32x8::splat(1));
    /// ```
    ///
    /// Cost per base vector: SSE2 two byte shifts and an `or`; SSSE3 and
    /// AVX2 one `palignr`; NEON one `ext`.
    #[inline]
    pub fn align<const S: usize>(lower: Self, upper: Self) -> Self {
        const { assert!(S <= BLOCK_BYTES / T::SIZE, "align offset past the block width") };
        if S == 0 {
            return lower;
        }
        if S == Self::BLOCK_LANES {
            return upper;
        }
        lower.zip(upper, |l, u| T::valign(l, u, S * T::SIZE))
    }

    /// Every lane set to lane `S`, `S < N`.
    ///
    /// Lane `S` is broadcast inside the one base vector holding it and that
    /// register is copied to every constituent.
    ///
    /// ```
    /// use tiervec::Vector;
    ///
    /// let a = Vector::<f64, 8>::from_array([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    /// assert_eq!(a.splat_imm::<6>().to_array(), [6.0; 8]);
    /// ```
    ///
    /// ```compile_fail
    /// use tiervec::U32x8;
    ///
    /// let _ = U32x8::splat(1).splat_imm::<8>();
    /// ```
    ///
    /// Cost of the lane broadcast, once per call: SSE2 one `pshufd` for 32-
    /// and 64-bit lanes, an extract and `set1` for narrower lanes (one
    /// `pshufb` with SSSE3); AVX2 one `vpermd` / `vpermq`, or an extract and
    /// broadcast for 8- and 16-bit lanes; NEON one `tbl`. Each further base
    /// vector is a register copy.
    #[inline]
    pub fn splat_imm<const S: usize>(self) -> Self {
        const { assert!(S < N, "lane index out of range") };
        self.broadcast_lane(S)
    }

    /// Every lane set to lane `i % N`.
    ///
    /// Same cost as [`splat_imm`](Self::splat_imm) plus the index reduction.
    #[inline]
    pub fn broadcast(self, i: usize) -> Self {
        self.broadcast_lane(i % N)
    }

    #[inline(always)]
    fn broadcast_lane(self, i: usize) -> Self {
        let reg = self.base_vectors()[i / T::LANES];
        Self::fill(T::vsplat_lane(reg, i % T::LANES))
    }

    /// Lane `I`, `I < N`.
    ///
    /// ```
    /// use tiervec::U32x8;
    ///
    /// assert_eq!(U32x8::from_array([0, 1, 2, 3, 4, 5, 6, 7]).extract_imm::<7>(), 7);
    /// ```
    ///
    /// ```compile_fail
    /// use tiervec::U32x8;
    ///
    /// let _ = U32x8::splat(1).extract_imm::<8>();
    /// ```
    #[inline]
    pub fn extract_imm<const I: usize>(self) -> T {
        const { assert!(I < N, "lane index out of range") };
        self.extract_lane(I)
    }

    /// Lane `i % N`.
    #[inline]
    pub fn extract(self, i: usize) -> T {
        self.extract_lane(i % N)
    }

    #[inline(always)]
    fn extract_lane(self, i: usize) -> T {
        T::vextract(self.base_vectors()[i / T::LANES], i % T::LANES)
    }
}
