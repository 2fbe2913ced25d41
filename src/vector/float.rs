use super::Vector;
use crate::simd::FloatLane;

impl<T: FloatLane, const N: usize> Vector<T, N> {
    /// Clear the sign bit of every lane, NaN lanes included.
    #[inline]
    pub fn abs(self) -> Self {
        self.map(T::vabs)
    }

    /// Round every lane towards positive infinity.
    ///
    /// NaN, infinities, zeros and values too large to carry a fraction are
    /// returned unchanged; negative values that round up to zero give `-0.0`.
    /// Tiers without a rounding instruction (SSE2) truncate, correct by one
    /// towards +∞ and select the input back on the exact lanes.
    ///
    /// ```
    /// use tiervec::Vector;
    ///
    /// let a = Vector::<f32, 8>::from_array([1.2, -1.2, 0.0, -0.5, 3.0, 1e20, f32::INFINITY, -7.9]);
    /// assert_eq!(a.ceil().to_array(), [2.0, -1.0, 0.0, -0.0, 3.0, 1e20, f32::INFINITY, -7.0]);
    /// ```
    #[inline]
    pub fn ceil(self) -> Self {
        self.map(T::vceil)
    }

    /// Low-precision reciprocal square root.
    ///
    /// Accurate to at least `T::RSQRT_ESTIMATE_BITS` bits, which depends on
    /// the tier: 11 for `f32` on x86, 7 on NEON, full precision where no
    /// estimate instruction exists.
    #[inline]
    pub fn rsqrt_e(self) -> Self {
        self.map(T::vrsqrt_e)
    }

    /// One Newton-Raphson step refining the reciprocal square root estimate
    /// `self` of `a`: `x' = (x * 0.5) * (3 - a * (x * x))`.
    ///
    /// Roughly doubles the correct bits of the estimate; apply twice after
    /// [`rsqrt_e`](Self::rsqrt_e) for near full `f32` precision.
    ///
    /// Cost per base vector: five instructions on x86 (four `mul`, one
    /// `sub`); three on NEON (`mul`, `frsqrts`, `mul`).
    ///
    /// ```
    /// use tiervec::Vector;
    ///
    /// let a = Vector::<f32, 8>::splat(2.0);
    /// let x = a.rsqrt_e().rsqrt_rh(a).rsqrt_rh(a);
    /// for v in x.to_array() {
    ///     assert!((v - core::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    /// }
    /// ```
    #[inline]
    pub fn rsqrt_rh(self, a: Self) -> Self {
        self.zip(a, T::vrsqrt_rh)
    }
}
