//! Filter kernels used by the image resampler
//!
//! Generic over `num_traits::Float` so the sampler can run in `f32` while tests
//! compare against `f64` references.

use num_traits::{Float, FloatConst};

/// Unnormalized sinc: `sin(x) / x`, with `sinc(0) = 1`
pub fn sinc<T: Float>(x: T) -> T {
    if x.is_zero() {
        return T::one();
    }
    x.sin() / x
}

/// Lanczos window weight for a fractional offset `t` and window size `size`
pub fn lanczos_weight<T: Float + FloatConst>(t: T, size: T) -> T {
    let x = T::PI() * t;
    sinc(x / size) * sinc(x)
}

/// Blend four neighbouring samples with Lanczos weights
///
/// `c00` is the top-left sample, `c10` the top-right, `c01` the bottom-left
/// and `c11` the bottom-right. `u` and `v` are the fractional offsets along
/// x and y. At `u = v = 0` the result is exactly `c00`.
pub fn lanczos_blend<T: Float + FloatConst>(
    u: T,
    v: T,
    size: T,
    [c00, c10, c01, c11]: [T; 4],
) -> T {
    let wx = lanczos_weight(u, size);
    let wy = lanczos_weight(v, size);
    let one = T::one();

    c00 * wx * wy + c10 * (one - wx) * wy + c01 * wx * (one - wy) + c11 * (one - wx) * (one - wy)
}

/// Isotropic 2D Gaussian density at `(x, y)`
pub fn gaussian<T: Float + FloatConst>(x: T, y: T, deviation: T) -> T {
    let two = T::one() + T::one();
    let variance = deviation * deviation;
    let exponent = x.mul_add(x, y * y) / (two * variance);

    (-exponent).exp() / (T::TAU() * variance)
}
