//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float
{
    target_range.0
        + ((value - source_range.0)
        * (target_range.1 - target_range.0)
        / (source_range.1 - source_range.0))
}

/// One dimensional piecewise linear interpolation of `(xp, fp)` at `x`.
///
/// `xp` must be increasing. Values of `x` outside `[xp[0], xp[last]]` are clamped to the
/// corresponding end value of `fp`.
///
/// Returns `None` if `xp` is empty or `xp` and `fp` have different lengths.
pub fn interp<T>(x: T, xp: &[T], fp: &[T]) -> Option<T>
where
    T: Float
{
    if xp.is_empty() || xp.len() != fp.len() {
        return None;
    }

    let last = xp.len() - 1;

    if x <= xp[0] {
        return Some(fp[0]);
    }
    if x >= xp[last] {
        return Some(fp[last]);
    }

    // Index of the first sample strictly greater than x, which is in [1, last] here
    let upper = xp.partition_point(|&v| v <= x);
    let lower = upper - 1;

    Some(lin_map((xp[lower], xp[upper]), (fp[lower], fp[upper]), x))
}

/// Wrap an angle into the range `[-pi, pi)`.
pub fn wrap_to_pi<T>(angle: T) -> T
where
    T: Float
{
    let pi_t: T = T::from(std::f64::consts::PI).unwrap();
    let tau_t: T = T::from(std::f64::consts::TAU).unwrap();

    rem_euclid(angle + pi_t, tau_t) - pi_t
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_interp() {
        let xp = [0.0, 10.0, 20.0];
        let fp = [-1.0, 1.0, 5.0];

        assert_eq!(interp(0.0, &xp, &fp), Some(-1.0));
        assert_eq!(interp(5.0, &xp, &fp), Some(0.0));
        assert_eq!(interp(10.0, &xp, &fp), Some(1.0));
        assert_eq!(interp(15.0, &xp, &fp), Some(3.0));

        // Clamped outside the range
        assert_eq!(interp(-3.0, &xp, &fp), Some(-1.0));
        assert_eq!(interp(120.0, &xp, &fp), Some(5.0));

        // Single sample is constant everywhere
        assert_eq!(interp(7.0, &[2.0], &[4.0]), Some(4.0));

        assert_eq!(interp(1.0, &[], &[]), None);
        assert_eq!(interp(1.0, &[0.0, 1.0], &[0.0]), None);
    }

    #[test]
    fn test_rem_euclid() {
        assert_eq!(rem_euclid(250.0, 100.0), 50.0);
        assert_eq!(rem_euclid(-10.0, 100.0), 90.0);
        assert_eq!(rem_euclid(99.9f64, 100.0), 99.9);
    }

    #[test]
    fn test_wrap_to_pi() {
        const PI: f64 = std::f64::consts::PI;

        assert!((wrap_to_pi(0.5f64) - 0.5).abs() < 1e-12);
        assert!((wrap_to_pi(PI + 0.5) - (-PI + 0.5)).abs() < 1e-12);
        assert!((wrap_to_pi(-PI - 0.5) - (PI - 0.5)).abs() < 1e-12);
    }
}
