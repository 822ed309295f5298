//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the shortest signed angular error between a setpoint and the current
/// angle, accounting for wrapping.
///
/// Both inputs are in radians and may lie outside [0, 2pi] - a spinning body
/// will routinely accumulate many full revolutions. The returned error is in
/// `(-pi, pi]`, with an error of exactly `pi` resolving to `+pi`.
pub fn wrap_error<T>(setpoint: T, angle: T) -> T
where
    T: Float
{
    let pi_t: T = T::from(std::f64::consts::PI).unwrap();
    let tau_t: T = T::from(std::f64::consts::TAU).unwrap();

    let mut e = rem_euclid(setpoint - angle, tau_t);

    if e > pi_t {
        e = e - tau_t;
    }
    else if e < -pi_t {
        e = e + tau_t;
    }

    e
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::from(0.0).unwrap() { r + rhs.abs() } else { r }
}

/// Clamp a value into the range `[min, max]`.
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: Float
{
    let mut ret = value;

    if ret > max {
        ret = max
    }
    if ret < min {
        ret = min
    }

    ret
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const PI: f64 = std::f64::consts::PI;
    const TAU: f64 = std::f64::consts::TAU;

    #[test]
    fn test_wrap_error_simple() {
        assert_eq!(wrap_error(1f64, 0f64), 1f64);
        assert_eq!(wrap_error(0f64, 1f64), -1f64);
        assert_eq!(wrap_error(2f64, 2f64), 0f64);
    }

    #[test]
    fn test_wrap_error_wrapping() {
        // Errors across the 0/2pi seam take the short way round
        assert!((wrap_error(0.1f64, TAU - 0.1) - 0.2).abs() < 1e-12);
        assert!((wrap_error(TAU - 0.1, 0.1f64) + 0.2).abs() < 1e-12);

        // Many revolutions on the angle make no difference
        assert!((wrap_error(0.5f64, 10.0 * TAU + 0.25) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_error_range_and_congruence() {
        // Result is always in (-pi, pi] and congruent mod 2pi to the raw
        // difference
        let mut angle = -20.0f64;
        while angle < 20.0 {
            let mut setpoint = -20.0f64;
            while setpoint < 20.0 {
                let e = wrap_error(setpoint, angle);
                assert!(e > -PI && e <= PI, "e = {} out of range", e);

                let raw = setpoint - angle;
                assert!((e.sin() - raw.sin()).abs() < 1e-9);
                assert!((e.cos() - raw.cos()).abs() < 1e-9);

                setpoint += 0.73;
            }
            angle += 0.31;
        }
    }

    #[test]
    fn test_wrap_error_pi_boundary() {
        // Exactly pi resolves to +pi, not -pi
        assert_eq!(wrap_error(PI, 0f64), PI);
        assert_eq!(wrap_error(0f64, PI), PI);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(0.5f64, -1.0, 1.0), 0.5);
        assert_eq!(clamp(1.5f64, -1.0, 1.0), 1.0);
        assert_eq!(clamp(-1.5f64, -1.0, 1.0), -1.0);

        // Values exactly at the bound are unchanged
        assert_eq!(clamp(1.0f64, -1.0, 1.0), 1.0);
        assert_eq!(clamp(-1.0f64, -1.0, 1.0), -1.0);
    }
}
