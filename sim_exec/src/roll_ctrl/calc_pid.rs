//! PID-style control law calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use super::*;
use util::maths;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RollCtrl {

    /// Compute the saturated control torque for the given wrapped error and
    /// measured body rate.
    ///
    /// The law is `u = kP*e + kI*integral(e) + kD*omega` - the derivative
    /// gain acts on the measured rate, not on the error derivative.
    pub(crate) fn calc_control(
        &mut self,
        error_rad: f64,
        body_rate_rads: f64,
        dt_s: f64,
    ) -> f64 {

        // Accumulate the integral term, bounded to prevent windup
        self.integral += error_rad * dt_s;

        if self.integral.abs() > self.params.integral_limit {
            self.integral = self.integral.signum() * self.params.integral_limit;
            self.report.integral_limited = true;
        }

        let u_raw =
            self.params.k_p * error_rad
            + self.params.k_i * self.integral
            + self.params.k_d * body_rate_rads;

        // Saturate the output to the actuator authority
        let u = maths::clamp(u_raw, -self.params.u_max_nm, self.params.u_max_nm);

        if u != u_raw {
            self.report.output_limited = true;
        }

        u
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// RollCtrl with the gain set used by the reaction wheel study.
    fn ctrl_under_test() -> RollCtrl {
        RollCtrl {
            params: Params {
                k_p: 0.5,
                k_i: 0.0,
                k_d: 1.5,
                setpoint_rad: std::f64::consts::PI,
                integral_limit: 10.0,
                u_max_nm: 10.0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_derivative_gain_acts_on_rate() {
        let mut ctrl = ctrl_under_test();

        // Zero error, nonzero rate: output is kD * omega
        let u = ctrl.calc_control(0.0, 2.0, 0.001);
        assert_eq!(u, 1.5 * 2.0);
    }

    #[test]
    fn test_proportional_term() {
        let mut ctrl = ctrl_under_test();

        let u = ctrl.calc_control(1.0, 0.0, 0.001);
        assert_eq!(u, 0.5);
    }

    #[test]
    fn test_output_saturation_boundary() {
        let mut ctrl = ctrl_under_test();
        ctrl.params.k_p = 1.0;
        ctrl.params.k_d = 0.0;

        // Exactly at the bound: unclipped, no limit flag
        let u = ctrl.calc_control(10.0, 0.0, 0.001);
        assert_eq!(u, 10.0);
        assert!(!ctrl.report.output_limited);

        // Just over the bound: clipped to sign * u_max, flag raised
        ctrl.report = StatusReport::default();
        let u = ctrl.calc_control(10.0 + 1e-9, 0.0, 0.001);
        assert_eq!(u, 10.0);
        assert!(ctrl.report.output_limited);

        ctrl.report = StatusReport::default();
        let u = ctrl.calc_control(-10.0 - 1e-9, 0.0, 0.001);
        assert_eq!(u, -10.0);
        assert!(ctrl.report.output_limited);
    }

    #[test]
    fn test_integral_windup_bound() {
        let mut ctrl = ctrl_under_test();
        ctrl.params.k_i = 1.0;

        // Drive a constant error for many steps: the integral saturates at
        // exactly +integral_limit and stays there
        for _ in 0..20_000 {
            ctrl.calc_control(1.0, 0.0, 0.001);
        }
        assert_eq!(ctrl.integral, 10.0);
        assert!(ctrl.report.integral_limited);

        for _ in 0..1000 {
            ctrl.calc_control(1.0, 0.0, 0.001);
        }
        assert_eq!(ctrl.integral, 10.0);

        // A constant negative error drives it to the opposite bound
        for _ in 0..40_000 {
            ctrl.calc_control(-1.0, 0.0, 0.001);
        }
        assert_eq!(ctrl.integral, -10.0);
    }
}
