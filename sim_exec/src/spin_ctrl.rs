//! # Spin-rate control callback
//!
//! A proportional spin-up law suitable for handing to an external
//! flight-dynamics engine as a moments callback: the engine calls in with the
//! full flight state each step, and gets back the control moments to apply.
//! Only the roll axis is actuated.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// Internal
use crate::actuator::SaturationPolicy;
use flight_if::{ControlMoments, FlightState, MomentsProvider};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Proportional spin-rate controller.
#[derive(Debug, Clone, Copy)]
pub struct SpinCtrl {
    /// Proportional gain on the spin-rate error.
    ///
    /// Units: newton meters per radian/second
    k_spin_nm_per_rads: f64,

    /// Target roll rate.
    ///
    /// Units: radians/second
    spin_setpoint_rads: f64,

    /// Saturation applied to the roll moment before it is returned.
    policy: SaturationPolicy,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl SpinCtrl {
    pub fn new(
        k_spin_nm_per_rads: f64,
        spin_setpoint_rads: f64,
        policy: SaturationPolicy,
    ) -> Self {
        Self {
            k_spin_nm_per_rads,
            spin_setpoint_rads,
            policy,
        }
    }

    /// The saturation policy this controller applies to its output.
    pub fn policy(&self) -> &SaturationPolicy {
        &self.policy
    }
}

impl MomentsProvider for SpinCtrl {
    /// Compute the control moments for the given flight state.
    ///
    /// The roll moment is proportional to the spin-rate error, the other two
    /// axes are always zero.
    fn control_moments(&self, state: &FlightState) -> ControlMoments {
        let error_rads = self.spin_setpoint_rads - state.roll_rate_rads();

        ControlMoments {
            m_x_nm: 0.0,
            m_y_nm: 0.0,
            m_z_nm: self.policy.apply(self.k_spin_nm_per_rads * error_rads),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn state_with_roll_rate(roll_rate_rads: f64) -> FlightState {
        let mut state = FlightState::default();
        state.angular_rate_rads[2] = roll_rate_rads;
        state
    }

    #[test]
    fn test_only_roll_axis_actuated() {
        let ctrl = SpinCtrl::new(2000.0, 100.0, SaturationPolicy::Unlimited);
        let moments = ctrl.control_moments(&state_with_roll_rate(42.0));

        assert_eq!(moments.m_x_nm, 0.0);
        assert_eq!(moments.m_y_nm, 0.0);
    }

    #[test]
    fn test_proportional_law() {
        let ctrl = SpinCtrl::new(2000.0, 100.0, SaturationPolicy::Unlimited);

        // Below the setpoint the moment spins the body up
        let moments = ctrl.control_moments(&state_with_roll_rate(99.0));
        assert!((moments.m_z_nm - 2000.0).abs() < 1e-9);

        // At the setpoint the moment is zero
        let moments = ctrl.control_moments(&state_with_roll_rate(100.0));
        assert_eq!(moments.m_z_nm, 0.0);

        // Above the setpoint the moment brakes
        let moments = ctrl.control_moments(&state_with_roll_rate(101.0));
        assert!((moments.m_z_nm + 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_saturated_law() {
        let policy = SaturationPolicy::Geometric {
            radius_m: 0.078359,
            max_force_n: 100.0,
        };
        let ctrl = SpinCtrl::new(2000.0, 100.0, policy);

        // Far below the setpoint the raw demand is huge, the output is the
        // geometric limit
        let moments = ctrl.control_moments(&state_with_roll_rate(0.0));
        assert!((moments.m_z_nm - 7.8359).abs() < 1e-9);
    }
}
