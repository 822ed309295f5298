//! # Flight state vector
//!
//! The flight-dynamics engine passes its state to control callbacks as an
//! ordered 13-element sequence:
//!
//! `[x, y, z, vx, vy, vz, q0, q1, q2, q3, omega_x, omega_y, omega_z]`
//!
//! i.e. position, velocity, unit quaternion attitude and body-frame angular
//! rate.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of elements in the engine's flat state vector.
pub const STATE_VECTOR_LEN: usize = 13;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// State sample provided by the flight-dynamics engine on each internal
/// timestep.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    /// Position in the launch frame.
    ///
    /// Units: meters
    pub position_m: [f64; 3],

    /// Velocity in the launch frame.
    ///
    /// Units: meters/second
    pub velocity_ms: [f64; 3],

    /// Attitude as a unit quaternion, scalar first.
    pub attitude_q: [f64; 4],

    /// Angular rate in the body frame. The third component is the rate about
    /// the roll axis, through the nosecone.
    ///
    /// Units: radians/second
    pub angular_rate_rads: [f64; 3],
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors raised while converting a raw engine state vector.
#[derive(Debug, Error)]
pub enum StateVectorError {
    #[error("Expected a state vector of {expected} elements, found {found}")]
    WrongLength { expected: usize, found: usize },
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Default for FlightState {
    /// A state at rest at the origin with identity attitude.
    fn default() -> Self {
        Self {
            position_m: [0.0; 3],
            velocity_ms: [0.0; 3],
            attitude_q: [1.0, 0.0, 0.0, 0.0],
            angular_rate_rads: [0.0; 3],
        }
    }
}

impl FlightState {
    /// Build a flight state from the engine's flat 13-element vector.
    pub fn from_array(u: [f64; STATE_VECTOR_LEN]) -> Self {
        Self {
            position_m: [u[0], u[1], u[2]],
            velocity_ms: [u[3], u[4], u[5]],
            attitude_q: [u[6], u[7], u[8], u[9]],
            angular_rate_rads: [u[10], u[11], u[12]],
        }
    }

    /// Flatten the state back into the engine's 13-element layout.
    pub fn to_array(&self) -> [f64; STATE_VECTOR_LEN] {
        [
            self.position_m[0],
            self.position_m[1],
            self.position_m[2],
            self.velocity_ms[0],
            self.velocity_ms[1],
            self.velocity_ms[2],
            self.attitude_q[0],
            self.attitude_q[1],
            self.attitude_q[2],
            self.attitude_q[3],
            self.angular_rate_rads[0],
            self.angular_rate_rads[1],
            self.angular_rate_rads[2],
        ]
    }

    /// Angular rate about the roll axis (through the nosecone).
    ///
    /// Units: radians/second
    pub fn roll_rate_rads(&self) -> f64 {
        self.angular_rate_rads[2]
    }
}

impl From<[f64; STATE_VECTOR_LEN]> for FlightState {
    fn from(u: [f64; STATE_VECTOR_LEN]) -> Self {
        Self::from_array(u)
    }
}

impl std::convert::TryFrom<&[f64]> for FlightState {
    type Error = StateVectorError;

    fn try_from(u: &[f64]) -> Result<Self, Self::Error> {
        if u.len() != STATE_VECTOR_LEN {
            return Err(StateVectorError::WrongLength {
                expected: STATE_VECTOR_LEN,
                found: u.len(),
            });
        }

        let mut arr = [0f64; STATE_VECTOR_LEN];
        arr.copy_from_slice(u);

        Ok(Self::from_array(arr))
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_array_layout() {
        let raw = [
            1.0, 2.0, 3.0, // position
            4.0, 5.0, 6.0, // velocity
            1.0, 0.0, 0.0, 0.0, // attitude
            0.1, 0.2, 0.3, // angular rate
        ];

        let state = FlightState::from_array(raw);

        assert_eq!(state.position_m, [1.0, 2.0, 3.0]);
        assert_eq!(state.velocity_ms, [4.0, 5.0, 6.0]);
        assert_eq!(state.attitude_q, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(state.roll_rate_rads(), 0.3);

        assert_eq!(state.to_array(), raw);
    }

    #[test]
    fn test_try_from_wrong_length() {
        let raw = vec![0f64; 12];
        assert!(FlightState::try_from(raw.as_slice()).is_err());
    }
}
