//! # Control moments and the moments-provider contract

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::state::FlightState;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Moments commanded in the body axes. The third component acts about the
/// roll axis, through the nosecone.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ControlMoments {
    /// Moment about the body x axis.
    ///
    /// Units: newton meters
    pub m_x_nm: f64,

    /// Moment about the body y axis.
    ///
    /// Units: newton meters
    pub m_y_nm: f64,

    /// Moment about the body z (roll) axis.
    ///
    /// Units: newton meters
    pub m_z_nm: f64,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The callback contract registered with the flight-dynamics engine.
///
/// The engine invokes this on every internal timestep with its current state,
/// and applies the returned moments in the body axes. Implementations must be
/// pure - the engine gives no guarantees about call ordering or rate.
pub trait MomentsProvider {
    /// Compute the control moments for the given flight state.
    fn control_moments(&self, state: &FlightState) -> ControlMoments;
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl ControlMoments {
    /// Moments which command no rotation at all.
    pub fn zero() -> Self {
        Self {
            m_x_nm: 0.0,
            m_y_nm: 0.0,
            m_z_nm: 0.0,
        }
    }

    /// Flatten into the `[M1, M2, M3]` layout the engine expects.
    pub fn to_array(&self) -> [f64; 3] {
        [self.m_x_nm, self.m_y_nm, self.m_z_nm]
    }
}
