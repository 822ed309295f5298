//! Parameters structure for RollCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Roll control.
#[derive(Debug, Default, Deserialize)]
pub struct Params {

    // ---- GAINS ----

    /// Proportional gain, acting on the wrapped angle error.
    pub k_p: f64,

    /// Integral gain, acting on the accumulated angle error.
    pub k_i: f64,

    /// Derivative gain. This acts on the measured body rate directly, not on
    /// the error derivative.
    pub k_d: f64,

    // ---- TARGET ----

    /// Target body roll angle.
    ///
    /// Units: radians
    pub setpoint_rad: f64,

    // ---- LIMITS ----

    /// Bound on the accumulated integral term (anti-windup).
    pub integral_limit: f64,

    /// Maximum output torque magnitude.
    ///
    /// Units: newton meters
    pub u_max_nm: f64,
}
