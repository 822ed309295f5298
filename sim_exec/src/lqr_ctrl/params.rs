//! LqrCtrl module parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the LqrCtrl module.
#[derive(Debug, Default, Deserialize)]
pub struct Params {
    // -----------------------------------------------------------------------
    // COST WEIGHTS
    // -----------------------------------------------------------------------
    /// Diagonal of the state penalty matrix Q. Must have one entry per model
    /// state.
    pub q_diag: Vec<f64>,

    /// Scalar input penalty R.
    pub r: f64,

    // -----------------------------------------------------------------------
    // LIMITS
    // -----------------------------------------------------------------------
    /// Optional symmetric clip on the commanded torque. When absent the raw
    /// feedback torque is passed through.
    ///
    /// Units: Newton metres
    #[serde(default)]
    pub u_max_nm: Option<f64>,

    // -----------------------------------------------------------------------
    // FEEDBACK FORM
    // -----------------------------------------------------------------------
    /// When true the torque is computed through the polarity matrix
    /// `S = -R^-1 * B' * P` rather than as `-K*x`. The two forms are
    /// algebraically identical.
    #[serde(default)]
    pub polarity_form: bool,
}
