//! Parameters structure for the Propagator

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the Propagator.
#[derive(Debug, Default, Deserialize)]
pub struct Params {

    // ---- MODEL ----

    /// Which dynamics model to build.
    pub model: ModelKind,

    /// Moment of inertia of the body about the roll axis.
    ///
    /// Units: kilogram meters squared
    pub body_inertia_kgm2: f64,

    /// Mass of the reaction wheel. Only used by the `ReactionWheel` model.
    ///
    /// Units: kilograms
    #[serde(default)]
    pub wheel_mass_kg: f64,

    /// Radius of the reaction wheel. Only used by the `ReactionWheel` model.
    ///
    /// Units: meters
    #[serde(default)]
    pub wheel_radius_m: f64,

    // ---- INTEGRATION ----

    /// Fixed integration timestep.
    ///
    /// Units: seconds
    pub dt_s: f64,

    /// Initial state vector. Length must match the model's state count.
    pub initial_state: Vec<f64>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The dynamics models the propagator can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ModelKind {
    /// 2 states `[theta, theta_dot]`, torque acting directly on the body.
    SingleBody,

    /// 4 states `[theta_body, theta_wheel, thetadot_body, thetadot_wheel]`,
    /// torque exchanged between wheel and body.
    ReactionWheel,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ModelKind {
    fn default() -> Self {
        ModelKind::SingleBody
    }
}
