//! Executable-level parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use crate::actuator::SaturationPolicy;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Which controller closes the loop for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CtrlMode {
    /// Roll control via the PID-style controller.
    Pid,

    /// Roll control via the optimal-gain controller.
    Lqr,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the simulation executable.
#[derive(Debug, Deserialize)]
pub struct SimExecParams {
    /// The controller used to close the loop.
    pub ctrl_mode: CtrlMode,

    /// Number of fixed-length steps to run.
    pub num_steps: u64,

    /// Path to the torque-setting file, relative to the software root.
    pub torque_file_path: String,

    /// Saturation applied to the active controller's torque demand before it
    /// reaches the propagator.
    #[serde(default)]
    pub actuator: SaturationPolicy,

    /// Spin-rate control callback parameters.
    pub spin_ctrl: SpinCtrlParams,
}

/// Parameters for the spin-rate control callback.
#[derive(Debug, Deserialize)]
pub struct SpinCtrlParams {
    /// Target roll rate for the spin-up law.
    ///
    /// Units: radians/second
    pub spin_setpoint_rads: f64,

    /// Moment arm of the spin thruster.
    ///
    /// Units: meters
    pub moment_arm_m: f64,

    /// Maximum force of the spin thruster.
    ///
    /// Units: newtons
    pub max_thruster_force_n: f64,
}
