//! # Simulation library.
//!
//! This library allows other crates in the workspace (and the benches) to
//! access items defined inside the simulation executable crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Actuator saturation model - limits commanded moments to physical capability
pub mod actuator;

/// Global data store for the executable
pub mod data_store;

/// Optimal-gain controller module - LQR feedback computed from a one-time Riccati solve
pub mod lqr_ctrl;

/// Executable parameters
pub mod params;

/// Propagator module - advances the rigid-body rotational state with fixed-step Euler integration
pub mod propagator;

/// Roll control module - PID-style feedback with angular wraparound error
pub mod roll_ctrl;

/// Spin-rate control callback handed to the external flight-dynamics engine
pub mod spin_ctrl;

/// Constant torque-setting input file
pub mod torque_file;
