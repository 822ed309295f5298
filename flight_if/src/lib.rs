//! # Flight-dynamics interface crate.
//!
//! Provides the data types and callback contract shared with the external
//! 6-DOF flight-dynamics engine. The engine owns the trajectory simulation
//! itself; this crate only defines the state it hands over each internal
//! timestep and the control moments it expects back.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Flight state vector definitions
pub mod state;

/// Control moment definitions and the moments-provider callback contract
pub mod moments;

// ------------------------------------------------------------------------------------------------
// REEXPORTS
// ------------------------------------------------------------------------------------------------

pub use moments::{ControlMoments, MomentsProvider};
pub use state::FlightState;
