//! Roll control module
//!
//! PID-style feedback on the body roll angle. The error term wraps across
//! the 0/2pi seam, the integral term is bounded to prevent windup, and the
//! output torque is clipped to the actuator authority.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_pid;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during RollCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum RollCtrlError {
    #[error("Failed to load RollCtrl parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Failed to create RollCtrl archive: {0}")]
    ArchiveError(#[from] util::archive::ArchiveError),
}
