//! Optimal-gain control module
//!
//! Computes a fixed feedback gain by solving the continuous-time
//! linear-quadratic-regulator problem for the propagator's dynamics model,
//! then applies `u = -K*x` every step. The Riccati solve happens once at
//! init; the gain is immutable for the rest of the run.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod gain;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use gain::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during LqrCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum LqrCtrlError {
    #[error("Failed to load LqrCtrl parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Failed to create LqrCtrl archive: {0}")]
    ArchiveError(#[from] util::archive::ArchiveError),

    #[error(
        "State weight dimension mismatch: the model has {expected} states \
         but the Q diagonal has {found} entries"
    )]
    WeightShapeMismatch { expected: usize, found: usize },

    #[error(
        "State dimension mismatch: the gain expects {expected} states, got {found}"
    )]
    StateShapeMismatch { expected: usize, found: usize },

    #[error("The input weight matrix R is not invertible")]
    RNotInvertible,

    #[error("The Riccati iteration did not converge after {0} iterations")]
    RiccatiNotConverged(usize),

    #[error("LqrCtrl has not been initialised")]
    NotInitialised,
}
