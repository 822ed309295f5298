//! Propagator module
//!
//! Advances the rigid-body rotational state with explicit fixed-step Euler
//! integration of a linear time-invariant model `x_dot = A*x + B*u`. The
//! integrator is deliberately simple: no step-size adaptation and no
//! stability check - it is the caller's job to pick a `dt` small relative to
//! the system dynamics.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod model;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use model::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during Propagator operation.
#[derive(Debug, thiserror::Error)]
pub enum PropagatorError {
    #[error(
        "Dynamics shape mismatch: A is {a_rows}x{a_cols}, B is {b_rows}x{b_cols}"
    )]
    ModelShapeMismatch {
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
    },

    #[error(
        "State/input shape mismatch: model has {num_states} states and \
         {num_inputs} inputs, got x of {x_len} and u of {u_len}"
    )]
    StateShapeMismatch {
        num_states: usize,
        num_inputs: usize,
        x_len: usize,
        u_len: usize,
    },

    #[error("Propagator has not been initialised")]
    NotInitialised,

    #[error("Failed to load Propagator parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Failed to create Propagator archive: {0}")]
    ArchiveError(#[from] util::archive::ArchiveError),
}
