//! Implementations for the Propagator state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::warn;
use nalgebra::DVector;
use serde::Serialize;

// Internal
use super::{LtiModel, ModelKind, Params, PropagatorError};
use util::{
    archive::{Archived, ArchiveError, Archiver},
    module::State,
    params,
    session::{self, Session}};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Propagator module state
pub struct Propagator {

    pub(crate) params: Params,

    model: Option<LtiModel>,

    /// The state vector, mutated in place every step.
    x: DVector<f64>,

    pub(crate) report: StatusReport,
    arch_state: Archiver,

    /// The non-finite diagnostic is raised once per run, not once per step.
    non_finite_warned: bool,
}

/// Input data to the Propagator.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputData {
    /// Control torque applied over this step.
    ///
    /// Units: newton meters
    pub torque_nm: f64,
}

/// Output data from a propagation step.
#[derive(Clone, Debug, Default)]
pub struct OutputData {
    /// Full state vector after the step.
    pub state: Vec<f64>,

    /// Body angle about the roll axis.
    ///
    /// Units: radians
    pub body_angle_rad: f64,

    /// Body angular rate about the roll axis.
    ///
    /// Units: radians/second
    pub body_rate_rads: f64,
}

/// Status report for Propagator processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// True if the state went non-finite during this step.
    pub non_finite_state: bool,
}

/// Flat record written to the state archive.
#[derive(Serialize)]
struct StateRecord {
    time_s: f64,
    body_angle_rad: f64,
    body_rate_rads: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Propagator {
    fn default() -> Self {
        Self {
            params: Params::default(),
            model: None,
            x: DVector::zeros(0),
            report: StatusReport::default(),
            arch_state: Archiver::default(),
            non_finite_warned: false,
        }
    }
}

impl State for Propagator {
    type InitData = &'static str;
    type InitError = PropagatorError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = PropagatorError;

    /// Initialise the Propagator module.
    ///
    /// Expected init data is the path to the parameter file. The dynamics
    /// matrices are built once here from the physical constants; shape errors
    /// between the model and the initial state fail the init.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        // Load the parameters
        self.params = params::load(init_data)?;

        // Build the dynamics model
        let model = match self.params.model {
            ModelKind::SingleBody => {
                LtiModel::single_body(self.params.body_inertia_kgm2)
            }
            ModelKind::ReactionWheel => {
                let wheel_inertia_kgm2 =
                    self.params.wheel_mass_kg * self.params.wheel_radius_m.powi(2);
                LtiModel::reaction_wheel(
                    self.params.body_inertia_kgm2,
                    wheel_inertia_kgm2,
                )
            }
        };

        // Check the initial condition fits the model before accepting it
        if self.params.initial_state.len() != model.num_states() {
            return Err(PropagatorError::StateShapeMismatch {
                num_states: model.num_states(),
                num_inputs: model.num_inputs(),
                x_len: self.params.initial_state.len(),
                u_len: model.num_inputs(),
            });
        }

        self.x = DVector::from_vec(self.params.initial_state.clone());
        self.model = Some(model);

        // Initialise the archiver
        self.arch_state = Archiver::from_path(session, "propagator/state.csv")?;

        Ok(())
    }

    /// Advance the state one fixed step under the given torque.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Clear the status report
        self.report = StatusReport::default();

        let model = match self.model {
            Some(ref m) => m,
            None => return Err(PropagatorError::NotInitialised),
        };

        let u = DVector::from_element(model.num_inputs(), input_data.torque_nm);

        model.step(&mut self.x, &u, self.params.dt_s)?;

        // Integrator instability shows up as non-finite state. Surfaced as a
        // diagnostic only - the run continues.
        if self.x.iter().any(|v| !v.is_finite()) {
            self.report.non_finite_state = true;

            if !self.non_finite_warned {
                warn!(
                    "Propagator state went non-finite, dt ({} s) may be too \
                     large for the system dynamics",
                    self.params.dt_s
                );
                self.non_finite_warned = true;
            }
        }

        Ok((self.current(), self.report))
    }
}

impl Archived for Propagator {
    fn write(&mut self) -> Result<(), ArchiveError> {
        let output = self.current();

        self.arch_state.serialise(StateRecord {
            time_s: session::get_elapsed_seconds(),
            body_angle_rad: output.body_angle_rad,
            body_rate_rads: output.body_rate_rads,
        })
    }
}

impl Propagator {
    /// The dynamics model, if the module has been initialised.
    pub fn model(&self) -> Option<&LtiModel> {
        self.model.as_ref()
    }

    /// The fixed integration timestep.
    ///
    /// Units: seconds
    pub fn dt_s(&self) -> f64 {
        self.params.dt_s
    }

    /// The current state without advancing it.
    pub fn current(&self) -> OutputData {
        let body_rate_idx = match self.params.model {
            ModelKind::SingleBody => 1,
            ModelKind::ReactionWheel => 2,
        };

        OutputData {
            state: self.x.iter().copied().collect(),
            body_angle_rad: if self.x.len() > 0 { self.x[0] } else { 0.0 },
            body_rate_rads: if self.x.len() > body_rate_idx {
                self.x[body_rate_idx]
            } else {
                0.0
            },
        }
    }
}
