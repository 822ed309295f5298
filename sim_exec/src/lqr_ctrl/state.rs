//! Implementations for the LqrCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

// Internal
use super::{LqrCtrlError, LqrGain, Params};
use crate::propagator::LtiModel;
use util::{
    archive::{Archived, ArchiveError, Archiver},
    maths,
    module::State,
    params,
    session::{self, Session}};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// LQR control module state
#[derive(Default)]
pub struct LqrCtrl {

    pub(crate) params: Params,

    /// Gains solved once at init, `None` until `init` has run.
    pub(crate) gain: Option<LqrGain>,

    pub(crate) report: StatusReport,

    pub(crate) output: OutputData,
    pub(crate) arch_output: Archiver,
}

/// Data required to initialise LqrCtrl.
pub struct InitData {
    /// Path to the parameter file, relative to the `params` directory.
    pub param_file: &'static str,

    /// The plant model the gains are solved against.
    pub model: LtiModel,
}

/// Input data to LQR control.
#[derive(Clone, Debug, Default)]
pub struct InputData {
    /// Full state vector from the propagator.
    pub state: Vec<f64>,
}

/// Output torque demand from LqrCtrl.
#[derive(Clone, Copy, Serialize, Debug, Default)]
pub struct OutputData {
    /// Demanded control torque.
    ///
    /// Units: newton meters
    pub torque_nm: f64,
}

/// Status report for LqrCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// True if the output torque was clipped to `u_max_nm`.
    pub output_limited: bool,
}

/// Flat record written to the output archive.
#[derive(Serialize)]
struct OutputRecord {
    time_s: f64,
    torque_nm: f64,
    output_limited: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for LqrCtrl {
    type InitData = InitData;
    type InitError = LqrCtrlError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = LqrCtrlError;

    /// Initialise the LqrCtrl module.
    ///
    /// Loads the cost weights and solves the Riccati equation once for the
    /// given plant model. All per-step processing is then a single matrix
    /// multiply.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        // Load the parameters
        self.params = params::load(init_data.param_file)?;

        let num_states = init_data.model.num_states();

        if self.params.q_diag.len() != num_states {
            return Err(LqrCtrlError::WeightShapeMismatch {
                expected: num_states,
                found: self.params.q_diag.len(),
            });
        }

        let q = DMatrix::from_diagonal(
            &DVector::from_vec(self.params.q_diag.clone()));
        let r = DMatrix::from_element(1, 1, self.params.r);

        self.gain = Some(LqrGain::new(
            init_data.model.a(),
            init_data.model.b(),
            &q,
            &r,
        )?);

        // Initialise the archiver
        self.arch_output = Archiver::from_path(session, "lqr_ctrl/output.csv")?;

        Ok(())
    }

    /// Perform cyclic processing of LQR control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Clear the status report
        self.report = StatusReport::default();

        let gain = match &self.gain {
            Some(g) => g,
            None => return Err(LqrCtrlError::NotInitialised),
        };

        if input_data.state.len() != gain.num_states() {
            return Err(LqrCtrlError::StateShapeMismatch {
                expected: gain.num_states(),
                found: input_data.state.len(),
            });
        }

        let x = DVector::from_vec(input_data.state.clone());

        let u = if self.params.polarity_form {
            gain.control_via_polarity(&x)
        }
        else {
            gain.control(&x)
        };

        let mut torque_nm = u[0];

        if let Some(u_max_nm) = self.params.u_max_nm {
            let clipped = maths::clamp(torque_nm, -u_max_nm, u_max_nm);

            if clipped != torque_nm {
                self.report.output_limited = true;
                torque_nm = clipped;
            }
        }

        trace!("LqrCtrl: u = {:.6} Nm", torque_nm);

        self.output = OutputData {
            torque_nm,
        };

        Ok((self.output, self.report))
    }
}

impl Archived for LqrCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.arch_output.serialise(OutputRecord {
            time_s: session::get_elapsed_seconds(),
            torque_nm: self.output.torque_nm,
            output_limited: self.report.output_limited,
        })
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn ctrl_under_test() -> LqrCtrl {
        let model = LtiModel::single_body(0.082);

        let q = DMatrix::from_diagonal(&DVector::from_vec(vec![100.0, 1.0]));
        let r = DMatrix::from_element(1, 1, 1.0);

        LqrCtrl {
            params: Params {
                q_diag: vec![100.0, 1.0],
                r: 1.0,
                u_max_nm: None,
                polarity_form: false,
            },
            gain: Some(LqrGain::new(model.a(), model.b(), &q, &r).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_regulation_torque() {
        let mut ctrl = ctrl_under_test();

        // At the origin the regulator demands nothing
        let (output, _) = ctrl
            .proc(&InputData { state: vec![0.0, 0.0] })
            .unwrap();
        assert!(output.torque_nm.abs() < 1e-9);

        // A positive angle error demands a negative torque
        let (output, _) = ctrl
            .proc(&InputData { state: vec![1.0, 0.0] })
            .unwrap();
        assert!(output.torque_nm < 0.0);
    }

    #[test]
    fn test_polarity_form_matches_gain_form() {
        let mut ctrl = ctrl_under_test();
        let state = vec![std::f64::consts::PI / 2.0, 10.0];

        let (u_gain, _) = ctrl
            .proc(&InputData { state: state.clone() })
            .unwrap();

        ctrl.params.polarity_form = true;
        let (u_polarity, _) = ctrl
            .proc(&InputData { state })
            .unwrap();

        assert!((u_gain.torque_nm - u_polarity.torque_nm).abs() < 1e-9);
    }

    #[test]
    fn test_output_clip() {
        let mut ctrl = ctrl_under_test();
        ctrl.params.u_max_nm = Some(1.0);

        let (output, report) = ctrl
            .proc(&InputData { state: vec![100.0, 0.0] })
            .unwrap();

        assert_eq!(output.torque_nm, -1.0);
        assert!(report.output_limited);
    }

    #[test]
    fn test_closed_loop_regulation() {
        // Full closed loop against the plant the gains were solved for: from
        // [pi/2 rad, 10 rad/s] the regulator drives the state to the origin
        // well within 10 s of 1 ms steps
        let mut ctrl = ctrl_under_test();
        let model = LtiModel::single_body(0.082);

        let mut x = DVector::from_vec(vec![std::f64::consts::PI / 2.0, 10.0]);

        for _ in 0..10_000 {
            let (output, _) = ctrl
                .proc(&InputData {
                    state: x.iter().copied().collect(),
                })
                .unwrap();

            let u = DVector::from_element(1, output.torque_nm);
            model.step(&mut x, &u, 0.001).unwrap();
        }

        assert!(x[0].abs() < 1e-3, "angle = {}", x[0]);
        assert!(x[1].abs() < 1e-3, "rate = {}", x[1]);
    }

    #[test]
    fn test_state_shape_mismatch() {
        let mut ctrl = ctrl_under_test();

        assert!(matches!(
            ctrl.proc(&InputData { state: vec![0.0; 4] }),
            Err(LqrCtrlError::StateShapeMismatch { expected: 2, found: 4 })
        ));
    }

    #[test]
    fn test_not_initialised() {
        let mut ctrl = LqrCtrl::default();

        assert!(matches!(
            ctrl.proc(&InputData { state: vec![0.0, 0.0] }),
            Err(LqrCtrlError::NotInitialised)
        ));
    }
}
