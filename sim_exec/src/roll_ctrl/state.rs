//! Implementations for the RollCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::{Params, RollCtrlError};
use util::{
    archive::{Archived, ArchiveError, Archiver},
    maths,
    module::State,
    params,
    session::{self, Session}};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Roll control module state
#[derive(Default)]
pub struct RollCtrl {

    pub(crate) params: Params,

    /// Accumulated integral of the wrapped error.
    pub(crate) integral: f64,

    pub(crate) report: StatusReport,

    pub(crate) output: OutputData,
    pub(crate) arch_output: Archiver,
}

/// Input data to Roll control.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputData {
    /// Current body roll angle.
    ///
    /// Units: radians
    pub body_angle_rad: f64,

    /// Current body roll rate.
    ///
    /// Units: radians/second
    pub body_rate_rads: f64,

    /// Duration of this step, used to accumulate the integral term.
    ///
    /// Units: seconds
    pub dt_s: f64,
}

/// Output torque demand from RollCtrl.
#[derive(Clone, Copy, Serialize, Debug, Default)]
pub struct OutputData {
    /// Demanded control torque, after output saturation.
    ///
    /// Units: newton meters
    pub torque_nm: f64,

    /// Wrapped angle error used to compute the demand.
    ///
    /// Units: radians
    pub error_rad: f64,
}

/// Status report for RollCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// True if the output torque hit the saturation bound.
    pub output_limited: bool,

    /// True if the integral term hit the windup bound.
    pub integral_limited: bool,
}

/// Flat record written to the output archive.
#[derive(Serialize)]
struct OutputRecord {
    time_s: f64,
    error_rad: f64,
    torque_nm: f64,
    output_limited: bool,
    integral_limited: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for RollCtrl {
    type InitData = &'static str;
    type InitError = RollCtrlError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = RollCtrlError;

    /// Initialise the RollCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        // Load the parameters
        self.params = params::load(init_data)?;

        // Initialise the archiver
        self.arch_output = Archiver::from_path(session, "roll_ctrl/output.csv")?;

        Ok(())
    }

    /// Perform cyclic processing of Roll control.
    ///
    /// This is a pure per-step computation - out-of-range gains produce a
    /// saturated output, never an error.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Clear the status report
        self.report = StatusReport::default();

        // Shortest signed error to the setpoint, wrapped into (-pi, pi]
        let error_rad = maths::wrap_error(
            self.params.setpoint_rad,
            input_data.body_angle_rad,
        );

        let torque_nm = self.calc_control(
            error_rad,
            input_data.body_rate_rads,
            input_data.dt_s,
        );

        trace!(
            "RollCtrl: e = {:.6} rad, u = {:.6} Nm",
            error_rad,
            torque_nm
        );

        self.output = OutputData {
            torque_nm,
            error_rad,
        };

        Ok((self.output, self.report))
    }
}

impl Archived for RollCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.arch_output.serialise(OutputRecord {
            time_s: session::get_elapsed_seconds(),
            error_rad: self.output.error_rad,
            torque_nm: self.output.torque_nm,
            output_limited: self.report.output_limited,
            integral_limited: self.report.integral_limited,
        })
    }
}
