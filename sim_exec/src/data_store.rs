//! # Data Store

use serde::Serialize;

use crate::{lqr_ctrl, propagator, roll_ctrl};
use util::{
    archive::{ArchiveError, Archiver},
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of steps already executed
    pub num_steps: u64,

    /// Simulation elapsed time
    pub sim_time_s: f64,

    // Propagator
    pub propagator: propagator::Propagator,
    pub propagator_input: propagator::InputData,
    pub propagator_output: propagator::OutputData,
    pub propagator_status_rpt: propagator::StatusReport,

    // RollCtrl
    pub roll_ctrl: roll_ctrl::RollCtrl,
    pub roll_ctrl_input: roll_ctrl::InputData,
    pub roll_ctrl_output: roll_ctrl::OutputData,
    pub roll_ctrl_status_rpt: roll_ctrl::StatusReport,

    // LqrCtrl
    pub lqr_ctrl: lqr_ctrl::LqrCtrl,
    pub lqr_ctrl_input: lqr_ctrl::InputData,
    pub lqr_ctrl_output: lqr_ctrl::OutputData,
    pub lqr_ctrl_status_rpt: lqr_ctrl::StatusReport,

    // Actuation
    /// Torque demanded by the active controller this step, after actuator
    /// saturation.
    pub demanded_torque_nm: f64,

    /// Number of steps on which the actuator limited the demand.
    pub num_limited_steps: u64,

    // Trajectory
    pub traj_log: TrajectoryLog,
}

/// One sample of the closed-loop trajectory.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub body_angle_rad: f64,
    pub body_rate_rads: f64,
    pub torque_nm: f64,
}

/// In-memory trajectory history, archived in one pass after the run.
#[derive(Default)]
pub struct TrajectoryLog {
    samples: Vec<TrajectorySample>,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Per-step housekeeping, run at the top of each simulation step.
    ///
    /// Clears the previous step's module inputs and outputs and advances the
    /// simulation clock.
    pub fn cycle_start(&mut self, dt_s: f64) {
        self.num_steps += 1;
        self.sim_time_s += dt_s;

        self.propagator_input = propagator::InputData::default();
        self.propagator_output = propagator::OutputData::default();
        self.propagator_status_rpt = propagator::StatusReport::default();

        self.roll_ctrl_input = roll_ctrl::InputData::default();
        self.roll_ctrl_output = roll_ctrl::OutputData::default();
        self.roll_ctrl_status_rpt = roll_ctrl::StatusReport::default();

        self.lqr_ctrl_input = lqr_ctrl::InputData::default();
        self.lqr_ctrl_output = lqr_ctrl::OutputData::default();
        self.lqr_ctrl_status_rpt = lqr_ctrl::StatusReport::default();

        self.demanded_torque_nm = 0.0;
    }
}

impl TrajectoryLog {
    pub fn push(&mut self, sample: TrajectorySample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    /// Write the full trajectory to `trajectory.csv` in the session archive.
    pub fn archive(&self, session: &Session) -> Result<(), ArchiveError> {
        let mut archiver = Archiver::from_path(session, "trajectory.csv")?;

        for sample in &self.samples {
            archiver.serialise(*sample)?;
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cycle_start_clears_step_data() {
        let mut ds = DataStore::default();
        ds.roll_ctrl_output.torque_nm = 5.0;
        ds.demanded_torque_nm = 5.0;

        ds.cycle_start(0.001);

        assert_eq!(ds.num_steps, 1);
        assert!((ds.sim_time_s - 0.001).abs() < 1e-12);
        assert_eq!(ds.roll_ctrl_output.torque_nm, 0.0);
        assert_eq!(ds.demanded_torque_nm, 0.0);
    }

    #[test]
    fn test_traj_log_accumulates() {
        let mut log = TrajectoryLog::default();
        assert!(log.is_empty());

        log.push(TrajectorySample {
            time_s: 0.001,
            body_angle_rad: 0.1,
            body_rate_rads: 1.0,
            torque_nm: 0.5,
        });

        assert_eq!(log.len(), 1);
        assert_eq!(log.samples()[0].torque_nm, 0.5);
    }
}
