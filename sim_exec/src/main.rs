//! Simulation executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop (one iteration per fixed-length step):
//!         - Read the current propagated state
//!         - Controller processing (PID-style roll control or optimal-gain
//!           control, selected by the executable parameters)
//!         - Actuator saturation of the torque demand
//!         - Propagator processing (Euler step of the plant)
//!         - Trajectory recording
//!     - Archive all module outputs and write the run summary
//!
//! # Modules
//!
//! All modules (e.g. `roll_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use sim_lib::{
    actuator::SaturationPolicy,
    data_store::{DataStore, TrajectorySample},
    lqr_ctrl,
    params::{CtrlMode, SimExecParams},
    propagator, roll_ctrl,
    spin_ctrl::SpinCtrl,
    torque_file,
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{info, warn};

// Internal
use util::{
    archive::Archived,
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Conversion factor from radians/second to revolutions/minute.
const RADS_TO_RPM: f64 = 9.549297;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    color_eyre::install()?;

    // Initialise session
    let session =
        Session::new("sim_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Rotational Simulation Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: SimExecParams = util::params::load("sim_exec.toml")
        .wrap_err("Could not load exec params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE MODULES ----

    let mut ds = DataStore::default();

    // The PID controller regulates the reaction-wheel plant, the optimal-gain
    // controller the single-body plant.
    let prop_param_file = match exec_params.ctrl_mode {
        CtrlMode::Pid => "propagator.toml",
        CtrlMode::Lqr => "propagator_lqr.toml",
    };

    ds.propagator
        .init(prop_param_file, &session)
        .wrap_err("Failed to initialise the propagator")?;

    match exec_params.ctrl_mode {
        CtrlMode::Pid => {
            ds.roll_ctrl
                .init("roll_ctrl.toml", &session)
                .wrap_err("Failed to initialise RollCtrl")?;
        }
        CtrlMode::Lqr => {
            let model = ds
                .propagator
                .model()
                .ok_or(propagator::PropagatorError::NotInitialised)
                .wrap_err("Propagator has no model")?
                .clone();

            ds.lqr_ctrl
                .init(
                    lqr_ctrl::InitData {
                        param_file: "lqr_ctrl.toml",
                        model,
                    },
                    &session,
                )
                .wrap_err("Failed to initialise LqrCtrl")?;
        }
    }

    info!("All modules initialised");

    // ---- SPIN CONTROL CALLBACK ----

    // The torque-setting file carries the spin-up gain. The callback itself
    // is exercised by the external flight-dynamics engine, not by this loop,
    // so here it is only constructed and summarised.
    let torque_setting = torque_file::load(&exec_params.torque_file_path)
        .wrap_err("Could not load the torque-setting file")?;

    let spin_ctrl = SpinCtrl::new(
        torque_setting,
        exec_params.spin_ctrl.spin_setpoint_rads,
        SaturationPolicy::Geometric {
            radius_m: exec_params.spin_ctrl.moment_arm_m,
            max_force_n: exec_params.spin_ctrl.max_thruster_force_n,
        },
    );

    match spin_ctrl.policy().max_moment_nm() {
        Some(max_moment_nm) => info!(
            "Spin control ready: gain = {} Nm/(rad/s), max moment = {:.4} Nm",
            torque_setting, max_moment_nm
        ),
        None => info!(
            "Spin control ready: gain = {} Nm/(rad/s), unlimited",
            torque_setting
        ),
    }

    // ---- MAIN LOOP ----

    let dt_s = ds.propagator.dt_s();

    info!(
        "Starting closed-loop run: {} steps of {} s",
        exec_params.num_steps, dt_s
    );

    for _ in 0..exec_params.num_steps {
        ds.cycle_start(dt_s);

        // Read the state propagated up to the start of this step
        let current = ds.propagator.current();

        // Controller processing
        match exec_params.ctrl_mode {
            CtrlMode::Pid => {
                ds.roll_ctrl_input = roll_ctrl::InputData {
                    body_angle_rad: current.body_angle_rad,
                    body_rate_rads: current.body_rate_rads,
                    dt_s,
                };

                let (output, status_rpt) = ds
                    .roll_ctrl
                    .proc(&ds.roll_ctrl_input)
                    .wrap_err("RollCtrl processing failed")?;

                ds.roll_ctrl_output = output;
                ds.roll_ctrl_status_rpt = status_rpt;
                ds.demanded_torque_nm = output.torque_nm;
            }
            CtrlMode::Lqr => {
                ds.lqr_ctrl_input = lqr_ctrl::InputData {
                    state: current.state.clone(),
                };

                let (output, status_rpt) = ds
                    .lqr_ctrl
                    .proc(&ds.lqr_ctrl_input)
                    .wrap_err("LqrCtrl processing failed")?;

                ds.lqr_ctrl_output = output;
                ds.lqr_ctrl_status_rpt = status_rpt;
                ds.demanded_torque_nm = output.torque_nm;
            }
        }

        // Actuator saturation
        let applied_torque_nm = exec_params.actuator.apply(ds.demanded_torque_nm);

        if applied_torque_nm != ds.demanded_torque_nm {
            ds.num_limited_steps += 1;
        }

        ds.demanded_torque_nm = applied_torque_nm;

        // Propagator processing
        ds.propagator_input = propagator::InputData {
            torque_nm: applied_torque_nm,
        };

        let (output, status_rpt) = ds
            .propagator
            .proc(&ds.propagator_input)
            .wrap_err("Propagator processing failed")?;

        ds.propagator_output = output;
        ds.propagator_status_rpt = status_rpt;

        // Trajectory recording
        ds.traj_log.push(TrajectorySample {
            time_s: ds.sim_time_s,
            body_angle_rad: ds.propagator_output.body_angle_rad,
            body_rate_rads: ds.propagator_output.body_rate_rads,
            torque_nm: applied_torque_nm,
        });
    }

    // ---- ARCHIVE AND SUMMARISE ----

    ds.traj_log
        .archive(&session)
        .wrap_err("Failed to archive the trajectory")?;

    ds.propagator
        .write()
        .wrap_err("Failed to archive the propagator state")?;

    match exec_params.ctrl_mode {
        CtrlMode::Pid => ds
            .roll_ctrl
            .write()
            .wrap_err("Failed to archive RollCtrl output")?,
        CtrlMode::Lqr => ds
            .lqr_ctrl
            .write()
            .wrap_err("Failed to archive LqrCtrl output")?,
    }

    if ds.propagator_status_rpt.non_finite_state {
        warn!("The run ended with a non-finite state vector");
    }

    info!("Run complete: {} steps ({} s)", ds.num_steps, ds.sim_time_s);
    info!(
        "Final body angle: {:.6} rad, rate: {:.6} rad/s ({:.3} rpm)",
        ds.propagator_output.body_angle_rad,
        ds.propagator_output.body_rate_rads,
        ds.propagator_output.body_rate_rads * RADS_TO_RPM
    );
    info!(
        "Actuator limited the demand on {} of {} steps",
        ds.num_limited_steps, ds.num_steps
    );
    info!("Archives written to {:?}", session.arch_root);

    Ok(())
}
