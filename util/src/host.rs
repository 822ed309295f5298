//! Host platform utility functions

use std::path::PathBuf;

/// Name of the environment variable giving the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "RCS_SIM_SW_ROOT";

/// Get the software root directory from the environment.
///
/// The root is the directory containing the `params` and `sessions`
/// directories, and is set by the `RCS_SIM_SW_ROOT` environment variable.
pub fn get_sw_root() -> Result<PathBuf, std::env::VarError> {
    std::env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}
