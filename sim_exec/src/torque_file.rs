//! # Constant torque-setting input file
//!
//! A plain-text file holding a single floating-point literal, read once at
//! process start. There is no schema or versioning - the file is just the
//! number. A missing or malformed file is fatal to the process.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fs::read_to_string;
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

/// An error that occurs while reading the torque setting file.
#[derive(Debug, Error)]
pub enum TorqueFileError {
    #[error("The software root environment variable (RCS_SIM_SW_ROOT) is not set")]
    SwRootNotSet,

    #[error("Cannot load the torque setting file: {0}")]
    FileLoadError(std::io::Error),

    #[error("Cannot parse the torque setting: {0}")]
    ParseError(std::num::ParseFloatError),
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Read the torque setting from the given file.
///
/// The file path is relative to the software root.
pub fn load(torque_file_path: &str) -> Result<f64, TorqueFileError> {
    let mut path = util::host::get_sw_root()
        .map_err(|_| TorqueFileError::SwRootNotSet)?;
    path.push(torque_file_path);

    let contents = read_to_string(path).map_err(TorqueFileError::FileLoadError)?;

    parse_setting(&contents)
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Parse the file contents as a single floating point literal.
fn parse_setting(contents: &str) -> Result<f64, TorqueFileError> {
    contents
        .trim()
        .parse::<f64>()
        .map_err(TorqueFileError::ParseError)
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_setting() {
        assert_eq!(parse_setting("2000.0").unwrap(), 2000.0);
        assert_eq!(parse_setting("  -1.5e2 \n").unwrap(), -150.0);
    }

    #[test]
    fn test_parse_setting_malformed() {
        assert!(parse_setting("").is_err());
        assert!(parse_setting("ten").is_err());
        assert!(parse_setting("1.0 2.0").is_err());
    }
}
