//! # Actuator saturation model
//!
//! Commanded moments are limited to what the actuator can physically produce.
//! The limit follows from geometry: a thruster of some maximum force acting
//! on a moment arm. Saturation is signum-based rather than an interval clip,
//! so a command exactly at the bound passes through unchanged and an
//! over-bound command comes out at exactly `sign(cmd) * max_moment`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

/// Saturation policy applied to a commanded moment before it reaches the
/// plant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SaturationPolicy {
    /// Commanded moments pass through unchanged.
    Unlimited,

    /// Moments are limited to `radius_m * max_force_n`, the largest moment
    /// the thruster can produce about the axis.
    Geometric {
        /// Moment arm of the actuator.
        ///
        /// Units: meters
        radius_m: f64,

        /// Maximum force the actuator can produce.
        ///
        /// Units: newtons
        max_force_n: f64,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Default for SaturationPolicy {
    fn default() -> Self {
        SaturationPolicy::Unlimited
    }
}

impl SaturationPolicy {
    /// The largest moment this policy will let through, or `None` if
    /// unlimited.
    ///
    /// Units: newton meters
    pub fn max_moment_nm(&self) -> Option<f64> {
        match *self {
            SaturationPolicy::Unlimited => None,
            SaturationPolicy::Geometric {
                radius_m,
                max_force_n,
            } => Some(radius_m * max_force_n),
        }
    }

    /// Apply the policy to a commanded moment.
    pub fn apply(&self, cmd_nm: f64) -> f64 {
        match self.max_moment_nm() {
            Some(max_moment_nm) if cmd_nm.abs() > max_moment_nm => {
                cmd_nm.signum() * max_moment_nm
            }
            _ => cmd_nm,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_unlimited_passes_through() {
        let policy = SaturationPolicy::Unlimited;

        assert_eq!(policy.max_moment_nm(), None);
        assert_eq!(policy.apply(1e9), 1e9);
        assert_eq!(policy.apply(-1e9), -1e9);
    }

    #[test]
    fn test_geometric_max_moment() {
        let policy = SaturationPolicy::Geometric {
            radius_m: 0.5,
            max_force_n: 20.0,
        };

        assert_eq!(policy.max_moment_nm(), Some(10.0));
    }

    #[test]
    fn test_geometric_boundary() {
        let policy = SaturationPolicy::Geometric {
            radius_m: 0.5,
            max_force_n: 20.0,
        };

        // Exactly at the bound the command is unclipped
        assert_eq!(policy.apply(10.0), 10.0);
        assert_eq!(policy.apply(-10.0), -10.0);

        // Just over the bound it comes out at exactly sign * max
        let eps = 1e-12;
        assert_eq!(policy.apply(10.0 + eps), 10.0);
        assert_eq!(policy.apply(-10.0 - eps), -10.0);
    }

    #[test]
    fn test_geometric_in_range() {
        let policy = SaturationPolicy::Geometric {
            radius_m: 0.5,
            max_force_n: 20.0,
        };

        assert_eq!(policy.apply(3.25), 3.25);
        assert_eq!(policy.apply(-7.5), -7.5);
        assert_eq!(policy.apply(0.0), 0.0);
    }
}
