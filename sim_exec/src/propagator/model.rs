//! Linear time-invariant dynamics model and Euler stepping

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{DMatrix, DVector};

// Internal
use super::PropagatorError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A linear time-invariant dynamics model `x_dot = A*x + B*u`.
///
/// `A` and `B` are fixed for the duration of a simulation run, derived once
/// from the physical constants of the body.
#[derive(Debug, Clone, PartialEq)]
pub struct LtiModel {
    a: DMatrix<f64>,
    b: DMatrix<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LtiModel {
    /// Create a model from explicit `A` and `B` matrices.
    ///
    /// Fails fast if `A` is not square or `B` does not have one row per
    /// state - shapes are never silently broadcast.
    pub fn new(a: DMatrix<f64>, b: DMatrix<f64>) -> Result<Self, PropagatorError> {
        if !a.is_square() || b.nrows() != a.nrows() {
            return Err(PropagatorError::ModelShapeMismatch {
                a_rows: a.nrows(),
                a_cols: a.ncols(),
                b_rows: b.nrows(),
                b_cols: b.ncols(),
            });
        }

        Ok(Self { a, b })
    }

    /// Single rigid body spinning about one axis, 2 states
    /// `[theta, theta_dot]`, torque acting directly on the body.
    pub fn single_body(body_inertia_kgm2: f64) -> Self {
        let a = DMatrix::from_row_slice(2, 2, &[
            0.0, 1.0,
            0.0, 0.0,
        ]);
        let b = DMatrix::from_row_slice(2, 1, &[
            0.0,
            1.0 / body_inertia_kgm2,
        ]);

        Self { a, b }
    }

    /// Body plus reaction wheel, 4 states
    /// `[theta_body, theta_wheel, thetadot_body, thetadot_wheel]`. The wheel
    /// torque reacts on the body with opposite sign.
    pub fn reaction_wheel(body_inertia_kgm2: f64, wheel_inertia_kgm2: f64) -> Self {
        let a = DMatrix::from_row_slice(4, 4, &[
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
            0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0,
        ]);
        let b = DMatrix::from_row_slice(4, 1, &[
            0.0,
            0.0,
            -1.0 / body_inertia_kgm2,
            1.0 / wheel_inertia_kgm2,
        ]);

        Self { a, b }
    }

    /// Number of states in the model.
    pub fn num_states(&self) -> usize {
        self.a.nrows()
    }

    /// Number of control inputs to the model.
    pub fn num_inputs(&self) -> usize {
        self.b.ncols()
    }

    /// The state-transition matrix `A`.
    pub fn a(&self) -> &DMatrix<f64> {
        &self.a
    }

    /// The input-mapping matrix `B`.
    pub fn b(&self) -> &DMatrix<f64> {
        &self.b
    }

    /// The state rate `x_dot = A*x + B*u`.
    pub fn derivative(
        &self,
        x: &DVector<f64>,
        u: &DVector<f64>,
    ) -> Result<DVector<f64>, PropagatorError> {
        if x.len() != self.num_states() || u.len() != self.num_inputs() {
            return Err(PropagatorError::StateShapeMismatch {
                num_states: self.num_states(),
                num_inputs: self.num_inputs(),
                x_len: x.len(),
                u_len: u.len(),
            });
        }

        Ok(&self.a * x + &self.b * u)
    }

    /// Advance the state one step with explicit forward-Euler integration:
    /// `x_{t+1} = x_t + (A*x_t + B*u)*dt`.
    pub fn step(
        &self,
        x: &mut DVector<f64>,
        u: &DVector<f64>,
        dt_s: f64,
    ) -> Result<(), PropagatorError> {
        let x_dot = self.derivative(x, u)?;
        *x += x_dot * dt_s;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const PI: f64 = std::f64::consts::PI;

    #[test]
    fn test_shape_mismatch_fails_fast() {
        // B with the wrong number of rows
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.0, 0.0]);
        let b = DMatrix::from_row_slice(3, 1, &[0.0, 0.0, 1.0]);
        assert!(LtiModel::new(a, b).is_err());

        // Non-square A
        let a = DMatrix::from_row_slice(2, 3, &[0.0; 6]);
        let b = DMatrix::from_row_slice(2, 1, &[0.0, 1.0]);
        assert!(LtiModel::new(a, b).is_err());
    }

    #[test]
    fn test_state_shape_mismatch_fails_fast() {
        let model = LtiModel::single_body(0.082);

        let x = DVector::from_vec(vec![0.0, 0.0, 0.0]);
        let u = DVector::from_element(1, 0.0);
        assert!(model.derivative(&x, &u).is_err());

        let x = DVector::from_vec(vec![0.0, 0.0]);
        let u = DVector::from_vec(vec![0.0, 0.0]);
        assert!(model.derivative(&x, &u).is_err());
    }

    #[test]
    fn test_single_body_kinematic_drift() {
        // One step of pure kinematic drift with no control: the angle picks
        // up rate * dt, the rate is unchanged
        let model = LtiModel::single_body(0.082);

        let mut x = DVector::from_vec(vec![PI / 2.0, 10.0]);
        let u = DVector::from_element(1, 0.0);

        model.step(&mut x, &u, 0.001).unwrap();

        assert_eq!(x[0], PI / 2.0 + 10.0 * 0.001);
        assert_eq!(x[1], 10.0);
    }

    #[test]
    fn test_single_body_torque_response() {
        // Constant torque from rest: rate integrates u/I per step
        let inertia = 0.082;
        let model = LtiModel::single_body(inertia);

        let mut x = DVector::from_vec(vec![0.0, 0.0]);
        let u = DVector::from_element(1, 1.0);

        model.step(&mut x, &u, 0.001).unwrap();

        assert_eq!(x[0], 0.0);
        assert_eq!(x[1], 0.001 / inertia);
    }

    #[test]
    fn test_reaction_wheel_torque_reaction() {
        // Wheel torque spins the wheel up and the body the opposite way
        let i_body = 0.082;
        let i_wheel = 2.0 * 0.078359 * 0.078359;
        let model = LtiModel::reaction_wheel(i_body, i_wheel);

        let mut x = DVector::from_vec(vec![0.0, 0.0, 0.0, 0.0]);
        let u = DVector::from_element(1, 1.0);

        model.step(&mut x, &u, 0.001).unwrap();

        assert_eq!(x[2], -0.001 / i_body);
        assert_eq!(x[3], 0.001 / i_wheel);
    }

    #[test]
    fn test_step_determinism() {
        // Identical inputs give bit-identical trajectories
        let model = LtiModel::reaction_wheel(0.082, 0.0123);

        let run = || {
            let mut x = DVector::from_vec(vec![100.0, 0.0, 0.0, 0.0]);
            for i in 0..1000 {
                let u = DVector::from_element(1, (i as f64 * 0.01).sin());
                model.step(&mut x, &u, 0.001).unwrap();
            }
            x
        };

        assert_eq!(run(), run());
    }
}
