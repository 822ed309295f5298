//! One-time LQR gain computation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{DMatrix, DVector};

// Internal
use super::LqrCtrlError;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Convergence tolerance on the elementwise change of the Riccati solution
/// between iterations.
const RICCATI_TOL: f64 = 1e-10;

/// Pseudo-time step used to integrate the Riccati ODE to its fixed point.
///
/// Units: seconds
const RICCATI_STEP_S: f64 = 1e-3;

/// Iteration limit for the Riccati solve.
const RICCATI_MAX_ITER: usize = 5_000_000;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The gains produced by a one-time LQR solve for `(A, B, Q, R)`.
///
/// `K` minimises the infinite-horizon quadratic cost
/// `integral(x'Qx + u'Ru) dt` subject to `x_dot = A*x + B*u`. The polarity
/// matrix `S = -R^-1 * B' * P` expresses the same feedback law from the
/// Riccati solution `P` directly, and is kept as an independent expression
/// path so the two can be checked against each other.
#[derive(Debug, Clone, PartialEq)]
pub struct LqrGain {
    /// Feedback gain `K = R^-1 * B' * P`.
    k: DMatrix<f64>,

    /// Polarity form `S = -R^-1 * B' * P`.
    s: DMatrix<f64>,

    /// The algebraic Riccati equation solution `P`.
    p: DMatrix<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LqrGain {
    /// Solve the LQR problem for the given dynamics and cost weights.
    ///
    /// `Q` is the state penalty (diagonal, positive semi-definite), `R` the
    /// input penalty (positive definite).
    pub fn new(
        a: &DMatrix<f64>,
        b: &DMatrix<f64>,
        q: &DMatrix<f64>,
        r: &DMatrix<f64>,
    ) -> Result<Self, LqrCtrlError> {
        let r_inv = r.clone().try_inverse().ok_or(LqrCtrlError::RNotInvertible)?;

        let p = solve_riccati(a, b, q, &r_inv)?;

        let bt_p = b.transpose() * &p;
        let k = &r_inv * &bt_p;
        let s = -(&r_inv * &bt_p);

        Ok(Self { k, s, p })
    }

    /// The feedback gain matrix `K`.
    pub fn gain(&self) -> &DMatrix<f64> {
        &self.k
    }

    /// The Riccati solution `P`.
    pub fn riccati_solution(&self) -> &DMatrix<f64> {
        &self.p
    }

    /// Number of states the gain expects.
    pub fn num_states(&self) -> usize {
        self.k.ncols()
    }

    /// The feedback law `u = -K*x`.
    pub fn control(&self, x: &DVector<f64>) -> DVector<f64> {
        -(&self.k * x)
    }

    /// The equivalent polarity form `u = S*x`, `S = -R^-1 * B' * P`.
    pub fn control_via_polarity(&self, x: &DVector<f64>) -> DVector<f64> {
        &self.s * x
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Solve the continuous-time algebraic Riccati equation
/// `A'P + PA + Q - P B R^-1 B' P = 0` by integrating the Riccati ODE to its
/// stationary point.
fn solve_riccati(
    a: &DMatrix<f64>,
    b: &DMatrix<f64>,
    q: &DMatrix<f64>,
    r_inv: &DMatrix<f64>,
) -> Result<DMatrix<f64>, LqrCtrlError> {
    let at = a.transpose();
    let bt = b.transpose();

    let mut p = q.clone();

    for _ in 0..RICCATI_MAX_ITER {
        let residual = &at * &p + &p * a + q - &p * b * r_inv * &bt * &p;
        let p_next = &p + &residual * RICCATI_STEP_S;

        let diff = (&p_next - &p).amax();
        p = p_next;

        if diff < RICCATI_TOL {
            return Ok(p);
        }
    }

    Err(LqrCtrlError::RiccatiNotConverged(RICCATI_MAX_ITER))
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// The single-body roll regulation problem: A = [[0,1],[0,0]],
    /// B = [[0],[1/I]], Q = diag(100, 1), R = [[1]].
    fn single_body_problem() -> (DMatrix<f64>, DMatrix<f64>, DMatrix<f64>, DMatrix<f64>) {
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.0, 0.0]);
        let b = DMatrix::from_row_slice(2, 1, &[0.0, 1.0 / 0.082]);
        let q = DMatrix::from_row_slice(2, 2, &[100.0, 0.0, 0.0, 1.0]);
        let r = DMatrix::from_element(1, 1, 1.0);
        (a, b, q, r)
    }

    #[test]
    fn test_gain_against_closed_form() {
        // For this problem the CARE has a closed form:
        // K = [sqrt(q1/r), sqrt(2*sqrt(q1/r)/b + q2/r)] with b = 1/I
        let (a, b, q, r) = single_body_problem();
        let gain = LqrGain::new(&a, &b, &q, &r).unwrap();

        let k = gain.gain();
        assert!((k[(0, 0)] - 10.0).abs() < 1e-4, "k1 = {}", k[(0, 0)]);

        let expected_k2 = (2.0 * 10.0 * 0.082 + 1.0f64).sqrt();
        assert!((k[(0, 1)] - expected_k2).abs() < 1e-4, "k2 = {}", k[(0, 1)]);
    }

    #[test]
    fn test_riccati_residual_is_stationary() {
        let (a, b, q, r) = single_body_problem();
        let gain = LqrGain::new(&a, &b, &q, &r).unwrap();

        let p = gain.riccati_solution();
        let r_inv = r.clone().try_inverse().unwrap();
        let residual =
            a.transpose() * p + p * &a + &q - p * &b * &r_inv * b.transpose() * p;

        assert!(residual.amax() < 1e-5, "residual = {}", residual.amax());
    }

    #[test]
    fn test_control_law_equivalence() {
        // -K*x and S*x are algebraically identical and must agree tightly
        let (a, b, q, r) = single_body_problem();
        let gain = LqrGain::new(&a, &b, &q, &r).unwrap();

        let states = [
            vec![std::f64::consts::PI / 2.0, 10.0],
            vec![-3.0, 0.5],
            vec![1e4, -1e4],
            vec![0.0, 0.0],
        ];

        for s in states.iter() {
            let x = DVector::from_vec(s.clone());
            let u_gain = gain.control(&x);
            let u_polarity = gain.control_via_polarity(&x);

            let scale = u_gain.amax().max(1e-12);
            assert!(
                (&u_gain - &u_polarity).amax() / scale < 1e-9,
                "u = {} vs {}",
                u_gain[0],
                u_polarity[0]
            );
        }
    }

    #[test]
    fn test_singular_r_rejected() {
        let (a, b, q, _) = single_body_problem();
        let r = DMatrix::from_element(1, 1, 0.0);

        assert!(matches!(
            LqrGain::new(&a, &b, &q, &r),
            Err(LqrCtrlError::RNotInvertible)
        ));
    }
}
