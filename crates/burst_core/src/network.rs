//! Right-hand side of the linear capture chain.
//!
//! The burst network is strictly sequential: species i feeds species i + 1
//! and nothing else, which makes the system matrix lower bidiagonal. The
//! numerical integrators in [`crate::driver`] handle arbitrary chains; the
//! matrix-exponential path here doubles as an analytic reference.

use nalgebra::{DMatrix, DVector};

use crate::error::{BurstError, Result};
use crate::traits::ExposureSystem;

/// The capture-chain ODE system d y / d tau for a fixed cross-section set.
#[derive(Debug, Clone)]
pub struct CaptureSystem {
    sigma: DVector<f64>,
}

impl CaptureSystem {
    /// Builds the system for a chain of `dimension` species.
    ///
    /// `sigma` holds millibarn cross sections in chain order and may have
    /// length `dimension` or `dimension - 1`; the terminal entry of a
    /// multi-species chain is physically meaningless and is stored as zero
    /// either way. A single-species chain keeps its lone cross section and
    /// decays out of the chain.
    pub fn new(sigma: &[f64], dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(BurstError::InvalidChain(
                "system dimension must be at least 1".into(),
            ));
        }
        // The N - 1 shorthand omits only the terminal sink's entry, so it
        // needs a terminal sink to exist; a lone species still captures and
        // must supply its own cross section.
        if sigma.len() != dimension && !(dimension >= 2 && sigma.len() + 1 == dimension) {
            return Err(BurstError::InvalidChain(format!(
                "cross-section array has length {}; expected {} or {}",
                sigma.len(),
                dimension,
                dimension - 1
            )));
        }
        for (i, &s) in sigma.iter().enumerate() {
            if !s.is_finite() || s < 0.0 {
                return Err(BurstError::InvalidChain(format!(
                    "cross section at position {i} is {s}; must be finite and non-negative"
                )));
            }
        }
        let mut stored = DVector::zeros(dimension);
        for (i, &s) in sigma.iter().enumerate().take(dimension) {
            stored[i] = s;
        }
        if dimension >= 2 {
            stored[dimension - 1] = 0.0;
        }
        Ok(Self { sigma: stored })
    }

    pub fn sigma(&self) -> &DVector<f64> {
        &self.sigma
    }

    /// The lower-bidiagonal system matrix A with dy/dtau = A y.
    pub fn transfer_matrix(&self) -> DMatrix<f64> {
        let n = self.sigma.len();
        let mut a = DMatrix::zeros(n, n);
        for i in 0..n {
            a[(i, i)] = -self.sigma[i];
            if i > 0 {
                a[(i, i - 1)] = self.sigma[i - 1];
            }
        }
        a
    }

    /// Exact solution exp(A·tau)·y0 via the matrix exponential.
    ///
    /// Used as a reference path for the numerical integrators; exact up to
    /// the accuracy of the scaling-and-squaring exponential.
    pub fn solve_analytic(&self, y0: &DVector<f64>, tau: f64) -> Result<DVector<f64>> {
        if !tau.is_finite() || tau < 0.0 {
            return Err(BurstError::InvalidExposure(format!(
                "exposure {tau} must be finite and non-negative"
            )));
        }
        if y0.len() != self.sigma.len() {
            return Err(BurstError::InvalidChain(format!(
                "abundance vector has length {}; system dimension is {}",
                y0.len(),
                self.sigma.len()
            )));
        }
        Ok((self.transfer_matrix() * tau).exp() * y0)
    }
}

impl ExposureSystem for CaptureSystem {
    fn dimension(&self) -> usize {
        self.sigma.len()
    }

    fn rhs(&self, _tau: f64, y: &DVector<f64>, out: &mut DVector<f64>) {
        let n = self.sigma.len();
        out[0] = -self.sigma[0] * y[0];
        for i in 1..n {
            // sigma[n - 1] is stored as zero, so the terminal species is a
            // pure sink.
            out[i] = self.sigma[i - 1] * y[i - 1] - self.sigma[i] * y[i];
        }
    }
}
