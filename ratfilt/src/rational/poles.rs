//! Pole placement by contour quadrature on the upper unit semicircle.

use core::f64::consts::{FRAC_PI_2, PI};

use crate::kernel::ExecInvariantViolation;
use crate::linalg::tridiagonal_eigenvalues;
use nalgebra::Complex;

/// Quadrature rule used to place the poles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolePlacement {
    /// Gauss-Legendre nodes mapped onto the semicircle.
    GaussLegendre,
    /// Equally spaced midpoint-rule nodes.
    #[default]
    Midpoint,
}

/// Place `n` poles in the open upper half-plane.
///
/// [`PolePlacement::GaussLegendre`] takes the eigenvalues `D` of the Legendre
/// Jacobi matrix (zero diagonal, off-diagonal `0.5 / sqrt(1 - (2i)^-2)`) and
/// maps each to `exp(iπ/2 · (1 - D))`. [`PolePlacement::Midpoint`] returns
/// `exp(iπ(2k - 1) / 2n)` for `k = 1..=n`. Every pole has unit modulus and an
/// angle in `(0, π)`.
pub fn contour_poles(
    method: PolePlacement,
    n: usize,
) -> Result<Vec<Complex<f64>>, ExecInvariantViolation> {
    if n == 0 {
        return Err(ExecInvariantViolation::InvalidState {
            reason: "at least one pole is required",
        });
    }
    match method {
        PolePlacement::GaussLegendre => {
            let diag = vec![0.0; n];
            let offdiag: Vec<f64> = (1..n)
                .map(|i| 0.5 / (1.0 - (2.0 * i as f64).powi(-2)).sqrt())
                .collect();
            let nodes = tridiagonal_eigenvalues(&diag, &offdiag)?;
            Ok(nodes
                .iter()
                .map(|d| Complex::from_polar(1.0, FRAC_PI_2 * (1.0 - d)))
                .collect())
        }
        PolePlacement::Midpoint => {
            let denom = 2.0 * n as f64;
            Ok((1..=n)
                .map(|k| Complex::from_polar(1.0, PI * (2 * k - 1) as f64 / denom))
                .collect())
        }
    }
}
