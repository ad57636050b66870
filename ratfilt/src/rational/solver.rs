//! Per-pole shifted solves `(s·I - A) x = rhs`.
//!
//! A filtered eigensolver applies the rational filter to vectors, which needs
//! one shifted solve per pole. Strategies are either supplied by the caller
//! (anything implementing [`ShiftedSolve`], closures included) or produced by
//! a [`ShiftedSolverFactory`] injected into the design kernel as the default.

use crate::error::Error;
use crate::kernel::{ConfigError, ExecInvariantViolation};
use nalgebra::{Complex, DMatrix, DVector, Dyn, LU};

/// Solve `(shift·I - A) x = rhs` for the shift a strategy was built for.
pub trait ShiftedSolve: Send + Sync {
    /// Return `x` with `x.len() == rhs.len()`.
    fn solve(&self, rhs: &[Complex<f64>]) -> Result<Vec<Complex<f64>>, Error>;
}

impl<F> ShiftedSolve for F
where
    F: Fn(&[Complex<f64>]) -> Result<Vec<Complex<f64>>, Error> + Send + Sync,
{
    fn solve(&self, rhs: &[Complex<f64>]) -> Result<Vec<Complex<f64>>, Error> {
        self(rhs)
    }
}

/// Builds a [`ShiftedSolve`] for each pole of a filter.
pub trait ShiftedSolverFactory: Send + Sync {
    /// Prepare a solver for `(shift·I - A)`, e.g. by factoring it.
    fn factor(&self, shift: Complex<f64>) -> Result<Box<dyn ShiftedSolve>, Error>;
}

/// Direct solver for a dense real symmetric matrix `A`.
///
/// Each call to [`ShiftedSolverFactory::factor`] computes an LU factorization
/// of `shift·I - A` once; solves reuse it.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseShiftedSolverFactory {
    matrix: DMatrix<f64>,
}

impl DenseShiftedSolverFactory {
    /// Wrap a square matrix.
    pub fn new(matrix: DMatrix<f64>) -> Result<Self, ConfigError> {
        if matrix.is_empty() {
            return Err(ConfigError::EmptyInput { arg: "matrix" });
        }
        if !matrix.is_square() {
            return Err(ConfigError::LengthMismatch {
                arg: "matrix columns",
                expected: matrix.nrows(),
                got: matrix.ncols(),
            });
        }
        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::NotFinite { arg: "matrix" });
        }
        Ok(Self { matrix })
    }

    /// Dimension of `A`.
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }
}

impl ShiftedSolverFactory for DenseShiftedSolverFactory {
    fn factor(&self, shift: Complex<f64>) -> Result<Box<dyn ShiftedSolve>, Error> {
        let n = self.dim();
        let shifted = DMatrix::from_fn(n, n, |i, j| {
            let diag = if i == j { shift } else { Complex::new(0.0, 0.0) };
            diag - self.matrix[(i, j)]
        });
        let lu = shifted.lu();
        if !lu.is_invertible() {
            return Err(Error::LinearSolveFailure {
                reason: format!("shifted matrix is singular at shift {shift}"),
            });
        }
        Ok(Box::new(DenseShiftedSolve { lu, dim: n }))
    }
}

struct DenseShiftedSolve {
    lu: LU<Complex<f64>, Dyn, Dyn>,
    dim: usize,
}

impl ShiftedSolve for DenseShiftedSolve {
    fn solve(&self, rhs: &[Complex<f64>]) -> Result<Vec<Complex<f64>>, Error> {
        if rhs.len() != self.dim {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "rhs",
                expected: self.dim,
                got: rhs.len(),
            }
            .into());
        }
        let x = self
            .lu
            .solve(&DVector::from_column_slice(rhs))
            .ok_or_else(|| Error::LinearSolveFailure {
                reason: "shifted matrix is singular".into(),
            })?;
        Ok(x.iter().copied().collect())
    }
}
