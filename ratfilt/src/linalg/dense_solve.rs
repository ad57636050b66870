use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle};
use nalgebra::{Complex, DMatrix, DVector};

/// General complex dense linear-solve capability.
pub trait DenseSolve {
    /// Solve `matrix · x = rhs`, consuming both operands.
    fn run(
        &self,
        matrix: DMatrix<Complex<f64>>,
        rhs: DVector<Complex<f64>>,
    ) -> Result<DVector<Complex<f64>>, ExecInvariantViolation>;
}

/// Constructor config for [`DenseSolveKernel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DenseSolveConfig {
    /// Optional expected system dimension.
    pub expected_dim: Option<usize>,
}

/// Partial-pivoting LU solve of a square complex system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DenseSolveKernel {
    expected_dim: Option<usize>,
}

impl KernelLifecycle for DenseSolveKernel {
    type Config = DenseSolveConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.expected_dim == Some(0) {
            return Err(ConfigError::InvalidArgument {
                arg: "expected_dim",
                reason: "linear system must have at least one unknown",
            });
        }
        Ok(Self {
            expected_dim: config.expected_dim,
        })
    }
}

impl DenseSolve for DenseSolveKernel {
    fn run(
        &self,
        matrix: DMatrix<Complex<f64>>,
        rhs: DVector<Complex<f64>>,
    ) -> Result<DVector<Complex<f64>>, ExecInvariantViolation> {
        let (nrows, ncols) = matrix.shape();
        if nrows == 0 {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "linear system must have at least one unknown",
            });
        }
        if nrows != ncols {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "matrix columns",
                expected: nrows,
                got: ncols,
            });
        }
        if let Some(expected_dim) = self.expected_dim {
            if nrows != expected_dim {
                return Err(ExecInvariantViolation::LengthMismatch {
                    arg: "matrix",
                    expected: expected_dim,
                    got: nrows,
                });
            }
        }
        if rhs.len() != nrows {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "rhs",
                expected: nrows,
                got: rhs.len(),
            });
        }

        let solution = matrix
            .lu()
            .solve(&rhs)
            .ok_or(ExecInvariantViolation::InvalidState {
                reason: "matrix is singular to working precision",
            })?;
        if solution.iter().any(|x| !(x.re.is_finite() && x.im.is_finite())) {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "solution is not finite; matrix is ill-conditioned",
            });
        }
        Ok(solution)
    }
}

///
/// Solve a square complex system with a pivoted LU factorization.
///
pub fn dense_solve(
    matrix: DMatrix<Complex<f64>>,
    rhs: DVector<Complex<f64>>,
) -> Result<DVector<Complex<f64>>, ExecInvariantViolation> {
    let kernel = DenseSolveKernel::try_new(DenseSolveConfig {
        expected_dim: Some(matrix.nrows()),
    })?;
    kernel.run(matrix, rhs)
}
