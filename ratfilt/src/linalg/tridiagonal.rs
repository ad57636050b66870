use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D};
use nalgebra::{DMatrix, SymmetricEigen};

/// Symmetric tridiagonal eigenvalue capability.
pub trait TridiagonalEigen1D {
    /// Ascending eigenvalues of the matrix with main diagonal `diag` and
    /// sub/super-diagonal `offdiag`.
    fn run<I1, I2>(&self, diag: &I1, offdiag: &I2) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I1: Read1D<f64> + ?Sized,
        I2: Read1D<f64> + ?Sized;
}

/// Constructor config for [`TridiagonalEigenKernel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TridiagonalEigenConfig {
    /// Optional expected matrix dimension.
    pub expected_dim: Option<usize>,
}

/// Trait-first symmetric tridiagonal eigenvalue kernel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TridiagonalEigenKernel {
    expected_dim: Option<usize>,
}

impl KernelLifecycle for TridiagonalEigenKernel {
    type Config = TridiagonalEigenConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.expected_dim == Some(0) {
            return Err(ConfigError::InvalidArgument {
                arg: "expected_dim",
                reason: "tridiagonal matrix must have at least one row",
            });
        }
        Ok(Self {
            expected_dim: config.expected_dim,
        })
    }
}

impl TridiagonalEigen1D for TridiagonalEigenKernel {
    fn run<I1, I2>(&self, diag: &I1, offdiag: &I2) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I1: Read1D<f64> + ?Sized,
        I2: Read1D<f64> + ?Sized,
    {
        let diag = diag.read_slice().map_err(ExecInvariantViolation::from)?;
        let offdiag = offdiag.read_slice().map_err(ExecInvariantViolation::from)?;
        if diag.is_empty() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "tridiagonal matrix must have at least one row",
            });
        }
        if let Some(expected_dim) = self.expected_dim {
            if diag.len() != expected_dim {
                return Err(ExecInvariantViolation::LengthMismatch {
                    arg: "diag",
                    expected: expected_dim,
                    got: diag.len(),
                });
            }
        }
        if offdiag.len() + 1 != diag.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "offdiag",
                expected: diag.len() - 1,
                got: offdiag.len(),
            });
        }
        eigenvalues_from_slices(diag, offdiag)
    }
}

fn eigenvalues_from_slices(
    diag: &[f64],
    offdiag: &[f64],
) -> Result<Vec<f64>, ExecInvariantViolation> {
    let n = diag.len();
    let matrix = DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            diag[i]
        } else if i + 1 == j {
            offdiag[i]
        } else if j + 1 == i {
            offdiag[j]
        } else {
            0.0
        }
    });
    // max_niter = 0 iterates until convergence
    let eigen = SymmetricEigen::try_new(matrix, f64::EPSILON, 0).ok_or(
        ExecInvariantViolation::InvalidState {
            reason: "tridiagonal eigen-decomposition did not converge",
        },
    )?;
    let mut eigenvalues: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    eigenvalues.sort_by(|a, b| a.total_cmp(b));
    Ok(eigenvalues)
}

///
/// Ascending eigenvalues of a symmetric tridiagonal matrix.
///
/// `offdiag` must hold exactly `diag.len() - 1` entries.
///
pub fn tridiagonal_eigenvalues(
    diag: &[f64],
    offdiag: &[f64],
) -> Result<Vec<f64>, ExecInvariantViolation> {
    let kernel = TridiagonalEigenKernel::try_new(TridiagonalEigenConfig {
        expected_dim: Some(diag.len()),
    })?;
    kernel.run(diag, offdiag)
}
