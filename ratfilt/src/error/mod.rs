//! Crate-level error type.

use core::{error, fmt};

use crate::kernel::{ConfigError, ExecInvariantViolation};
use crate::rational::Interval;

/// Errors raised whilst building or applying a rational filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The target interval is empty, inverted, non-finite or disjoint from the
    /// global spectrum bounds. Raised before any pole work starts.
    InvalidInterval {
        /// Requested interval of wanted eigenvalues.
        target: Interval,
        /// Interval known to contain the whole spectrum.
        global: Interval,
        /// Explaining why the interval was rejected.
        reason: &'static str,
    },
    /// No per-pole shifted solves were supplied and no default solver was injected.
    MissingSolverStrategy,
    /// The dense complex system, or a shifted system, could not be solved.
    LinearSolveFailure {
        /// Explaining which solve failed.
        reason: String,
    },
    /// Kernel or strategy configuration was rejected.
    Config(ConfigError),
    /// A checked kernel entrypoint hit a violated invariant.
    Exec(ExecInvariantViolation),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInterval {
                target,
                global,
                reason,
            } => write!(
                f,
                "Invalid interval ({:e}, {:e}) within ({:e}, {:e}): {reason}",
                target.lo, target.hi, global.lo, global.hi
            ),
            Error::MissingSolverStrategy => write!(
                f,
                "No shifted solver strategy was supplied and no default solver is available."
            ),
            Error::LinearSolveFailure { reason } => write!(f, "Linear solve failed: {reason}"),
            Error::Config(err) => write!(f, "{err}"),
            Error::Exec(err) => write!(f, "{err}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Exec(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        Error::Config(value)
    }
}

impl From<ExecInvariantViolation> for Error {
    fn from(value: ExecInvariantViolation) -> Self {
        Error::Exec(value)
    }
}
