use core::fmt;

/// Rejected kernel configuration, shifted-solver setup or 1D adapter binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `arg` has no entries, e.g. an empty multiplicity list or a 0×0 matrix.
    EmptyInput {
        /// Offending field.
        arg: &'static str,
    },
    /// `arg` holds a value outside its domain.
    InvalidArgument {
        /// Offending field.
        arg: &'static str,
        /// What the value must satisfy.
        reason: &'static str,
    },
    /// `arg` contains NaN or an infinity.
    NotFinite {
        /// Offending field.
        arg: &'static str,
    },
    /// `arg` is a strided view that cannot be borrowed as a slice.
    NonContiguous {
        /// Offending field.
        arg: &'static str,
    },
    /// `arg` has `got` entries where `expected` are needed, e.g. one strategy per pole.
    LengthMismatch {
        /// Offending field.
        arg: &'static str,
        /// Count implied by the rest of the configuration.
        expected: usize,
        /// Count supplied.
        got: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyInput { arg } => write!(f, "`{arg}` must not be empty"),
            ConfigError::InvalidArgument { arg, reason } => write!(f, "`{arg}`: {reason}"),
            ConfigError::NotFinite { arg } => write!(f, "`{arg}` contains NaN or infinity"),
            ConfigError::NonContiguous { arg } => {
                write!(f, "`{arg}` must be contiguous to be read as a slice")
            }
            ConfigError::LengthMismatch { arg, expected, got } => {
                write!(f, "`{arg}` holds {got} entries, {expected} required")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure inside a checked run: a numerical step that could not complete, or
/// buffers whose sizes disagree at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecInvariantViolation {
    /// Numerical breakdown, such as a singular system or a vanishing filter.
    InvalidState {
        /// What broke down.
        reason: &'static str,
    },
    /// A run-time buffer has the wrong length.
    LengthMismatch {
        /// Offending buffer.
        arg: &'static str,
        /// Length implied by the inputs.
        expected: usize,
        /// Length supplied or produced.
        got: usize,
    },
    /// An input or output buffer could not be bound.
    Config(ConfigError),
}

impl From<ConfigError> for ExecInvariantViolation {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl fmt::Display for ExecInvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecInvariantViolation::InvalidState { reason } => write!(f, "{reason}"),
            ExecInvariantViolation::LengthMismatch { arg, expected, got } => {
                write!(f, "buffer `{arg}` has length {got}, expected {expected}")
            }
            ExecInvariantViolation::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ExecInvariantViolation {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecInvariantViolation::Config(err) => Some(err),
            _ => None,
        }
    }
}
