//! Trait interfaces for rational filter capabilities.

use crate::error::Error;
use crate::kernel::{ExecInvariantViolation, Read1D, Write1D};

use super::Interval;

/// Rational filter design capability.
pub trait RationalFilterDesign {
    /// Designed filter representation.
    type Output;

    /// Design a filter for `target`, clipped to the spectrum bounds `global`.
    fn build(&self, target: Interval, global: Interval) -> Result<Self::Output, Error>;
}

/// Evaluation of a designed filter at real abscissas.
pub trait RationalFilterEval1D {
    /// Evaluate into a caller-provided output buffer of the same length as `input`.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized,
        O: Write1D<f64> + ?Sized;

    /// Evaluate and allocate output.
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized;
}
