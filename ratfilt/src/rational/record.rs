//! The designed filter: poles, weights, bounds and attached shifted solves.

use core::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::kernel::{ConfigError, ExecInvariantViolation, Read1D, Write1D};
use nalgebra::Complex;
use num_traits::Zero;
use tracing::{debug, trace};

use super::eval::{eval_filter, eval_filter_into, FILTER_BAR};
use super::poles::PolePlacement;
use super::solver::{ShiftedSolve, ShiftedSolverFactory};
use super::traits::RationalFilterEval1D;
use super::Interval;

/// A least-squares rational filter for an interval `[a, b]`.
///
/// Built by [`RatFilterKernel`](super::RatFilterKernel); the poles and
/// weights never change afterwards. The filter value at a real `z` is
/// `2·Re(Σ_j Σ_k omega_jk / (z - pole_j)^(k+1))`, equal to one half at `a`.
///
/// Shifted-solve strategies are optional and only needed by
/// [`RatFilter::apply`].
pub struct RatFilter {
    poles: Vec<Complex<f64>>,
    multiplicities: Vec<usize>,
    omega: Vec<Complex<f64>>,
    placement: PolePlacement,
    beta: f64,
    interval: Interval,
    strategies: Option<Vec<Box<dyn ShiftedSolve>>>,
    default_solver: Option<Arc<dyn ShiftedSolverFactory>>,
}

impl RatFilter {
    pub(crate) fn new(
        poles: Vec<Complex<f64>>,
        multiplicities: Vec<usize>,
        omega: Vec<Complex<f64>>,
        placement: PolePlacement,
        beta: f64,
        interval: Interval,
        default_solver: Option<Arc<dyn ShiftedSolverFactory>>,
    ) -> Self {
        debug_assert_eq!(poles.len(), multiplicities.len());
        debug_assert_eq!(omega.len(), multiplicities.iter().sum::<usize>());
        Self {
            poles,
            multiplicities,
            omega,
            placement,
            beta,
            interval,
            strategies: None,
            default_solver,
        }
    }

    /// Number of poles in the upper half-plane.
    pub fn num_poles(&self) -> usize {
        self.poles.len()
    }

    /// Pole locations on the target interval, all with positive imaginary part.
    pub fn poles(&self) -> &[Complex<f64>] {
        &self.poles
    }

    /// Multiplicity of each pole.
    pub fn multiplicities(&self) -> &[usize] {
        &self.multiplicities
    }

    /// Expansion coefficients grouped by pole, in increasing order.
    pub fn omega(&self) -> &[Complex<f64>] {
        &self.omega
    }

    /// Sum of the multiplicities, i.e. `omega().len()`.
    pub fn total_order(&self) -> usize {
        self.omega.len()
    }

    /// Quadrature rule the poles were placed with.
    pub fn placement(&self) -> PolePlacement {
        self.placement
    }

    /// Least-squares weight used for the solve, after clamping.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Target interval after clipping to the global bounds.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Center of [`RatFilter::interval`].
    pub fn center(&self) -> f64 {
        self.interval.center()
    }

    /// Half-width of [`RatFilter::interval`].
    pub fn half_width(&self) -> f64 {
        self.interval.half_width()
    }

    /// Filter value at the interval endpoints. Eigensolvers treat Ritz values
    /// whose filtered value exceeds it as lying inside the interval.
    pub fn bar(&self) -> f64 {
        FILTER_BAR
    }

    /// Filter value at a real abscissa.
    pub fn evaluate(&self, z: f64) -> f64 {
        eval_filter(&self.poles, &self.multiplicities, &self.omega, z)
    }

    /// Whether per-pole shifted solves are attached.
    pub fn has_solver_strategy(&self) -> bool {
        self.strategies.is_some()
    }

    /// Attach one shifted-solve strategy per pole.
    ///
    /// With `None`, the default factory injected into the design kernel
    /// prepares a solver for every pole; without one this fails with
    /// [`Error::MissingSolverStrategy`]. With `Some`, exactly
    /// [`RatFilter::num_poles`] strategies are required, where strategy `j`
    /// solves `(poles()[j]·I - A) x = rhs`. Strategies can only be attached
    /// once; [`RatFilter::detach_solver_strategy`] clears them.
    pub fn attach_solver_strategy(
        &mut self,
        strategies: Option<Vec<Box<dyn ShiftedSolve>>>,
    ) -> Result<(), Error> {
        if self.strategies.is_some() {
            return Err(ConfigError::InvalidArgument {
                arg: "strategies",
                reason: "solver strategies are already attached",
            }
            .into());
        }
        let strategies = match strategies {
            Some(strategies) => {
                if strategies.len() != self.num_poles() {
                    return Err(ConfigError::LengthMismatch {
                        arg: "strategies",
                        expected: self.num_poles(),
                        got: strategies.len(),
                    }
                    .into());
                }
                strategies
            }
            None => {
                let factory = self
                    .default_solver
                    .as_ref()
                    .ok_or(Error::MissingSolverStrategy)?;
                self.poles
                    .iter()
                    .map(|&pole| {
                        trace!(
                            re = pole.re,
                            im = pole.im,
                            "preparing default shifted solve"
                        );
                        factory.factor(pole)
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
        };
        debug!(count = strategies.len(), "shifted solve strategies attached");
        self.strategies = Some(strategies);
        Ok(())
    }

    /// Drop any attached strategies.
    pub fn detach_solver_strategy(&mut self) {
        self.strategies = None;
    }

    /// Apply the filter to a real vector: `2·Re(Σ_j Σ_k omega_jk (A - pole_j)^-(k+1) b)`.
    ///
    /// Each pole block runs the same back-to-front recurrence as
    /// [`RatFilter::evaluate`], with `(A - s)^-1 r = -(s·I - A)^-1 r`
    /// computed by the attached strategy.
    pub fn apply(&self, rhs: &[f64]) -> Result<Vec<f64>, Error> {
        let strategies = self
            .strategies
            .as_ref()
            .ok_or(Error::MissingSolverStrategy)?;
        let n = rhs.len();
        let b: Vec<Complex<f64>> = rhs.iter().map(|&v| Complex::new(v, 0.0)).collect();
        let mut y = vec![0.0; n];

        let mut offset = 0;
        for (strategy, &mult) in strategies.iter().zip(&self.multiplicities) {
            let mut t: Vec<Complex<f64>> = vec![Complex::zero(); n];
            for &w in self.omega[offset..offset + mult].iter().rev() {
                let r: Vec<Complex<f64>> = b
                    .iter()
                    .zip(&t)
                    .map(|(&bi, &ti)| bi * w + ti)
                    .collect();
                let x = strategy.solve(&r)?;
                if x.len() != n {
                    return Err(ExecInvariantViolation::LengthMismatch {
                        arg: "shifted solve output",
                        expected: n,
                        got: x.len(),
                    }
                    .into());
                }
                t = x.into_iter().map(|v| -v).collect();
            }
            y.iter_mut()
                .zip(&t)
                .for_each(|(yi, ti)| *yi += 2.0 * ti.re);
            offset += mult;
        }
        Ok(y)
    }

    /// Release the filter and everything it owns.
    pub fn release(self) {
        debug!(
            num_poles = self.num_poles(),
            strategies = self.has_solver_strategy(),
            "rational filter released"
        );
    }
}

impl fmt::Debug for RatFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatFilter")
            .field("poles", &self.poles)
            .field("multiplicities", &self.multiplicities)
            .field("omega", &self.omega)
            .field("placement", &self.placement)
            .field("beta", &self.beta)
            .field("interval", &self.interval)
            .field(
                "strategies",
                &self.strategies.as_ref().map(|s| s.len()).unwrap_or(0),
            )
            .field("default_solver", &self.default_solver.is_some())
            .finish()
    }
}

impl RationalFilterEval1D for RatFilter {
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized,
        O: Write1D<f64> + ?Sized,
    {
        let points = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let out_slice = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out_slice.len() != points.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: points.len(),
                got: out_slice.len(),
            });
        }
        eval_filter_into(
            &self.poles,
            &self.multiplicities,
            &self.omega,
            points,
            out_slice,
        );
        Ok(())
    }

    fn run_alloc<I>(&self, input: &I) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized,
    {
        let points = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let mut out = vec![0.0; points.len()];
        eval_filter_into(
            &self.poles,
            &self.multiplicities,
            &self.omega,
            points,
            &mut out,
        );
        Ok(out)
    }
}
