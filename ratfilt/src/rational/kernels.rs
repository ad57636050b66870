//! Trait-first kernel for rational filter design.

use core::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::kernel::{ConfigError, KernelLifecycle};
use tracing::debug;

use super::interval::check_interval;
use super::poles::{contour_poles, PolePlacement};
use super::record::RatFilter;
use super::rescale::rescale;
use super::solver::ShiftedSolverFactory;
use super::traits::RationalFilterDesign;
use super::weights::{effective_beta, ls_weights, BETA_ZERO_TOL};
use super::Interval;

/// Pole multiplicities of a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Multiplicity {
    /// Every pole has the same multiplicity.
    Uniform(usize),
    /// One multiplicity per pole, in pole order.
    PerPole(Vec<usize>),
}

impl Default for Multiplicity {
    fn default() -> Self {
        Multiplicity::Uniform(2)
    }
}

/// Constructor config for [`RatFilterKernel`].
#[derive(Debug, Clone, PartialEq)]
pub struct RatFilterConfig {
    /// Number of poles in the upper half-plane.
    pub num_poles: usize,
    /// Pole multiplicities.
    pub multiplicity: Multiplicity,
    /// Quadrature rule used to place the poles.
    pub placement: PolePlacement,
    /// Least-squares weight of the target interval. Values within `1e-12` of
    /// zero are replaced by [`BETA_FLOOR`](super::weights::BETA_FLOOR).
    pub beta: f64,
}

impl Default for RatFilterConfig {
    fn default() -> Self {
        Self {
            num_poles: 1,
            multiplicity: Multiplicity::default(),
            placement: PolePlacement::Midpoint,
            beta: 0.01,
        }
    }
}

/// Trait-first rational filter design kernel.
///
/// ```
/// use ratfilt::kernel::KernelLifecycle;
/// use ratfilt::rational::{Interval, RatFilterConfig, RatFilterKernel, RationalFilterDesign};
///
/// let kernel = RatFilterKernel::try_new(RatFilterConfig::default()).unwrap();
/// let filter = kernel
///     .build(Interval::new(0.6, 0.9), Interval::CANONICAL)
///     .unwrap();
/// assert!((filter.evaluate(0.6) - filter.bar()).abs() < 1e-8);
/// assert!(filter.evaluate(0.75) > 1.0);
/// ```
#[derive(Clone)]
pub struct RatFilterKernel {
    multiplicities: Vec<usize>,
    placement: PolePlacement,
    beta: f64,
    default_solver: Option<Arc<dyn ShiftedSolverFactory>>,
}

impl KernelLifecycle for RatFilterKernel {
    type Config = RatFilterConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.num_poles == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "num_poles",
                reason: "at least one pole is required",
            });
        }
        let multiplicities = match config.multiplicity {
            Multiplicity::Uniform(k) => vec![k; config.num_poles],
            Multiplicity::PerPole(v) => {
                if v.is_empty() {
                    return Err(ConfigError::EmptyInput {
                        arg: "multiplicity",
                    });
                }
                if v.len() != config.num_poles {
                    return Err(ConfigError::LengthMismatch {
                        arg: "multiplicity",
                        expected: config.num_poles,
                        got: v.len(),
                    });
                }
                v
            }
        };
        if multiplicities.contains(&0) {
            return Err(ConfigError::InvalidArgument {
                arg: "multiplicity",
                reason: "pole multiplicities must be at least one",
            });
        }
        if !config.beta.is_finite() {
            return Err(ConfigError::NotFinite { arg: "beta" });
        }
        // near-zero negatives are clamped like zero
        if config.beta <= -BETA_ZERO_TOL {
            return Err(ConfigError::InvalidArgument {
                arg: "beta",
                reason: "beta must be non-negative",
            });
        }

        Ok(Self {
            multiplicities,
            placement: config.placement,
            beta: config.beta,
            default_solver: None,
        })
    }
}

impl RatFilterKernel {
    /// Inject the factory used when a filter attaches strategies with `None`.
    pub fn with_default_solver(mut self, factory: Arc<dyn ShiftedSolverFactory>) -> Self {
        self.default_solver = Some(factory);
        self
    }

    /// Number of poles placed per filter.
    pub fn num_poles(&self) -> usize {
        self.multiplicities.len()
    }

    /// Validated multiplicity of each pole.
    pub fn multiplicities(&self) -> &[usize] {
        &self.multiplicities
    }
}

impl fmt::Debug for RatFilterKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatFilterKernel")
            .field("multiplicities", &self.multiplicities)
            .field("placement", &self.placement)
            .field("beta", &self.beta)
            .field("default_solver", &self.default_solver.is_some())
            .finish()
    }
}

impl RationalFilterDesign for RatFilterKernel {
    type Output = RatFilter;

    fn build(&self, target: Interval, global: Interval) -> Result<RatFilter, Error> {
        let checked = check_interval(target, global)?;
        let Interval { lo: a, hi: b } = checked.interval;

        let mut poles = contour_poles(self.placement, self.num_poles())?;
        debug!(
            placement = ?self.placement,
            num_poles = poles.len(),
            "poles placed on the unit semicircle"
        );
        let mut omega = ls_weights(&poles, &self.multiplicities, self.beta)?;
        rescale(&mut poles, &self.multiplicities, &mut omega, a, b)?;
        debug!(a, b, clipped = checked.clipped, order = omega.len(), "rational filter built");

        Ok(RatFilter::new(
            poles,
            self.multiplicities.clone(),
            omega,
            self.placement,
            effective_beta(self.beta),
            checked.interval,
            self.default_solver.clone(),
        ))
    }
}

/// Design a filter for `target` inside `global` with the default configuration.
pub fn ratfilter_dyn(target: Interval, global: Interval) -> Result<RatFilter, Error> {
    RatFilterKernel::try_new(RatFilterConfig::default())?.build(target, global)
}
