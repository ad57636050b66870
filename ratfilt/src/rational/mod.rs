//! Least-squares rational filters for spectrum slicing.
//!
//! A filter for `[a, b]` is `f(z) = 2·Re(Σ_j Σ_k omega_jk / (z - pole_j)^(k+1))`,
//! with the poles placed by contour quadrature on a semicircle over the
//! interval. It is close to one inside `[a, b]`, decays outside, and takes
//! the value one half exactly at `a`.
//!
//! Construction runs on the canonical interval `[-1, 1]` and is then moved
//! onto the target:
//!
//! 1. [`check_interval`] validates and clips the target.
//! 2. [`contour_poles`] places the poles.
//! 3. [`ls_weights`](weights::ls_weights) solves the least-squares system.
//! 4. [`rescale`](rescale::rescale) maps poles and weights onto `[a, b]`.
//!
//! [`RatFilterKernel`] runs the whole pipeline and returns a [`RatFilter`].

pub mod eval;
pub mod integrate;
pub mod interval;
pub mod pfe;
pub mod poles;
pub mod rescale;
pub mod solver;
pub mod weights;

mod kernels;
mod record;
mod traits;

pub use eval::{eval_filter, eval_filter_into, FILTER_BAR};
pub use interval::{check_interval, Interval, IntervalCheck};
pub use kernels::*;
pub use poles::{contour_poles, PolePlacement};
pub use record::*;
pub use solver::*;
pub use traits::*;
