//! Rational spectral filters for eigensolvers that slice the spectrum.
//!
//! The [`rational`] module designs least-squares rational filters
//! `f(z) = 2·Re(Σ omega_jk / (z - pole_j)^(k+1))` that are large on an
//! interval `[a, b]` of wanted eigenvalues and small elsewhere, evaluates
//! them on the real axis, and applies them to vectors through per-pole
//! shifted solves. The dense collaborators (tridiagonal eigenvalues and
//! complex LU) live in [`linalg`].
//!
//! ```
//! use ratfilt::rational::{ratfilter_dyn, Interval};
//!
//! let filter = ratfilter_dyn(Interval::new(-0.5, 1.5), Interval::CANONICAL).unwrap();
//! assert_eq!(filter.interval(), Interval::new(-0.5, 1.0));
//! ```
#![warn(missing_docs)]

pub mod error;
pub mod kernel;
pub mod linalg;
pub mod rational;

pub use error::Error;
