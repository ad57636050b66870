//! Dense linear-algebra collaborators used by filter construction.
//!
//! Both kernels follow the crate's trait-first shape: a config validated by
//! [`KernelLifecycle::try_new`](crate::kernel::KernelLifecycle::try_new), a
//! capability trait, and a free function for one-shot use.

mod dense_solve;
mod tridiagonal;

pub use dense_solve::*;
pub use tridiagonal::*;
