//! Least-squares pole weights on the canonical interval `[-1, 1]`.
//!
//! The weights minimize a weighted L2 distance between the filter and the
//! step function of `[-1, 1]` over the background interval `[-mu, mu]`,
//! with `[-1, 1]` weighted by `beta`. The normal equations live in the
//! space spanned by the partial-fraction basis `(z - s)^-(k+1)` together with
//! its conjugates, which gives the `2·nf × 2·nf` block system
//! `[[conj(A), conj(B)], [B, A]]`.

use crate::error::Error;
use crate::kernel::{ConfigError, ExecInvariantViolation};
use crate::linalg::dense_solve;
use nalgebra::{Complex, DMatrix, DVector};
use tracing::debug;

use super::eval::normalize_at;
use super::pfe::expand_pair;

/// Half-width `mu` of the background integration interval.
pub const BACKGROUND_HALF_WIDTH: f64 = 10.0;

/// Floor substituted for a vanishing least-squares weight.
pub const BETA_FLOOR: f64 = 1.0e-5;

/// Magnitude below which a requested beta counts as zero.
pub const BETA_ZERO_TOL: f64 = 1.0e-12;

/// Least-squares weight actually used for a requested `beta`.
pub fn effective_beta(beta: f64) -> f64 {
    if beta.abs() < BETA_ZERO_TOL {
        BETA_FLOOR
    } else {
        beta
    }
}

/// Solve for the expansion coefficients of the filter on `[-1, 1]`.
///
/// Returns `Σ multiplicities` coefficients grouped by pole, scaled so that the
/// filter equals one half at `z = 1`. Fails with
/// [`Error::LinearSolveFailure`] when the block system is singular.
pub fn ls_weights(
    poles: &[Complex<f64>],
    multiplicities: &[usize],
    beta: f64,
) -> Result<Vec<Complex<f64>>, Error> {
    if poles.len() != multiplicities.len() {
        return Err(ConfigError::LengthMismatch {
            arg: "multiplicities",
            expected: poles.len(),
            got: multiplicities.len(),
        }
        .into());
    }
    let nf: usize = multiplicities.iter().sum();
    if nf == 0 {
        return Err(ConfigError::EmptyInput { arg: "poles" }.into());
    }
    let beta = effective_beta(beta);
    let offsets = block_offsets(multiplicities);

    let mut a = DMatrix::<Complex<f64>>::zeros(nf, nf);
    let mut b = DMatrix::<Complex<f64>>::zeros(nf, nf);
    let mut rhs = DVector::<Complex<f64>>::zeros(2 * nf);

    for (i, (&si, &ni)) in poles.iter().zip(multiplicities).enumerate() {
        let ki = offsets[i];
        let ci = si.conj();
        for p in 0..ni {
            rhs[ki + p] = step_moment(ci, p, beta);
        }
        for (j, (&sj, &nj)) in poles.iter().zip(multiplicities).enumerate() {
            let kj = offsets[j];
            for p in 0..ni {
                for q in 0..nj {
                    a[(ki + p, kj + q)] = weighted_inner(si, sj.conj(), p + 1, q + 1, beta);
                    b[(ki + p, kj + q)] = weighted_inner(si, sj, p + 1, q + 1, beta);
                }
            }
        }
    }
    for r in 0..nf {
        rhs[nf + r] = rhs[r].conj();
    }

    let system = DMatrix::from_fn(2 * nf, 2 * nf, |r, c| match (r < nf, c < nf) {
        (true, true) => a[(r, c)].conj(),
        (true, false) => b[(r, c - nf)].conj(),
        (false, true) => b[(r - nf, c)],
        (false, false) => a[(r - nf, c - nf)],
    });
    let solution = dense_solve(system, rhs).map_err(|err| match err {
        ExecInvariantViolation::InvalidState { reason } => Error::LinearSolveFailure {
            reason: reason.into(),
        },
        other => Error::Exec(other),
    })?;

    let mut omega: Vec<Complex<f64>> = solution.iter().take(nf).copied().collect();
    let scale = normalize_at(poles, multiplicities, &mut omega, 1.0)?;
    debug!(
        unknowns = 2 * nf,
        beta, scale, "least-squares weights solved on [-1, 1]"
    );
    Ok(omega)
}

/// Start index of each pole's coefficient block.
pub(crate) fn block_offsets(multiplicities: &[usize]) -> Vec<usize> {
    multiplicities
        .iter()
        .scan(0, |acc, &m| {
            let start = *acc;
            *acc += m;
            Some(start)
        })
        .collect()
}

// ∫ (z-s)^-k1 (z-t)^-k2 over [-mu, mu], plus (beta - 1) times the same over [-1, 1].
fn weighted_inner(
    s: Complex<f64>,
    t: Complex<f64>,
    k1: usize,
    k2: usize,
    beta: f64,
) -> Complex<f64> {
    let pf = expand_pair(s, t, k1, k2);
    pf.integrate(-BACKGROUND_HALF_WIDTH, BACKGROUND_HALF_WIDTH)
        + pf.integrate(-1.0, 1.0) * (beta - 1.0)
}

// beta · ∫_{-1}^{1} (z - c)^-(p+1) dz
fn step_moment(c: Complex<f64>, p: usize, beta: f64) -> Complex<f64> {
    if p == 0 {
        ((c - 1.0) / (c + 1.0)).ln() * beta
    } else {
        let k = p as i32;
        let one = Complex::new(1.0, 0.0);
        -(((one - c).powi(k).inv() - (-one - c).powi(k).inv()) * (beta / p as f64))
    }
}
