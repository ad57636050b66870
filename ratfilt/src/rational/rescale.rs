//! Affine transport of a canonical filter from `[-1, 1]` to `[a, b]`.

use crate::kernel::ExecInvariantViolation;
use nalgebra::Complex;
use tracing::debug;

use super::eval::normalize_at;

/// Map poles and coefficients solved on `[-1, 1]` onto `[a, b]` in place.
///
/// With `c = (a+b)/2` and `h = (b-a)/2`, each pole becomes `h·pole + c` and the
/// coefficient of order `j + 1` picks up a factor `h^(j+1)` from the change of
/// variables. The result is then rescaled so that the filter passes through
/// one half at `z = a`.
pub fn rescale(
    poles: &mut [Complex<f64>],
    multiplicities: &[usize],
    omega: &mut [Complex<f64>],
    a: f64,
    b: f64,
) -> Result<(), ExecInvariantViolation> {
    let total: usize = multiplicities.iter().sum();
    if omega.len() != total {
        return Err(ExecInvariantViolation::LengthMismatch {
            arg: "omega",
            expected: total,
            got: omega.len(),
        });
    }
    let c = 0.5 * (a + b);
    let h = 0.5 * (b - a);
    poles.iter_mut().for_each(|s| *s = *s * h + c);

    let mut blocks = omega.iter_mut();
    for &mult in multiplicities {
        let mut hp = h;
        for w in blocks.by_ref().take(mult) {
            *w *= hp;
            hp *= h;
        }
    }

    let scale = normalize_at(poles, multiplicities, omega, a)?;
    debug!(a, b, center = c, half_width = h, scale, "filter rescaled to target interval");
    Ok(())
}
