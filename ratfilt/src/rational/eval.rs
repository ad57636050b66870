//! Scalar evaluation of a rational filter on the real axis.

use crate::kernel::ExecInvariantViolation;
use nalgebra::Complex;
use num_traits::Zero;

/// Value of the filter held by the fixed point of every normalization.
pub const FILTER_BAR: f64 = 0.5;

/// Evaluate `2·Re(Σ_j Σ_k omega_jk / (z - pole_j)^(k+1))` at a real `z`.
///
/// `omega` is grouped by pole: the first `multiplicities[0]` entries belong
/// to `poles[0]`, and so on. Each block is evaluated back to front with
/// `1/(z - pole)` as the recurrence factor. The conjugate poles contribute
/// through the real part.
///
/// # Panics
/// If `omega` holds fewer than `Σ multiplicities` entries.
pub fn eval_filter(
    poles: &[Complex<f64>],
    multiplicities: &[usize],
    omega: &[Complex<f64>],
    z: f64,
) -> f64 {
    let mut offset = 0;
    let mut sum: Complex<f64> = Complex::zero();
    for (&pole, &mult) in poles.iter().zip(multiplicities) {
        let x = (z - pole).inv();
        sum += omega[offset..offset + mult]
            .iter()
            .rev()
            .fold(Complex::zero(), |t, &w| x * (w + t));
        offset += mult;
    }
    2.0 * sum.re
}

/// Evaluate the filter at every abscissa in `points`, writing into `out`.
///
/// # Panics
/// If `out` is shorter than `points`, or under the conditions of [`eval_filter`].
pub fn eval_filter_into(
    poles: &[Complex<f64>],
    multiplicities: &[usize],
    omega: &[Complex<f64>],
    points: &[f64],
    out: &mut [f64],
) {
    out.iter_mut()
        .zip(points)
        .for_each(|(y, &z)| *y = eval_filter(poles, multiplicities, omega, z));
}

/// Rescale `omega` so that the filter passes through [`FILTER_BAR`] at `z`.
///
/// Returns the applied factor.
pub(crate) fn normalize_at(
    poles: &[Complex<f64>],
    multiplicities: &[usize],
    omega: &mut [Complex<f64>],
    z: f64,
) -> Result<f64, ExecInvariantViolation> {
    let scale = FILTER_BAR / eval_filter(poles, multiplicities, omega, z);
    if !scale.is_finite() {
        return Err(ExecInvariantViolation::InvalidState {
            reason: "filter vanishes at the normalization point",
        });
    }
    omega.iter_mut().for_each(|w| *w *= scale);
    Ok(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn single_simple_pole_is_a_lorentzian() {
        // 2·Re(-i/2 / (x - i)) = 1 / (1 + x²)
        let poles = [Complex::new(0.0, 1.0)];
        let omega = [Complex::new(0.0, -0.5)];
        for x in [-3.0, -1.0, 0.0, 0.5, 2.0] {
            let got = eval_filter(&poles, &[1], &omega, x);
            assert_abs_diff_eq!(got, 1.0 / (1.0 + x * x), epsilon = 1e-14);
        }
    }

    #[test]
    fn repeated_pole_uses_increasing_powers() {
        let pole = Complex::new(0.25, 0.75);
        let omega = [
            Complex::new(0.3, -0.1),
            Complex::new(-0.2, 0.4),
            Complex::new(0.05, 0.0),
        ];
        let z: f64 = 0.6;
        let x = (z - pole).inv();
        let want = 2.0 * (omega[0] * x + omega[1] * x * x + omega[2] * x * x * x).re;
        assert_abs_diff_eq!(eval_filter(&[pole], &[3], &omega, z), want, epsilon = 1e-14);
    }

    #[test]
    fn blocks_follow_multiplicities() {
        let poles = [Complex::new(-0.5, 0.5), Complex::new(0.5, 0.5)];
        let omega = [
            Complex::new(1.0, 0.0),
            Complex::new(0.0, 1.0),
            Complex::new(0.5, 0.5),
        ];
        let z: f64 = 0.1;
        let x0 = (z - poles[0]).inv();
        let x1 = (z - poles[1]).inv();
        let want = 2.0 * (omega[0] * x0 + omega[1] * x1 + omega[2] * x1 * x1).re;
        assert_abs_diff_eq!(
            eval_filter(&poles, &[1, 2], &omega, z),
            want,
            epsilon = 1e-14
        );
    }

    #[test]
    fn normalization_fixes_the_bar() {
        let poles = [Complex::new(0.0, 1.0)];
        let mut omega = [Complex::new(0.0, -3.0)];
        let scale = normalize_at(&poles, &[1], &mut omega, 1.0).expect("normalize");
        assert!(scale > 0.0);
        assert_abs_diff_eq!(eval_filter(&poles, &[1], &omega, 1.0), FILTER_BAR, epsilon = 1e-14);
    }

    #[test]
    fn zero_filter_cannot_be_normalized() {
        let poles = [Complex::new(0.0, 1.0)];
        let mut omega = [Complex::zero()];
        assert!(normalize_at(&poles, &[1], &mut omega, 0.0).is_err());
    }
}
