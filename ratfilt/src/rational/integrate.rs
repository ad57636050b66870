//! Closed-form integrals of partial-fraction expansions over a real interval.

use nalgebra::Complex;
use num_traits::Zero;

/// `∫_a^b Σ alpha[k]/(z-s1)^(k+1) + Σ beta[k]/(z-s2)^(k+1) dz`.
///
/// Order-one terms integrate to the principal logarithm `log((b-s)/(a-s))`,
/// higher orders to `-(c/k)·[(b-s)^-k - (a-s)^-k]`. Both poles must lie off
/// the real axis, which every caller in this crate guarantees.
pub fn integrate_pair(
    s1: Complex<f64>,
    alpha: &[Complex<f64>],
    s2: Complex<f64>,
    beta: &[Complex<f64>],
    a: f64,
    b: f64,
) -> Complex<f64> {
    integrate_block(s1, alpha, a, b) + integrate_block(s2, beta, a, b)
}

fn integrate_block(s: Complex<f64>, coeffs: &[Complex<f64>], a: f64, b: f64) -> Complex<f64> {
    if coeffs.is_empty() {
        return Complex::zero();
    }
    let (ua, ub) = (a - s, b - s);
    let log_term = coeffs[0] * (ub / ua).ln();
    coeffs
        .iter()
        .enumerate()
        .skip(1)
        .fold(log_term, |acc, (k, &c)| {
            let k = k as i32;
            acc - c / k as f64 * (ub.powi(k).inv() - ua.powi(k).inv())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::pfe::expand_pair;
    use approx::assert_abs_diff_eq;

    // Composite Simpson rule on a fine grid.
    fn simpson<F>(f: F, a: f64, b: f64, n: usize) -> Complex<f64>
    where
        F: Fn(f64) -> Complex<f64>,
    {
        let h = (b - a) / n as f64;
        let mut acc = f(a) + f(b);
        for i in 1..n {
            let w = if i % 2 == 1 { 4.0 } else { 2.0 };
            acc += f(a + i as f64 * h) * w;
        }
        acc * (h / 3.0)
    }

    #[test]
    fn simple_pole_integrates_to_log() {
        let s = Complex::new(0.0, 1.0);
        let got = integrate_pair(s, &[Complex::new(1.0, 0.0)], s, &[], -1.0, 1.0);
        // ∫_{-1}^{1} dz/(z - i) = log((1-i)/(-1-i)) = iπ/2
        assert_abs_diff_eq!(got.re, 0.0, epsilon = 1e-14);
        assert_abs_diff_eq!(got.im, core::f64::consts::FRAC_PI_2, epsilon = 1e-14);
    }

    #[test]
    fn matches_quadrature_of_rational_kernel() {
        let cases = [
            (Complex::new(0.3, 0.7), Complex::new(-0.2, -0.5), 1, 1),
            (Complex::new(0.3, 0.7), Complex::new(-0.2, -0.5), 2, 3),
            (Complex::new(-0.9, 0.4), Complex::new(0.6, 0.8), 3, 2),
            (Complex::new(0.0, 1.0), Complex::new(0.0, 1.0), 2, 2),
        ];
        for (s1, s2, k1, k2) in cases {
            let pf = expand_pair(s1, s2, k1, k2);
            for (a, b) in [(-1.0, 1.0), (-10.0, 10.0), (0.2, 0.9)] {
                let closed = pf.integrate(a, b);
                let numeric = simpson(
                    |x| {
                        let z = Complex::new(x, 0.0);
                        ((z - s1).powi(k1 as i32) * (z - s2).powi(k2 as i32)).inv()
                    },
                    a,
                    b,
                    20_000,
                );
                assert!(
                    (closed - numeric).norm() < 1e-8,
                    "s1={s1} s2={s2} k=({k1},{k2}) on [{a},{b}]: {closed} vs {numeric}"
                );
            }
        }
    }

    #[test]
    fn reversed_interval_flips_sign() {
        let pf = expand_pair(Complex::new(0.1, 0.6), Complex::new(0.1, -0.6), 2, 1);
        let forward = pf.integrate(-0.5, 0.75);
        let backward = pf.integrate(0.75, -0.5);
        assert_abs_diff_eq!(forward.re, -backward.re, epsilon = 1e-13);
        assert_abs_diff_eq!(forward.im, -backward.im, epsilon = 1e-13);
    }
}
