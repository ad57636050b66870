//! Partial-fraction expansion of `1 / [(z - s1)^k1 (z - s2)^k2]`.

use nalgebra::Complex;
use num_traits::{One, Zero};

use super::integrate::integrate_pair;

/// Relative tolerance under which two poles are treated as the same pole.
pub const COINCIDENCE_TOL: f64 = 1.0e-12;

/// Whether `s1` and `s2` coincide within [`COINCIDENCE_TOL`].
pub fn poles_coincide(s1: Complex<f64>, s2: Complex<f64>) -> bool {
    (s1 - s2).norm() < COINCIDENCE_TOL * (s1.norm() + s2.norm())
}

/// Expansion `Σ alpha[k] / (z - s1)^(k+1) + Σ beta[k] / (z - s2)^(k+1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialFractions {
    /// First pole.
    pub s1: Complex<f64>,
    /// Second pole.
    pub s2: Complex<f64>,
    /// Coefficient of `(z - s1)^-(k+1)` at index `k`.
    pub alpha: Vec<Complex<f64>>,
    /// Coefficient of `(z - s2)^-(k+1)` at index `k`. Empty when the poles coincide.
    pub beta: Vec<Complex<f64>>,
}

impl PartialFractions {
    /// Evaluate the expansion at a complex point away from both poles.
    pub fn eval(&self, z: Complex<f64>) -> Complex<f64> {
        power_sum(&self.alpha, (z - self.s1).inv())
            + power_sum(&self.beta, (z - self.s2).inv())
    }

    /// Closed-form `∫_a^b` of the expansion along the real axis.
    pub fn integrate(&self, a: f64, b: f64) -> Complex<f64> {
        integrate_pair(self.s1, &self.alpha, self.s2, &self.beta, a, b)
    }
}

// Σ coeffs[k] · x^(k+1)
fn power_sum(coeffs: &[Complex<f64>], x: Complex<f64>) -> Complex<f64> {
    coeffs
        .iter()
        .rev()
        .fold(Complex::zero(), |acc, &c| x * (c + acc))
}

/// Expand `1 / [(z - s1)^k1 (z - s2)^k2]` into partial fractions.
///
/// Coincident poles (see [`poles_coincide`]) are merged into a single pole of
/// order `k1 + k2`: `alpha` is zero apart from `alpha[k1 + k2 - 1] = 1` and
/// `beta` is empty. Otherwise the coefficients follow the binomial recurrence
/// `alpha[k1-1-i] = d·(s1-s2)^-(k2+i)` with `d_{i+1} = -d_i (k2+i)/(i+1)`,
/// and symmetrically for `beta`.
///
/// With `k1 = k2 = 0` there is no pole term and both lists are empty.
pub fn expand_pair(
    s1: Complex<f64>,
    s2: Complex<f64>,
    k1: usize,
    k2: usize,
) -> PartialFractions {
    if k1 + k2 == 0 {
        return PartialFractions {
            s1,
            s2,
            alpha: Vec::new(),
            beta: Vec::new(),
        };
    }
    if poles_coincide(s1, s2) {
        let mut alpha = vec![Complex::zero(); k1 + k2];
        alpha[k1 + k2 - 1] = Complex::one();
        return PartialFractions {
            s1,
            s2,
            alpha,
            beta: Vec::new(),
        };
    }
    if k1 == 1 && k2 == 1 {
        let a = (s1 - s2).inv();
        return PartialFractions {
            s1,
            s2,
            alpha: vec![a],
            beta: vec![-a],
        };
    }
    PartialFractions {
        s1,
        s2,
        alpha: binomial_block(s1 - s2, k1, k2),
        beta: binomial_block(s2 - s1, k2, k1),
    }
}

// Laurent coefficients at the pole of order `k` when the other pole (order
// `other`) sits `diff` away.
fn binomial_block(diff: Complex<f64>, k: usize, other: usize) -> Vec<Complex<f64>> {
    let mut block = vec![Complex::zero(); k];
    let mut d = 1.0;
    let mut xp = diff.powi(other as i32).inv();
    for i in 0..k {
        block[k - 1 - i] = xp * d;
        xp /= diff;
        d = -d * (other + i) as f64 / (i + 1) as f64;
    }
    block
}
