use approx::assert_abs_diff_eq;
use nalgebra::{Complex, DMatrix, DVector};
use ndarray::Array1;
use rand::Rng;
use ratfilt::kernel::KernelLifecycle;
use ratfilt::rational::{
    ratfilter_dyn, DenseShiftedSolverFactory, Interval, Multiplicity, PolePlacement, RatFilter,
    RatFilterConfig, RatFilterKernel, RationalFilterDesign, RationalFilterEval1D,
};
use ratfilt::Error;
use std::sync::Arc;

fn design(num_poles: usize, mult: usize, placement: PolePlacement) -> RatFilterKernel {
    RatFilterKernel::try_new(RatFilterConfig {
        num_poles,
        multiplicity: Multiplicity::Uniform(mult),
        placement,
        beta: 0.01,
    })
    .expect("valid config")
}

// Explicit sum over the poles and their conjugates.
fn conjugate_pair_sum(filter: &RatFilter, z: f64) -> Complex<f64> {
    let mut sum = Complex::new(0.0, 0.0);
    let mut coeffs = filter.omega().iter();
    for (&pole, &mult) in filter.poles().iter().zip(filter.multiplicities()) {
        for (k, w) in coeffs.by_ref().take(mult).enumerate() {
            let p = k as i32 + 1;
            sum += w / (z - pole).powi(p) + w.conj() / (z - pole.conj()).powi(p);
        }
    }
    sum
}

#[test]
fn filter_values_are_real_on_the_real_axis() {
    let mut rng = rand::rng();
    for placement in [PolePlacement::Midpoint, PolePlacement::GaussLegendre] {
        let filter = design(3, 2, placement)
            .build(Interval::new(-0.2, 0.4), Interval::CANONICAL)
            .expect("build");
        for _ in 0..64 {
            let z: f64 = rng.random_range(-3.0..3.0);
            let full = conjugate_pair_sum(&filter, z);
            let scale = full.re.abs().max(1.0);
            assert_abs_diff_eq!(full.im / scale, 0.0, epsilon = 1e-10);
            assert_abs_diff_eq!(full.re / scale, filter.evaluate(z) / scale, epsilon = 1e-10);
        }
    }
}

#[test]
fn left_endpoint_is_normalized_to_the_bar() {
    let mut rng = rand::rng();
    for placement in [PolePlacement::Midpoint, PolePlacement::GaussLegendre] {
        for num_poles in 1..=5 {
            for mult in 1..=3 {
                let lo: f64 = rng.random_range(-4.0..3.0);
                let hi = lo + rng.random_range(0.05..1.0);
                let filter = design(num_poles, mult, placement)
                    .build(Interval::new(lo, hi), Interval::new(-5.0, 5.0))
                    .expect("build");
                assert_abs_diff_eq!(filter.evaluate(lo), filter.bar(), epsilon = 1e-8);
                assert!(filter.poles().iter().all(|p| p.im > 0.0));
                assert_eq!(filter.total_order(), num_poles * mult);
            }
        }
    }
}

#[test]
fn canonical_target_keeps_the_canonical_shape() {
    let filter = design(2, 2, PolePlacement::GaussLegendre)
        .build(Interval::CANONICAL, Interval::new(-2.0, 2.0))
        .expect("build");
    assert_abs_diff_eq!(filter.center(), 0.0, epsilon = 1e-15);
    assert_abs_diff_eq!(filter.half_width(), 1.0, epsilon = 1e-15);
    assert_abs_diff_eq!(filter.evaluate(-1.0), 0.5, epsilon = 1e-8);
    assert_abs_diff_eq!(filter.evaluate(1.0), 0.5, epsilon = 1e-8);
    assert_abs_diff_eq!(filter.evaluate(0.0), 6.871, epsilon = 1e-3);
    assert_abs_diff_eq!(filter.evaluate(2.0), 0.0188, epsilon = 1e-4);
}

#[test]
fn unwanted_eigenvalues_are_damped() {
    let filter = ratfilter_dyn(Interval::new(0.6, 0.9), Interval::CANONICAL).expect("build");
    let inside = filter.evaluate(0.75);
    let outside = filter.evaluate(0.0);
    assert!(inside > 3.0, "inside value {inside}");
    assert!(outside.abs() < 0.05, "outside value {outside}");
    assert!(inside > 50.0 * outside.abs());
}

#[test]
fn overhanging_target_is_clipped() {
    let filter = design(3, 2, PolePlacement::Midpoint)
        .build(Interval::new(-0.5, 1.5), Interval::CANONICAL)
        .expect("build");
    assert_eq!(filter.interval(), Interval::new(-0.5, 1.0));
    assert_abs_diff_eq!(filter.evaluate(-0.5), 0.5, epsilon = 1e-8);
    assert_abs_diff_eq!(filter.evaluate(0.25), 5.337, epsilon = 1e-3);
}

#[test]
fn invalid_targets_are_rejected() {
    let kernel = design(2, 2, PolePlacement::Midpoint);
    for target in [
        Interval::new(0.9, 0.6),
        Interval::new(0.3, 0.3),
        Interval::new(2.0, 3.0),
        Interval::new(f64::NEG_INFINITY, 0.0),
    ] {
        match kernel.build(target, Interval::CANONICAL) {
            Err(Error::InvalidInterval { target: t, .. }) => assert_eq!(t, target),
            other => panic!("expected InvalidInterval for {target:?}, got {other:?}"),
        }
    }
}

#[test]
fn apply_requires_a_strategy() {
    let mut filter = design(2, 1, PolePlacement::Midpoint)
        .build(Interval::new(0.0, 0.5), Interval::CANONICAL)
        .expect("build");
    assert_eq!(
        filter.attach_solver_strategy(None),
        Err(Error::MissingSolverStrategy)
    );
    assert_eq!(filter.apply(&[1.0, 2.0]), Err(Error::MissingSolverStrategy));
}

#[test]
fn apply_with_dense_solver_filters_a_symmetric_matrix() {
    // A = Q diag(lambda) Q^T with a Householder reflector Q
    let lambdas = [-0.7, 0.1, 0.3, 0.9];
    let v = DVector::from_vec(vec![1.0, -2.0, 0.5, 1.0]).normalize();
    let q: DMatrix<f64> = DMatrix::identity(4, 4) - 2.0 * &v * v.transpose();
    let a = &q * DMatrix::from_diagonal(&DVector::from_row_slice(&lambdas)) * q.transpose();

    let mut filter = design(2, 2, PolePlacement::GaussLegendre)
        .with_default_solver(Arc::new(DenseShiftedSolverFactory::new(a).expect("factory")))
        .build(Interval::new(0.0, 0.5), Interval::CANONICAL)
        .expect("build");
    filter.attach_solver_strategy(None).expect("attach");

    for (i, &lambda) in lambdas.iter().enumerate() {
        let eigvec: Vec<f64> = q.column(i).iter().copied().collect();
        let y = filter.apply(&eigvec).expect("apply");
        let gain = filter.evaluate(lambda);
        for (yi, xi) in y.iter().zip(&eigvec) {
            assert_abs_diff_eq!(*yi, gain * xi, epsilon = 1e-9);
        }
    }
}

#[test]
fn batched_evaluation_over_ndarray() {
    let filter = design(2, 2, PolePlacement::Midpoint)
        .build(Interval::new(0.0, 0.5), Interval::CANONICAL)
        .expect("build");
    let grid = Array1::linspace(-1.0, 1.0, 101);
    let mut out = Array1::<f64>::zeros(101);
    filter.run_into(&grid, &mut out).expect("run_into");
    let alloc = filter.run_alloc(grid.as_slice().expect("contiguous")).expect("run_alloc");
    for ((x, y), z) in grid.iter().zip(out.iter()).zip(&alloc) {
        assert_eq!(*y, filter.evaluate(*x));
        assert_eq!(y, z);
    }
}

#[test]
fn filters_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RatFilter>();
    assert_send_sync::<RatFilterKernel>();
}
