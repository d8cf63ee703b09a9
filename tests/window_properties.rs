//! Windowed Aggregate Property Tests
//!
//! Exercises the rolling aggregation engine through the public API: boundary
//! policy, sum decomposition, single-sample windows and the half-foot worked
//! example.

use las_window::engine::{
    combine_window_sums, compute_windowed_aggregate, forward_window_sums, trailing_window_sums,
};
use las_window::{Curve, Sample, SamplingStep, WindowSamples, WindowSpec};

fn integer_curve(len: usize) -> Vec<Sample> {
    // Integer-valued samples keep every sum exact in f64
    (0..len).map(|i| Some(((i * 37 + 11) % 23) as f64)).collect()
}

fn aggregate(values: &[f64], step: f64, ft_above: f64, ft_below: f64) -> Vec<Sample> {
    let curve = Curve::from_values("Q", values);
    let step = SamplingStep::new(step).expect("valid step");
    let window = WindowSpec::new(ft_above, ft_below).expect("valid window");
    compute_windowed_aggregate(&curve, step, &window)
        .expect("aggregate")
        .values
}

#[test]
fn half_foot_worked_example() {
    let out = aggregate(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], 0.5, 1.0, 0.5);
    assert_eq!(out.len(), 8);
    assert_eq!(out[0], None, "only one sample above position 0");
    assert_eq!(out[2], Some(6.0), "(2 + 3) + 4 - 3");
    assert_eq!(out[7], None, "no sample below the last position");
}

#[test]
fn boundary_positions_are_undefined_never_partial() {
    let values = integer_curve(40);
    let samples = WindowSamples { above: 6, below: 4 };
    let out = combine_window_sums(&values, samples);
    let n = values.len();

    for (i, v) in out.iter().enumerate() {
        let outside = i + 1 < samples.above || i > n - 1 - samples.below;
        assert_eq!(v.is_none(), outside, "position {i}");
    }
}

#[test]
fn interior_sum_decomposition_is_exact() {
    let values = integer_curve(60);
    let samples = WindowSamples { above: 5, below: 3 };
    let above = trailing_window_sums(&values, samples.above);
    let below = forward_window_sums(&values, samples.below);
    let out = combine_window_sums(&values, samples);

    for i in (samples.above - 1)..(values.len() - samples.below) {
        let (a, b, o, v) = (
            above[i].expect("full trailing window"),
            below[i].expect("full forward window"),
            out[i].expect("defined"),
            values[i].expect("defined"),
        );
        assert_eq!(o - (a + b), -v, "position {i}");

        let direct_above: f64 = values[i + 1 - samples.above..=i].iter().flatten().sum();
        let direct_below: f64 = values[i + 1..=i + samples.below].iter().flatten().sum();
        assert_eq!(a, direct_above, "trailing window at {i}");
        assert_eq!(b, direct_below, "forward window at {i}");
    }
}

#[test]
fn single_sample_windows_never_double_count() {
    // ft_above = ft_below = step: trailing window is the sample itself, forward
    // window is the next sample, and the sample's own value is removed once.
    let values: Vec<f64> = (1..=10).map(f64::from).collect();
    let out = aggregate(&values, 0.5, 0.5, 0.5);

    for i in 0..values.len() - 1 {
        assert_eq!(out[i], Some(values[i + 1]), "position {i}");
    }
    assert_eq!(out[values.len() - 1], None);
}

#[test]
fn trailing_only_window_with_empty_forward_window() {
    let values: Vec<f64> = (1..=6).map(f64::from).collect();
    let out = aggregate(&values, 1.0, 3.0, 0.0);
    // (v[i-2] + v[i-1] + v[i]) - v[i]; no tail boundary
    assert_eq!(out, vec![None, None, Some(3.0), Some(5.0), Some(7.0), Some(9.0)]);
}

#[test]
fn window_wider_than_log_is_all_undefined() {
    let out = aggregate(&[1.0, 2.0, 3.0], 0.5, 100.0, 50.0);
    assert!(out.iter().all(Option::is_none));
}

#[test]
fn absent_sample_suppresses_only_windows_containing_it() {
    let mut values = integer_curve(20);
    values[10] = None;
    let samples = WindowSamples { above: 3, below: 2 };
    let out = combine_window_sums(&values, samples);

    for (i, v) in out.iter().enumerate().take(18).skip(2) {
        // window for i spans [i - 2, i + 2]
        let touches_gap = (i - 2..=i + 2).contains(&10);
        assert_eq!(v.is_none(), touches_gap, "position {i}");
    }
}

#[test]
fn aggregation_does_not_mutate_input() {
    let curve = Curve::from_values("Q", &[1.0, 2.0, 3.0, 4.0]);
    let before = curve.clone();
    let step = SamplingStep::new(1.0).expect("valid step");
    let window = WindowSpec::new(2.0, 1.0).expect("valid window");
    let _ = compute_windowed_aggregate(&curve, step, &window).expect("aggregate");
    assert_eq!(curve, before);
}

#[test]
fn astronomically_long_window_is_undefined_not_a_crash() {
    let out = aggregate(&[1.0, 2.0, 3.0], 0.5, 1e300, 0.5);
    assert_eq!(out, vec![None; 3]);
    let out = aggregate(&[1.0, 2.0, 3.0], 0.5, 1.0, 1e300);
    assert_eq!(out, vec![None; 3]);
}
