use approx::assert_relative_eq;

use chart2d_rs::ChartError;
use chart2d_rs::core::{
    Axis, PREFERRED_SCALE_STEPS, TickScale, TickScaleTuning, select_step, select_tick_scale,
    widen_degenerate_range,
};

#[test]
fn zero_to_eighty_three_uses_step_ten() {
    let scale = select_tick_scale(0.0, 83.0, &TickScaleTuning::default()).expect("scale");
    assert_eq!(scale.step, 10.0);
    assert_eq!(scale.min, 0.0);
    assert_eq!(scale.max, 90.0);
    assert_eq!(scale.tick_count(), 10);
}

#[test]
fn fractional_range_snaps_to_step_multiples() {
    let scale = select_tick_scale(0.13, 0.87, &TickScaleTuning::default()).expect("scale");
    assert_relative_eq!(scale.step, 0.1);
    assert_relative_eq!(scale.min, 0.1, epsilon = 1e-12);
    assert_relative_eq!(scale.max, 0.9, epsilon = 1e-12);
    assert!(scale.min <= 0.13 && scale.max >= 0.87);
}

#[test]
fn negative_ranges_are_covered() {
    let scale = select_tick_scale(-47.0, -3.0, &TickScaleTuning::default()).expect("scale");
    assert_eq!(scale.step, 5.0);
    assert_eq!(scale.min, -50.0);
    assert_eq!(scale.max, 0.0);
}

#[test]
fn degenerate_value_widens_by_five_percent() {
    assert_eq!(widen_degenerate_range(5.0, 5.0), (4.75, 5.25));
    assert_eq!(widen_degenerate_range(-20.0, -20.0), (-21.0, -19.0));

    let scale = select_tick_scale(5.0, 5.0, &TickScaleTuning::default()).expect("scale");
    assert!(scale.min <= 4.75 + 1e-12);
    assert!(scale.max >= 5.25 - 1e-12);
    assert!(scale.max > scale.min);
}

#[test]
fn degenerate_zero_widens_to_unit_span() {
    assert_eq!(widen_degenerate_range(0.0, 0.0), (-1.0, 1.0));
    let scale = select_tick_scale(0.0, 0.0, &TickScaleTuning::default()).expect("scale");
    assert!(scale.min <= -1.0 && scale.max >= 1.0);
    assert_eq!(scale.step, 0.25);
}

#[test]
fn non_finite_or_inverted_input_is_rejected() {
    let tuning = TickScaleTuning::default();
    assert!(matches!(
        select_tick_scale(f64::NAN, 1.0, &tuning),
        Err(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        select_tick_scale(0.0, f64::INFINITY, &tuning),
        Err(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        select_tick_scale(2.0, 1.0, &tuning),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn overflowing_span_is_rejected() {
    let tuning = TickScaleTuning::default();
    assert!(matches!(
        select_tick_scale(-1.0e308, 1.0e308, &tuning),
        Err(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        select_tick_scale(f64::MIN, f64::MAX, &tuning),
        Err(ChartError::InvalidData(_))
    ));

    let scale = select_tick_scale(-1.0e307, 1.0e307, &tuning).expect("finite span");
    assert!(scale.min.is_finite() && scale.max.is_finite());
    assert!(scale.min <= -1.0e307 && scale.max >= 1.0e307);
}

#[test]
fn step_selection_is_deterministic_and_prefers_first_minimum() {
    let tuning = TickScaleTuning::default();
    for range in [0.3, 7.0, 83.0, 1234.0, 99_999.0] {
        assert_eq!(select_step(range, &tuning), select_step(range, &tuning));
    }
    // 12 / 1.5 = 8 exactly.
    assert_eq!(select_step(12.0, &tuning), 1.5);
    assert_eq!(PREFERRED_SCALE_STEPS.len(), 18);
}

#[test]
fn ranges_beyond_the_table_extend_by_decades() {
    let tuning = TickScaleTuning::default();
    assert_eq!(select_step(16_000.0, &tuning), 2000.0);
    assert_eq!(select_step(80_000.0, &tuning), 10_000.0);
    assert_eq!(select_step(1.0e9, &tuning), 1.0e8);

    let scale = select_tick_scale(0.0, 3.7e6, &tuning).expect("scale");
    assert_eq!(scale.step, 500_000.0);
    assert_eq!(scale.max, 4.0e6);
    assert!(scale.tick_count() < chart2d_rs::core::MAX_TICK_COUNT);
    assert_eq!(scale.tick_values().last().copied(), Some(4.0e6));
}

#[test]
fn custom_tuning_changes_density() {
    let tuning = TickScaleTuning {
        preferred_steps: vec![1.0, 2.0, 5.0, 10.0],
        target_tick_count: 4.0,
    };
    let scale = select_tick_scale(0.0, 20.0, &tuning).expect("scale");
    assert_eq!(scale.step, 5.0);
    assert_eq!(scale.tick_values(), vec![0.0, 5.0, 10.0, 15.0, 20.0]);
}

#[test]
fn tick_and_grid_values_are_index_based() {
    let scale = TickScale::validated(Axis::X, 0.0, 1.0, 0.1).expect("scale");
    let ticks = scale.tick_values();
    assert_eq!(ticks.len(), 11);
    assert_relative_eq!(ticks[3], 0.3, epsilon = 1e-12);
    assert_relative_eq!(ticks[10], 1.0, epsilon = 1e-12);

    let grid = scale.grid_values();
    assert_eq!(grid.len(), 10);
    assert!(grid.iter().all(|value| *value < 1.0));
}

#[test]
fn manual_bounds_are_validated() {
    let err = TickScale::validated(Axis::Y, 3.0, 3.0, 1.0).expect_err("min == max");
    assert!(matches!(
        err,
        ChartError::InvalidAxisBounds { axis: Axis::Y, .. }
    ));
    assert!(TickScale::validated(Axis::X, 0.0, 1.0, 0.0).is_err());
    assert!(TickScale::validated(Axis::X, 0.0, f64::NAN, 1.0).is_err());
}

#[test]
fn runaway_tick_counts_are_capped() {
    let scale = TickScale::validated(Axis::X, 0.0, 1.0e9, 1.0).expect("scale");
    assert_eq!(scale.tick_count(), chart2d_rs::core::MAX_TICK_COUNT);
}
