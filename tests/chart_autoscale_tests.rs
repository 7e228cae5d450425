use chart2d_rs::api::{AxisConfig, Chart, ChartConfig, InvalidationTopic};
use chart2d_rs::core::{AreaSeries, Point, Series, Viewport};
use chart2d_rs::render::NullRenderer;
use chart2d_rs::ChartError;

fn auto_scaled_chart() -> Chart {
    Chart::new(ChartConfig::default().with_auto_scale(true, true)).expect("chart")
}

#[test]
fn defaults_match_fixed_axes() {
    let chart = Chart::default();
    assert_eq!(chart.x_axis(), AxisConfig::new(-5.0, 5.0, 1.0));
    assert_eq!(chart.y_axis(), AxisConfig::new(-3.0, 3.0, 1.0));
    assert!(!chart.x_axis().auto_scale);
    assert!(chart.is_dirty());
}

#[test]
fn registering_series_fits_flagged_axes() {
    let mut chart = auto_scaled_chart();
    let mut series = Series::new("ramp");
    series.add_points((0..=83).map(|i| Point::new(f64::from(i), f64::from(i) * 0.5)));
    chart.add_series(series.into_shared()).expect("add");

    let x = chart.x_axis();
    assert_eq!((x.min, x.max, x.tick), (0.0, 90.0, 10.0));
    let y = chart.y_axis();
    assert!(y.min <= 0.0 && y.max >= 41.5);
}

#[test]
fn axes_without_flag_keep_manual_bounds() {
    let mut chart = Chart::new(ChartConfig::default().with_auto_scale(false, true)).expect("chart");
    let mut series = Series::new("s");
    series.add_points([Point::new(100.0, 1.0), Point::new(200.0, 2.0)]);
    chart.add_series(series.into_shared()).expect("add");

    assert_eq!(chart.x_axis().min, -5.0);
    assert_eq!(chart.x_axis().max, 5.0);
    assert!(chart.y_axis().min <= 1.0 && chart.y_axis().max >= 2.0);
}

#[test]
fn auto_scale_without_data_is_noop() {
    let mut chart = auto_scaled_chart();
    assert!(!chart.auto_scale_x().expect("no error"));
    assert!(!chart.auto_scale_y().expect("no error"));
    assert_eq!(chart.x_axis().min, -5.0);
}

#[test]
fn later_mutations_refit_after_notification() {
    let mut chart = auto_scaled_chart();
    let series = Series::new("live").into_shared();
    series.borrow_mut().add_point(0.0, 0.0);
    series.borrow_mut().add_point(1.0, 1.0);
    chart.add_series(series.clone()).expect("add");
    let before = chart.y_axis();

    series.borrow_mut().add_point(2.0, 500.0);
    // Nothing changes until the series publishes and the chart drains events.
    assert_eq!(chart.y_axis(), before);

    series.borrow_mut().notify_changed();
    assert_eq!(chart.process_pending(), 1);
    assert!(chart.y_axis().max >= 500.0);
}

#[test]
fn area_series_participate_in_auto_scale() {
    let mut chart = auto_scaled_chart();
    let mut area = AreaSeries::new("band");
    area.add_point(0.0, -12.0, 3.0);
    area.add_point(10.0, -4.0, 18.0);
    chart.add_area_series(area.into_shared()).expect("add");

    let y = chart.y_axis();
    assert!(y.min <= -12.0 && y.max >= 18.0);
}

#[test]
fn flat_series_widens_instead_of_failing() {
    let mut chart = auto_scaled_chart();
    let mut series = Series::new("flat");
    series.add_points([Point::new(5.0, 5.0), Point::new(5.0, 5.0)]);
    chart.add_series(series.into_shared()).expect("add");

    assert!(chart.x_axis().min < 5.0 && chart.x_axis().max > 5.0);
    assert!(chart.y_axis().min < 5.0 && chart.y_axis().max > 5.0);
}

#[test]
fn removing_series_unsubscribes() {
    let mut chart = auto_scaled_chart();
    let series = Series::new("gone").into_shared();
    series.borrow_mut().add_point(1.0, 1.0);
    let id = chart.add_series(series.clone()).expect("add");
    assert_eq!(series.borrow().subscriber_count(), 1);

    let returned = chart.remove_series(id).expect("remove");
    assert!(std::rc::Rc::ptr_eq(&returned, &series));
    assert_eq!(series.borrow().subscriber_count(), 0);
    assert_eq!(chart.series_count(), 0);

    let err = chart.remove_series(id).expect_err("already removed");
    assert!(matches!(err, ChartError::UnknownSeries(missing) if missing == id));
}

#[test]
fn re_adding_same_series_keeps_one_entry() {
    let mut chart = Chart::default();
    let series = Series::new("dup").into_shared();
    chart.add_series(series.clone()).expect("add");
    chart.add_series(series.clone()).expect("add again");
    assert_eq!(chart.series_count(), 1);
    assert_eq!(series.borrow().subscriber_count(), 1);
}

#[test]
fn clear_drops_every_series() {
    let mut chart = Chart::default();
    let line = Series::new("line").into_shared();
    let area = AreaSeries::new("area").into_shared();
    chart.add_series(line.clone()).expect("add");
    chart.add_area_series(area.clone()).expect("add");

    chart.clear();
    assert_eq!(chart.series_count(), 0);
    assert_eq!(chart.area_series_count(), 0);
    assert_eq!(line.borrow().subscriber_count(), 0);
    assert_eq!(area.borrow().subscriber_count(), 0);
}

#[test]
fn dirty_flag_clears_on_draw_and_sets_on_change() {
    let mut chart = Chart::default();
    let mut renderer = NullRenderer::default();
    chart
        .draw(&mut renderer, Viewport::new(400, 300))
        .expect("draw");
    assert!(!chart.is_dirty());
    assert_eq!(renderer.frames_rendered, 1);

    chart.set_x_bounds(0.0, 10.0, 2.0).expect("bounds");
    assert!(chart.is_dirty());
    assert!(chart
        .pending_invalidation()
        .contains_topic(InvalidationTopic::Axis));

    chart
        .draw(&mut renderer, Viewport::new(400, 300))
        .expect("draw");
    assert!(!chart.is_dirty());
}

#[test]
fn invalid_manual_bounds_leave_axes_untouched() {
    let mut chart = Chart::default();
    let err = chart.set_y_bounds(4.0, 4.0, 1.0).expect_err("min == max");
    assert!(matches!(err, ChartError::InvalidAxisBounds { .. }));
    assert_eq!(chart.y_axis(), AxisConfig::new(-3.0, 3.0, 1.0));
}

#[test]
fn overflowing_data_span_keeps_previous_bounds() {
    let mut chart = auto_scaled_chart();
    let mut series = Series::new("extreme");
    series.add_points([Point::new(-1.0e308, 0.0), Point::new(1.0e308, 1.0)]);
    chart.add_series(series.into_shared()).expect("add");

    assert_eq!(chart.x_axis().min, -5.0);
    assert_eq!(chart.x_axis().max, 5.0);
    assert!(chart.y_axis().max >= 1.0);

    let mut renderer = NullRenderer::default();
    chart
        .draw(&mut renderer, Viewport::new(400, 300))
        .expect("draw with previous x bounds");
    assert_eq!(renderer.frames_rendered, 1);
}

#[test]
fn x_axis_fits_even_when_every_y_is_nan() {
    let mut chart = auto_scaled_chart();
    let mut series = Series::new("no y");
    series.add_points([Point::new(0.0, f64::NAN), Point::new(83.0, f64::NAN)]);
    chart.add_series(series.into_shared()).expect("add");

    assert_eq!(chart.x_axis().min, 0.0);
    assert_eq!(chart.x_axis().max, 90.0);
    assert!(!chart.auto_scale_y().expect("y auto-scale"));
    assert_eq!(chart.y_axis().min, -3.0);
}
