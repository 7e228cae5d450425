use approx::assert_abs_diff_eq;

use chart2d_rs::ChartError;
use chart2d_rs::core::{
    Axis, CoordinateMapper, Interpolation, PixelPoint, PlotRect, Point, project_line_geometry,
};

#[test]
fn midpoint_maps_to_plot_center() {
    let mapper = CoordinateMapper::new(PlotRect::new(0.0, 0.0, 200.0, 100.0), (0.0, 2.0), (0.0, 1.0))
        .expect("mapper");
    assert_abs_diff_eq!(mapper.map_x(1.0), 100.0);
    assert_abs_diff_eq!(mapper.map_y(0.5), 50.0);
}

#[test]
fn range_ends_land_exactly_on_plot_edges() {
    let plot = PlotRect::new(37.5, 12.25, 413.0, 287.0);
    let mapper = CoordinateMapper::new(plot, (-3.7, 91.3), (0.001, 0.009)).expect("mapper");

    assert_eq!(mapper.map_x(-3.7), plot.left());
    assert_eq!(mapper.map_x(91.3), plot.right());
    assert_eq!(mapper.map_y(0.001), plot.bottom());
    assert_eq!(mapper.map_y(0.009), plot.top());
}

#[test]
fn y_axis_grows_upwards() {
    let mapper = CoordinateMapper::new(PlotRect::new(10.0, 10.0, 100.0, 100.0), (0.0, 1.0), (0.0, 10.0))
        .expect("mapper");
    assert!(mapper.map_y(8.0) < mapper.map_y(2.0));
}

#[test]
fn zero_width_range_is_degenerate() {
    let err = CoordinateMapper::new(PlotRect::new(0.0, 0.0, 100.0, 100.0), (1.0, 1.0), (0.0, 1.0))
        .expect_err("zero x span");
    assert!(matches!(
        err,
        ChartError::DegenerateRange { axis: Axis::X, .. }
    ));

    let err = CoordinateMapper::new(PlotRect::new(0.0, 0.0, 100.0, 100.0), (0.0, 1.0), (2.0, -2.0))
        .expect_err("inverted y span");
    assert!(matches!(
        err,
        ChartError::DegenerateRange { axis: Axis::Y, .. }
    ));
}

#[test]
fn empty_plot_is_rejected() {
    let err = CoordinateMapper::new(PlotRect::new(0.0, 0.0, 0.0, 100.0), (0.0, 1.0), (0.0, 1.0))
        .expect_err("empty plot");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn pixel_to_data_inverts_mapping() {
    let mapper = CoordinateMapper::new(PlotRect::new(50.0, 50.0, 300.0, 200.0), (-5.0, 5.0), (-3.0, 3.0))
        .expect("mapper");
    let pixel = mapper.map_point(Point::new(1.25, -0.75));
    let back = mapper.pixel_to_data(pixel);
    assert_abs_diff_eq!(back.x, 1.25, epsilon = 1e-9);
    assert_abs_diff_eq!(back.y, -0.75, epsilon = 1e-9);
}

#[test]
fn map_points_preserves_order() {
    let mapper = CoordinateMapper::new(PlotRect::new(0.0, 0.0, 100.0, 100.0), (0.0, 10.0), (0.0, 10.0))
        .expect("mapper");
    let pixels = mapper.map_points(&[Point::new(10.0, 0.0), Point::new(0.0, 10.0)]);
    assert_eq!(pixels, vec![PixelPoint::new(100.0, 100.0), PixelPoint::new(0.0, 0.0)]);
}

#[test]
fn line_geometry_skips_non_finite_samples_and_builds_curves() {
    let mapper = CoordinateMapper::new(PlotRect::new(0.0, 0.0, 100.0, 100.0), (0.0, 4.0), (0.0, 4.0))
        .expect("mapper");
    let points = [
        Point::new(0.0, 0.0),
        Point::new(1.0, f64::NAN),
        Point::new(2.0, 2.0),
        Point::new(4.0, 1.0),
    ];

    let linear = project_line_geometry(&points, &mapper, Interpolation::Linear);
    assert_eq!(linear.vertices.len(), 3);
    assert!(linear.curve.is_empty());

    let spline = project_line_geometry(&points, &mapper, Interpolation::Spline);
    assert_eq!(spline.curve.len(), 2);
    assert_eq!(spline.curve[0].from, spline.vertices[0]);
    assert_eq!(spline.curve[1].to, spline.vertices[2]);
}
