#![cfg(feature = "cairo-backend")]

use chart2d_rs::api::{Chart, ChartConfig, PangoTextMeasurer};
use chart2d_rs::core::{AreaSeries, Point, Series, Symbol, SymbolShape, Viewport};
use chart2d_rs::render::{CairoRenderer, Color, Renderer};
use chart2d_rs::ChartError;

#[test]
fn cairo_renderer_rejects_empty_surface() {
    assert!(matches!(
        CairoRenderer::new(0, 200),
        Err(ChartError::InvalidData(_))
    ));
    assert!(CairoRenderer::new(200, -1).is_err());
}

#[test]
fn cairo_renderer_draws_full_chart() {
    let measurer = PangoTextMeasurer::new().expect("pango measurer");
    let mut chart = Chart::new(ChartConfig::default().with_auto_scale(true, true))
        .expect("chart")
        .with_text_measurer(measurer);

    let mut series = Series::new("sine").with_symbol(Symbol::new(SymbolShape::Circle));
    series.add_points((0..20).map(|i| {
        let x = f64::from(i) * 0.5;
        Point::new(x, x.sin())
    }));
    chart.add_series(series.into_shared()).expect("series");

    let mut band = AreaSeries::new("band");
    for i in 0..20 {
        let x = f64::from(i) * 0.5;
        band.add_point(x, x.sin() - 0.2, x.sin() + 0.2);
    }
    chart.add_area_series(band.into_shared()).expect("area");

    let mut renderer = CairoRenderer::new(640, 480).expect("cairo renderer");
    chart
        .draw(&mut renderer, Viewport::new(640, 480))
        .expect("draw");

    let stats = renderer.last_stats();
    assert!(stats.rects_drawn >= 2, "background and plot border");
    assert!(stats.lines_drawn > 0, "grid lines");
    assert_eq!(stats.polygons_drawn, 1);
    assert_eq!(stats.ellipses_drawn, 20);
    assert_eq!(stats.paths_drawn, 1);
    assert!(stats.texts_drawn >= 3);
    assert!(!chart.is_dirty());

    let mut png = Vec::new();
    renderer.write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn cairo_renderer_validates_clear_color() {
    let mut renderer = CairoRenderer::new(32, 32).expect("cairo renderer");
    assert!(renderer.set_clear_color(Color::rgba(2.0, 0.0, 0.0, 1.0)).is_err());
    renderer
        .set_clear_color(Color::rgb(0.1, 0.1, 0.1))
        .expect("valid color");

    let chart = Chart::default();
    let frame = chart.build_frame(Viewport::new(32, 32)).expect("frame");
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.last_stats().rects_drawn, 1);
}
