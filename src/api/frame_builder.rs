use tracing::{debug, warn};

use crate::core::{
    AreaSeries, Axis, CoordinateMapper, Interpolation, PixelPoint, PlotRect, Series,
    SharedAreaSeries, SharedSeries, Symbol, SymbolShape, TickScale, Viewport,
    project_line_geometry,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CanvasLayerKind, EllipsePrimitive, LinePrimitive, PathCommand, PathPrimitive,
    PolygonPrimitive, Primitive, RectPrimitive, RenderFrame, Stroke, TextHAlign, TextPrimitive,
};

use super::{ChartConfig, TextMeasurer};

/// Gap between the plot bottom and the x tick labels.
const X_TICK_LABEL_GAP_PX: f64 = 4.0;
/// Gap between the y tick labels and the plot left edge.
const Y_TICK_LABEL_GAP_PX: f64 = 3.0;

/// Inputs of one frame build.
pub(super) struct FrameSources<'a> {
    pub config: &'a ChartConfig,
    pub series: Vec<&'a SharedSeries>,
    pub areas: Vec<&'a SharedAreaSeries>,
    pub measurer: &'a dyn TextMeasurer,
}

/// Builds the full chart scene for `viewport`.
///
/// A viewport too small to hold the plot rectangle yields a frame with only
/// the background. Series that fail to project are logged and left out.
pub(super) fn build_chart_frame(
    sources: &FrameSources<'_>,
    viewport: Viewport,
) -> ChartResult<RenderFrame> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let config = sources.config;
    let chart_rect = viewport.rect();
    let plot = chart_rect.inset(config.area.border_px);
    let mut frame = RenderFrame::new(viewport, plot);

    frame.push(
        CanvasLayerKind::Background,
        Primitive::Rect(RectPrimitive::filled(
            chart_rect.x,
            chart_rect.y,
            chart_rect.width,
            chart_rect.height,
            config.area.back_color,
        )),
    );

    if !plot.is_valid() {
        debug!(
            width = viewport.width,
            height = viewport.height,
            border = config.area.border_px,
            "plot area collapsed, drawing background only"
        );
        return Ok(frame);
    }

    frame.push(
        CanvasLayerKind::Background,
        Primitive::Rect(RectPrimitive::outlined(
            plot.x,
            plot.y,
            plot.width,
            plot.height,
            Stroke::solid(config.area.border_color, 1.0),
        )),
    );

    let x_scale = config.axes.x.tick_scale(Axis::X)?;
    let y_scale = config.axes.y.tick_scale(Axis::Y)?;
    let mapper = CoordinateMapper::new(plot, (x_scale.min, x_scale.max), (y_scale.min, y_scale.max))?;

    push_grid(&mut frame, config, &mapper, x_scale, y_scale);
    push_title(&mut frame, config, sources.measurer, plot);
    push_axis_labels(&mut frame, config, sources.measurer, chart_rect);
    push_tick_labels(&mut frame, config, sources.measurer, &mapper, x_scale, y_scale);

    for shared in &sources.areas {
        let Ok(area) = shared.try_borrow() else {
            warn!("area series is mutably borrowed during draw; skipping");
            continue;
        };
        match area_primitive(&area, &mapper) {
            Ok(Some(primitive)) => frame.push(CanvasLayerKind::Areas, primitive),
            Ok(None) => {}
            Err(err) => warn!(series = %area.id(), error = %err, "skipping area series"),
        }
    }

    for shared in &sources.series {
        let Ok(series) = shared.try_borrow() else {
            warn!("series is mutably borrowed during draw; skipping");
            continue;
        };
        match series_primitives(&series, &mapper) {
            Ok(primitives) => frame.extend(CanvasLayerKind::Series, primitives),
            Err(err) => warn!(series = %series.id(), error = %err, "skipping series"),
        }
    }

    debug!(
        primitives = frame.primitive_count(),
        series = sources.series.len(),
        areas = sources.areas.len(),
        "chart frame built"
    );
    Ok(frame)
}

fn push_grid(
    frame: &mut RenderFrame,
    config: &ChartConfig,
    mapper: &CoordinateMapper,
    x_scale: TickScale,
    y_scale: TickScale,
) {
    let grid = config.grid;
    let stroke =
        Stroke::solid(grid.color, grid.thickness).with_dash(grid.dash.pattern(grid.thickness));
    let plot = mapper.plot();

    if grid.show_x {
        for value in x_scale.grid_values() {
            let x = mapper.map_x(value);
            frame.push(
                CanvasLayerKind::Grid,
                Primitive::Line(LinePrimitive::new(
                    x,
                    plot.bottom(),
                    x,
                    plot.top(),
                    stroke.clone(),
                )),
            );
        }
    }

    if grid.show_y {
        for value in y_scale.grid_values() {
            let y = mapper.map_y(value);
            frame.push(
                CanvasLayerKind::Grid,
                Primitive::Line(LinePrimitive::new(
                    plot.left(),
                    y,
                    plot.right(),
                    y,
                    stroke.clone(),
                )),
            );
        }
    }
}

fn push_title(
    frame: &mut RenderFrame,
    config: &ChartConfig,
    measurer: &dyn TextMeasurer,
    plot: PlotRect,
) {
    let title = &config.title;
    if title.text.is_empty() {
        return;
    }
    let size = measurer.measure(&title.text, &title.font);
    frame.push(
        CanvasLayerKind::Title,
        Primitive::Text(TextPrimitive::new(
            title.text.clone(),
            plot.x + plot.width / 2.0 - size.width / 2.0,
            0.0,
            title.font.clone(),
            title.color,
            TextHAlign::Left,
        )),
    );
}

fn push_axis_labels(
    frame: &mut RenderFrame,
    config: &ChartConfig,
    measurer: &dyn TextMeasurer,
    chart_rect: PlotRect,
) {
    let labels = &config.labels;
    let border = config.area.border_px;

    if !labels.x_label.is_empty() {
        let size = measurer.measure(&labels.x_label, &labels.font);
        frame.push(
            CanvasLayerKind::AxisLabels,
            Primitive::Text(TextPrimitive::new(
                labels.x_label.clone(),
                chart_rect.width / 2.0,
                chart_rect.bottom() - size.height - border / 4.0,
                labels.font.clone(),
                labels.color,
                TextHAlign::Center,
            )),
        );
    }

    if !labels.y_label.is_empty() {
        let size = measurer.measure(&labels.y_label, &labels.font);
        frame.push(
            CanvasLayerKind::AxisLabels,
            Primitive::Text(
                TextPrimitive::new(
                    labels.y_label.clone(),
                    chart_rect.x - size.height / 2.0 + border / 2.0,
                    chart_rect.height / 2.0,
                    labels.font.clone(),
                    labels.color,
                    TextHAlign::Center,
                )
                .rotated(-90.0),
            ),
        );
    }
}

fn push_tick_labels(
    frame: &mut RenderFrame,
    config: &ChartConfig,
    measurer: &dyn TextMeasurer,
    mapper: &CoordinateMapper,
    x_scale: TickScale,
    y_scale: TickScale,
) {
    let style = &config.axes.tick_labels;
    let plot = mapper.plot();

    for value in x_scale.tick_values() {
        frame.push(
            CanvasLayerKind::TickLabels,
            Primitive::Text(TextPrimitive::new(
                config.axes.x.format.format(value),
                mapper.map_x(value),
                plot.bottom() + X_TICK_LABEL_GAP_PX,
                style.font.clone(),
                style.color,
                TextHAlign::Center,
            )),
        );
    }

    let line_height = measurer.measure("0", &style.font).height;
    for value in y_scale.tick_values() {
        frame.push(
            CanvasLayerKind::TickLabels,
            Primitive::Text(TextPrimitive::new(
                config.axes.y.format.format(value),
                plot.left() - Y_TICK_LABEL_GAP_PX,
                mapper.map_y(value) - line_height / 2.0,
                style.font.clone(),
                style.color,
                TextHAlign::Right,
            )),
        );
    }
}

/// Filled band between the lower and upper boundaries; `None` when empty.
fn area_primitive(area: &AreaSeries, mapper: &CoordinateMapper) -> ChartResult<Option<Primitive>> {
    let vertices = area.fill_polygon(mapper)?;
    if vertices.is_empty() {
        return Ok(None);
    }
    if vertices.iter().any(|vertex| !vertex.is_finite()) {
        return Err(ChartError::InvalidData(
            "area series contains non-finite samples".to_owned(),
        ));
    }
    Ok(Some(Primitive::Polygon(PolygonPrimitive::filled(
        vertices,
        area.effective_fill_color(),
    ))))
}

/// Symbols at every sample followed by the connecting line.
fn series_primitives(series: &Series, mapper: &CoordinateMapper) -> ChartResult<Vec<Primitive>> {
    let style = series.line_style();
    let symbol = series.symbol();
    style.validate()?;
    symbol.validate()?;

    let geometry = project_line_geometry(series.points(), mapper, style.interpolation);
    let curve_finite = geometry.curve.iter().all(|segment| {
        segment.control1.is_finite() && segment.control2.is_finite() && segment.to.is_finite()
    });
    if !curve_finite || geometry.vertices.iter().any(|vertex| !vertex.is_finite()) {
        return Err(ChartError::InvalidData(
            "series maps outside the representable pixel range".to_owned(),
        ));
    }
    let mut primitives = Vec::with_capacity(geometry.vertices.len() + 1);

    if symbol.is_visible() {
        for vertex in &geometry.vertices {
            primitives.extend(symbol_primitives(symbol, *vertex));
        }
    }

    if style.visible && geometry.vertices.len() >= 2 {
        let stroke = Stroke::solid(style.color, style.thickness)
            .with_dash(style.dash.pattern(style.thickness));
        let path = match style.interpolation {
            Interpolation::Linear => PathPrimitive::polyline(&geometry.vertices, stroke),
            Interpolation::Spline => {
                let mut commands = Vec::with_capacity(geometry.curve.len() + 1);
                commands.push(PathCommand::MoveTo(geometry.vertices[0]));
                commands.extend(geometry.curve.iter().map(|segment| PathCommand::CubicTo {
                    control1: segment.control1,
                    control2: segment.control2,
                    to: segment.to,
                }));
                PathPrimitive { commands, stroke }
            }
        };
        primitives.push(Primitive::Path(path));
    }

    Ok(primitives)
}

/// Marker primitives for one sample centered on `center`.
#[must_use]
pub fn symbol_primitives(symbol: Symbol, center: PixelPoint) -> Vec<Primitive> {
    let half = symbol.size / 2.0;
    let stroke = Stroke::solid(symbol.border_color, symbol.border_size);
    match symbol.shape {
        SymbolShape::None => Vec::new(),
        SymbolShape::Dot => vec![Primitive::Ellipse(
            EllipsePrimitive::circle(center, half)
                .with_fill(symbol.fill_color)
                .with_stroke(stroke),
        )],
        SymbolShape::Circle => vec![Primitive::Ellipse(
            EllipsePrimitive::circle(center, half).with_stroke(stroke),
        )],
        SymbolShape::Box => vec![Primitive::Rect(
            RectPrimitive::filled(
                center.x - half,
                center.y - half,
                symbol.size,
                symbol.size,
                symbol.fill_color,
            )
            .with_stroke(stroke),
        )],
        SymbolShape::Square => vec![Primitive::Rect(RectPrimitive::outlined(
            center.x - half,
            center.y - half,
            symbol.size,
            symbol.size,
            stroke,
        ))],
        SymbolShape::Diamond => vec![Primitive::Polygon(
            PolygonPrimitive::filled(
                vec![
                    PixelPoint::new(center.x, center.y - half),
                    PixelPoint::new(center.x + half, center.y),
                    PixelPoint::new(center.x, center.y + half),
                    PixelPoint::new(center.x - half, center.y),
                ],
                symbol.fill_color,
            )
            .with_stroke(stroke),
        )],
    }
}
