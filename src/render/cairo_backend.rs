use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::TAU;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, EllipsePrimitive, FontSpec, PathCommand, Primitive, RenderFrame, Renderer, Stroke,
    TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub paths_drawn: usize,
    pub polygons_drawn: usize,
    pub ellipses_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the offscreen surface as PNG.
    pub fn write_png<W: std::io::Write>(&self, writer: &mut W) -> ChartResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| ChartError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for (_, primitive) in frame.primitives() {
            match primitive {
                Primitive::Line(line) => {
                    context.move_to(line.x1, line.y1);
                    context.line_to(line.x2, line.y2);
                    stroke_path(context, &line.stroke)?;
                    stats.lines_drawn += 1;
                }
                Primitive::Rect(rect) => {
                    context.rectangle(rect.x, rect.y, rect.width, rect.height);
                    paint_path(context, rect.fill, rect.stroke.as_ref())?;
                    stats.rects_drawn += 1;
                }
                Primitive::Path(path) => {
                    append_commands(context, &path.commands);
                    stroke_path(context, &path.stroke)?;
                    stats.paths_drawn += 1;
                }
                Primitive::Polygon(polygon) => {
                    let Some((first, rest)) = polygon.vertices.split_first() else {
                        continue;
                    };
                    context.move_to(first.x, first.y);
                    for vertex in rest {
                        context.line_to(vertex.x, vertex.y);
                    }
                    context.close_path();
                    paint_path(context, polygon.fill, polygon.stroke.as_ref())?;
                    stats.polygons_drawn += 1;
                }
                Primitive::Ellipse(ellipse) => {
                    if append_ellipse_path(context, ellipse)? {
                        paint_path(context, ellipse.fill, ellipse.stroke.as_ref())?;
                        stats.ellipses_drawn += 1;
                    }
                }
                Primitive::Text(text) => {
                    draw_text(context, text)?;
                    stats.texts_drawn += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Creates a Pango font description sized in absolute pixels.
pub(crate) fn font_description(font: &FontSpec) -> FontDescription {
    let mut description = FontDescription::new();
    description.set_family(&font.family);
    description.set_absolute_size(font.size_px * f64::from(pango::SCALE));
    description
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn stroke_path(context: &Context, stroke: &Stroke) -> ChartResult<()> {
    apply_color(context, stroke.color);
    context.set_line_width(stroke.width);
    context.set_dash(&stroke.dash, 0.0);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke path", err))
}

fn paint_path(context: &Context, fill: Option<Color>, stroke: Option<&Stroke>) -> ChartResult<()> {
    match (fill, stroke) {
        (Some(fill), Some(stroke)) => {
            apply_color(context, fill);
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill path", err))?;
            stroke_path(context, stroke)
        }
        (Some(fill), None) => {
            apply_color(context, fill);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill path", err))
        }
        (None, Some(stroke)) => stroke_path(context, stroke),
        (None, None) => {
            context.new_path();
            Ok(())
        }
    }
}

fn append_commands(context: &Context, commands: &[PathCommand]) {
    for command in commands {
        match *command {
            PathCommand::MoveTo(point) => context.move_to(point.x, point.y),
            PathCommand::LineTo(point) => context.line_to(point.x, point.y),
            PathCommand::CubicTo {
                control1,
                control2,
                to,
            } => context.curve_to(control1.x, control1.y, control2.x, control2.y, to.x, to.y),
        }
    }
}

/// Appends the ellipse outline; returns `false` for zero-size ellipses.
fn append_ellipse_path(context: &Context, ellipse: &EllipsePrimitive) -> ChartResult<bool> {
    if ellipse.radius_x <= 0.0 || ellipse.radius_y <= 0.0 {
        return Ok(false);
    }
    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    context.translate(ellipse.center.x, ellipse.center.y);
    context.scale(ellipse.radius_x, ellipse.radius_y);
    context.new_sub_path();
    context.arc(0.0, 0.0, 1.0, 0.0, TAU);
    context.close_path();
    // The path keeps device coordinates, so the stroke width stays unscaled.
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))?;
    Ok(true)
}

fn draw_text(context: &Context, text: &TextPrimitive) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    layout.set_font_description(Some(&font_description(&text.font)));
    layout.set_text(&text.text);

    let (text_width, _text_height) = layout.pixel_size();
    let offset_x = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -f64::from(text_width) / 2.0,
        TextHAlign::Right => -f64::from(text_width),
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    context.translate(text.x, text.y);
    if text.rotation_deg != 0.0 {
        context.rotate(text.rotation_deg.to_radians());
    }
    apply_color(context, text.color);
    context.move_to(offset_x, 0.0);
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
