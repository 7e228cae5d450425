use serde::{Deserialize, Serialize};

use crate::core::{DashPattern, PixelPoint};
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const LIGHT_GRAY: Self = Self::rgb(211.0 / 255.0, 211.0 / 255.0, 211.0 / 255.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels.
    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        let channel = |value: u8| f64::from(value) / 255.0;
        Self::rgba(channel(red), channel(green), channel(blue), channel(alpha))
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Font request forwarded to the text backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f64,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Sans", 11.0)
    }
}

/// Outline settings shared by stroked primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// On/off dash lengths; empty means solid.
    pub dash: DashPattern,
}

impl Stroke {
    #[must_use]
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: DashPattern::new(),
        }
    }

    #[must_use]
    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        if self
            .dash
            .iter()
            .any(|length| !length.is_finite() || *length < 0.0)
        {
            return Err(ChartError::InvalidData(
                "dash lengths must be finite and >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Stroke,
}

impl LinePrimitive {
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        self.stroke.validate()
    }
}

/// Axis-aligned rectangle, optionally filled and/or outlined.
#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl RectPrimitive {
    #[must_use]
    pub fn filled(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: Some(fill),
            stroke: None,
        }
    }

    #[must_use]
    pub fn outlined(x: f64, y: f64, width: f64, height: f64, stroke: Stroke) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: None,
            stroke: Some(stroke),
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "rect geometry must be finite with non-negative size".to_owned(),
            ));
        }
        validate_paint(self.fill, self.stroke.as_ref())
    }
}

/// One step of a path outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(PixelPoint),
    LineTo(PixelPoint),
    CubicTo {
        control1: PixelPoint,
        control2: PixelPoint,
        to: PixelPoint,
    },
}

impl PathCommand {
    fn points(self) -> impl Iterator<Item = PixelPoint> {
        let (first, second, third) = match self {
            Self::MoveTo(point) | Self::LineTo(point) => (point, None, None),
            Self::CubicTo {
                control1,
                control2,
                to,
            } => (control1, Some(control2), Some(to)),
        };
        std::iter::once(first).chain(second).chain(third)
    }
}

/// Open stroked path (polylines and curves).
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub commands: Vec<PathCommand>,
    pub stroke: Stroke,
}

impl PathPrimitive {
    /// Straight polyline through `points`.
    #[must_use]
    pub fn polyline(points: &[PixelPoint], stroke: Stroke) -> Self {
        let commands = points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                if index == 0 {
                    PathCommand::MoveTo(*point)
                } else {
                    PathCommand::LineTo(*point)
                }
            })
            .collect();
        Self { commands, stroke }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !matches!(self.commands.first(), Some(PathCommand::MoveTo(_))) {
            return Err(ChartError::InvalidData(
                "path must start with a move-to command".to_owned(),
            ));
        }
        if self
            .commands
            .iter()
            .flat_map(|command| command.points())
            .any(|point| !point.is_finite())
        {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        self.stroke.validate()
    }
}

/// Closed polygon, optionally filled and/or outlined.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPrimitive {
    pub vertices: Vec<PixelPoint>,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl PolygonPrimitive {
    #[must_use]
    pub fn filled(vertices: Vec<PixelPoint>, fill: Color) -> Self {
        Self {
            vertices,
            fill: Some(fill),
            stroke: None,
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.vertices.iter().any(|vertex| !vertex.is_finite()) {
            return Err(ChartError::InvalidData(
                "polygon vertices must be finite".to_owned(),
            ));
        }
        validate_paint(self.fill, self.stroke.as_ref())
    }
}

/// Ellipse inscribed in the rectangle centered on `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipsePrimitive {
    pub center: PixelPoint,
    pub radius_x: f64,
    pub radius_y: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl EllipsePrimitive {
    #[must_use]
    pub fn circle(center: PixelPoint, radius: f64) -> Self {
        Self {
            center,
            radius_x: radius,
            radius_y: radius,
            fill: None,
            stroke: None,
        }
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.center.is_finite()
            || !self.radius_x.is_finite()
            || !self.radius_y.is_finite()
            || self.radius_x < 0.0
            || self.radius_y < 0.0
        {
            return Err(ChartError::InvalidData(
                "ellipse geometry must be finite with non-negative radii".to_owned(),
            ));
        }
        validate_paint(self.fill, self.stroke.as_ref())
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
///
/// `(x, y)` anchors the top edge of the text; alignment is applied along the
/// text baseline direction after rotating by `rotation_deg` around the anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: FontSpec,
    pub color: Color,
    pub h_align: TextHAlign,
    pub rotation_deg: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font: FontSpec,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font,
            color,
            h_align,
            rotation_deg: 0.0,
        }
    }

    #[must_use]
    pub fn rotated(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation_deg.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        self.font.validate()?;
        self.color.validate()
    }
}

/// Any drawable item of a render frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Path(PathPrimitive),
    Polygon(PolygonPrimitive),
    Ellipse(EllipsePrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Path(path) => path.validate(),
            Self::Polygon(polygon) => polygon.validate(),
            Self::Ellipse(ellipse) => ellipse.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

fn validate_paint(fill: Option<Color>, stroke: Option<&Stroke>) -> ChartResult<()> {
    if let Some(fill) = fill {
        fill.validate()?;
    }
    if let Some(stroke) = stroke {
        stroke.validate()?;
    }
    Ok(())
}
