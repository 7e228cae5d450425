use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// How consecutive series points are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Interpolation {
    #[default]
    Linear,
    /// Cardinal spline through every point.
    Spline,
}

/// Stroke dash pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DashStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

/// On/off lengths of one dash cycle, in pixels.
pub type DashPattern = SmallVec<[f64; 6]>;

impl DashStyle {
    /// Dash pattern scaled by the stroke width; empty for solid strokes.
    #[must_use]
    pub fn pattern(self, stroke_width: f64) -> DashPattern {
        let unit = if stroke_width.is_finite() && stroke_width > 0.0 {
            stroke_width
        } else {
            1.0
        };
        let base: DashPattern = match self {
            Self::Solid => SmallVec::new(),
            Self::Dash => smallvec![3.0, 1.0],
            Self::Dot => smallvec![1.0, 1.0],
            Self::DashDot => smallvec![3.0, 1.0, 1.0, 1.0],
            Self::DashDotDot => smallvec![3.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        };
        base.into_iter().map(|len| len * unit).collect()
    }
}

/// Stroke settings for a line series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub thickness: f64,
    #[serde(default)]
    pub dash: DashStyle,
    #[serde(default)]
    pub interpolation: Interpolation,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            thickness: 1.0,
            dash: DashStyle::Solid,
            interpolation: Interpolation::Linear,
            visible: true,
        }
    }
}

impl LineStyle {
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_dash(mut self, dash: DashStyle) -> Self {
        self.dash = dash;
        self
    }

    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.thickness.is_finite() || self.thickness <= 0.0 {
            return Err(ChartError::InvalidData(
                "line thickness must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
