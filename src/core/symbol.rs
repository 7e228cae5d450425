use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Marker shape drawn at every point of a line series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SymbolShape {
    #[default]
    None,
    /// Filled and outlined circle.
    Dot,
    /// Filled and outlined square.
    Box,
    /// Outlined circle.
    Circle,
    /// Filled and outlined diamond.
    Diamond,
    /// Outlined square.
    Square,
}

/// Point marker settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub shape: SymbolShape,
    pub size: f64,
    pub border_color: Color,
    pub fill_color: Color,
    pub border_size: f64,
}

impl Default for Symbol {
    fn default() -> Self {
        Self {
            shape: SymbolShape::None,
            size: 8.0,
            border_color: Color::BLACK,
            fill_color: Color::WHITE,
            border_size: 1.0,
        }
    }
}

impl Symbol {
    #[must_use]
    pub fn new(shape: SymbolShape) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, border_color: Color, fill_color: Color) -> Self {
        self.border_color = border_color;
        self.fill_color = fill_color;
        self
    }

    #[must_use]
    pub fn with_border_size(mut self, border_size: f64) -> Self {
        self.border_size = border_size;
        self
    }

    #[must_use]
    pub fn is_visible(self) -> bool {
        self.shape != SymbolShape::None && self.size > 0.0
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.size.is_finite() || self.size < 0.0 {
            return Err(ChartError::InvalidData(
                "symbol size must be finite and >= 0".to_owned(),
            ));
        }
        if !self.border_size.is_finite() || self.border_size <= 0.0 {
            return Err(ChartError::InvalidData(
                "symbol border size must be finite and > 0".to_owned(),
            ));
        }
        self.border_color.validate()?;
        self.fill_color.validate()
    }
}
