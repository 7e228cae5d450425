use serde::{Deserialize, Serialize};

use crate::core::{Axis, DashStyle, TickScale, TickScaleTuning};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, FontSpec};

use super::TickFormat;

/// Background and plot border of the chart canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartAreaStyle {
    #[serde(default = "default_back_color")]
    pub back_color: Color,
    #[serde(default = "default_border_color")]
    pub border_color: Color,
    /// Inset in pixels between the canvas edge and the plot rectangle.
    #[serde(default = "default_border_px")]
    pub border_px: f64,
}

impl Default for ChartAreaStyle {
    fn default() -> Self {
        Self {
            back_color: default_back_color(),
            border_color: default_border_color(),
            border_px: default_border_px(),
        }
    }
}

impl ChartAreaStyle {
    pub fn validate(self) -> ChartResult<()> {
        if !self.border_px.is_finite() || self.border_px < 0.0 {
            return Err(ChartError::InvalidData(
                "chart area border must be finite and >= 0".to_owned(),
            ));
        }
        self.back_color.validate()?;
        self.border_color.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridStyle {
    #[serde(default = "default_grid_color")]
    pub color: Color,
    #[serde(default = "default_grid_thickness")]
    pub thickness: f64,
    #[serde(default)]
    pub dash: DashStyle,
    /// Vertical lines at every x tick.
    #[serde(default = "default_true")]
    pub show_x: bool,
    /// Horizontal lines at every y tick.
    #[serde(default = "default_true")]
    pub show_y: bool,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            color: default_grid_color(),
            thickness: default_grid_thickness(),
            dash: DashStyle::Solid,
            show_x: true,
            show_y: true,
        }
    }
}

impl GridStyle {
    pub fn validate(self) -> ChartResult<()> {
        if !self.thickness.is_finite() || self.thickness <= 0.0 {
            return Err(ChartError::InvalidData(
                "grid thickness must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Title centered above the plot. An empty text draws nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartTitle {
    #[serde(default = "default_title_text")]
    pub text: String,
    #[serde(default = "default_title_font")]
    pub font: FontSpec,
    #[serde(default = "default_text_color")]
    pub color: Color,
}

impl Default for ChartTitle {
    fn default() -> Self {
        Self {
            text: default_title_text(),
            font: default_title_font(),
            color: default_text_color(),
        }
    }
}

impl ChartTitle {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.font.validate()?;
        self.color.validate()
    }
}

/// Captions for both axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxesLabels {
    #[serde(default = "default_x_label")]
    pub x_label: String,
    #[serde(default = "default_y_label")]
    pub y_label: String,
    #[serde(default = "default_label_font")]
    pub font: FontSpec,
    #[serde(default = "default_text_color")]
    pub color: Color,
}

impl Default for AxesLabels {
    fn default() -> Self {
        Self {
            x_label: default_x_label(),
            y_label: default_y_label(),
            font: default_label_font(),
            color: default_text_color(),
        }
    }
}

impl AxesLabels {
    #[must_use]
    pub fn new(x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            x_label: x_label.into(),
            y_label: y_label.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.font.validate()?;
        self.color.validate()
    }
}

/// Bounds, tick spacing and label format of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub min: f64,
    pub max: f64,
    pub tick: f64,
    #[serde(default)]
    pub auto_scale: bool,
    #[serde(default)]
    pub format: TickFormat,
}

impl AxisConfig {
    #[must_use]
    pub fn new(min: f64, max: f64, tick: f64) -> Self {
        Self {
            min,
            max,
            tick,
            auto_scale: false,
            format: TickFormat::default(),
        }
    }

    /// Current bounds as a validated tick scale.
    pub fn tick_scale(self, axis: Axis) -> ChartResult<TickScale> {
        TickScale::validated(axis, self.min, self.max, self.tick)
    }

    pub(crate) fn apply_scale(&mut self, scale: TickScale) {
        self.min = scale.min;
        self.max = scale.max;
        self.tick = scale.step;
    }
}

/// Color and font of the numeric tick labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLabelStyle {
    #[serde(default = "default_text_color")]
    pub color: Color,
    #[serde(default = "default_tick_font")]
    pub font: FontSpec,
}

impl Default for TickLabelStyle {
    fn default() -> Self {
        Self {
            color: default_text_color(),
            font: default_tick_font(),
        }
    }
}

impl TickLabelStyle {
    pub fn validate(&self) -> ChartResult<()> {
        self.font.validate()?;
        self.color.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxesConfig {
    #[serde(default = "default_x_axis")]
    pub x: AxisConfig,
    #[serde(default = "default_y_axis")]
    pub y: AxisConfig,
    #[serde(default)]
    pub tick_labels: TickLabelStyle,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            x: default_x_axis(),
            y: default_y_axis(),
            tick_labels: TickLabelStyle::default(),
        }
    }
}

impl AxesConfig {
    #[must_use]
    pub fn axis(&self, axis: Axis) -> AxisConfig {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub(crate) fn axis_mut(&mut self, axis: Axis) -> &mut AxisConfig {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.x.tick_scale(Axis::X)?;
        self.y.tick_scale(Axis::Y)?;
        self.tick_labels.validate()
    }
}

/// Complete chart setup.
///
/// This type is serializable so host applications can persist/load chart
/// appearance; every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartConfig {
    #[serde(default)]
    pub area: ChartAreaStyle,
    #[serde(default)]
    pub grid: GridStyle,
    #[serde(default)]
    pub title: ChartTitle,
    #[serde(default)]
    pub labels: AxesLabels,
    #[serde(default)]
    pub axes: AxesConfig,
    #[serde(default)]
    pub tick_tuning: TickScaleTuning,
}

impl ChartConfig {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title.text = title.into();
        self
    }

    #[must_use]
    pub fn with_axes_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.labels.x_label = x_label.into();
        self.labels.y_label = y_label.into();
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.axes.x = axis;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, axis: AxisConfig) -> Self {
        self.axes.y = axis;
        self
    }

    #[must_use]
    pub fn with_auto_scale(mut self, x: bool, y: bool) -> Self {
        self.axes.x.auto_scale = x;
        self.axes.y.auto_scale = y;
        self
    }

    #[must_use]
    pub fn with_border(mut self, border_px: f64) -> Self {
        self.area.border_px = border_px;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.area.validate()?;
        self.grid.validate()?;
        self.title.validate()?;
        self.labels.validate()?;
        self.axes.validate()?;
        self.tick_tuning.validate()
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_back_color() -> Color {
    Color::WHITE
}

fn default_border_color() -> Color {
    Color::BLACK
}

fn default_border_px() -> f64 {
    50.0
}

fn default_grid_color() -> Color {
    Color::LIGHT_GRAY
}

fn default_grid_thickness() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_title_text() -> String {
    "Title".to_owned()
}

fn default_title_font() -> FontSpec {
    FontSpec::new("Arial", 12.0)
}

fn default_text_color() -> Color {
    Color::BLACK
}

fn default_x_label() -> String {
    "X Axis".to_owned()
}

fn default_y_label() -> String {
    "Y Axis".to_owned()
}

fn default_label_font() -> FontSpec {
    FontSpec::new("Arial", 10.0)
}

fn default_tick_font() -> FontSpec {
    FontSpec::new("Arial", 8.0)
}

fn default_x_axis() -> AxisConfig {
    AxisConfig::new(-5.0, 5.0, 1.0)
}

fn default_y_axis() -> AxisConfig {
    AxisConfig::new(-3.0, 3.0, 1.0)
}
