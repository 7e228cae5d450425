use crate::render::FontSpec;

/// Line box height relative to the font size.
const LINE_HEIGHT_RATIO: f64 = 1.2;

/// Pixel extent of a single-line string.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Text measurement used by frame layout to align labels.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> TextSize;
}

/// Backend-independent measurer with fixed per-glyph widths.
///
/// Results are deterministic, which keeps headless frames reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> TextSize {
        let width = if text.is_empty() {
            0.0
        } else {
            estimate_text_width_px(text, font.size_px)
        };
        TextSize {
            width,
            height: font.size_px * LINE_HEIGHT_RATIO,
        }
    }
}

fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

#[cfg(feature = "cairo-backend")]
pub use pango_measurer::PangoTextMeasurer;

#[cfg(feature = "cairo-backend")]
mod pango_measurer {
    use cairo::{Context, Format, ImageSurface};

    use super::{TextMeasurer, TextSize};
    use crate::error::{ChartError, ChartResult};
    use crate::render::{FontSpec, font_description};

    /// Measures text with Pango on a 1x1 scratch surface.
    #[derive(Debug)]
    pub struct PangoTextMeasurer {
        context: Context,
    }

    impl PangoTextMeasurer {
        pub fn new() -> ChartResult<Self> {
            let surface = ImageSurface::create(Format::ARgb32, 1, 1).map_err(|err| {
                ChartError::InvalidData(format!("failed to create measuring surface: {err}"))
            })?;
            let context = Context::new(&surface).map_err(|err| {
                ChartError::InvalidData(format!("failed to create measuring context: {err}"))
            })?;
            Ok(Self { context })
        }
    }

    impl TextMeasurer for PangoTextMeasurer {
        fn measure(&self, text: &str, font: &FontSpec) -> TextSize {
            let layout = pangocairo::functions::create_layout(&self.context);
            layout.set_font_description(Some(&font_description(font)));
            layout.set_text(text);
            let (width, height) = layout.pixel_size();
            TextSize {
                width: f64::from(width),
                height: f64::from(height),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EstimatedTextMeasurer, TextMeasurer};
    use crate::render::FontSpec;

    #[test]
    fn digits_are_wider_than_separators() {
        let font = FontSpec::new("Sans", 10.0);
        let measurer = EstimatedTextMeasurer;
        let digits = measurer.measure("00", &font);
        let separators = measurer.measure("..", &font);
        assert!(digits.width > separators.width);
        assert!((digits.height - 12.0).abs() < 1e-9);
    }

    #[test]
    fn empty_text_has_no_width() {
        let size = EstimatedTextMeasurer.measure("", &FontSpec::default());
        assert_eq!(size.width, 0.0);
    }
}
