use crate::error::{ChartError, ChartResult};

/// Affine map from a numeric domain onto a pixel extent.
///
/// The pixel extent may be negative, which is how the y axis flips so that
/// larger values end up closer to the top of the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.domain_end - self.domain_start
    }

    /// Maps `value` to `pixel_origin + t * pixel_extent` where `t` is the
    /// normalized domain position.
    ///
    /// `t` is computed before scaling so the domain end lands on
    /// `pixel_origin + pixel_extent` without rounding drift.
    #[must_use]
    pub fn domain_to_pixel(self, value: f64, pixel_origin: f64, pixel_extent: f64) -> f64 {
        let normalized = (value - self.domain_start) / self.span();
        pixel_origin + normalized * pixel_extent
    }

    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64, pixel_origin: f64, pixel_extent: f64) -> f64 {
        let normalized = (pixel - pixel_origin) / pixel_extent;
        self.domain_start + normalized * self.span()
    }
}
