#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{Axis, LinearScale, PixelPoint, PlotRect, Point};
use crate::error::{ChartError, ChartResult};

#[cfg(feature = "parallel-projection")]
const PARALLEL_PROJECTION_THRESHOLD: usize = 8_192;

/// Data-space to plot-rectangle transform.
///
/// x grows to the right from `plot.left()`; y grows upward from
/// `plot.bottom()`, so pixel y decreases as data y increases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    plot: PlotRect,
    x_scale: LinearScale,
    y_scale: LinearScale,
}

impl CoordinateMapper {
    /// Builds a mapper for the given axis ranges.
    ///
    /// Fails with `DegenerateRange` when either axis has `max <= min`, which
    /// would otherwise divide by zero (or flip the axis) during mapping.
    pub fn new(plot: PlotRect, x_range: (f64, f64), y_range: (f64, f64)) -> ChartResult<Self> {
        if !plot.is_valid() {
            return Err(ChartError::InvalidData(format!(
                "plot rectangle must be finite with positive size (width={}, height={})",
                plot.width, plot.height
            )));
        }

        Ok(Self {
            plot,
            x_scale: axis_scale(Axis::X, x_range)?,
            y_scale: axis_scale(Axis::Y, y_range)?,
        })
    }

    #[must_use]
    pub fn plot(&self) -> PlotRect {
        self.plot
    }

    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        self.x_scale.domain()
    }

    #[must_use]
    pub fn y_range(&self) -> (f64, f64) {
        self.y_scale.domain()
    }

    #[must_use]
    pub fn map_x(&self, x: f64) -> f64 {
        self.x_scale
            .domain_to_pixel(x, self.plot.left(), self.plot.width)
    }

    #[must_use]
    pub fn map_y(&self, y: f64) -> f64 {
        self.y_scale
            .domain_to_pixel(y, self.plot.bottom(), -self.plot.height)
    }

    #[must_use]
    pub fn map_point(&self, point: Point) -> PixelPoint {
        PixelPoint::new(self.map_x(point.x), self.map_y(point.y))
    }

    /// Maps a slice of points, preserving order.
    #[must_use]
    pub fn map_points(&self, points: &[Point]) -> Vec<PixelPoint> {
        #[cfg(feature = "parallel-projection")]
        if points.len() >= PARALLEL_PROJECTION_THRESHOLD {
            return points.par_iter().map(|point| self.map_point(*point)).collect();
        }

        points.iter().map(|point| self.map_point(*point)).collect()
    }

    /// Inverse of `map_point`.
    #[must_use]
    pub fn pixel_to_data(&self, pixel: PixelPoint) -> Point {
        Point::new(
            self.x_scale
                .pixel_to_domain(pixel.x, self.plot.left(), self.plot.width),
            self.y_scale
                .pixel_to_domain(pixel.y, self.plot.bottom(), -self.plot.height),
        )
    }
}

fn axis_scale(axis: Axis, (min, max): (f64, f64)) -> ChartResult<LinearScale> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ChartError::InvalidData(format!(
            "{axis} axis range must be finite"
        )));
    }
    if max <= min {
        return Err(ChartError::DegenerateRange { axis, min, max });
    }
    LinearScale::new(min, max)
}
