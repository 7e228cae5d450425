use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;

/// Tension used for smoothed series curves.
pub const SPLINE_TENSION: f64 = 0.5;

/// One cubic Bezier piece of a smoothed curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierSegment {
    pub from: PixelPoint,
    pub control1: PixelPoint,
    pub control2: PixelPoint,
    pub to: PixelPoint,
}

/// Converts a polyline into the cubic Bezier pieces of a cardinal spline.
///
/// The curve passes through every input point. Tangents at the ends use the
/// end point itself as the missing neighbor. Fewer than two points yield no
/// segments.
#[must_use]
pub fn cardinal_bezier_segments(points: &[PixelPoint], tension: f64) -> Vec<BezierSegment> {
    if points.len() < 2 {
        return Vec::new();
    }

    let factor = tension / 3.0;
    let last = points.len() - 1;
    let mut segments = Vec::with_capacity(last);
    for index in 0..last {
        let previous = points[index.saturating_sub(1)];
        let from = points[index];
        let to = points[index + 1];
        let next = points[(index + 2).min(last)];

        segments.push(BezierSegment {
            from,
            control1: PixelPoint::new(
                from.x + factor * (to.x - previous.x),
                from.y + factor * (to.y - previous.y),
            ),
            control2: PixelPoint::new(
                to.x - factor * (next.x - from.x),
                to.y - factor * (next.y - from.y),
            ),
            to,
        });
    }
    segments
}
