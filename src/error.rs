use thiserror::Error;

use crate::core::{Axis, SeriesId};

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Mapping was requested against an axis whose span is zero or negative.
    #[error("degenerate {axis} axis range: min={min}, max={max}")]
    DegenerateRange { axis: Axis, min: f64, max: f64 },

    #[error("invalid {axis} axis bounds: min={min}, max={max}, tick={tick}")]
    InvalidAxisBounds {
        axis: Axis,
        min: f64,
        max: f64,
        tick: f64,
    },

    #[error("malformed area series: lower has {lower} points, upper has {upper}")]
    MalformedAreaSeries { lower: usize, upper: usize },

    #[error("series {0} is not registered with this chart")]
    UnknownSeries(SeriesId),

    #[error("chart task queue is disconnected")]
    TaskQueueDisconnected,
}
