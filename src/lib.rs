//! chart2d-rs: 2D XY line and area charts.
//!
//! Series hold their samples and running extents, the chart picks readable
//! axis bounds and tick spacing, and every draw pass is materialized as a
//! backend-agnostic `RenderFrame` before reaching a renderer.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{Chart, ChartConfig};
pub use error::{ChartError, ChartResult};
