//! Chart aggregate, configuration and frame building.

mod chart;
mod config;
mod frame_builder;
mod invalidation;
mod task_queue;
mod text;
mod tick_format;

pub use chart::Chart;
pub use config::{
    AxesConfig, AxesLabels, AxisConfig, ChartAreaStyle, ChartConfig, ChartTitle, GridStyle,
    TickLabelStyle,
};
pub use frame_builder::symbol_primitives;
pub use invalidation::{InvalidationTopic, InvalidationTopics};
pub use task_queue::{ChartTask, ChartTaskFn, ChartTaskSender};
#[cfg(feature = "cairo-backend")]
pub use text::PangoTextMeasurer;
pub use text::{EstimatedTextMeasurer, TextMeasurer, TextSize};
pub use tick_format::TickFormat;
