pub mod area_series;
pub mod extents;
pub mod line_series;
pub mod mapper;
pub mod notify;
pub mod scale;
pub mod spline;
pub mod style;
pub mod symbol;
pub mod ticks;
pub mod types;

pub use area_series::{AreaSeries, SharedAreaSeries, project_area_polygon};
pub use extents::Extents;
pub use line_series::{LineGeometry, Series, SharedSeries, project_line_geometry};
pub use mapper::CoordinateMapper;
pub use notify::{ChangeNotifier, SeriesEvent, SeriesId, SubscriptionId};
pub use scale::LinearScale;
pub use spline::{BezierSegment, SPLINE_TENSION, cardinal_bezier_segments};
pub use style::{DashPattern, DashStyle, Interpolation, LineStyle};
pub use symbol::{Symbol, SymbolShape};
pub use ticks::{
    MAX_TICK_COUNT, PREFERRED_SCALE_STEPS, TARGET_TICK_COUNT, TickScale, TickScaleTuning,
    select_step, select_tick_scale, widen_degenerate_range,
};
pub use types::{Axis, PixelPoint, PlotRect, Point, Viewport};
