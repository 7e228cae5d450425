use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use crate::core::{
    BezierSegment, ChangeNotifier, CoordinateMapper, Extents, Interpolation, LineStyle,
    PixelPoint, Point, SPLINE_TENSION, SeriesEvent, SeriesId, SubscriptionId, Symbol,
    cardinal_bezier_segments,
};
use crate::error::{ChartError, ChartResult};

/// Series handle shared between the producer and the chart that displays it.
pub type SharedSeries = Rc<RefCell<Series>>;

/// Ordered (x, y) samples drawn as a line with optional point symbols.
///
/// Samples are kept in insertion order, which is also plot order; x values
/// are not required to be monotonic. Extents are maintained on every mutation
/// and cover finite coordinates only.
#[derive(Debug)]
pub struct Series {
    id: SeriesId,
    name: String,
    points: Vec<Point>,
    line_style: LineStyle,
    symbol: Symbol,
    extents: Extents,
    notifier: ChangeNotifier,
}

impl Default for Series {
    fn default() -> Self {
        Self::new("")
    }
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SeriesId::next(),
            name: name.into(),
            points: Vec::new(),
            line_style: LineStyle::default(),
            symbol: Symbol::default(),
            extents: Extents::empty(),
            notifier: ChangeNotifier::default(),
        }
    }

    #[must_use]
    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = symbol;
        self
    }

    /// Wraps the series in a shared handle for `Chart::add_series`.
    #[must_use]
    pub fn into_shared(self) -> SharedSeries {
        Rc::new(RefCell::new(self))
    }

    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    pub fn set_line_style(&mut self, line_style: LineStyle) {
        self.line_style = line_style;
    }

    #[must_use]
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn set_symbol(&mut self, symbol: Symbol) {
        self.symbol = symbol;
    }

    /// Appends one sample.
    pub fn add_point(&mut self, x: f64, y: f64) {
        self.points.push(Point::new(x, y));
        include_finite(&mut self.extents, x, y);
    }

    pub fn add_points<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = Point>,
    {
        for point in points {
            self.add_point(point.x, point.y);
        }
    }

    /// Replaces the sample at `index` in place.
    ///
    /// Extents are rescanned only when the replaced sample sat on a bound.
    pub fn set_point(&mut self, index: usize, point: Point) -> ChartResult<()> {
        let len = self.points.len();
        let slot = self.points.get_mut(index).ok_or_else(|| {
            ChartError::InvalidData(format!("point index {index} out of range (len={len})"))
        })?;
        let previous = std::mem::replace(slot, point);

        if self.extents.touches(previous) {
            self.extents = finite_extents(&self.points);
        } else {
            include_finite(&mut self.extents, point.x, point.y);
        }
        Ok(())
    }

    /// Replaces every sample.
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.extents = finite_extents(&points);
        self.points = points;
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.extents = Extents::empty();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    #[must_use]
    pub fn extents(&self) -> Extents {
        self.extents
    }

    #[must_use]
    pub fn x_min(&self) -> f64 {
        self.extents.x_min
    }

    #[must_use]
    pub fn x_max(&self) -> f64 {
        self.extents.x_max
    }

    #[must_use]
    pub fn y_min(&self) -> f64 {
        self.extents.y_min
    }

    #[must_use]
    pub fn y_max(&self) -> f64 {
        self.extents.y_max
    }

    pub fn subscribe(&mut self, sender: Sender<SeriesEvent>) -> SubscriptionId {
        self.notifier.subscribe(sender)
    }

    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        self.notifier.unsubscribe(subscription)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.notifier.subscriber_count()
    }

    /// Tells subscribers that the content changed; call after a batch of edits.
    pub fn notify_changed(&mut self) {
        self.notifier
            .publish(SeriesEvent::Changed { series: self.id });
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

pub(crate) fn include_finite(extents: &mut Extents, x: f64, y: f64) {
    if x.is_finite() {
        extents.include_x(x);
    }
    if y.is_finite() {
        extents.include_y(y);
    }
}

fn finite_extents(points: &[Point]) -> Extents {
    points.iter().fold(Extents::empty(), |mut acc, point| {
        include_finite(&mut acc, point.x, point.y);
        acc
    })
}

/// Pixel-space geometry of one line series.
///
/// `vertices` holds every finite sample mapped in plot order and is used for
/// both symbols and straight polylines; `curve` is populated only for spline
/// interpolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    pub vertices: Vec<PixelPoint>,
    pub curve: Vec<BezierSegment>,
}

/// Projects series samples through `mapper`.
///
/// Samples with non-finite coordinates are skipped.
#[must_use]
pub fn project_line_geometry(
    points: &[Point],
    mapper: &CoordinateMapper,
    interpolation: Interpolation,
) -> LineGeometry {
    let vertices = if points.iter().all(|point| point.is_finite()) {
        mapper.map_points(points)
    } else {
        let finite: Vec<Point> = points.iter().copied().filter(|p| p.is_finite()).collect();
        mapper.map_points(&finite)
    };

    let curve = match interpolation {
        Interpolation::Linear => Vec::new(),
        Interpolation::Spline => cardinal_bezier_segments(&vertices, SPLINE_TENSION),
    };

    LineGeometry { vertices, curve }
}
