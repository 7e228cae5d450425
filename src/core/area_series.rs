use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use crate::core::line_series::include_finite;
use crate::core::{
    ChangeNotifier, CoordinateMapper, Extents, PixelPoint, Point, SeriesEvent, SeriesId,
    SubscriptionId,
};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Area handle shared between the producer and the chart that displays it.
pub type SharedAreaSeries = Rc<RefCell<AreaSeries>>;

/// Filled band between a lower and an upper boundary.
///
/// Both boundaries always have the same length: samples are appended in
/// pairs sharing one x value.
#[derive(Debug)]
pub struct AreaSeries {
    id: SeriesId,
    name: String,
    lower: Vec<Point>,
    upper: Vec<Point>,
    fill_color: Color,
    opacity: u8,
    extents: Extents,
    notifier: ChangeNotifier,
}

impl Default for AreaSeries {
    fn default() -> Self {
        Self::new("")
    }
}

impl AreaSeries {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SeriesId::next(),
            name: name.into(),
            lower: Vec::new(),
            upper: Vec::new(),
            fill_color: Color::WHITE,
            opacity: u8::MAX,
            extents: Extents::empty(),
            notifier: ChangeNotifier::default(),
        }
    }

    #[must_use]
    pub fn with_fill(mut self, fill_color: Color, opacity: u8) -> Self {
        self.fill_color = fill_color;
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn into_shared(self) -> SharedAreaSeries {
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
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, fill_color: Color) {
        self.fill_color = fill_color;
    }

    /// Fill opacity where 255 is fully opaque.
    #[must_use]
    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: u8) {
        self.opacity = opacity;
    }

    /// Fill color with the configured opacity applied as alpha.
    #[must_use]
    pub fn effective_fill_color(&self) -> Color {
        self.fill_color
            .with_alpha(f64::from(self.opacity) / f64::from(u8::MAX))
    }

    /// Appends one `(x, lower)` / `(x, upper)` pair.
    pub fn add_point(&mut self, x: f64, lower: f64, upper: f64) {
        self.lower.push(Point::new(x, lower));
        self.upper.push(Point::new(x, upper));
        include_finite(&mut self.extents, x, lower);
        include_finite(&mut self.extents, x, upper);
    }

    /// Replaces the pair at `index` in place, rescanning extents when needed.
    pub fn set_point(&mut self, index: usize, x: f64, lower: f64, upper: f64) -> ChartResult<()> {
        if index >= self.len() {
            return Err(ChartError::InvalidData(format!(
                "area point index {index} out of range (len={})",
                self.len()
            )));
        }
        let previous_lower = std::mem::replace(&mut self.lower[index], Point::new(x, lower));
        let previous_upper = std::mem::replace(&mut self.upper[index], Point::new(x, upper));

        if self.extents.touches(previous_lower) || self.extents.touches(previous_upper) {
            self.rescan_extents();
        } else {
            include_finite(&mut self.extents, x, lower);
            include_finite(&mut self.extents, x, upper);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lower.clear();
        self.upper.clear();
        self.extents = Extents::empty();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    #[must_use]
    pub fn lower(&self) -> &[Point] {
        &self.lower
    }

    #[must_use]
    pub fn upper(&self) -> &[Point] {
        &self.upper
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

    /// Fails when the two boundaries disagree in length.
    pub fn validate_shape(&self) -> ChartResult<()> {
        if self.lower.len() != self.upper.len() {
            return Err(ChartError::MalformedAreaSeries {
                lower: self.lower.len(),
                upper: self.upper.len(),
            });
        }
        Ok(())
    }

    /// Closed fill polygon: lower boundary forward, then upper boundary reversed.
    pub fn fill_polygon(&self, mapper: &CoordinateMapper) -> ChartResult<Vec<PixelPoint>> {
        project_area_polygon(&self.lower, &self.upper, mapper)
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

    pub fn notify_changed(&mut self) {
        self.notifier
            .publish(SeriesEvent::Changed { series: self.id });
    }

    fn rescan_extents(&mut self) {
        let mut extents = Extents::empty();
        for point in self.lower.iter().chain(self.upper.iter()) {
            include_finite(&mut extents, point.x, point.y);
        }
        self.extents = extents;
    }
}

/// Builds the band polygon from two boundaries of equal length.
///
/// The polygon has `2 * len` vertices and is implicitly closed.
pub fn project_area_polygon(
    lower: &[Point],
    upper: &[Point],
    mapper: &CoordinateMapper,
) -> ChartResult<Vec<PixelPoint>> {
    if lower.len() != upper.len() {
        return Err(ChartError::MalformedAreaSeries {
            lower: lower.len(),
            upper: upper.len(),
        });
    }

    let mut polygon = Vec::with_capacity(lower.len() * 2);
    polygon.extend(mapper.map_points(lower));
    polygon.extend(mapper.map_points(upper).into_iter().rev());
    Ok(polygon)
}
