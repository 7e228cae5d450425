use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::core::{
    AreaSeries, Axis, Extents, Series, SeriesEvent, SeriesId, SharedAreaSeries, SharedSeries,
    SubscriptionId, TickScale, TickScaleTuning, Viewport, select_tick_scale,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer};

use super::frame_builder::{FrameSources, build_chart_frame};
use super::task_queue::ChartTaskQueue;
use super::{
    AxesLabels, AxisConfig, ChartAreaStyle, ChartConfig, ChartTask, ChartTaskSender, ChartTitle,
    EstimatedTextMeasurer, GridStyle, InvalidationTopic, InvalidationTopics, TextMeasurer,
    TickFormat, TickLabelStyle,
};

/// A series handle together with the chart's subscription on it.
#[derive(Debug)]
struct Registered<T> {
    handle: Rc<RefCell<T>>,
    subscription: SubscriptionId,
}

/// XY chart: axes, styles and the series drawn against them.
///
/// The chart and its series live on one owning thread. Other threads reach
/// the chart only through [`ChartTaskSender`]; series changes arrive as
/// [`SeriesEvent`]s and are folded in by [`Chart::process_pending`].
pub struct Chart {
    config: ChartConfig,
    series: IndexMap<SeriesId, Registered<Series>>,
    area_series: IndexMap<SeriesId, Registered<AreaSeries>>,
    events_tx: Sender<SeriesEvent>,
    events_rx: Receiver<SeriesEvent>,
    tasks: ChartTaskQueue,
    invalidation: InvalidationTopics,
    measurer: Box<dyn TextMeasurer>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::from_valid_config(ChartConfig::default())
    }
}

impl Chart {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: ChartConfig) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            config,
            series: IndexMap::new(),
            area_series: IndexMap::new(),
            events_tx,
            events_rx,
            tasks: ChartTaskQueue::new(),
            invalidation: InvalidationTopics::all(),
            measurer: Box::new(EstimatedTextMeasurer),
        }
    }

    #[must_use]
    pub fn with_text_measurer<M>(mut self, measurer: M) -> Self
    where
        M: TextMeasurer + 'static,
    {
        self.set_text_measurer(measurer);
        self
    }

    pub fn set_text_measurer<M>(&mut self, measurer: M)
    where
        M: TextMeasurer + 'static,
    {
        self.measurer = Box::new(measurer);
        self.invalidation.insert(InvalidationTopic::Layout);
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn x_axis(&self) -> AxisConfig {
        self.config.axes.x
    }

    #[must_use]
    pub fn y_axis(&self) -> AxisConfig {
        self.config.axes.y
    }

    /// Handle for posting work from any thread.
    #[must_use]
    pub fn task_sender(&self) -> ChartTaskSender {
        self.tasks.sender()
    }

    /// Registers a line series and subscribes to its change events.
    ///
    /// Adding a series that is already registered keeps a single entry.
    pub fn add_series(&mut self, series: SharedSeries) -> ChartResult<SeriesId> {
        let (id, subscription) = {
            let mut guard = series.try_borrow_mut().map_err(|_| busy_error("series"))?;
            (guard.id(), guard.subscribe(self.events_tx.clone()))
        };
        let previous = self.series.insert(
            id,
            Registered {
                handle: series,
                subscription,
            },
        );
        if let Some(previous) = previous {
            unsubscribe(&previous);
        }
        debug!(series = %id, count = self.series.len(), "series registered");
        self.after_series_change();
        Ok(id)
    }

    pub fn add_area_series(&mut self, series: SharedAreaSeries) -> ChartResult<SeriesId> {
        let (id, subscription) = {
            let mut guard = series
                .try_borrow_mut()
                .map_err(|_| busy_error("area series"))?;
            (guard.id(), guard.subscribe(self.events_tx.clone()))
        };
        let previous = self.area_series.insert(
            id,
            Registered {
                handle: series,
                subscription,
            },
        );
        if let Some(previous) = previous {
            unsubscribe_area(&previous);
        }
        debug!(series = %id, count = self.area_series.len(), "area series registered");
        self.after_series_change();
        Ok(id)
    }

    /// Unregisters a line series and returns its handle.
    pub fn remove_series(&mut self, id: SeriesId) -> ChartResult<SharedSeries> {
        let registered = self
            .series
            .shift_remove(&id)
            .ok_or(ChartError::UnknownSeries(id))?;
        unsubscribe(&registered);
        debug!(series = %id, "series removed");
        self.after_series_change();
        Ok(registered.handle)
    }

    pub fn remove_area_series(&mut self, id: SeriesId) -> ChartResult<SharedAreaSeries> {
        let registered = self
            .area_series
            .shift_remove(&id)
            .ok_or(ChartError::UnknownSeries(id))?;
        unsubscribe_area(&registered);
        debug!(series = %id, "area series removed");
        self.after_series_change();
        Ok(registered.handle)
    }

    /// Unregisters every line and area series.
    pub fn clear(&mut self) {
        for (_, registered) in self.series.drain(..) {
            unsubscribe(&registered);
        }
        for (_, registered) in self.area_series.drain(..) {
            unsubscribe_area(&registered);
        }
        debug!("all series removed");
        self.invalidation.insert(InvalidationTopic::Series);
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn area_series_count(&self) -> usize {
        self.area_series.len()
    }

    /// Registered line series ids in registration order.
    pub fn series_ids(&self) -> impl Iterator<Item = SeriesId> + '_ {
        self.series.keys().copied()
    }

    #[must_use]
    pub fn series(&self, id: SeriesId) -> Option<SharedSeries> {
        self.series.get(&id).map(|registered| Rc::clone(&registered.handle))
    }

    #[must_use]
    pub fn area_series(&self, id: SeriesId) -> Option<SharedAreaSeries> {
        self.area_series
            .get(&id)
            .map(|registered| Rc::clone(&registered.handle))
    }

    /// Runs queued tasks, then folds in series change events.
    ///
    /// Returns the number of tasks and events handled. Auto-scale runs at
    /// most once per call.
    pub fn process_pending(&mut self) -> usize {
        let tasks = self.tasks.drain();
        let task_count = tasks.len();
        for task in tasks {
            if let Err(err) = self.apply_task(task) {
                warn!(error = %err, "chart task failed");
            }
        }

        let events: Vec<SeriesEvent> = self.events_rx.try_iter().collect();
        let mut changed = false;
        for event in &events {
            match *event {
                SeriesEvent::Changed { series } => {
                    if self.series.contains_key(&series) || self.area_series.contains_key(&series) {
                        trace!(series = %series, "series changed");
                        changed = true;
                    }
                }
            }
        }
        if changed {
            self.after_series_change();
        }

        task_count + events.len()
    }

    fn apply_task(&mut self, task: ChartTask) -> ChartResult<()> {
        trace!(task = ?task, "applying chart task");
        match task {
            ChartTask::AppendPoints { series, points } => {
                self.with_series(series, |target| target.add_points(points))
            }
            ChartTask::ReplacePoints { series, points } => {
                self.with_series(series, |target| target.set_points(points))
            }
            ChartTask::SetPoint {
                series,
                index,
                point,
            } => {
                let handle = self.series(series).ok_or(ChartError::UnknownSeries(series))?;
                let mut target = handle.try_borrow_mut().map_err(|_| busy_error("series"))?;
                target.set_point(index, point)?;
                target.notify_changed();
                Ok(())
            }
            ChartTask::ClearSeries { series } => self.with_series(series, Series::clear),
            ChartTask::AppendAreaPoints { series, points } => {
                self.with_area_series(series, |target| {
                    for (x, lower, upper) in points {
                        target.add_point(x, lower, upper);
                    }
                })
            }
            ChartTask::ClearAreaSeries { series } => {
                self.with_area_series(series, AreaSeries::clear)
            }
            ChartTask::SetXBounds { min, max, tick } => self.set_x_bounds(min, max, tick),
            ChartTask::SetYBounds { min, max, tick } => self.set_y_bounds(min, max, tick),
            ChartTask::Custom(task) => {
                task(self);
                Ok(())
            }
        }
    }

    fn with_series<F>(&self, id: SeriesId, mutate: F) -> ChartResult<()>
    where
        F: FnOnce(&mut Series),
    {
        let handle = self.series(id).ok_or(ChartError::UnknownSeries(id))?;
        let mut target = handle.try_borrow_mut().map_err(|_| busy_error("series"))?;
        mutate(&mut target);
        target.notify_changed();
        Ok(())
    }

    fn with_area_series<F>(&self, id: SeriesId, mutate: F) -> ChartResult<()>
    where
        F: FnOnce(&mut AreaSeries),
    {
        let handle = self.area_series(id).ok_or(ChartError::UnknownSeries(id))?;
        let mut target = handle
            .try_borrow_mut()
            .map_err(|_| busy_error("area series"))?;
        mutate(&mut target);
        target.notify_changed();
        Ok(())
    }

    fn after_series_change(&mut self) {
        self.apply_auto_scale();
        self.invalidation.insert(InvalidationTopic::Series);
    }

    fn apply_auto_scale(&mut self) {
        for axis in [Axis::X, Axis::Y] {
            if !self.config.axes.axis(axis).auto_scale {
                continue;
            }
            if let Err(err) = self.auto_scale(axis) {
                warn!(axis = %axis, error = %err, "auto-scale failed");
            }
        }
    }

    /// Bounding box of every finite sample in every registered series.
    #[must_use]
    pub fn data_extents(&self) -> Extents {
        let lines = self.series.values().filter_map(|registered| {
            registered
                .handle
                .try_borrow()
                .map(|series| series.extents())
                .ok()
        });
        let areas = self.area_series.values().filter_map(|registered| {
            registered
                .handle
                .try_borrow()
                .map(|series| series.extents())
                .ok()
        });
        lines.chain(areas).fold(Extents::empty(), Extents::union)
    }

    /// Fits the x axis to the data. Returns `false` when there is no data.
    pub fn auto_scale_x(&mut self) -> ChartResult<bool> {
        self.auto_scale(Axis::X)
    }

    /// Fits the y axis to the data. Returns `false` when there is no data.
    pub fn auto_scale_y(&mut self) -> ChartResult<bool> {
        self.auto_scale(Axis::Y)
    }

    fn auto_scale(&mut self, axis: Axis) -> ChartResult<bool> {
        let extents = self.data_extents();
        let (min, max) = match axis {
            Axis::X => (extents.x_min, extents.x_max),
            Axis::Y => (extents.y_min, extents.y_max),
        };
        if min > max {
            trace!(axis = %axis, "auto-scale skipped, no data");
            return Ok(false);
        }
        let scale = select_tick_scale(min, max, &self.config.tick_tuning)?;
        let current = self.config.axes.axis(axis);
        if current.tick_scale(axis).ok() != Some(scale) {
            debug!(
                axis = %axis,
                min = scale.min,
                max = scale.max,
                step = scale.step,
                "axis auto-scaled"
            );
            self.config.axes.axis_mut(axis).apply_scale(scale);
            self.invalidation.insert(InvalidationTopic::Axis);
        }
        Ok(true)
    }

    pub fn set_x_bounds(&mut self, min: f64, max: f64, tick: f64) -> ChartResult<()> {
        self.set_bounds(Axis::X, min, max, tick)
    }

    pub fn set_y_bounds(&mut self, min: f64, max: f64, tick: f64) -> ChartResult<()> {
        self.set_bounds(Axis::Y, min, max, tick)
    }

    /// Sets manual bounds; an auto-scaled axis is refitted on the next data change.
    pub fn set_bounds(&mut self, axis: Axis, min: f64, max: f64, tick: f64) -> ChartResult<()> {
        let scale = TickScale::validated(axis, min, max, tick)?;
        self.config.axes.axis_mut(axis).apply_scale(scale);
        self.invalidation.insert(InvalidationTopic::Axis);
        Ok(())
    }

    pub fn set_x_auto_scale(&mut self, enabled: bool) {
        self.set_auto_scale(Axis::X, enabled);
    }

    pub fn set_y_auto_scale(&mut self, enabled: bool) {
        self.set_auto_scale(Axis::Y, enabled);
    }

    fn set_auto_scale(&mut self, axis: Axis, enabled: bool) {
        self.config.axes.axis_mut(axis).auto_scale = enabled;
        if enabled {
            if let Err(err) = self.auto_scale(axis) {
                warn!(axis = %axis, error = %err, "auto-scale failed");
            }
        }
        self.invalidation.insert(InvalidationTopic::Axis);
    }

    pub fn set_tick_format(&mut self, axis: Axis, format: TickFormat) {
        self.config.axes.axis_mut(axis).format = format;
        self.invalidation.insert(InvalidationTopic::Style);
    }

    pub fn set_area_style(&mut self, style: ChartAreaStyle) -> ChartResult<()> {
        style.validate()?;
        self.config.area = style;
        self.invalidation.insert(InvalidationTopic::Layout);
        Ok(())
    }

    pub fn set_grid_style(&mut self, style: GridStyle) -> ChartResult<()> {
        style.validate()?;
        self.config.grid = style;
        self.invalidation.insert(InvalidationTopic::Style);
        Ok(())
    }

    pub fn set_title(&mut self, title: ChartTitle) -> ChartResult<()> {
        title.validate()?;
        self.config.title = title;
        self.invalidation.insert(InvalidationTopic::Style);
        Ok(())
    }

    pub fn set_axes_labels(&mut self, labels: AxesLabels) -> ChartResult<()> {
        labels.validate()?;
        self.config.labels = labels;
        self.invalidation.insert(InvalidationTopic::Style);
        Ok(())
    }

    pub fn set_tick_style(&mut self, style: TickLabelStyle) -> ChartResult<()> {
        style.validate()?;
        self.config.axes.tick_labels = style;
        self.invalidation.insert(InvalidationTopic::Style);
        Ok(())
    }

    /// Replaces the step table and refits auto-scaled axes with it.
    pub fn set_tick_tuning(&mut self, tuning: TickScaleTuning) -> ChartResult<()> {
        tuning.validate()?;
        self.config.tick_tuning = tuning;
        self.apply_auto_scale();
        self.invalidation.insert(InvalidationTopic::Axis);
        Ok(())
    }

    /// Requests a full repaint.
    pub fn invalidate(&mut self) {
        self.invalidation = InvalidationTopics::all();
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.invalidation.is_none()
    }

    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationTopics {
        self.invalidation
    }

    /// Builds the scene for `viewport` without touching the dirty state.
    pub fn build_frame(&self, viewport: Viewport) -> ChartResult<RenderFrame> {
        let sources = FrameSources {
            config: &self.config,
            series: self
                .series
                .values()
                .map(|registered| &registered.handle)
                .collect(),
            areas: self
                .area_series
                .values()
                .map(|registered| &registered.handle)
                .collect(),
            measurer: self.measurer.as_ref(),
        };
        build_chart_frame(&sources, viewport)
    }

    /// Processes pending work, renders one frame and clears the dirty state.
    pub fn draw<R>(&mut self, renderer: &mut R, viewport: Viewport) -> ChartResult<()>
    where
        R: Renderer + ?Sized,
    {
        self.process_pending();
        let frame = self.build_frame(viewport)?;
        renderer.render(&frame)?;
        let repainted = self.invalidation.take();
        trace!(
            topics = ?repainted,
            primitives = frame.primitive_count(),
            "chart drawn"
        );
        Ok(())
    }
}

fn unsubscribe(registered: &Registered<Series>) {
    match registered.handle.try_borrow_mut() {
        Ok(mut series) => {
            series.unsubscribe(registered.subscription);
        }
        Err(_) => warn!("series busy while unsubscribing; stale events are ignored"),
    }
}

fn unsubscribe_area(registered: &Registered<AreaSeries>) {
    match registered.handle.try_borrow_mut() {
        Ok(mut series) => {
            series.unsubscribe(registered.subscription);
        }
        Err(_) => warn!("area series busy while unsubscribing; stale events are ignored"),
    }
}

fn busy_error(kind: &str) -> ChartError {
    ChartError::InvalidData(format!("{kind} is already borrowed"))
}
