use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::core::{Point, SeriesId};
use crate::error::{ChartError, ChartResult};

use super::Chart;

/// Deferred closure run against the chart on its owning thread.
pub type ChartTaskFn = Box<dyn FnOnce(&mut Chart) + Send + 'static>;

/// Work item posted to a chart from any thread.
///
/// Tasks address series by id because the series handles themselves never
/// leave the owning thread.
pub enum ChartTask {
    AppendPoints {
        series: SeriesId,
        points: Vec<Point>,
    },
    ReplacePoints {
        series: SeriesId,
        points: Vec<Point>,
    },
    SetPoint {
        series: SeriesId,
        index: usize,
        point: Point,
    },
    ClearSeries {
        series: SeriesId,
    },
    /// `(x, lower, upper)` samples appended to an area series.
    AppendAreaPoints {
        series: SeriesId,
        points: Vec<(f64, f64, f64)>,
    },
    ClearAreaSeries {
        series: SeriesId,
    },
    SetXBounds {
        min: f64,
        max: f64,
        tick: f64,
    },
    SetYBounds {
        min: f64,
        max: f64,
        tick: f64,
    },
    Custom(ChartTaskFn),
}

impl fmt::Debug for ChartTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AppendPoints { series, points } => f
                .debug_struct("AppendPoints")
                .field("series", series)
                .field("points", &points.len())
                .finish(),
            Self::ReplacePoints { series, points } => f
                .debug_struct("ReplacePoints")
                .field("series", series)
                .field("points", &points.len())
                .finish(),
            Self::SetPoint {
                series,
                index,
                point,
            } => f
                .debug_struct("SetPoint")
                .field("series", series)
                .field("index", index)
                .field("point", point)
                .finish(),
            Self::ClearSeries { series } => {
                f.debug_struct("ClearSeries").field("series", series).finish()
            }
            Self::AppendAreaPoints { series, points } => f
                .debug_struct("AppendAreaPoints")
                .field("series", series)
                .field("points", &points.len())
                .finish(),
            Self::ClearAreaSeries { series } => f
                .debug_struct("ClearAreaSeries")
                .field("series", series)
                .finish(),
            Self::SetXBounds { min, max, tick } => f
                .debug_struct("SetXBounds")
                .field("min", min)
                .field("max", max)
                .field("tick", tick)
                .finish(),
            Self::SetYBounds { min, max, tick } => f
                .debug_struct("SetYBounds")
                .field("min", min)
                .field("max", max)
                .field("tick", tick)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Cloneable, `Send` handle for posting work to a chart.
#[derive(Debug, Clone)]
pub struct ChartTaskSender {
    sender: Sender<ChartTask>,
}

impl ChartTaskSender {
    /// Queues `task` without blocking.
    pub fn post(&self, task: ChartTask) -> ChartResult<()> {
        self.sender
            .send(task)
            .map_err(|_| ChartError::TaskQueueDisconnected)
    }

    /// Queues a closure to run with exclusive access to the chart.
    pub fn post_fn<F>(&self, task: F) -> ChartResult<()>
    where
        F: FnOnce(&mut Chart) + Send + 'static,
    {
        self.post(ChartTask::Custom(Box::new(task)))
    }
}

/// Receiving end owned by the chart.
#[derive(Debug)]
pub(crate) struct ChartTaskQueue {
    sender: Sender<ChartTask>,
    receiver: Receiver<ChartTask>,
}

impl ChartTaskQueue {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    pub(crate) fn sender(&self) -> ChartTaskSender {
        ChartTaskSender {
            sender: self.sender.clone(),
        }
    }

    /// Takes every task queued so far; tasks posted while these run wait for
    /// the next drain.
    pub(crate) fn drain(&self) -> Vec<ChartTask> {
        self.receiver.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartTask, ChartTaskQueue};
    use crate::core::Point;

    #[test]
    fn drain_returns_tasks_in_post_order() {
        let queue = ChartTaskQueue::new();
        let sender = queue.sender();
        sender
            .post(ChartTask::SetXBounds {
                min: 0.0,
                max: 1.0,
                tick: 0.5,
            })
            .expect("post");
        sender.post_fn(|_| {}).expect("post fn");

        let tasks = queue.drain();
        assert_eq!(tasks.len(), 2);
        assert!(matches!(tasks[0], ChartTask::SetXBounds { .. }));
        assert!(matches!(tasks[1], ChartTask::Custom(_)));
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn sender_is_usable_from_another_thread() {
        let queue = ChartTaskQueue::new();
        let sender = queue.sender();
        std::thread::spawn(move || {
            sender
                .post(ChartTask::ReplacePoints {
                    series: crate::core::SeriesId::next(),
                    points: vec![Point::new(1.0, 2.0)],
                })
                .expect("post from worker");
        })
        .join()
        .expect("join worker");

        assert_eq!(queue.drain().len(), 1);
    }

    #[test]
    fn debug_output_summarizes_point_counts() {
        let task = ChartTask::AppendPoints {
            series: crate::core::SeriesId::next(),
            points: vec![Point::new(0.0, 0.0); 3],
        };
        assert!(format!("{task:?}").contains("points: 3"));
    }
}
