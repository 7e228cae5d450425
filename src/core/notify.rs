use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

static NEXT_SERIES_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a line or area series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(u64);

impl SeriesId {
    #[must_use]
    pub(crate) fn next() -> Self {
        Self(NEXT_SERIES_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

/// Notification published by a series after its content changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesEvent {
    Changed { series: SeriesId },
}

/// Publish/subscribe registry carried by every series.
///
/// Subscribers are channel senders, so publishing never calls back into the
/// subscriber while the series is borrowed; the receiving side drains events
/// on its own schedule.
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    subscribers: IndexMap<SubscriptionId, Sender<SeriesEvent>>,
    next_subscription: u64,
}

impl ChangeNotifier {
    pub fn subscribe(&mut self, sender: Sender<SeriesEvent>) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.insert(id, sender);
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.shift_remove(&id).is_some()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Sends `event` to every subscriber, dropping those whose receiver is gone.
    pub fn publish(&mut self, event: SeriesEvent) {
        self.subscribers.retain(|id, sender| {
            let delivered = sender.send(event).is_ok();
            if !delivered {
                trace!(subscription = id.0, "dropping disconnected series subscriber");
            }
            delivered
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::{ChangeNotifier, SeriesEvent, SeriesId};

    #[test]
    fn publish_reaches_subscribers_and_prunes_closed_channels() {
        let mut notifier = ChangeNotifier::default();
        let (live_tx, live_rx) = mpsc::channel();
        let (dead_tx, dead_rx) = mpsc::channel();
        notifier.subscribe(live_tx);
        notifier.subscribe(dead_tx);
        drop(dead_rx);

        let series = SeriesId::next();
        notifier.publish(SeriesEvent::Changed { series });

        assert_eq!(live_rx.try_recv().ok(), Some(SeriesEvent::Changed { series }));
        assert_eq!(notifier.subscriber_count(), 1);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut notifier = ChangeNotifier::default();
        let (tx, rx) = mpsc::channel();
        let id = notifier.subscribe(tx);
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));

        notifier.publish(SeriesEvent::Changed {
            series: SeriesId::next(),
        });
        assert!(rx.try_recv().is_err());
    }
}
