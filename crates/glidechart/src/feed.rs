//! Cross-thread snapshot delivery.
//!
//! A [`SnapshotFeed`] is the producer side of a chart's inbox. It can be
//! cloned and moved to any thread; the chart drains the inbox at the start
//! of every tick, so snapshots pushed between ticks are visible on the next
//! one.

use std::sync::{Arc, PoisonError, RwLock};

use crossbeam_channel::Sender;

use crate::error::ChartError;
use crate::series::Snapshot;

/// Callback asking the host to schedule a frame.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Shared, replaceable waker.
#[derive(Clone, Default)]
pub(crate) struct WakerSlot(Arc<RwLock<Option<Waker>>>);

impl WakerSlot {
    pub(crate) fn set(&self, waker: Option<Waker>) {
        let mut slot = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *slot = waker;
    }

    pub(crate) fn wake(&self) {
        let waker = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(waker) = waker {
            waker();
        }
    }
}

/// Producer handle for a [`crate::Chart`].
#[derive(Clone)]
pub struct SnapshotFeed {
    sender: Sender<Snapshot>,
    waker: WakerSlot,
}

impl SnapshotFeed {
    pub(crate) fn new(sender: Sender<Snapshot>, waker: WakerSlot) -> Self {
        Self { sender, waker }
    }

    /// Queue `snapshot` for the next tick and wake the host.
    ///
    /// Validation happens when the chart drains the feed; snapshots that do
    /// not fit the chart's series layout are dropped and logged there.
    pub fn push(&self, snapshot: impl Into<Snapshot>) -> Result<(), ChartError> {
        self.sender
            .send(snapshot.into())
            .map_err(|_| ChartError::FeedDisconnected)?;
        self.waker.wake();
        Ok(())
    }

    /// Number of snapshots waiting for the next tick.
    pub fn pending(&self) -> usize {
        self.sender.len()
    }
}

impl std::fmt::Debug for SnapshotFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotFeed")
            .field("pending", &self.sender.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::series::SeriesValue;

    #[test]
    fn test_push_wakes_host() {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let slot = WakerSlot::default();
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = wakes.clone();
        slot.set(Some(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })));

        let feed = SnapshotFeed::new(sender, slot);
        feed.push(vec![SeriesValue::scalar(1.0)]).unwrap();
        feed.clone().push(vec![SeriesValue::scalar(2.0)]).unwrap();

        assert_eq!(wakes.load(Ordering::SeqCst), 2);
        assert_eq!(feed.pending(), 2);
        assert_eq!(receiver.try_iter().count(), 2);
    }

    #[test]
    fn test_push_after_receiver_dropped() {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let feed = SnapshotFeed::new(sender, WakerSlot::default());
        drop(receiver);
        assert_eq!(
            feed.push(vec![SeriesValue::scalar(1.0)]),
            Err(ChartError::FeedDisconnected)
        );
    }

    #[test]
    fn test_feed_is_send() {
        fn assert_send<T: Send + Sync>() {}
        assert_send::<SnapshotFeed>();
    }
}
