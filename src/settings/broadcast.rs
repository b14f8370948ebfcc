//! Latest-value broadcast of the current theme.
//!
//! [`ThemeBroadcast`] holds a single "current" cell plus one unbounded channel
//! per subscriber. Subscribing enqueues the current value immediately;
//! publishing replaces the cell and enqueues the new value for every live
//! subscriber. Both happen under the same lock, so each subscriber sees the
//! value it joined with followed by every later publish, in publish order,
//! with nothing skipped or duplicated. Publishing never waits on a subscriber.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::theme::AppTheme;

#[derive(Debug)]
struct BroadcastState {
    current: AppTheme,
    subscribers: Vec<Sender<AppTheme>>,
}

/// A single-slot "latest value" cell with fan-out to subscribers.
#[derive(Debug)]
pub struct ThemeBroadcast {
    state: Mutex<BroadcastState>,
}

impl ThemeBroadcast {
    pub fn new(initial: AppTheme) -> Self {
        Self {
            state: Mutex::new(BroadcastState {
                current: initial,
                subscribers: Vec::new(),
            }),
        }
    }

    /// The most recently published value.
    pub fn current(&self) -> AppTheme {
        self.state().current
    }

    /// Replaces the current value and delivers it to every live subscriber.
    ///
    /// Subscribers whose [`ThemeSubscription`] was dropped are pruned here.
    pub fn publish(&self, value: AppTheme) {
        let mut state = self.state();
        state.current = value;
        state.subscribers.retain(|tx| tx.send(value).is_ok());
    }

    /// Starts a new subscription that first yields the current value.
    pub fn subscribe(&self) -> ThemeSubscription {
        let (tx, rx) = mpsc::channel();
        let mut state = self.state();
        // Cannot fail: the receiver is still in scope.
        let _ = tx.send(state.current);
        state.subscribers.push(tx);
        ThemeSubscription { rx }
    }

    /// Number of subscriptions that were alive at the last publish.
    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.state().subscribers.len()
    }

    fn state(&self) -> MutexGuard<'_, BroadcastState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One subscriber's view of a [`ThemeBroadcast`].
///
/// As an [`Iterator`] it blocks until the next value and only ends once the
/// broadcast itself is gone. Use [`try_next`](Self::try_next) or
/// [`latest`](Self::latest) from render loops that must not block.
#[derive(Debug)]
pub struct ThemeSubscription {
    rx: Receiver<AppTheme>,
}

impl ThemeSubscription {
    /// Returns the next pending value without blocking.
    pub fn try_next(&mut self) -> Option<AppTheme> {
        match self.rx.try_recv() {
            Ok(value) => Some(value),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Drains every pending value and returns the last one, if any.
    pub fn latest(&mut self) -> Option<AppTheme> {
        let mut last = None;
        while let Some(value) = self.try_next() {
            last = Some(value);
        }
        last
    }
}

impl Iterator for ThemeSubscription {
    type Item = AppTheme;

    fn next(&mut self) -> Option<AppTheme> {
        self.rx.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_subscribe_yields_current_immediately() {
        let broadcast = ThemeBroadcast::new(AppTheme::Night);
        let mut sub = broadcast.subscribe();
        assert_eq!(sub.try_next(), Some(AppTheme::Night));
        assert_eq!(sub.try_next(), None);
    }

    #[test]
    fn test_publish_reaches_every_subscriber_in_order() {
        let broadcast = ThemeBroadcast::new(AppTheme::Auto);
        let mut a = broadcast.subscribe();
        let mut b = broadcast.subscribe();

        broadcast.publish(AppTheme::Day);
        broadcast.publish(AppTheme::Night);

        for sub in [&mut a, &mut b] {
            assert_eq!(sub.try_next(), Some(AppTheme::Auto));
            assert_eq!(sub.try_next(), Some(AppTheme::Day));
            assert_eq!(sub.try_next(), Some(AppTheme::Night));
            assert_eq!(sub.try_next(), None);
        }
    }

    #[test]
    fn test_late_subscriber_sees_only_latest() {
        let broadcast = ThemeBroadcast::new(AppTheme::Auto);
        broadcast.publish(AppTheme::Day);
        broadcast.publish(AppTheme::Night);

        let mut late = broadcast.subscribe();
        assert_eq!(late.try_next(), Some(AppTheme::Night));
        assert_eq!(late.try_next(), None);
    }

    #[test]
    fn test_repeated_value_is_delivered() {
        let broadcast = ThemeBroadcast::new(AppTheme::Auto);
        let mut sub = broadcast.subscribe();
        broadcast.publish(AppTheme::Day);
        broadcast.publish(AppTheme::Day);

        let seen: Vec<_> = std::iter::from_fn(|| sub.try_next()).collect();
        assert_eq!(seen, vec![AppTheme::Auto, AppTheme::Day, AppTheme::Day]);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let broadcast = ThemeBroadcast::new(AppTheme::Auto);
        let keep = broadcast.subscribe();
        drop(broadcast.subscribe());
        assert_eq!(broadcast.subscriber_count(), 2);

        broadcast.publish(AppTheme::Night);
        assert_eq!(broadcast.subscriber_count(), 1);
        drop(keep);
    }

    #[test]
    fn test_latest_drains_queue() {
        let broadcast = ThemeBroadcast::new(AppTheme::Auto);
        let mut sub = broadcast.subscribe();
        broadcast.publish(AppTheme::Day);
        broadcast.publish(AppTheme::Night);

        assert_eq!(sub.latest(), Some(AppTheme::Night));
        assert_eq!(sub.latest(), None);
    }

    #[test]
    fn test_slow_subscriber_does_not_block_publish() {
        let broadcast = Arc::new(ThemeBroadcast::new(AppTheme::Auto));
        let _idle = broadcast.subscribe();
        let mut active = broadcast.subscribe();

        let writer = {
            let broadcast = Arc::clone(&broadcast);
            thread::spawn(move || {
                for _ in 0..1000 {
                    broadcast.publish(AppTheme::Day);
                    broadcast.publish(AppTheme::Night);
                }
            })
        };
        writer.join().unwrap();

        // 1 initial value plus 2000 publishes, none lost.
        assert_eq!(std::iter::from_fn(|| active.try_next()).count(), 2001);
        assert_eq!(broadcast.current(), AppTheme::Night);
    }

    #[test]
    fn test_iterator_blocks_until_publish() {
        let broadcast = Arc::new(ThemeBroadcast::new(AppTheme::Auto));
        let sub = broadcast.subscribe();

        let reader = thread::spawn(move || sub.take(2).collect::<Vec<_>>());
        broadcast.publish(AppTheme::Night);

        assert_eq!(reader.join().unwrap(), vec![AppTheme::Auto, AppTheme::Night]);
    }

    #[test]
    fn test_iterator_ends_when_broadcast_dropped() {
        let broadcast = ThemeBroadcast::new(AppTheme::Day);
        let sub = broadcast.subscribe();
        drop(broadcast);
        assert_eq!(sub.collect::<Vec<_>>(), vec![AppTheme::Day]);
    }
}
