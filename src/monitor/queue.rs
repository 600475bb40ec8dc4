//! # Shared FIFO state behind a monitor.
//!
//! `Shared` holds the queue, the wake-up primitive and the counters. Every
//! clone of a [`Monitor`](crate::Monitor) owns it; the inlets registered on
//! publishers only hold weak handles, so the queue goes away with the last
//! monitor.
//!
//! ## Rules
//! - `push` appends under the queue lock, then wakes **one** waiter.
//! - `pop` removes from the front (FIFO).
//! - Terminal notifications only update counters and log.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use crate::error::StreamError;
use crate::events::Event;

/// Counters exposed by [`Monitor::stats`](crate::Monitor::stats).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorStats {
    /// Events enqueued from any subscribed publisher.
    pub received: u64,
    /// Events handed out to consumers.
    pub delivered: u64,
    /// `on_completed` notifications observed.
    pub completions: u64,
    /// `on_error` notifications observed.
    pub errors: u64,
}

pub(crate) struct Shared<T> {
    name: Arc<str>,
    queue: Mutex<VecDeque<Event<T>>>,
    notify: Notify,
    received: AtomicU64,
    delivered: AtomicU64,
    completions: AtomicU64,
    errors: AtomicU64,
}

impl<T> Shared<T> {
    pub(crate) fn new(name: Arc<str>) -> Self {
        Self {
            name,
            queue: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
            received: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            completions: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn notify(&self) -> &Notify {
        &self.notify
    }

    pub(crate) fn push(&self, event: Event<T>) {
        self.lock().push_back(event);
        self.received.fetch_add(1, Ordering::Relaxed);
        self.notify.notify_one();
    }

    pub(crate) fn pop(&self) -> Option<Event<T>> {
        let event = self.lock().pop_front()?;
        self.delivered.fetch_add(1, Ordering::Relaxed);
        Some(event)
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    pub(crate) fn clear(&self) -> usize {
        let mut queue = self.lock();
        let dropped = queue.len();
        queue.clear();
        dropped
    }

    pub(crate) fn record_error(&self, error: &StreamError) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(
            monitor = %self.name,
            publisher = %error.publisher,
            reason = %error.reason,
            "subscribed stream failed"
        );
    }

    pub(crate) fn record_completion(&self, publisher: &str) {
        self.completions.fetch_add(1, Ordering::Relaxed);
        tracing::info!(monitor = %self.name, publisher, "subscribed stream completed");
    }

    pub(crate) fn stats(&self) -> MonitorStats {
        MonitorStats {
            received: self.received.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            completions: self.completions.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Event<T>>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
