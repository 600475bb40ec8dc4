//! # Bounded-wait async monitor.
//!
//! A [`Monitor`] subscribes to one or more publishers, buffers their events in
//! a FIFO queue and lets consumers pull them asynchronously.
//!
//! ## Pull semantics
//! ```text
//! next():
//!   queue non-empty ──► pop front ──► Some(event)           (no suspension)
//!   queue empty     ──► wait on Notify until deadline
//!                          ├─ event pushed ──► pop ──► Some(event)
//!                          └─ deadline hit ──► None  ("no more events")
//! ```
//!
//! ## Rules
//! - **FIFO**: events are handed out in the order they were enqueued.
//! - **Fan-in**: events from several publishers interleave by arrival time.
//! - **One wake per arrival**: each enqueue wakes at most one pending consumer.
//! - **Bounded wait**: a single pull never waits longer than the configured
//!   timeout, spurious wake-ups included.
//! - **Timeout is not an error**: it is the end-of-stream signal.
//! - **Terminal notifications** (`on_completed` / `on_error`) are logged and
//!   counted; they do not end consumption.

use std::sync::Arc;
use std::time::Duration;

use futures::Stream;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::config::{Config, DEFAULT_WAIT_TIMEOUT};
use crate::events::{Event, Publisher};
use crate::monitor::inlet::Inlet;
use crate::monitor::queue::{MonitorStats, Shared};

/// Consumer-side queue with asynchronous pull and a per-pull wait timeout.
///
/// Cloning a monitor yields another handle to the same queue, so several
/// consumer tasks can pull from one monitor.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use asyncmon::{Monitor, Publisher};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let numbers = Publisher::<u32>::new("numbers");
/// let monitor = Monitor::<u64>::new("wide", Duration::from_millis(10)).subscribe(&numbers);
///
/// numbers.publish(7).unwrap();
/// assert_eq!(monitor.next().await.map(|e| *e.payload()), Some(7));
/// assert!(monitor.next().await.is_none());
/// # }
/// ```
pub struct Monitor<T> {
    shared: Arc<Shared<T>>,
    wait: Option<Duration>,
}

impl<T> Clone for Monitor<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            wait: self.wait,
        }
    }
}

impl<T: Send + 'static> Monitor<T> {
    /// Creates a monitor with the given per-pull wait.
    ///
    /// `Duration::ZERO` disables suspension: `next()` only returns what is
    /// already queued.
    pub fn new(name: impl Into<Arc<str>>, wait_timeout: Duration) -> Self {
        Self {
            shared: Arc::new(Shared::new(name.into())),
            wait: (wait_timeout > Duration::ZERO).then_some(wait_timeout),
        }
    }

    /// Creates a monitor using `cfg.wait_timeout`.
    pub fn from_config(name: impl Into<Arc<str>>, cfg: &Config) -> Self {
        Self::new(name, cfg.wait().unwrap_or(Duration::ZERO))
    }

    /// Creates a monitor with the default 3 second wait.
    pub fn with_default_wait(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, DEFAULT_WAIT_TIMEOUT)
    }

    /// Registers this monitor on `publisher` and returns it for chaining.
    ///
    /// Payloads are converted with `Into<T>`, so one monitor can fan in several
    /// publishers of compatible types. Subscribing twice to the same publisher
    /// has no effect.
    pub fn subscribe<U>(self, publisher: &Publisher<U>) -> Self
    where
        U: Clone + Into<T> + 'static,
    {
        let inlet: Arc<Inlet<T, U>> =
            Arc::new(Inlet::new(Arc::downgrade(&self.shared), self.name()));
        if !publisher.subscribe(inlet) {
            tracing::debug!(
                monitor = self.name(),
                publisher = publisher.name(),
                "monitor already subscribed or publisher closed"
            );
        }
        self
    }

    /// Waits for the next event.
    ///
    /// Returns immediately when an event is queued. Otherwise suspends until an
    /// event arrives (`Some`) or the wait timeout elapses (`None`).
    ///
    /// A wait too large to express as a deadline (e.g. `Duration::MAX`) never
    /// times out.
    pub async fn next(&self) -> Option<Event<T>> {
        let Some(wait) = self.wait else {
            return self.try_next();
        };
        let deadline = Instant::now().checked_add(wait);

        loop {
            let notified = self.shared.notify().notified();
            tokio::pin!(notified);
            // Register before checking the queue so a push in between is not missed.
            notified.as_mut().enable();

            if let Some(event) = self.try_next() {
                return Some(event);
            }
            match deadline {
                Some(deadline) => {
                    if time::timeout_at(deadline, notified).await.is_err() {
                        return self.try_next();
                    }
                }
                None => notified.await,
            }
        }
    }

    /// Like [`next`](Self::next), but returns `None` as soon as `token` is cancelled.
    pub async fn next_or_cancel(&self, token: &CancellationToken) -> Option<Event<T>> {
        tokio::select! {
            biased;
            _ = token.cancelled() => None,
            ev = self.next() => ev,
        }
    }

    /// Pops the next queued event without waiting.
    pub fn try_next(&self) -> Option<Event<T>> {
        self.shared.pop()
    }

    /// Turns the monitor into a [`Stream`] that ends when a pull times out.
    pub fn into_stream(self) -> impl Stream<Item = Event<T>> + Send + 'static {
        futures::stream::unfold(self, |monitor| async move {
            let event = monitor.next().await?;
            Some((event, monitor))
        })
    }

    /// Drops every queued event and returns how many were discarded.
    pub fn reset(&self) -> usize {
        self.shared.clear()
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.shared.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counter snapshot (eventually consistent under concurrent use).
    pub fn stats(&self) -> MonitorStats {
        self.shared.stats()
    }

    /// Name used in logs and as the inlet name on publishers.
    pub fn name(&self) -> &str {
        self.shared.name()
    }

    /// Configured per-pull wait (`None` = no suspension).
    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait
    }
}

impl<T> std::fmt::Debug for Monitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("name", &self.shared.name())
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::collections::HashSet;

    const WAIT: Duration = Duration::from_millis(3000);

    fn payloads<T: Copy>(events: &[Event<T>]) -> Vec<T> {
        events.iter().map(|e| *e.payload()).collect()
    }

    async fn drain<T: Send + 'static>(monitor: &Monitor<T>) -> Vec<Event<T>> {
        let mut out = Vec::new();
        while let Some(ev) = monitor.next().await {
            out.push(ev);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn test_yields_events_in_emission_order() {
        let p = Publisher::<u32>::new("numbers");
        let m = Monitor::<u32>::new("m", WAIT).subscribe(&p);

        for n in 0..50 {
            p.publish(n).unwrap();
        }
        let got = drain(&m).await;
        assert_eq!(payloads(&got), (0..50).collect::<Vec<_>>());
        assert_eq!(
            got.iter().map(Event::seq).collect::<Vec<_>>(),
            (0..50).collect::<Vec<_>>()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_event_returns_without_waiting() {
        let p = Publisher::<u32>::new("numbers");
        let m = Monitor::<u32>::new("m", WAIT).subscribe(&p);
        p.publish(1).unwrap();

        let start = Instant::now();
        assert!(m.next().await.is_some());
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_ends_consumption() {
        let p = Publisher::<u32>::new("numbers");
        let m = Monitor::<u32>::new("m", WAIT).subscribe(&p);

        let start = Instant::now();
        assert!(m.next().await.is_none());
        assert!(start.elapsed() >= WAIT);
        assert!(start.elapsed() < WAIT + Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_events_then_end_after_timeout() {
        let p = Publisher::<&'static str>::new("p");
        let m = Monitor::<&'static str>::new("m", WAIT).subscribe(&p);

        let producer = p.clone();
        tokio::spawn(async move {
            producer.publish("E1").unwrap();
            time::sleep(Duration::from_millis(100)).await;
            producer.publish("E2").unwrap();
        });

        let start = Instant::now();
        assert_eq!(m.next().await.map(Event::into_payload), Some("E1"));
        assert_eq!(m.next().await.map(Event::into_payload), Some("E2"));
        let second = start.elapsed();
        assert!(second >= Duration::from_millis(100));
        assert!(second < Duration::from_millis(110));

        assert!(m.next().await.is_none());
        let end = start.elapsed() - second;
        assert!(end >= WAIT);
        assert!(end < WAIT + Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fan_in_interleaves_by_arrival() {
        let small = Publisher::<u8>::new("small");
        let big = Publisher::<u32>::new("big");
        let m = Monitor::<u64>::new("all", WAIT)
            .subscribe(&small)
            .subscribe(&big);

        small.publish(1).unwrap();
        big.publish(1_000).unwrap();
        big.publish(2_000).unwrap();
        small.publish(2).unwrap();

        let got = drain(&m).await;
        assert_eq!(payloads(&got), vec![1, 1_000, 2_000, 2]);
        let sources: Vec<_> = got.iter().map(|e| e.source().unwrap_or("")).collect();
        assert_eq!(sources, vec!["small", "big", "big", "small"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribe_twice_delivers_once() {
        let p = Publisher::<u32>::new("numbers");
        let m = Monitor::<u32>::new("m", WAIT).subscribe(&p).subscribe(&p);
        assert_eq!(p.subscriber_count(), 1);

        p.publish(5).unwrap();
        assert_eq!(payloads(&drain(&m).await), vec![5]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_producers_exactly_once() {
        const PRODUCERS: u32 = 8;
        const PER_PRODUCER: u32 = 250;

        let publishers: Vec<_> = (0..PRODUCERS)
            .map(|i| Publisher::<(u32, u32)>::new(format!("p{i}")))
            .collect();
        let m = publishers.iter().fold(
            Monitor::<(u32, u32)>::new("m", Duration::from_millis(500)),
            |m, p| m.subscribe(p),
        );
        let shared = Publisher::<(u32, u32)>::new("shared");
        let m = m.subscribe(&shared);

        let mut handles = Vec::new();
        for (i, p) in publishers.into_iter().enumerate() {
            let shared = shared.clone();
            handles.push(tokio::spawn(async move {
                for n in 0..PER_PRODUCER {
                    if n % 2 == 0 {
                        p.publish((i as u32, n)).unwrap();
                    } else {
                        shared.publish((i as u32, n)).unwrap();
                    }
                    tokio::task::yield_now().await;
                }
            }));
        }

        let consumer = {
            let m = m.clone();
            tokio::spawn(async move { drain(&m).await })
        };
        for h in handles {
            h.await.unwrap();
        }
        let got = consumer.await.unwrap();

        assert_eq!(got.len(), (PRODUCERS * PER_PRODUCER) as usize);
        let ids: HashSet<_> = got.iter().map(Event::id).collect();
        assert_eq!(ids.len(), got.len());

        for producer in 0..PRODUCERS {
            let seq: Vec<u32> = got
                .iter()
                .filter(|e| e.payload().0 == producer)
                .map(|e| e.payload().1)
                .collect();
            assert_eq!(seq, (0..PER_PRODUCER).collect::<Vec<_>>());
        }
        let stats = m.stats();
        assert_eq!(stats.received, stats.delivered);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_arrival_wakes_one_waiter() {
        let p = Publisher::<u32>::new("numbers");
        let m = Monitor::<u32>::new("m", WAIT).subscribe(&p);

        let a = tokio::spawn({
            let m = m.clone();
            async move { m.next().await.map(Event::into_payload) }
        });
        let b = tokio::spawn({
            let m = m.clone();
            async move { m.next().await.map(Event::into_payload) }
        });
        tokio::task::yield_now().await;
        p.publish(42).unwrap();

        let mut results = vec![a.await.unwrap(), b.await.unwrap()];
        results.sort();
        assert_eq!(results, vec![None, Some(42)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_wait_does_not_suspend() {
        let p = Publisher::<u32>::new("numbers");
        let m = Monitor::<u32>::new("m", Duration::ZERO).subscribe(&p);
        assert_eq!(m.wait_timeout(), None);

        let start = Instant::now();
        assert!(m.next().await.is_none());
        p.publish(3).unwrap();
        assert_eq!(m.next().await.map(Event::into_payload), Some(3));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_ends_pull_early() {
        let m = Monitor::<u32>::with_default_wait("m");
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let start = Instant::now();
        assert!(m.next_or_cancel(&token).await.is_none());
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_yields_until_timeout() {
        let p = Publisher::<u32>::new("numbers");
        let m = Monitor::<u32>::new("m", WAIT).subscribe(&p);
        for n in [3, 1, 2] {
            p.publish(n).unwrap();
        }

        let got: Vec<u32> = m
            .into_stream()
            .map(Event::into_payload)
            .collect()
            .await;
        assert_eq!(got, vec![3, 1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_and_stats() {
        let p = Publisher::<u32>::new("numbers");
        let m = Monitor::<u32>::new("m", WAIT).subscribe(&p);
        p.publish(1).unwrap();
        p.publish(2).unwrap();
        assert_eq!(m.len(), 2);

        assert_eq!(m.reset(), 2);
        assert!(m.is_empty());
        p.publish(3).unwrap();
        assert_eq!(m.next().await.map(Event::into_payload), Some(3));

        assert_eq!(
            m.stats(),
            MonitorStats {
                received: 3,
                delivered: 1,
                completions: 0,
                errors: 0,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_notifications_are_counted_only() {
        let done = Publisher::<u32>::new("done");
        let broken = Publisher::<u32>::new("broken");
        let m = Monitor::<u32>::new("m", WAIT)
            .subscribe(&done)
            .subscribe(&broken);

        done.publish(1).unwrap();
        done.complete();
        broken.fail("disk on fire");

        assert_eq!(m.next().await.map(Event::into_payload), Some(1));
        assert!(m.next().await.is_none());
        let stats = m.stats();
        assert_eq!(stats.completions, 1);
        assert_eq!(stats.errors, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_from_config_uses_wait_timeout() {
        let cfg = Config {
            wait_timeout: Duration::from_millis(250),
            ..Config::default()
        };
        let m = Monitor::<u32>::from_config("m", &cfg);
        assert_eq!(m.wait_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(m.name(), "m");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_wait_still_receives() {
        let p = Publisher::<u32>::new("numbers");
        let m = Monitor::<u32>::new("m", Duration::MAX).subscribe(&p);

        let consumer = tokio::spawn({
            let m = m.clone();
            async move { m.next().await.map(Event::into_payload) }
        });
        time::sleep(Duration::from_secs(3600)).await;
        assert!(!consumer.is_finished());

        p.publish(11).unwrap();
        assert_eq!(consumer.await.unwrap(), Some(11));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_monitor_stops_buffering() {
        let p = Publisher::<u32>::new("numbers");
        let m = Monitor::<u32>::new("m", WAIT).subscribe(&p);
        let queue = Arc::downgrade(&m.shared);
        assert_eq!(p.subscriber_count(), 1);

        drop(m);
        for n in 0..10_000 {
            p.publish(n).unwrap();
        }
        assert!(queue.upgrade().is_none());
        assert_eq!(p.subscriber_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_clone_keeps_subscription() {
        let p = Publisher::<u32>::new("numbers");
        let m = Monitor::<u32>::new("m", WAIT).subscribe(&p);
        let keeper = m.clone();
        drop(m);

        p.publish(8).unwrap();
        assert_eq!(p.subscriber_count(), 1);
        assert_eq!(keeper.next().await.map(Event::into_payload), Some(8));
    }
}
