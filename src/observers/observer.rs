//! # Observer: callbacks registered on a publisher
//!
//! The [`Observer`] trait is the callback handle a [`Publisher`](crate::Publisher)
//! keeps in its registry. Every emission calls `on_next` on each registered
//! observer **synchronously**, in registration order, from the publishing
//! context. Terminal notifications (`on_error`, `on_completed`) arrive at most
//! once per publisher.
//!
//! # High-level architecture:
//! ```text
//!   producer ── publish(payload) ──► Publisher<T>
//!                                        │  (snapshot of registry)
//!              ┌─────────────────────────┼─────────────────────────┐
//!              ▼                         ▼                         ▼
//!          Monitor inlet             LogObserver               FnObserver
//!       (enqueue + wake one)      (tracing output)           (user closure)
//! ```
//!
//! # Example: custom observer
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use asyncmon::{Event, Observer, Publisher};
//! use std::sync::Arc;
//!
//! struct Counter(AtomicU64);
//!
//! impl Observer<u32> for Counter {
//!     fn on_next(&self, _event: &Event<u32>) {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!     }
//!     fn name(&self) -> &str { "counter" }
//! }
//!
//! let counter = Arc::new(Counter(AtomicU64::new(0)));
//! let publisher = Publisher::<u32>::new("numbers");
//! publisher.subscribe(counter.clone());
//! publisher.publish(1).unwrap();
//! publisher.publish(2).unwrap();
//! assert_eq!(counter.0.load(Ordering::Relaxed), 2);
//! ```

use crate::error::StreamError;
use crate::events::Event;

/// # Receiver of events broadcast by a publisher.
///
/// ### Implementation requirements
/// - Callbacks run in the publisher's context: keep them short and non-blocking.
/// - Do not panic; a panic propagates to the caller of `publish`.
/// - `key` must be stable for the lifetime of the observer; the publisher uses it
///   to make subscription idempotent.
pub trait Observer<T>: Send + Sync + 'static {
    /// Called for every event emitted after this observer subscribed.
    fn on_next(&self, event: &Event<T>);

    /// Called once if the publisher fails. No events follow.
    fn on_error(&self, _error: &StreamError) {}

    /// Called once when the publisher completes. No events follow.
    fn on_completed(&self, _publisher: &str) {}

    /// Returns the observer name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Returns `false` once the observer can no longer use events.
    ///
    /// Publishers drop inactive observers on their next subscribe or publish.
    fn is_active(&self) -> bool {
        true
    }

    /// Identity used to detect duplicate subscriptions.
    ///
    /// Defaults to the address of the observer object. Adapters that forward
    /// into shared state override this to report the identity of that state.
    fn key(&self) -> usize {
        self as *const Self as *const () as usize
    }
}
