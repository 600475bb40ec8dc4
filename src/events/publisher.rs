//! # Typed event source with synchronous broadcast.
//!
//! [`Publisher`] keeps a registry of [`Observer`] handles and delivers each new
//! event to all of them at call time.
//!
//! ## Architecture
//! ```text
//! Producers (many):                      Observers (registry):
//!   task 1 ──┐                             ┌──► Monitor inlet ──► queue
//!   task 2 ──┼── publish() ──► Publisher ──┼──► LogObserver
//!   task N ──┘   (stamp seq)               └──► FnObserver
//! ```
//!
//! ## Rules
//! - **Synchronous**: `publish()` runs every `on_next` before returning.
//! - **No buffering**: an event published with zero subscribers is lost.
//! - **No replay**: observers only see events published after they subscribed.
//! - **Idempotent subscribe**: an observer whose [`Observer::key`] is already
//!   registered is not added twice.
//! - **Terminal once**: after `complete()` or `fail()` the publisher is closed;
//!   `publish()` returns [`PublishError::Closed`] and late subscribers receive the
//!   stored terminal notification immediately.
//! - **Terminal last**: a close that happens while broadcasts are in flight is
//!   delivered by the last of them, after its `on_next` calls.
//! - **No lock during delivery**: observers are called on a snapshot of the
//!   registry, so a callback may subscribe, publish or close.
//! - **Pruning**: observers reporting [`Observer::is_active`] `== false` are
//!   dropped on the next subscribe or publish.
//!
//! ## Sequence numbers
//! `seq` is taken under the registry lock, so it reflects the order in which
//! `publish()` calls were admitted. Events from one caller reach every observer
//! in `seq` order; concurrent callers deliver outside the lock and may
//! interleave differently.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{PublishError, StreamError, Terminal};
use crate::events::Event;
use crate::observers::Observer;

/// Stored terminal notification.
#[derive(Clone)]
enum Closed {
    Completed,
    Failed(StreamError),
}

impl Closed {
    fn terminal(&self) -> Terminal {
        match self {
            Closed::Completed => Terminal::Completed,
            Closed::Failed(_) => Terminal::Failed,
        }
    }

    fn notify<T: 'static>(&self, publisher: &str, observer: &dyn Observer<T>) {
        match self {
            Closed::Completed => observer.on_completed(publisher),
            Closed::Failed(err) => observer.on_error(err),
        }
    }
}

type Observers<T> = Vec<Arc<dyn Observer<T>>>;

struct Registry<T> {
    observers: Observers<T>,
    closed: Option<Closed>,
    next_seq: u64,
    in_flight: usize,
    // Terminal recipients waiting for in-flight broadcasts to finish.
    deferred: Option<Observers<T>>,
}

impl<T: 'static> Registry<T> {
    fn prune(&mut self) {
        self.observers.retain(|o| o.is_active());
    }
}

struct Inner<T> {
    name: Arc<str>,
    registry: Mutex<Registry<T>>,
}

/// Typed event stream broadcasting to registered observers.
///
/// ### Properties
/// - **Cloneable**: clones share the same registry, sequence and terminal state.
/// - **Thread-safe**: any number of tasks may publish concurrently.
/// - **Ordered per caller**: a single producer's events reach every observer in
///   publication order.
pub struct Publisher<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Marks one broadcast in flight; the last one out delivers a deferred close.
struct Flight<'a, T: 'static> {
    publisher: &'a Publisher<T>,
}

impl<T: 'static> Drop for Flight<'_, T> {
    fn drop(&mut self) {
        let pending = {
            let mut reg = self.publisher.lock();
            reg.in_flight -= 1;
            if reg.in_flight == 0 {
                reg.deferred.take().zip(reg.closed.clone())
            } else {
                None
            }
        };
        if let Some((observers, closed)) = pending {
            self.publisher.notify_closed(&closed, &observers);
        }
    }
}

impl<T: 'static> Publisher<T> {
    /// Creates a new open publisher with no observers.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                name: name.into(),
                registry: Mutex::new(Registry {
                    observers: Vec::new(),
                    closed: None,
                    next_seq: 0,
                    in_flight: 0,
                    deferred: None,
                }),
            }),
        }
    }

    /// Name used as the `source` of emitted events.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Registers an observer.
    ///
    /// Returns `false` when an observer with the same [`Observer::key`] is already
    /// registered, or when the publisher is closed (the observer then receives
    /// the terminal notification right away and is not retained).
    pub fn subscribe(&self, observer: Arc<dyn Observer<T>>) -> bool {
        let mut reg = self.lock();
        if let Some(closed) = reg.closed.clone() {
            drop(reg);
            closed.notify(&self.inner.name, observer.as_ref());
            return false;
        }

        reg.prune();
        let key = observer.key();
        if reg.observers.iter().any(|o| o.key() == key) {
            return false;
        }
        tracing::debug!(
            publisher = %self.inner.name,
            observer = observer.name(),
            "observer subscribed"
        );
        reg.observers.push(observer);
        true
    }

    /// Wraps `payload` in a new event and broadcasts it.
    ///
    /// Returns the emitted event (with `seq` and `source` stamped).
    pub fn publish(&self, payload: T) -> Result<Event<T>, PublishError> {
        self.publish_event(Event::new(payload))
    }

    /// Broadcasts a caller-built event, keeping its identifier.
    ///
    /// ### Delivery
    /// - Every current observer's `on_next` runs before this returns.
    /// - With zero observers the event is dropped and still returned as `Ok`.
    /// - A `complete()`/`fail()` issued meanwhile is delivered after this
    ///   broadcast, never before one of its `on_next` calls.
    pub fn publish_event(&self, event: Event<T>) -> Result<Event<T>, PublishError> {
        let (observers, seq) = {
            let mut reg = self.lock();
            if let Some(closed) = &reg.closed {
                return Err(PublishError::Closed {
                    publisher: Arc::clone(&self.inner.name),
                    terminal: closed.terminal(),
                });
            }
            reg.prune();
            let seq = reg.next_seq;
            reg.next_seq += 1;
            reg.in_flight += 1;
            (reg.observers.clone(), seq)
        };
        let _flight = Flight { publisher: self };

        let event = event.stamped(Arc::clone(&self.inner.name), seq);
        for observer in &observers {
            observer.on_next(&event);
        }
        Ok(event)
    }

    /// Completes the stream: notifies `on_completed` and closes the publisher.
    ///
    /// Returns `false` if the publisher was already closed.
    pub fn complete(&self) -> bool {
        self.close(Closed::Completed)
    }

    /// Fails the stream: notifies `on_error` and closes the publisher.
    ///
    /// Returns `false` if the publisher was already closed.
    pub fn fail(&self, reason: impl Into<Arc<str>>) -> bool {
        let err = StreamError::new(Arc::clone(&self.inner.name), reason);
        self.close(Closed::Failed(err))
    }

    /// Returns `true` once `complete()` or `fail()` was called.
    pub fn is_closed(&self) -> bool {
        self.lock().closed.is_some()
    }

    /// Number of currently registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.lock().observers.len()
    }

    fn close(&self, closed: Closed) -> bool {
        let observers = {
            let mut reg = self.lock();
            if reg.closed.is_some() {
                return false;
            }
            reg.closed = Some(closed.clone());
            let observers = std::mem::take(&mut reg.observers);
            if reg.in_flight > 0 {
                tracing::debug!(
                    publisher = %self.inner.name,
                    in_flight = reg.in_flight,
                    "close deferred until broadcasts finish"
                );
                reg.deferred = Some(observers);
                return true;
            }
            observers
        };
        self.notify_closed(&closed, &observers);
        true
    }

    fn notify_closed(&self, closed: &Closed, observers: &[Arc<dyn Observer<T>>]) {
        tracing::debug!(
            publisher = %self.inner.name,
            terminal = closed.terminal().as_label(),
            observers = observers.len(),
            "publisher closed"
        );
        for observer in observers {
            closed.notify(&self.inner.name, observer.as_ref());
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registry<T>> {
        self.inner
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> std::fmt::Debug for Publisher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("name", &self.inner.name)
            .finish_non_exhaustive()
    }
}
