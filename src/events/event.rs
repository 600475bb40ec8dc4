//! # Events broadcast by publishers.
//!
//! An [`Event`] wraps a typed payload with identity and emission metadata:
//! - `id`: unique per event instance (`Uuid` v4)
//! - `seq`: per-publisher monotonic sequence number (set at emission)
//! - `at`: wall-clock timestamp of creation
//! - `source`: name of the publisher that emitted it (set at emission)
//!
//! Events are immutable: fields are only readable through accessors. The
//! only way to change a payload is [`Event::map`], which produces a new value
//! carrying the same identity (used when a monitor fans in compatible types).
//!
//! ## Example
//! ```rust
//! use asyncmon::Event;
//!
//! let ev = Event::new(42u32);
//! assert_eq!(*ev.payload(), 42);
//! assert_eq!(ev.source(), None);
//!
//! let wide = ev.clone().map(u64::from);
//! assert_eq!(wide.id(), ev.id());
//! ```

use std::sync::Arc;
use std::time::SystemTime;

use uuid::Uuid;

/// Immutable unit of data broadcast by a publisher.
#[derive(Clone, Debug)]
pub struct Event<T> {
    id: Uuid,
    seq: u64,
    at: SystemTime,
    source: Option<Arc<str>>,
    payload: T,
}

impl<T> Event<T> {
    /// Creates a new event with a fresh identifier and the current timestamp.
    pub fn new(payload: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            seq: 0,
            at: SystemTime::now(),
            source: None,
            payload,
        }
    }

    /// Unique identifier of this event.
    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Sequence number assigned by the emitting publisher.
    ///
    /// Numbers follow the order in which `publish` calls were admitted. Events
    /// from one caller arrive in `seq` order; concurrent callers may interleave.
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Creation timestamp.
    #[inline]
    pub fn at(&self) -> SystemTime {
        self.at
    }

    /// Name of the emitting publisher, if the event was published.
    #[inline]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Borrows the payload.
    #[inline]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consumes the event and returns its payload.
    #[inline]
    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Converts the payload, keeping id, seq, timestamp and source.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Event<U> {
        Event {
            id: self.id,
            seq: self.seq,
            at: self.at,
            source: self.source,
            payload: f(self.payload),
        }
    }

    /// Stamps emission metadata. Only publishers call this, before delivery.
    #[inline]
    pub(crate) fn stamped(mut self, source: Arc<str>, seq: u64) -> Self {
        self.source = Some(source);
        self.seq = seq;
        self
    }
}
