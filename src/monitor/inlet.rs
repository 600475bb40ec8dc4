//! Observer a monitor registers on each publisher it subscribes to.
//!
//! An inlet only holds a weak handle to the monitor's queue. Once every
//! [`Monitor`](crate::Monitor) handle is gone the inlet turns inactive, drops
//! whatever still arrives, and is pruned by the publisher.

use std::marker::PhantomData;
use std::sync::Weak;

use crate::error::StreamError;
use crate::events::Event;
use crate::monitor::queue::Shared;
use crate::observers::Observer;

/// Converts `U` payloads into the monitor's `T` and enqueues them.
pub(crate) struct Inlet<T, U> {
    shared: Weak<Shared<T>>,
    name: Box<str>,
    _marker: PhantomData<fn(U)>,
}

impl<T, U> Inlet<T, U> {
    pub(crate) fn new(shared: Weak<Shared<T>>, name: &str) -> Self {
        Self {
            shared,
            name: name.into(),
            _marker: PhantomData,
        }
    }
}

impl<T, U> Observer<U> for Inlet<T, U>
where
    T: Send + 'static,
    U: Clone + Into<T> + 'static,
{
    fn on_next(&self, event: &Event<U>) {
        if let Some(shared) = self.shared.upgrade() {
            shared.push(event.clone().map(Into::into));
        }
    }

    fn on_error(&self, error: &StreamError) {
        if let Some(shared) = self.shared.upgrade() {
            shared.record_error(error);
        }
    }

    fn on_completed(&self, publisher: &str) {
        if let Some(shared) = self.shared.upgrade() {
            shared.record_completion(publisher);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.shared.strong_count() > 0
    }

    // One registration per monitor, whatever the payload adapter.
    fn key(&self) -> usize {
        self.shared.as_ptr() as *const () as usize
    }
}
