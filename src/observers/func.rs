//! # Function-backed observer (`FnObserver`)
//!
//! [`FnObserver`] wraps a closure `F: Fn(&Event<T>)` so any callback can be
//! registered on a publisher without declaring a type.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use asyncmon::{FnObserver, Publisher};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! let publisher = Publisher::<u32>::new("numbers");
//! publisher.subscribe(FnObserver::arc("collect", move |ev: &asyncmon::Event<u32>| {
//!     sink.lock().unwrap().push(*ev.payload());
//! }));
//!
//! publisher.publish(5u32).unwrap();
//! assert_eq!(*seen.lock().unwrap(), vec![5]);
//! ```

use std::borrow::Cow;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::events::Event;
use crate::observers::Observer;

/// Closure-backed observer. Terminal notifications are ignored.
pub struct FnObserver<T, F> {
    name: Cow<'static, str>,
    f: F,
    _marker: PhantomData<fn(&Event<T>)>,
}

impl<T, F> FnObserver<T, F>
where
    F: Fn(&Event<T>) + Send + Sync + 'static,
{
    /// Creates a new function-backed observer.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
            _marker: PhantomData,
        }
    }

    /// Creates the observer and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<T, F> Observer<T> for FnObserver<T, F>
where
    T: 'static,
    F: Fn(&Event<T>) + Send + Sync + 'static,
{
    fn on_next(&self, event: &Event<T>) {
        (self.f)(event)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
