//! # Observers registered on publishers.
//!
//! This module provides the [`Observer`] trait and built-in implementations.
//!
//! - [`Observer`]: callback handle invoked synchronously on every emission
//! - [`LogObserver`]: writes notifications through `tracing`
//! - [`FnObserver`]: wraps a closure
//!
//! Monitors register their own internal observer (an inlet that enqueues and
//! wakes a waiter); see [`Monitor::subscribe`](crate::Monitor::subscribe).

mod func;
mod log;
mod observer;

pub use func::FnObserver;
pub use log::LogObserver;
pub use observer::Observer;
