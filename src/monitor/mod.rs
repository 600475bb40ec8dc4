//! Monitors: consumer-side queues with bounded-wait async pull.
//!
//! ## Contents
//! - [`Monitor`] subscribe to publishers, pull events with `next()`
//! - [`MonitorStats`] counters snapshot
//!
//! ## Wiring
//! ```text
//! Publisher<A> ──► Inlet<T, A> ──┐
//!                                ├──► Shared<T> { VecDeque, Notify } ◄── Monitor<T>::next()
//! Publisher<B> ──► Inlet<T, B> ──┘
//! ```
//! An inlet is the [`Observer`](crate::Observer) a monitor registers on each
//! publisher; it converts `A`/`B` into `T`, enqueues and wakes one waiter.

mod inlet;
#[allow(clippy::module_inception)]
mod monitor;
mod queue;

pub use monitor::Monitor;
pub use queue::MonitorStats;
