//! Events: data model and typed publishers.
//!
//! ## Contents
//! - [`Event`] immutable payload wrapper with identity and emission metadata
//! - [`Publisher`] typed event source broadcasting to registered observers
//!
//! ## Quick reference
//! - **Publishers**: domain objects own them (e.g. `BankAccount` owns one per
//!   stream) and producers call `publish()`.
//! - **Consumers**: [`Observer`](crate::Observer) implementations, most notably the
//!   inlet a [`Monitor`](crate::Monitor) registers when it subscribes.

mod event;
mod publisher;

pub use event::Event;
pub use publisher::Publisher;
