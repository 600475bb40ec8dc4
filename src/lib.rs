//! # asyncmon
//!
//! **asyncmon** provides typed publishers and bounded-wait async monitors:
//! producers broadcast events synchronously to registered observers, and a
//! monitor fans several publishers into one FIFO queue that consumers pull
//! from asynchronously.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   producer task(s)
//!        │ publish(payload)
//!        ▼
//! ┌──────────────────┐      ┌──────────────────┐
//! │  Publisher<A>    │      │  Publisher<B>    │   (registry of Observer handles,
//! │ "transactions"   │      │  "customers"     │    synchronous broadcast)
//! └──┬────────────┬──┘      └────────┬─────────┘
//!    │            │                  │
//!    ▼            ▼                  ▼
//!  Inlet<A,A>   Inlet<T,A>        Inlet<T,B>          (Into<T> conversion)
//!    │            └───────┬──────────┘
//!    ▼                    ▼
//! ┌──────────────┐   ┌──────────────┐
//! │ Monitor<A>   │   │ Monitor<T>   │   FIFO queue + Notify (wake one waiter)
//! └──────┬───────┘   └──────┬───────┘
//!        ▼                  ▼
//!   consumer: next()   consumer: into_stream()
//!   Some(ev) │ None after wait timeout (end of stream)
//! ```
//!
//! ### Pull lifecycle
//! ```text
//! loop {
//!   ├─► next()
//!   │     ├─ queued      ─► Some(event)               (FIFO)
//!   │     ├─ arrives     ─► Some(event)               (one waiter woken per arrival)
//!   │     └─ wait expires ─► None                     (not an error)
//!   └─ exit on None
//! }
//! ```
//!
//! ## Features
//! | Area          | Description                                                  | Key types / traits                         |
//! |---------------|--------------------------------------------------------------|--------------------------------------------|
//! | **Events**    | Immutable payload wrapper with id, seq, timestamp, source.   | [`Event`]                                  |
//! | **Publish**   | Synchronous broadcast, idempotent subscribe, terminal state. | [`Publisher`], [`Observer`]                |
//! | **Consume**   | FIFO fan-in queue with bounded-wait async pull.              | [`Monitor`], [`MonitorStats`]              |
//! | **Errors**    | Typed errors with stable labels.                             | [`PublishError`], [`StreamError`], [`RuntimeError`] |
//! | **Config**    | Explicit settings object, no globals.                        | [`Config`]                                 |
//! | **Showcase**  | Bank account demo with console narration.                    | [`ObserverShowcase`], [`Catalogue`]        |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use asyncmon::{BankAccount, BankEntity, Customer, Monitor, Transaction};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bank = BankAccount::new();
//!     let everything = Monitor::<BankEntity>::new("general", Duration::from_millis(50))
//!         .subscribe(&bank.new_transactions)
//!         .subscribe(&bank.new_customers);
//!
//!     bank.create_transaction(Transaction::new(120))?;
//!     bank.create_new_customer(Customer)?;
//!
//!     while let Some(ev) = everything.next().await {
//!         println!("New entity [{}]: {}", ev.payload().kind(), ev.id());
//!     }
//!     Ok(())
//! }
//! ```
mod bank;
mod config;
mod error;
mod events;
mod monitor;
mod observers;
mod showcase;

// ---- Public re-exports ----

pub use bank::{BankAccount, BankEntity, Customer, Transaction};
pub use config::{Config, DEFAULT_WAIT_TIMEOUT};
pub use error::{PublishError, RuntimeError, StreamError, Terminal};
pub use events::{Event, Publisher};
pub use monitor::{Monitor, MonitorStats};
pub use observers::{FnObserver, LogObserver, Observer};
pub use showcase::{
    Catalogue, ConsoleNarrator, Launchable, Narrator, ObserverShowcase, RecordingNarrator, launch,
    wait_for_shutdown_signal,
};
