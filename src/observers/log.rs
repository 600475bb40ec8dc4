//! # LogObserver: tracing event writer
//!
//! A minimal observer that writes every notification it receives through
//! `tracing`. Attach it to a publisher to trace emissions while debugging.
//!
//! ## Example output (with `tracing-subscriber` fmt layer)
//! ```text
//! DEBUG asyncmon::observers::log: event observer="log" publisher="transactions" seq=0 id=2f1c.. payload=Transaction { sum: 17 }
//! WARN  asyncmon::observers::log: stream failed observer="log" publisher="customers" reason="ledger offline"
//! INFO  asyncmon::observers::log: stream completed observer="log" publisher="transactions"
//! ```

use std::fmt::Debug;

use crate::error::StreamError;
use crate::events::Event;
use crate::observers::Observer;

/// Observer that logs events through `tracing`.
pub struct LogObserver {
    name: &'static str,
}

impl LogObserver {
    /// Construct a new [`LogObserver`] named `"log"`.
    #[must_use]
    pub fn new() -> Self {
        Self { name: "log" }
    }

    /// Construct a [`LogObserver`] with a custom name (appears in every record).
    #[must_use]
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug + 'static> Observer<T> for LogObserver {
    fn on_next(&self, e: &Event<T>) {
        tracing::debug!(
            observer = self.name,
            publisher = e.source().unwrap_or("unknown"),
            seq = e.seq(),
            id = %e.id(),
            payload = ?e.payload(),
            "event"
        );
    }

    fn on_error(&self, error: &StreamError) {
        tracing::warn!(
            observer = self.name,
            publisher = %error.publisher,
            reason = %error.reason,
            "stream failed"
        );
    }

    fn on_completed(&self, publisher: &str) {
        tracing::info!(observer = self.name, publisher, "stream completed");
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Publisher;
    use std::sync::Arc;

    fn with_capture(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_logs_every_notification() {
        with_capture(|| {
            let done = Publisher::<Vec<u8>>::new("done");
            let broken = Publisher::<Vec<u8>>::new("broken");
            assert!(done.subscribe(Arc::new(LogObserver::new())));
            assert!(broken.subscribe(Arc::new(LogObserver::named("audit"))));

            done.publish(vec![1, 2]).unwrap();
            assert!(done.complete());
            broken.publish(vec![]).unwrap();
            assert!(broken.fail("ledger offline"));

            assert_eq!(done.subscriber_count(), 0);
            assert_eq!(broken.subscriber_count(), 0);
        });
    }

    #[test]
    fn test_name_and_default() {
        let log = LogObserver::default();
        assert_eq!(<LogObserver as Observer<u32>>::name(&log), "log");
        assert_eq!(<LogObserver as Observer<u32>>::name(&LogObserver::named("bank")), "bank");
    }
}
