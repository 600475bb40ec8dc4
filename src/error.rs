//! Error types used by publishers, monitors and the showcase runtime.
//!
//! This module defines three error types:
//!
//! - [`PublishError`]: raised when emitting into a publisher that already
//!   delivered its terminal notification.
//! - [`StreamError`]: the payload of an `on_error` notification; a producer
//!   uses it to tell observers that its stream failed.
//! - [`RuntimeError`]: raised by the showcase runtime (task joins, signals).
//!
//! A monitor timing out while waiting for the next event is **not** an error:
//! `Monitor::next` returns `None` and the consumption loop ends.
//!
//! All types provide `as_label` / `as_message` helpers for logs.

use std::sync::Arc;

use thiserror::Error;

/// Terminal state a publisher ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// `complete()` was called.
    Completed,
    /// `fail()` was called.
    Failed,
}

impl Terminal {
    /// Returns a short stable label.
    pub fn as_label(&self) -> &'static str {
        match self {
            Terminal::Completed => "completed",
            Terminal::Failed => "failed",
        }
    }
}

/// # Errors produced when publishing an event.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// The publisher was completed or failed; the event was not delivered.
    #[error("publisher {publisher:?} is closed ({})", .terminal.as_label())]
    Closed {
        /// Name of the closed publisher.
        publisher: Arc<str>,
        /// How the publisher was closed.
        terminal: Terminal,
    },
}

impl PublishError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use asyncmon::{PublishError, Terminal};
    ///
    /// let err = PublishError::Closed { publisher: "transactions".into(), terminal: Terminal::Completed };
    /// assert_eq!(err.as_label(), "publish_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            PublishError::Closed { .. } => "publish_closed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            PublishError::Closed { publisher, terminal } => {
                format!("publisher={publisher} closed={}", terminal.as_label())
            }
        }
    }
}

/// # Failure signalled by a producer through `Publisher::fail`.
///
/// Delivered to every observer's `on_error`. It is a terminal notification:
/// no further events follow on that publisher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("stream {publisher:?} failed: {reason}")]
pub struct StreamError {
    /// Name of the publisher that failed.
    pub publisher: Arc<str>,
    /// Human-readable reason.
    pub reason: Arc<str>,
}

impl StreamError {
    /// Creates a new stream error.
    pub fn new(publisher: impl Into<Arc<str>>, reason: impl Into<Arc<str>>) -> Self {
        Self {
            publisher: publisher.into(),
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        "stream_failed"
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        format!("publisher={} reason={}", self.publisher, self.reason)
    }
}

/// # Errors produced by the showcase runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A producer or consumer task panicked or was aborted.
    #[error("task {task:?} did not finish: {reason}")]
    TaskPanicked {
        /// Name of the task.
        task: String,
        /// Panic message or abort reason.
        reason: String,
    },

    /// Registering OS signal handlers failed.
    #[error("signal handler registration failed: {0}")]
    Signal(#[from] std::io::Error),

    /// A producer could not publish.
    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use asyncmon::RuntimeError;
    ///
    /// let err = RuntimeError::TaskPanicked { task: "producer".into(), reason: "boom".into() };
    /// assert_eq!(err.as_label(), "runtime_task_panicked");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::TaskPanicked { .. } => "runtime_task_panicked",
            RuntimeError::Signal(_) => "runtime_signal",
            RuntimeError::Publish(_) => "runtime_publish",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::TaskPanicked { task, reason } => {
                format!("task={task} reason={reason}")
            }
            RuntimeError::Signal(err) => format!("signal: {err}"),
            RuntimeError::Publish(err) => err.as_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_error_message() {
        let err = PublishError::Closed {
            publisher: "customers".into(),
            terminal: Terminal::Failed,
        };
        assert_eq!(err.as_message(), "publisher=customers closed=failed");
        assert_eq!(err.to_string(), "publisher \"customers\" is closed (failed)");
    }

    #[test]
    fn test_stream_error_display() {
        let err = StreamError::new("transactions", "ledger offline");
        assert_eq!(err.as_label(), "stream_failed");
        assert_eq!(
            err.to_string(),
            "stream \"transactions\" failed: ledger offline"
        );
    }

    #[test]
    fn test_runtime_error_wraps_publish() {
        let err: RuntimeError = PublishError::Closed {
            publisher: "p".into(),
            terminal: Terminal::Completed,
        }
        .into();
        assert_eq!(err.as_label(), "runtime_publish");
        assert_eq!(err.as_message(), "publisher=p closed=completed");
    }
}
