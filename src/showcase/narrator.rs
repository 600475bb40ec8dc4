//! # Console narration for showcases.
//!
//! Showcases describe what they observe through a [`Narrator`]. Narration is
//! the visible demo output; library diagnostics go through `tracing` instead.
//!
//! - [`ConsoleNarrator`]: prints each line to stdout
//! - [`RecordingNarrator`]: keeps lines in memory (tests, embedding)

use std::sync::{Mutex, PoisonError};

/// Sink for human-readable narration lines.
pub trait Narrator: Send + Sync + 'static {
    /// Emits one line of narration.
    fn say(&self, line: &str);
}

/// Writes narration to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNarrator;

impl Narrator for ConsoleNarrator {
    fn say(&self, line: &str) {
        println!("{line}");
    }
}

/// Collects narration lines in memory.
#[derive(Debug, Default)]
pub struct RecordingNarrator {
    lines: Mutex<Vec<String>>,
}

impl RecordingNarrator {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every line recorded so far, in order.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Narrator for RecordingNarrator {
    fn say(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_owned());
    }
}
