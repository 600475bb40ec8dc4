//! # Showcases: runnable demonstrations with console narration.
//!
//! - [`Launchable`] / [`launch`]: one named demonstration, framed by begin/end lines
//! - [`ObserverShowcase`]: bank account streams consumed through two monitors
//! - [`Catalogue`]: runs showcases in order, cancelled by OS signals
//! - [`Narrator`]: where narration goes ([`ConsoleNarrator`], [`RecordingNarrator`])

mod catalogue;
mod launch;
mod narrator;
mod observer;
mod shutdown;

pub use catalogue::Catalogue;
pub use launch::{Launchable, launch};
pub use narrator::{ConsoleNarrator, Narrator, RecordingNarrator};
pub use observer::ObserverShowcase;
pub use shutdown::wait_for_shutdown_signal;
