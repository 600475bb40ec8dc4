//! # Launchable showcases.
//!
//! A [`Launchable`] is one self-contained demonstration with a stable name and
//! an async `run`. [`launch`] frames a run with begin/end narration:
//!
//! ```text
//! ------ Observer ------ begin
//! ...showcase narration...
//! ------ Observer ------ end
//! ```

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::RuntimeError;
use crate::showcase::Narrator;

/// # Asynchronous, cancelable demonstration.
///
/// Implementors should stop promptly once `ctx` is cancelled.
#[async_trait]
pub trait Launchable: Send + Sync + 'static {
    /// Returns a stable, human-readable name.
    fn name(&self) -> &str;

    /// Runs the demonstration to completion or cancellation.
    async fn run(&self, ctx: CancellationToken) -> Result<(), RuntimeError>;
}

/// Runs `showcase` between begin/end narration lines.
///
/// The end line is written even when the run fails; the error is returned afterwards.
pub async fn launch(
    showcase: &dyn Launchable,
    narrator: &dyn Narrator,
    ctx: CancellationToken,
) -> Result<(), RuntimeError> {
    let name = showcase.name();
    narrator.say(&format!("------ {name} ------ begin"));
    let res = showcase.run(ctx).await;
    if let Err(err) = &res {
        tracing::error!(showcase = name, error = err.as_label(), "{}", err.as_message());
    }
    narrator.say(&format!("------ {name} ------ end"));
    narrator.say("");
    res
}
