//! # Catalogue: runs showcases one after another.
//!
//! ```text
//! Catalogue::run()
//!   ├─► runtime token (cancelled on SIGINT/SIGTERM/SIGQUIT or Ctrl-C)
//!   └─► for each Launchable:
//!          launch(showcase, narrator, token.child_token())
//!          └─ stop at the first error, or skip the rest once cancelled
//! ```

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::RuntimeError;
use crate::showcase::{Launchable, Narrator, launch, shutdown};

/// Ordered list of showcases sharing one narrator.
pub struct Catalogue {
    entries: Vec<Arc<dyn Launchable>>,
    narrator: Arc<dyn Narrator>,
}

impl Catalogue {
    /// Creates an empty catalogue.
    pub fn new(narrator: Arc<dyn Narrator>) -> Self {
        Self {
            entries: Vec::new(),
            narrator,
        }
    }

    /// Appends a showcase.
    pub fn with(mut self, entry: Arc<dyn Launchable>) -> Self {
        self.entries.push(entry);
        self
    }

    /// Names of registered showcases, in run order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name()).collect()
    }

    /// Runs every showcase; an OS termination signal cancels the run.
    pub async fn run(&self) -> Result<(), RuntimeError> {
        let token = CancellationToken::new();
        let entries = self.run_with(token.clone());
        tokio::pin!(entries);

        tokio::select! {
            res = &mut entries => return res,
            sig = shutdown::wait_for_shutdown_signal() => {
                sig?;
                tracing::info!("shutdown requested");
                token.cancel();
            }
        }
        entries.await
    }

    /// Runs every showcase under `token`. Stops at the first error.
    pub async fn run_with(&self, token: CancellationToken) -> Result<(), RuntimeError> {
        for entry in &self.entries {
            if token.is_cancelled() {
                tracing::info!(showcase = entry.name(), "skipped after cancellation");
                continue;
            }
            launch(entry.as_ref(), self.narrator.as_ref(), token.child_token()).await?;
        }
        Ok(())
    }
}
