//! # Pattern catalogue
//!
//! Runs the observer showcase: a bank account emits transactions and new
//! customers while two monitors narrate what they receive. Each consumer stops
//! three seconds after the last event.
//!
//! ## Run
//! ```bash
//! cargo run --example catalogue
//! RUST_LOG=asyncmon=debug cargo run --example catalogue
//! ```

use std::sync::Arc;

use asyncmon::{Catalogue, Config, ConsoleNarrator, ObserverShowcase};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cfg = Config::default();
    let narrator = Arc::new(ConsoleNarrator);

    let catalogue = Catalogue::new(narrator.clone())
        .with(Arc::new(ObserverShowcase::new(cfg, narrator)));

    catalogue.run().await?;
    Ok(())
}
