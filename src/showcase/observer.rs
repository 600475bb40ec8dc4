//! # Observer showcase: bank activity watched by two async monitors.
//!
//! ```text
//! producer task                    BankAccount
//!   loop rounds {                    ├─ new_transactions ──┬──► monitor "transactions"
//!     pause; create_transaction ───► │                     │      └─► consumer A: "New transaction: {sum} USD"
//!     pause; create_new_customer ──► └─ new_customers ─────┴──► monitor "general" (BankEntity)
//!   }                                                             └─► consumer B: "New entity [{kind}]: {id}"
//! ```
//!
//! Consumers end when their monitor reports "no more events" (wait timeout)
//! or when the context is cancelled. The showcase returns once the producer
//! and both consumers have finished.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::{FutureExt, StreamExt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::bank::{BankAccount, BankEntity, Customer, Transaction};
use crate::config::Config;
use crate::error::RuntimeError;
use crate::monitor::Monitor;
use crate::observers::LogObserver;
use crate::showcase::{Launchable, Narrator};

/// The observer demonstration.
pub struct ObserverShowcase {
    cfg: Config,
    narrator: Arc<dyn Narrator>,
}

impl ObserverShowcase {
    /// Creates the showcase; every line it narrates goes to `narrator`.
    pub fn new(cfg: Config, narrator: Arc<dyn Narrator>) -> Self {
        Self { cfg, narrator }
    }
}

#[async_trait]
impl Launchable for ObserverShowcase {
    fn name(&self) -> &str {
        "Observer"
    }

    async fn run(&self, ctx: CancellationToken) -> Result<(), RuntimeError> {
        let bank = BankAccount::new();
        bank.new_transactions.subscribe(Arc::new(LogObserver::named("bank")));
        bank.new_customers.subscribe(Arc::new(LogObserver::named("bank")));

        let transactions = Monitor::<Transaction>::from_config("transactions", &self.cfg)
            .subscribe(&bank.new_transactions);
        let general = Monitor::<BankEntity>::from_config("general", &self.cfg)
            .subscribe(&bank.new_transactions)
            .subscribe(&bank.new_customers);

        let mut set = JoinSet::new();
        spawn_named(
            &mut set,
            "producer",
            produce(bank, self.cfg.clone(), ctx.clone()),
        );
        spawn_named(
            &mut set,
            "transactions-consumer",
            narrate_transactions(
                transactions.clone(),
                Arc::clone(&self.narrator),
                ctx.clone(),
            ),
        );
        spawn_named(
            &mut set,
            "entities-consumer",
            narrate_entities(
                general.clone(),
                Arc::clone(&self.narrator),
                ctx.clone(),
            ),
        );

        let mut first_err = None;
        while let Some(joined) = set.join_next().await {
            let res = joined.unwrap_or_else(|err| {
                Err(RuntimeError::TaskPanicked {
                    task: "unknown".into(),
                    reason: err.to_string(),
                })
            });
            if let Err(err) = res {
                // Stop the remaining tasks; keep the first failure.
                ctx.cancel();
                first_err.get_or_insert(err);
            }
        }

        tracing::info!(
            transactions = ?transactions.stats(),
            general = ?general.stats(),
            "observer showcase finished"
        );
        first_err.map_or(Ok(()), Err)
    }
}

/// Spawns `fut` and converts a panic into [`RuntimeError::TaskPanicked`].
fn spawn_named<F>(set: &mut JoinSet<Result<(), RuntimeError>>, task: &'static str, fut: F)
where
    F: Future<Output = Result<(), RuntimeError>> + Send + 'static,
{
    set.spawn(async move {
        match std::panic::AssertUnwindSafe(fut).catch_unwind().await {
            Ok(res) => res,
            Err(panic) => Err(RuntimeError::TaskPanicked {
                task: task.to_string(),
                reason: panic_message(panic.as_ref()),
            }),
        }
    });
}

fn panic_message(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Emits `cfg.rounds` transaction/customer pairs, pausing before each emission.
async fn produce(
    bank: BankAccount,
    cfg: Config,
    ctx: CancellationToken,
) -> Result<(), RuntimeError> {
    let mut rng = StdRng::from_entropy();
    let bound = cfg.transaction_bound();

    for _ in 0..cfg.rounds {
        if pause(&cfg, &ctx).await {
            break;
        }
        bank.create_transaction(Transaction::new(rng.gen_range(0..bound)))?;

        if pause(&cfg, &ctx).await {
            break;
        }
        bank.create_new_customer(Customer)?;
    }
    Ok(())
}

/// Sleeps for the emit interval; returns `true` if cancelled.
async fn pause(cfg: &Config, ctx: &CancellationToken) -> bool {
    match cfg.emit_pause() {
        None => ctx.is_cancelled(),
        Some(d) => tokio::select! {
            _ = ctx.cancelled() => true,
            _ = tokio::time::sleep(d) => false,
        },
    }
}

async fn narrate_transactions(
    monitor: Monitor<Transaction>,
    narrator: Arc<dyn Narrator>,
    ctx: CancellationToken,
) -> Result<(), RuntimeError> {
    while let Some(ev) = monitor.next_or_cancel(&ctx).await {
        narrator.say(&format!("New transaction: {} USD", ev.payload().sum));
    }
    Ok(())
}

async fn narrate_entities(
    monitor: Monitor<BankEntity>,
    narrator: Arc<dyn Narrator>,
    ctx: CancellationToken,
) -> Result<(), RuntimeError> {
    let events = monitor.into_stream().take_until(ctx.cancelled());
    tokio::pin!(events);
    while let Some(ev) = events.next().await {
        narrator.say(&format!("New entity [{}]: {}", ev.payload().kind(), ev.id()));
    }
    Ok(())
}
