use std::sync::Arc;
use std::time::Duration;

use asyncmon::{
    BankAccount, BankEntity, Catalogue, Config, Customer, Monitor, ObserverShowcase,
    RecordingNarrator, Transaction,
};
use tokio_util::sync::CancellationToken;

#[tokio::test(start_paused = true)]
async fn catalogue_runs_observer_showcase() {
    let narrator = Arc::new(RecordingNarrator::new());
    let cfg = Config {
        rounds: 2,
        ..Config::default()
    };
    let catalogue = Catalogue::new(narrator.clone())
        .with(Arc::new(ObserverShowcase::new(cfg, narrator.clone())));

    catalogue.run_with(CancellationToken::new()).await.unwrap();

    let lines = narrator.lines();
    assert_eq!(lines.first().map(String::as_str), Some("------ Observer ------ begin"));
    assert!(lines.iter().any(|l| l == "------ Observer ------ end"));
    assert_eq!(lines.iter().filter(|l| l.starts_with("New transaction")).count(), 2);
    assert_eq!(lines.iter().filter(|l| l.starts_with("New entity")).count(), 4);
}

#[tokio::test(start_paused = true)]
async fn producer_in_background_monitors_drain_then_stop() {
    let bank = BankAccount::new();
    let transactions = Monitor::<Transaction>::new("tx", Duration::from_secs(3))
        .subscribe(&bank.new_transactions);
    let general = Monitor::<BankEntity>::new("all", Duration::from_secs(3))
        .subscribe(&bank.new_transactions)
        .subscribe(&bank.new_customers);

    let producer = {
        let bank = bank.clone();
        tokio::spawn(async move {
            for sum in 1..=5u32 {
                tokio::time::sleep(Duration::from_millis(100)).await;
                bank.create_transaction(Transaction::new(sum)).unwrap();
                tokio::time::sleep(Duration::from_millis(100)).await;
                bank.create_new_customer(Customer).unwrap();
            }
        })
    };

    let tx_consumer = tokio::spawn(async move {
        let mut sums = Vec::new();
        while let Some(ev) = transactions.next().await {
            sums.push(ev.payload().sum);
        }
        sums
    });
    let all_consumer = tokio::spawn(async move {
        let mut kinds = Vec::new();
        while let Some(ev) = general.next().await {
            kinds.push(ev.payload().kind());
        }
        kinds
    });

    producer.await.unwrap();
    assert_eq!(tx_consumer.await.unwrap(), vec![1, 2, 3, 4, 5]);
    let kinds = all_consumer.await.unwrap();
    assert_eq!(kinds.len(), 10);
    assert!(kinds.chunks(2).all(|pair| pair == ["Transaction", "Customer"]));
}
