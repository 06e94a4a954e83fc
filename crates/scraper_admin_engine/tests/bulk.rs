mod support;

use scraper_admin_core::{BulkScrapeJob, ItemStatus, ScanRange, ScrapeTarget};
use scraper_admin_engine::{run_bulk_scrape, AdminEvent, ApiError, BulkRunOptions};
use support::{FakeBackend, RecordingSink};
use tokio_util::sync::CancellationToken;

const PREFIX: &str = "https://games.example.com/tournament/?id=";

fn url(id: u64) -> String {
    format!("{PREFIX}{id}")
}

fn job(start: u64, end: u64, batch_size: usize, skip_existing: bool) -> BulkScrapeJob {
    let target = ScrapeTarget::new("entity-1", "Kings Room", PREFIX, "").unwrap();
    BulkScrapeJob::new(
        target,
        ScanRange::new(start, end).unwrap(),
        batch_size,
        skip_existing,
    )
    .unwrap()
}

#[tokio::test]
async fn existing_records_are_skipped_when_requested() {
    let mut backend = FakeBackend::default();
    let mut existing = FakeBackend::record(&url(2));
    existing.game_id = Some("game-2".into());
    backend.records.insert(url(2), existing);

    let sink = RecordingSink::default();
    let done = run_bulk_scrape(
        &backend,
        job(1, 3, 2, true),
        &BulkRunOptions::default(),
        &sink,
        CancellationToken::new(),
    )
    .await;

    assert_eq!(done.status(1), Some(&ItemStatus::Success));
    assert_eq!(done.status(2), Some(&ItemStatus::Skipped));
    assert_eq!(done.status(3), Some(&ItemStatus::Success));
    assert!(done.is_finished());
    assert!(!backend.calls().contains(&format!("fetch {}", url(2))));

    let trail: Vec<ItemStatus> = sink
        .take()
        .into_iter()
        .filter_map(|event| match event {
            AdminEvent::BulkItem { id: 1, status } => Some(status),
            _ => None,
        })
        .collect();
    assert_eq!(
        trail,
        vec![ItemStatus::Fetching, ItemStatus::Saving, ItemStatus::Success]
    );
}

#[tokio::test]
async fn fetch_and_save_failures_are_terminal_errors() {
    let mut backend = FakeBackend::default();
    backend.failing_fetches.insert(
        url(1),
        ApiError::Graphql(vec!["tournament not found".into()]),
    );
    backend
        .rejected_saves
        .insert(url(2), "venue required".into());

    let done = run_bulk_scrape(
        &backend,
        job(1, 2, 5, false),
        &BulkRunOptions::default(),
        &RecordingSink::default(),
        CancellationToken::new(),
    )
    .await;

    assert_eq!(
        done.status(1),
        Some(&ItemStatus::Error(
            "graphql error: tournament not found".into()
        ))
    );
    assert_eq!(
        done.status(2),
        Some(&ItemStatus::Error("venue required".into()))
    );
    let summary = done.summary();
    assert_eq!(summary.error, 2);
    assert!(!backend.calls().contains(&format!("save {}", url(1))));
}

#[tokio::test]
async fn cancelled_job_leaves_items_pending() {
    let backend = FakeBackend::default();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let done = run_bulk_scrape(
        &backend,
        job(1, 4, 2, false),
        &BulkRunOptions::default(),
        &RecordingSink::default(),
        cancel,
    )
    .await;

    assert_eq!(done.summary().pending, 4);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn unreachable_existence_check_fails_item_without_fetching() {
    let mut backend = FakeBackend::default();
    backend.failing_checks.insert(url(1), ApiError::Timeout);
    backend
        .failing_checks
        .insert(url(2), ApiError::Graphql(vec!["not authorized".into()]));

    let done = run_bulk_scrape(
        &backend,
        job(1, 2, 2, true),
        &BulkRunOptions::default(),
        &RecordingSink::default(),
        CancellationToken::new(),
    )
    .await;

    assert!(matches!(done.status(1), Some(ItemStatus::Error(msg)) if msg.starts_with("existence check failed")));
    assert!(!backend.calls().contains(&format!("fetch {}", url(1))));
    assert_eq!(done.status(2), Some(&ItemStatus::Success));
    assert!(backend.calls().contains(&format!("fetch {}", url(2))));
}
