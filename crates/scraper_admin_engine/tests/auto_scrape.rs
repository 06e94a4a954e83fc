mod support;

use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use scraper_admin_core::{
    update, AutoScrapeState, LogSeverity, LoopConfig, Msg, RunPhase, ScrapeTarget,
    ValidationError,
};
use scraper_admin_engine::{AdminEvent, ApiError, AutoScrapeRunner};
use support::{FakeBackend, RecordingSink};
use tokio_util::sync::CancellationToken;

const PREFIX: &str = "https://games.example.com/tournament/?id=";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(admin_logging::initialize_for_tests);
}

fn url(id: u64) -> String {
    format!("{PREFIX}{id}")
}

fn ready_state(use_cache: bool) -> AutoScrapeState {
    let target = ScrapeTarget::new("entity-1", "Kings Room", PREFIX, "").unwrap();
    let (state, _) = update(AutoScrapeState::new(), Msg::TargetSelected(target));
    let (state, _) = update(
        state,
        Msg::ConfigChanged(LoopConfig {
            check_interval: Duration::ZERO,
            use_cache,
        }),
    );
    state
}

#[tokio::test]
async fn range_with_exclusions_completes_with_expected_counts() {
    init_logging();
    let mut backend = FakeBackend::default();
    let mut excluded = FakeBackend::record(&url(3));
    excluded.do_not_scrape = true;
    backend.records.insert(url(3), excluded);
    let mut finished = FakeBackend::record(&url(5));
    finished.game_status = Some("FINISHED".into());
    backend.records.insert(url(5), finished);

    let sink = RecordingSink::default();
    let runner = AutoScrapeRunner::new(&backend, &sink);
    let state = runner
        .run(ready_state(false), "1", "5", CancellationToken::new())
        .await
        .expect("valid range");

    let stats = state.stats();
    assert_eq!(state.phase(), RunPhase::Completed);
    assert_eq!(stats.total_checked, 5);
    assert_eq!(stats.scraped, 3);
    assert_eq!(stats.skipped_do_not_scrape, 1);
    assert_eq!(stats.skipped_finished, 1);

    let scraped: Vec<String> = backend
        .calls()
        .into_iter()
        .filter(|call| call.starts_with("scrape"))
        .collect();
    assert_eq!(
        scraped,
        vec![
            format!("scrape {} force=true", url(1)),
            format!("scrape {} force=true", url(2)),
            format!("scrape {} force=true", url(4)),
        ]
    );

    let events = sink.take();
    assert!(events.iter().any(|event| matches!(
        event,
        AdminEvent::Stats {
            phase: RunPhase::Completed,
            ..
        }
    )));
}

#[tokio::test]
async fn invalid_range_is_rejected_before_any_call() {
    init_logging();
    let backend = FakeBackend::default();
    let sink = RecordingSink::default();
    let runner = AutoScrapeRunner::new(&backend, &sink);

    let err = runner
        .run(ready_state(true), "10", "5", CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err, ValidationError::EndBeforeStart { start: 10, end: 5 });
    assert!(backend.calls().is_empty());
    assert!(sink.take().is_empty());
}

#[tokio::test]
async fn check_failures_fail_open() {
    init_logging();
    let mut backend = FakeBackend::default();
    backend.failing_checks.insert(url(2), ApiError::Timeout);

    let sink = RecordingSink::default();
    let runner = AutoScrapeRunner::new(&backend, &sink);
    let state = runner
        .run(ready_state(true), "1", "2", CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(state.stats().scraped, 2);
    assert_eq!(state.stats().errors, 0);
    assert!(backend
        .calls()
        .contains(&format!("scrape {} force=false", url(2))));
    let warnings = sink
        .take()
        .into_iter()
        .filter(|event| matches!(event, AdminEvent::Log(entry) if entry.severity == LogSeverity::Warning))
        .count();
    assert_eq!(warnings, 1);
}

#[tokio::test]
async fn cancelling_mid_scrape_stops_at_current_id() {
    init_logging();
    let cancel = CancellationToken::new();
    let backend = FakeBackend {
        hang_on_scrape: Some((url(3), cancel.clone())),
        ..FakeBackend::default()
    };

    let sink = RecordingSink::default();
    let runner = AutoScrapeRunner::new(&backend, &sink);
    let state = tokio::time::timeout(
        Duration::from_secs(5),
        runner.run(ready_state(true), "1", "6", cancel),
    )
    .await
    .expect("runner returns after stop")
    .unwrap();

    assert_eq!(state.phase(), RunPhase::Stopped);
    assert_eq!(state.range().unwrap().current_id, 3);
    assert_eq!(state.stats().total_checked, 3);
    assert_eq!(state.stats().scraped, 2);
    assert!(!backend.calls().iter().any(|call| call.contains(&url(4))));
}

#[tokio::test]
async fn cancelling_before_start_stops_on_first_tick() {
    init_logging();
    let backend = FakeBackend::default();
    let sink = RecordingSink::default();
    let runner = AutoScrapeRunner::new(&backend, &sink);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let state = runner
        .run(ready_state(true), "1", "3", cancel)
        .await
        .unwrap();

    assert_eq!(state.phase(), RunPhase::Stopped);
    assert_eq!(state.range().unwrap().current_id, 1);
    assert_eq!(state.stats().total_checked, 0);
    assert!(backend.calls().is_empty());
}
