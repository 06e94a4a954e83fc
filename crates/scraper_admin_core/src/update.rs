use std::time::Duration;

use crate::state::InFlight;
use crate::{
    evaluate, AutoScrapeState, CheckResult, Effect, GameId, LogSeverity, Msg, RunId, RunPhase,
    ScanRange, ScrapeReport, UrlStatus, ValidationError,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AutoScrapeState, msg: Msg) -> (AutoScrapeState, Vec<Effect>) {
    let effects = match msg {
        Msg::TargetSelected(target) => {
            if !state.phase().is_running() {
                state.set_target(target);
            }
            Vec::new()
        }
        Msg::ConfigChanged(config) => {
            if !state.phase().is_running() {
                state.set_config(config);
            }
            Vec::new()
        }
        Msg::StartRequested { start_id, end_id } => start(&mut state, &start_id, &end_id),
        Msg::StopRequested => stop(&mut state),
        Msg::Tick => tick(&mut state),
        Msg::CheckCompleted { run, id, result } => {
            if accepts(&state, run, InFlight::Check(id)) {
                check_completed(&mut state, id, result)
            } else {
                Vec::new()
            }
        }
        Msg::ScrapeCompleted { run, id, result } => {
            if accepts(&state, run, InFlight::Scrape(id)) {
                scrape_completed(&mut state, id, result)
            } else {
                Vec::new()
            }
        }
        Msg::ClearLog => {
            state.clear_log();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start(state: &mut AutoScrapeState, start_id: &str, end_id: &str) -> Vec<Effect> {
    if state.phase().is_running() {
        return Vec::new();
    }
    let Some(target) = state.target().cloned() else {
        state.reject(ValidationError::MissingTarget);
        return Vec::new();
    };
    let range = match ScanRange::parse(start_id, end_id) {
        Ok(range) => range,
        Err(err) => {
            state.reject(err);
            return Vec::new();
        }
    };

    state.begin_run(range);
    state.push_log(
        LogSeverity::Info,
        format!(
            "Started auto-scrape of IDs {}-{} ({} total) for {}",
            range.start_id,
            range.end_id,
            range.id_count(),
            target.name
        ),
    );
    schedule_tick(state, Duration::ZERO)
}

fn stop(state: &mut AutoScrapeState) -> Vec<Effect> {
    if !state.phase().is_running() {
        return Vec::new();
    }
    state.set_phase(RunPhase::Stopped);
    state.set_in_flight(None);
    state.set_tick_pending(false);
    let at = state.range().map(|r| r.current_id).unwrap_or_default();
    state.push_log(LogSeverity::Warning, format!("Stopped at ID {at}"));
    vec![Effect::CancelPendingTick]
}

fn tick(state: &mut AutoScrapeState) -> Vec<Effect> {
    if !state.phase().is_running() || state.in_flight().is_some() {
        return Vec::new();
    }
    state.set_tick_pending(false);
    let (Some(range), Some(target)) = (state.range(), state.target()) else {
        return Vec::new();
    };
    let id = range.current_id;
    let url = target.url_for(id);
    state.set_in_flight(Some(InFlight::Check(id)));
    vec![Effect::CheckUrl {
        run: state.run_id(),
        id,
        url,
    }]
}

fn accepts(state: &AutoScrapeState, run: RunId, expected: InFlight) -> bool {
    state.phase().is_running() && state.run_id() == run && state.in_flight() == Some(expected)
}

fn check_completed(
    state: &mut AutoScrapeState,
    id: GameId,
    result: Result<Option<UrlStatus>, String>,
) -> Vec<Effect> {
    state.set_in_flight(None);
    let use_cache = state.config().use_cache;
    let now = state.now();

    state.stats_mut().total_checked += 1;
    let check = match result {
        Ok(status) => {
            let check = evaluate(status.as_ref(), now);
            if use_cache {
                state.stats_mut().record_cache(check.has_cache);
            }
            check
        }
        Err(message) => {
            state.push_log(
                LogSeverity::Warning,
                format!("ID {id}: status check failed ({message}), scraping anyway"),
            );
            CheckResult::scrape(false)
        }
    };

    match check.reason {
        Some(reason) if !check.should_scrape => {
            state.stats_mut().record_skip(reason);
            state.push_log(LogSeverity::Info, format!("ID {id}: skipped, {reason}"));
            advance(state)
        }
        _ => {
            let Some(target) = state.target() else {
                return advance(state);
            };
            let url = target.url_for(id);
            state.set_in_flight(Some(InFlight::Scrape(id)));
            vec![Effect::TriggerScrape {
                run: state.run_id(),
                id,
                url,
                force_refresh: !use_cache,
            }]
        }
    }
}

fn scrape_completed(
    state: &mut AutoScrapeState,
    id: GameId,
    result: Result<ScrapeReport, String>,
) -> Vec<Effect> {
    state.set_in_flight(None);
    match result {
        Ok(report) if report.success => {
            state.stats_mut().scraped += 1;
            let name = report.name.as_deref().unwrap_or("unnamed game");
            let message = match report.status.as_deref() {
                Some(status) => format!("ID {id}: scraped {name} ({status})"),
                None => format!("ID {id}: scraped {name}"),
            };
            state.push_log(LogSeverity::Success, message);
        }
        Ok(report) => {
            state.stats_mut().errors += 1;
            let reason = report
                .message
                .unwrap_or_else(|| "backend reported failure".to_string());
            state.push_log(LogSeverity::Error, format!("ID {id}: scrape failed, {reason}"));
        }
        Err(message) => {
            state.stats_mut().errors += 1;
            state.push_log(LogSeverity::Error, format!("ID {id}: scrape failed, {message}"));
        }
    }
    advance(state)
}

fn advance(state: &mut AutoScrapeState) -> Vec<Effect> {
    let exhausted = match state.range_mut() {
        Some(range) => {
            range.advance();
            range.is_exhausted()
        }
        None => true,
    };
    if exhausted {
        state.set_phase(RunPhase::Completed);
        let stats = state.stats();
        state.push_log(
            LogSeverity::Success,
            format!(
                "Completed: {} checked, {} scraped, {} skipped, {} errors, {}% cache hits",
                stats.total_checked,
                stats.scraped,
                stats.skipped(),
                stats.errors,
                stats.cache_hit_rate()
            ),
        );
        return Vec::new();
    }
    let interval = state.config().check_interval;
    schedule_tick(state, interval)
}

fn schedule_tick(state: &mut AutoScrapeState, after: Duration) -> Vec<Effect> {
    state.set_tick_pending(true);
    vec![Effect::ScheduleTick { after }]
}
