use std::collections::VecDeque;

use admin_logging::{admin_debug, admin_error, admin_info, admin_warn};
use scraper_admin_core::{
    update, AutoScrapeState, Effect, LogSeverity, Msg, ScrapeReport, UrlStatus, ValidationError,
};
use tokio_util::sync::CancellationToken;

use crate::{AdminEvent, ProgressSink, ScrapeApi};

/// Executes auto-scrape effects one at a time against the backend.
///
/// Each effect is awaited before the next message is applied, so at most one
/// tick is ever pending and a scrape always settles before the loop advances.
/// Cancelling the token is the stop button: the pending sleep or in-flight
/// call is dropped and `Msg::StopRequested` is applied in its place.
pub struct AutoScrapeRunner<'a> {
    api: &'a dyn ScrapeApi,
    sink: &'a dyn ProgressSink,
}

impl<'a> AutoScrapeRunner<'a> {
    pub fn new(api: &'a dyn ScrapeApi, sink: &'a dyn ProgressSink) -> Self {
        Self { api, sink }
    }

    /// Starts a run over the raw range input and drives it to Completed or
    /// Stopped. Invalid input is returned before anything runs.
    pub async fn run(
        &self,
        state: AutoScrapeState,
        start_id: &str,
        end_id: &str,
        cancel: CancellationToken,
    ) -> Result<AutoScrapeState, ValidationError> {
        let mut seen = state.log().appended();
        let (mut state, effects) = update(
            state,
            Msg::StartRequested {
                start_id: start_id.to_string(),
                end_id: end_id.to_string(),
            },
        );
        if !state.phase().is_running() {
            if let Some(err) = state.validation_error() {
                return Err(err.clone());
            }
        }
        self.publish(&state, &mut seen);

        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            let Some(msg) = self.execute(effect, &cancel).await else {
                continue;
            };
            let (next, effects) = update(state, msg);
            state = next;
            queue.extend(effects);
            self.publish(&state, &mut seen);
        }

        admin_info!(
            "auto-scrape run {} ended in {:?}",
            state.run_id(),
            state.phase()
        );
        Ok(state)
    }

    async fn execute(&self, effect: Effect, cancel: &CancellationToken) -> Option<Msg> {
        match effect {
            Effect::ScheduleTick { after } => {
                admin_debug!("next tick in {:?}", after);
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Some(Msg::StopRequested),
                    _ = tokio::time::sleep(after) => Some(Msg::Tick),
                }
            }
            // The sleep is owned by `execute`, so nothing is left pending here.
            Effect::CancelPendingTick => None,
            Effect::CheckUrl { run, id, url } => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Some(Msg::StopRequested),
                    result = self.api.get_url_status(&url) => Some(Msg::CheckCompleted {
                        run,
                        id,
                        result: result
                            .map(|record| record.map(UrlStatus::from))
                            .map_err(|err| err.to_string()),
                    }),
                }
            }
            Effect::TriggerScrape {
                run,
                id,
                url,
                force_refresh,
            } => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Some(Msg::StopRequested),
                    result = self.api.trigger_scrape(&url, force_refresh) => Some(Msg::ScrapeCompleted {
                        run,
                        id,
                        result: result.map(ScrapeReport::from).map_err(|err| err.to_string()),
                    }),
                }
            }
        }
    }

    fn publish(&self, state: &AutoScrapeState, seen: &mut u64) {
        for entry in state.log().since(*seen) {
            match entry.severity {
                LogSeverity::Info | LogSeverity::Success => admin_info!("{}", entry.message),
                LogSeverity::Warning => admin_warn!("{}", entry.message),
                LogSeverity::Error => admin_error!("{}", entry.message),
            }
            self.sink.emit(AdminEvent::Log(entry.clone()));
        }
        *seen = state.log().appended();

        let stats = state.stats();
        self.sink.emit(AdminEvent::Stats {
            phase: state.phase(),
            current_id: state.range().map(|r| r.current_id),
            stats,
            cache_hit_rate: stats.cache_hit_rate(),
        });
    }
}
