use std::time::Duration;

use crate::{GameId, RunId};

/// Side effects requested by `update`; executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Msg::Tick` after the delay. At most one is pending at a time.
    ScheduleTick { after: Duration },
    /// Drop the pending tick, if any.
    CancelPendingTick,
    /// Look up the backend status of one URL; answer with `Msg::CheckCompleted`.
    CheckUrl { run: RunId, id: GameId, url: String },
    /// Scrape and save one URL; answer with `Msg::ScrapeCompleted`.
    TriggerScrape {
        run: RunId,
        id: GameId,
        url: String,
        force_refresh: bool,
    },
}
