use crate::{GameId, LoopConfig, RunId, ScrapeReport, ScrapeTarget, UrlStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Operator picked the entity whose IDs are scanned.
    TargetSelected(ScrapeTarget),
    /// Operator edited interval or cache settings.
    ConfigChanged(LoopConfig),
    /// Operator clicked Start with the raw contents of the range fields.
    StartRequested { start_id: String, end_id: String },
    /// Operator clicked Stop.
    StopRequested,
    /// Scheduled tick fired.
    Tick,
    /// Backend status lookup finished. `Ok(None)` means no record exists.
    CheckCompleted {
        run: RunId,
        id: GameId,
        result: Result<Option<UrlStatus>, String>,
    },
    /// Scrape-and-save call finished.
    ScrapeCompleted {
        run: RunId,
        id: GameId,
        result: Result<ScrapeReport, String>,
    },
    ClearLog,
    NoOp,
}

