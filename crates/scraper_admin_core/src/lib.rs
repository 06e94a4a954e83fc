//! Scraper admin core: pure auto-scrape state machine and the bookkeeping
//! types shared by the operator tools.
mod activity;
mod bulk;
mod check;
mod effect;
mod msg;
mod selection;
mod state;
mod stats;
mod target;
mod update;
mod view_model;

pub use activity::{ActivityLog, LogEntry, LogSeverity, ACTIVITY_LOG_CAPACITY};
pub use bulk::{
    BulkScrapeJob, BulkSummary, ItemStatus, StatusTransitionError, DEFAULT_BATCH_SIZE, MAX_BULK_IDS,
};
pub use check::{evaluate, CheckResult, ScrapeReport, SkipReason, UrlStatus, NO_UPDATE_WINDOW_SECS};
pub use effect::Effect;
pub use msg::Msg;
pub use selection::{BulkStatusRequest, PageSelection};
pub use state::{AutoScrapeState, Clock, LoopConfig, RunId, RunPhase};
pub use stats::RunStats;
pub use target::{GameId, ScanRange, ScrapeTarget, ValidationError};
pub use update::update;
pub use view_model::AutoScrapeView;
