use crate::{LogEntry, LoopConfig, RunPhase, RunStats, ScanRange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoScrapeView {
    pub phase: RunPhase,
    pub target_name: Option<String>,
    pub config: LoopConfig,
    pub range: Option<ScanRange>,
    pub stats: RunStats,
    pub cache_hit_rate: u8,
    pub progress_percent: u8,
    /// Oldest first.
    pub log: Vec<LogEntry>,
    pub validation_error: Option<String>,
    pub config_editable: bool,
    pub dirty: bool,
}
