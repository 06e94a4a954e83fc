use std::sync::mpsc;

use scraper_admin_core::{GameId, ItemStatus, LogEntry, RunPhase, RunStats};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminEvent {
    /// New auto-scrape activity log entry.
    Log(LogEntry),
    /// Auto-scrape counters after a state change.
    Stats {
        phase: RunPhase,
        current_id: Option<GameId>,
        stats: RunStats,
        cache_hit_rate: u8,
    },
    /// Bulk scrape item moved to a new status.
    BulkItem { id: GameId, status: ItemStatus },
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: AdminEvent);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<AdminEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<AdminEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: AdminEvent) {
        let _ = self.tx.send(event);
    }
}
