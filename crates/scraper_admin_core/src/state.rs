use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::view_model::AutoScrapeView;
use crate::{
    ActivityLog, GameId, LogEntry, LogSeverity, RunStats, ScanRange, ScrapeTarget, ValidationError,
};

pub type RunId = u64;

/// Source of "now" for log timestamps and recency checks.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    Stopped,
    Completed,
}

impl RunPhase {
    pub fn is_running(self) -> bool {
        self == RunPhase::Running
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    pub check_interval: Duration,
    pub use_cache: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(10),
            use_cache: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InFlight {
    Check(GameId),
    Scrape(GameId),
}

#[derive(Clone)]
pub struct AutoScrapeState {
    phase: RunPhase,
    target: Option<ScrapeTarget>,
    config: LoopConfig,
    range: Option<ScanRange>,
    stats: RunStats,
    log: ActivityLog,
    run: RunId,
    in_flight: Option<InFlight>,
    tick_pending: bool,
    validation_error: Option<ValidationError>,
    clock: Clock,
    dirty: bool,
}

impl Default for AutoScrapeState {
    fn default() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }
}

impl fmt::Debug for AutoScrapeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoScrapeState")
            .field("phase", &self.phase)
            .field("target", &self.target)
            .field("config", &self.config)
            .field("range", &self.range)
            .field("stats", &self.stats)
            .field("run", &self.run)
            .field("in_flight", &self.in_flight)
            .field("tick_pending", &self.tick_pending)
            .field("validation_error", &self.validation_error)
            .finish_non_exhaustive()
    }
}

impl AutoScrapeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            phase: RunPhase::Idle,
            target: None,
            config: LoopConfig::default(),
            range: None,
            stats: RunStats::default(),
            log: ActivityLog::default(),
            run: 0,
            in_flight: None,
            tick_pending: false,
            validation_error: None,
            clock,
            dirty: false,
        }
    }

    pub fn view(&self) -> AutoScrapeView {
        AutoScrapeView {
            phase: self.phase,
            target_name: self.target.as_ref().map(|t| t.name.clone()),
            config: self.config,
            range: self.range,
            stats: self.stats,
            cache_hit_rate: self.stats.cache_hit_rate(),
            progress_percent: self.range.map(|r| r.progress_percent()).unwrap_or(0),
            log: self.log.iter().cloned().collect(),
            validation_error: self.validation_error.as_ref().map(ToString::to_string),
            config_editable: !self.phase.is_running(),
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn run_id(&self) -> RunId {
        self.run
    }

    pub fn target(&self) -> Option<&ScrapeTarget> {
        self.target.as_ref()
    }

    pub fn config(&self) -> LoopConfig {
        self.config
    }

    pub fn range(&self) -> Option<ScanRange> {
        self.range
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    pub fn has_pending_tick(&self) -> bool {
        self.tick_pending
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_target(&mut self, target: ScrapeTarget) {
        self.target = Some(target);
        self.validation_error = None;
        self.mark_dirty();
    }

    pub(crate) fn set_config(&mut self, config: LoopConfig) {
        self.config = config;
        self.mark_dirty();
    }

    pub(crate) fn reject(&mut self, error: ValidationError) {
        self.validation_error = Some(error);
        self.mark_dirty();
    }

    pub(crate) fn begin_run(&mut self, range: ScanRange) {
        self.phase = RunPhase::Running;
        self.range = Some(range);
        self.stats = RunStats::default();
        self.run += 1;
        self.in_flight = None;
        self.tick_pending = false;
        self.validation_error = None;
        self.mark_dirty();
    }

    pub(crate) fn set_phase(&mut self, phase: RunPhase) {
        self.phase = phase;
        self.mark_dirty();
    }

    pub(crate) fn stats_mut(&mut self) -> &mut RunStats {
        self.dirty = true;
        &mut self.stats
    }

    pub(crate) fn range_mut(&mut self) -> Option<&mut ScanRange> {
        self.range.as_mut()
    }

    pub(crate) fn in_flight(&self) -> Option<InFlight> {
        self.in_flight
    }

    pub(crate) fn set_in_flight(&mut self, in_flight: Option<InFlight>) {
        self.in_flight = in_flight;
    }

    pub(crate) fn set_tick_pending(&mut self, pending: bool) {
        self.tick_pending = pending;
    }

    pub(crate) fn push_log(&mut self, severity: LogSeverity, message: impl Into<String>) {
        let entry = LogEntry {
            timestamp: self.now(),
            severity,
            message: message.into(),
        };
        self.log.push(entry);
        self.mark_dirty();
    }

    pub(crate) fn clear_log(&mut self) {
        self.log.clear();
        self.mark_dirty();
    }
}
