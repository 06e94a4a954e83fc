use std::collections::VecDeque;

use chrono::{DateTime, Utc};

pub const ACTIVITY_LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSeverity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub severity: LogSeverity,
    pub message: String,
}

/// Operator-facing activity log; append-only, oldest entries evicted first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    appended: u64,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacity(ACTIVITY_LOG_CAPACITY)
    }
}

impl ActivityLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            appended: 0,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        self.appended += 1;
    }

    /// Total entries ever pushed, including evicted and cleared ones.
    pub fn appended(&self) -> u64 {
        self.appended
    }

    /// Entries pushed after the first `seen` appends that are still retained.
    pub fn since(&self, seen: u64) -> impl Iterator<Item = &LogEntry> {
        let fresh = self.appended.saturating_sub(seen).min(self.entries.len() as u64) as usize;
        self.entries.iter().skip(self.entries.len() - fresh)
    }

    /// Entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> LogEntry {
        LogEntry {
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            severity: LogSeverity::Info,
            message: format!("entry {n}"),
        }
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut log = ActivityLog::default();
        for n in 0..(ACTIVITY_LOG_CAPACITY + 5) {
            log.push(entry(n));
        }
        assert_eq!(log.len(), ACTIVITY_LOG_CAPACITY);
        assert_eq!(log.appended(), (ACTIVITY_LOG_CAPACITY + 5) as u64);
        assert_eq!(log.iter().next().unwrap().message, "entry 5");
        assert_eq!(
            log.latest().unwrap().message,
            format!("entry {}", ACTIVITY_LOG_CAPACITY + 4)
        );
    }

    #[test]
    fn since_yields_only_fresh_entries() {
        let mut log = ActivityLog::with_capacity(3);
        for n in 0..2 {
            log.push(LogEntry {
                timestamp: DateTime::<Utc>::UNIX_EPOCH,
                severity: LogSeverity::Info,
                message: format!("m{n}"),
            });
        }
        let seen = log.appended();
        for n in 2..4 {
            log.push(LogEntry {
                timestamp: DateTime::<Utc>::UNIX_EPOCH,
                severity: LogSeverity::Warning,
                message: format!("m{n}"),
            });
        }
        let fresh: Vec<_> = log.since(seen).map(|e| e.message.as_str()).collect();
        assert_eq!(fresh, vec!["m2", "m3"]);
        assert_eq!(log.since(log.appended()).count(), 0);
    }
}
