use crate::SkipReason;

/// Counters for one auto-scrape run. Reset at run start, never decremented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    pub total_checked: u64,
    pub scraped: u64,
    pub skipped_finished: u64,
    pub skipped_do_not_scrape: u64,
    pub skipped_no_updates: u64,
    pub errors: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl RunStats {
    pub fn skipped(&self) -> u64 {
        self.skipped_finished + self.skipped_do_not_scrape + self.skipped_no_updates
    }

    /// Hits over checked IDs as a rounded integer percentage.
    pub fn cache_hit_rate(&self) -> u8 {
        if self.total_checked == 0 {
            return 0;
        }
        let rate = (self.cache_hits * 200 + self.total_checked) / (self.total_checked * 2);
        rate.min(100) as u8
    }

    pub(crate) fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::DoNotScrape => self.skipped_do_not_scrape += 1,
            SkipReason::Finished => self.skipped_finished += 1,
            SkipReason::NoUpdates => self.skipped_no_updates += 1,
        }
    }

    pub(crate) fn record_cache(&mut self, hit: bool) {
        if hit {
            self.cache_hits += 1;
        } else {
            self.cache_misses += 1;
        }
    }
}
