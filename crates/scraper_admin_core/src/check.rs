use chrono::{DateTime, TimeDelta, Utc};

/// Scrapes younger than this with a stored fingerprint count as "no updates".
pub const NO_UPDATE_WINDOW_SECS: i64 = 60 * 60;

/// What the backend knows about one tournament URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlStatus {
    pub do_not_scrape: bool,
    pub game_status: Option<String>,
    pub last_scraped_at: Option<DateTime<Utc>>,
    pub etag: Option<String>,
    pub content_hash: Option<String>,
    pub cache_key: Option<String>,
}

impl UrlStatus {
    pub fn is_finished(&self) -> bool {
        self.game_status
            .as_deref()
            .is_some_and(|status| status.eq_ignore_ascii_case("FINISHED"))
    }

    pub fn has_fingerprint(&self) -> bool {
        self.etag.as_deref().is_some_and(|v| !v.is_empty())
            || self.content_hash.as_deref().is_some_and(|v| !v.is_empty())
    }

    pub fn has_cache(&self) -> bool {
        self.cache_key.as_deref().is_some_and(|v| !v.is_empty())
    }

    fn scraped_recently(&self, now: DateTime<Utc>) -> bool {
        match self.last_scraped_at {
            Some(at) => now - at < TimeDelta::seconds(NO_UPDATE_WINDOW_SECS),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    DoNotScrape,
    Finished,
    NoUpdates,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::DoNotScrape => write!(f, "marked do-not-scrape"),
            SkipReason::Finished => write!(f, "game finished"),
            SkipReason::NoUpdates => write!(f, "no updates since recent scrape"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckResult {
    pub should_scrape: bool,
    pub reason: Option<SkipReason>,
    pub has_cache: bool,
}

impl CheckResult {
    pub fn scrape(has_cache: bool) -> Self {
        Self {
            should_scrape: true,
            reason: None,
            has_cache,
        }
    }

    pub fn skip(reason: SkipReason, has_cache: bool) -> Self {
        Self {
            should_scrape: false,
            reason: Some(reason),
            has_cache,
        }
    }
}

/// Decides whether an ID should be scraped. `None` means the backend has no
/// record for the URL yet.
///
/// Precedence: do-not-scrape, then finished, then no-updates.
pub fn evaluate(status: Option<&UrlStatus>, now: DateTime<Utc>) -> CheckResult {
    let Some(status) = status else {
        return CheckResult::scrape(false);
    };
    let has_cache = status.has_cache();
    if status.do_not_scrape {
        return CheckResult::skip(SkipReason::DoNotScrape, has_cache);
    }
    if status.is_finished() {
        return CheckResult::skip(SkipReason::Finished, has_cache);
    }
    if status.has_fingerprint() && status.scraped_recently(now) {
        return CheckResult::skip(SkipReason::NoUpdates, has_cache);
    }
    CheckResult::scrape(has_cache)
}

/// Outcome of a remote scrape-and-save call as the loop sees it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapeReport {
    pub success: bool,
    pub name: Option<String>,
    pub status: Option<String>,
    pub message: Option<String>,
}
