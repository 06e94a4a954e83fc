use std::ops::RangeInclusive;

use thiserror::Error;
use url::Url;

pub type GameId = u64;

/// Reasons a run or a bulk job is refused before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("select a target entity before starting")]
    MissingTarget,
    #[error("{field} must be a whole number, got {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("start ID must be at least 1, got {0}")]
    StartBelowOne(i64),
    #[error("end ID {end} is before start ID {start}")]
    EndBeforeStart { start: u64, end: u64 },
    #[error("target URL prefix is not a valid http(s) URL: {0}")]
    InvalidTargetUrl(String),
    #[error("batch size must be at least 1")]
    ZeroBatchSize,
    #[error("bulk range covers {count} IDs, at most {max} allowed per job")]
    RangeTooLarge { count: u64, max: u64 },
}

/// An entity whose tournament pages are addressed by integer ID.
///
/// The scrape URL for an ID is `url_prefix + id + url_suffix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeTarget {
    pub entity_id: String,
    pub name: String,
    pub url_prefix: String,
    pub url_suffix: String,
}

impl ScrapeTarget {
    pub fn new(
        entity_id: impl Into<String>,
        name: impl Into<String>,
        url_prefix: impl Into<String>,
        url_suffix: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let url_prefix = url_prefix.into();
        match Url::parse(&url_prefix) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ValidationError::InvalidTargetUrl(url_prefix)),
        }
        Ok(Self {
            entity_id: entity_id.into(),
            name: name.into(),
            url_prefix,
            url_suffix: url_suffix.into(),
        })
    }

    pub fn url_for(&self, id: GameId) -> String {
        format!("{}{}{}", self.url_prefix, id, self.url_suffix)
    }
}

/// Inclusive ID range with a cursor; `current_id == end_id + 1` once exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRange {
    pub start_id: GameId,
    pub end_id: GameId,
    pub current_id: GameId,
}

impl ScanRange {
    pub fn new(start_id: GameId, end_id: GameId) -> Result<Self, ValidationError> {
        if start_id < 1 {
            return Err(ValidationError::StartBelowOne(0));
        }
        if end_id < start_id {
            return Err(ValidationError::EndBeforeStart {
                start: start_id,
                end: end_id,
            });
        }
        Ok(Self {
            start_id,
            end_id,
            current_id: start_id,
        })
    }

    /// Parses operator input (as typed into the start/end fields).
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start_id = parse_id("start ID", start)?;
        let end_id = parse_id("end ID", end)?;
        if start_id < 1 {
            return Err(ValidationError::StartBelowOne(start_id));
        }
        // end < start also covers a negative end.
        if end_id < start_id {
            return Err(ValidationError::EndBeforeStart {
                start: start_id as u64,
                end: end_id.max(0) as u64,
            });
        }
        Self::new(start_id as u64, end_id as u64)
    }

    pub fn id_count(&self) -> u64 {
        self.end_id - self.start_id + 1
    }

    pub fn ids(&self) -> RangeInclusive<GameId> {
        self.start_id..=self.end_id
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_id > self.end_id
    }

    /// Number of IDs already visited.
    pub fn visited(&self) -> u64 {
        self.current_id - self.start_id
    }

    pub fn progress_percent(&self) -> u8 {
        let percent = (self.visited() * 100) / self.id_count();
        percent.min(100) as u8
    }

    pub(crate) fn advance(&mut self) {
        if !self.is_exhausted() {
            self.current_id += 1;
        }
    }
}

fn parse_id(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_padded_numbers() {
        let range = ScanRange::parse(" 3 ", "7\n").unwrap();
        assert_eq!(range.start_id, 3);
        assert_eq!(range.end_id, 7);
        assert_eq!(range.current_id, 3);
        assert_eq!(range.id_count(), 5);
    }

    #[test]
    fn parse_rejects_reversed_range() {
        assert_eq!(
            ScanRange::parse("10", "5"),
            Err(ValidationError::EndBeforeStart { start: 10, end: 5 })
        );
    }

    #[test]
    fn parse_rejects_zero_and_negative_start() {
        assert_eq!(
            ScanRange::parse("0", "5"),
            Err(ValidationError::StartBelowOne(0))
        );
        assert_eq!(
            ScanRange::parse("-4", "5"),
            Err(ValidationError::StartBelowOne(-4))
        );
    }

    #[test]
    fn parse_rejects_text() {
        assert!(matches!(
            ScanRange::parse("abc", "5"),
            Err(ValidationError::NotANumber { field: "start ID", .. })
        ));
    }

    #[test]
    fn advance_stops_one_past_end() {
        let mut range = ScanRange::new(4, 5).unwrap();
        range.advance();
        range.advance();
        range.advance();
        assert_eq!(range.current_id, 6);
        assert!(range.is_exhausted());
        assert_eq!(range.progress_percent(), 100);
    }

    #[test]
    fn target_builds_urls_from_ids() {
        let target =
            ScrapeTarget::new("ent-1", "Kings Room", "https://example.com/t/?id=", "").unwrap();
        assert_eq!(target.url_for(42), "https://example.com/t/?id=42");
    }

    #[test]
    fn target_rejects_non_http_prefix() {
        assert!(matches!(
            ScrapeTarget::new("e", "n", "ftp://example.com/", ""),
            Err(ValidationError::InvalidTargetUrl(_))
        ));
    }
}
