use std::collections::BTreeMap;

use thiserror::Error;

use crate::{GameId, ScanRange, ScrapeTarget, ValidationError};

pub const DEFAULT_BATCH_SIZE: usize = 3;
/// Per-ID status is tracked eagerly, so one job is capped at this many IDs.
pub const MAX_BULK_IDS: u64 = 10_000;

/// Per-ID progress of a bulk or manual scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    Pending,
    Fetching,
    Saving,
    Success,
    Error(String),
    Skipped,
}

impl ItemStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ItemStatus::Success | ItemStatus::Error(_) | ItemStatus::Skipped
        )
    }

    pub fn can_transition_to(&self, next: &ItemStatus) -> bool {
        use ItemStatus::*;
        matches!(
            (self, next),
            (Pending, Fetching)
                | (Pending, Skipped)
                | (Pending, Error(_))
                | (Fetching, Saving)
                | (Fetching, Error(_))
                | (Saving, Success)
                | (Saving, Error(_))
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Fetching => "fetching",
            ItemStatus::Saving => "saving",
            ItemStatus::Success => "success",
            ItemStatus::Error(_) => "error",
            ItemStatus::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusTransitionError {
    #[error("ID {0} is not part of this job")]
    UnknownId(GameId),
    #[error("ID {id}: cannot move from {from} to {to}")]
    Illegal {
        id: GameId,
        from: &'static str,
        to: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BulkSummary {
    pub pending: usize,
    pub in_progress: usize,
    pub success: usize,
    pub error: usize,
    pub skipped: usize,
}

impl BulkSummary {
    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.success + self.error + self.skipped
    }
}

/// A fetch-then-save pass over explicit IDs, processed in fixed-size batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkScrapeJob {
    target: ScrapeTarget,
    ids: Vec<GameId>,
    batch_size: usize,
    skip_existing: bool,
    statuses: BTreeMap<GameId, ItemStatus>,
}

impl BulkScrapeJob {
    pub fn new(
        target: ScrapeTarget,
        range: ScanRange,
        batch_size: usize,
        skip_existing: bool,
    ) -> Result<Self, ValidationError> {
        if batch_size == 0 {
            return Err(ValidationError::ZeroBatchSize);
        }
        if range.id_count() > MAX_BULK_IDS {
            return Err(ValidationError::RangeTooLarge {
                count: range.id_count(),
                max: MAX_BULK_IDS,
            });
        }
        let ids: Vec<GameId> = range.ids().collect();
        let statuses = ids.iter().map(|id| (*id, ItemStatus::Pending)).collect();
        Ok(Self {
            target,
            ids,
            batch_size,
            skip_existing,
            statuses,
        })
    }

    /// Manual scrape of one ID. Existing records are always re-scraped.
    pub fn single(target: ScrapeTarget, id: GameId) -> Result<Self, ValidationError> {
        let range = ScanRange::new(id, id)?;
        Self::new(target, range, 1, false)
    }

    pub fn target(&self) -> &ScrapeTarget {
        &self.target
    }

    pub fn ids(&self) -> &[GameId] {
        &self.ids
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn skip_existing(&self) -> bool {
        self.skip_existing
    }

    pub fn batches(&self) -> impl Iterator<Item = &[GameId]> {
        self.ids.chunks(self.batch_size)
    }

    pub fn status(&self, id: GameId) -> Option<&ItemStatus> {
        self.statuses.get(&id)
    }

    pub fn statuses(&self) -> impl Iterator<Item = (GameId, &ItemStatus)> {
        self.statuses.iter().map(|(id, status)| (*id, status))
    }

    pub fn transition(&mut self, id: GameId, next: ItemStatus) -> Result<(), StatusTransitionError> {
        let current = self
            .statuses
            .get_mut(&id)
            .ok_or(StatusTransitionError::UnknownId(id))?;
        if !current.can_transition_to(&next) {
            return Err(StatusTransitionError::Illegal {
                id,
                from: current.label(),
                to: next.label(),
            });
        }
        *current = next;
        Ok(())
    }

    pub fn summary(&self) -> BulkSummary {
        let mut summary = BulkSummary::default();
        for status in self.statuses.values() {
            match status {
                ItemStatus::Pending => summary.pending += 1,
                ItemStatus::Fetching | ItemStatus::Saving => summary.in_progress += 1,
                ItemStatus::Success => summary.success += 1,
                ItemStatus::Error(_) => summary.error += 1,
                ItemStatus::Skipped => summary.skipped += 1,
            }
        }
        summary
    }

    pub fn is_finished(&self) -> bool {
        self.statuses.values().all(ItemStatus::is_terminal)
    }
}
