//! Core types for calendar synchronization.

use serde::{Deserialize, Serialize};

use crate::error::OAuthError;

/// Sync error types.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Calendar API error: {0}")]
    CalendarApi(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Auth(#[from] OAuthError),
}

/// Terminal outcome of applying one record.
#[derive(Debug)]
pub enum ApplyOutcome {
    /// The event was inserted or updated and the ledger was committed.
    Applied,
    /// The record has no usable due date; the ledger is untouched.
    Skipped,
    /// A store call failed; the ledger is untouched so the next run retries.
    Failed(SyncError),
}

/// Aggregate counts for one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub applied: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SyncReport {
    pub fn record(&mut self, outcome: &ApplyOutcome) {
        match outcome {
            ApplyOutcome::Applied => self.applied += 1,
            ApplyOutcome::Skipped => self.skipped += 1,
            ApplyOutcome::Failed(_) => self.failed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_outcomes() {
        let mut report = SyncReport::default();
        report.record(&ApplyOutcome::Applied);
        report.record(&ApplyOutcome::Applied);
        report.record(&ApplyOutcome::Skipped);
        report.record(&ApplyOutcome::Failed(SyncError::CalendarApi("boom".into())));
        assert_eq!(
            report,
            SyncReport {
                applied: 2,
                skipped: 1,
                failed: 1
            }
        );
    }
}
