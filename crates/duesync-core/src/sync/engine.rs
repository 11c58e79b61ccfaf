//! Sync driver: applies the delta to the calendar store record by record.

use tracing::{info, warn};

use crate::source::Assignment;
use crate::sync::delta::compute_delta;
use crate::sync::due_date::{parse_due_date, DueDateError};
use crate::sync::ledger::{Ledger, LedgerError};
use crate::sync::store::{CalendarStore, EventPayload};
use crate::sync::types::{ApplyOutcome, SyncReport};

/// Drives one sync run: delta -> per-record upsert -> single ledger flush.
pub struct SyncEngine<S> {
    store: S,
    uid_domain: String,
}

impl<S: CalendarStore> SyncEngine<S> {
    pub fn new(store: S, uid_domain: impl Into<String>) -> Self {
        Self {
            store,
            uid_domain: uid_domain.into(),
        }
    }

    /// Access the underlying calendar store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run a full sync pass over freshly extracted records.
    ///
    /// Records are processed strictly sequentially. A single record's
    /// failure never aborts the batch; the ledger is flushed exactly once
    /// after every apply attempt has resolved, containing only the
    /// successfully committed identifiers.
    pub async fn run(
        &self,
        records: Vec<Assignment>,
        ledger: &mut Ledger,
    ) -> Result<SyncReport, LedgerError> {
        let delta = compute_delta(records, ledger);
        info!(delta = delta.len(), "starting sync run");

        let mut report = SyncReport::default();
        for record in &delta {
            let outcome = self.apply(record, ledger).await;
            if let ApplyOutcome::Failed(err) = &outcome {
                warn!(id = %record.id, %err, "failed to apply assignment");
            }
            report.record(&outcome);
        }

        ledger.flush()?;
        info!(
            applied = report.applied,
            skipped = report.skipped,
            failed = report.failed,
            "sync run complete"
        );
        Ok(report)
    }

    /// Apply one record: normalize -> lookup -> insert/update -> commit.
    ///
    /// The ledger is committed only after a confirmed successful store
    /// call, so a failed record is retried on the next run.
    pub async fn apply(&self, record: &Assignment, ledger: &mut Ledger) -> ApplyOutcome {
        let due = match parse_due_date(&record.due_date_raw) {
            Ok(due) => due,
            Err(DueDateError::Empty) => return ApplyOutcome::Skipped,
            Err(err) => {
                warn!(id = %record.id, %err, "skipping assignment with unparseable due date");
                return ApplyOutcome::Skipped;
            }
        };

        let payload = EventPayload::for_assignment(record, &due, &self.uid_domain);

        let existing = match self.store.find_by_external_id(&payload.external_id).await {
            Ok(existing) => existing,
            Err(err) => return ApplyOutcome::Failed(err),
        };

        let result = match existing {
            Some(handle) => self.store.update(&handle, &payload).await,
            None => self.store.insert(&payload).await,
        };

        match result {
            Ok(_) => {
                ledger.commit(&record.id, &record.due_date_raw);
                ApplyOutcome::Applied
            }
            Err(err) => ApplyOutcome::Failed(err),
        }
    }
}
