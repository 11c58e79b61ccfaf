//! Delta computation: which extracted records need a store call at all.

use std::collections::HashSet;

use crate::source::Assignment;
use crate::sync::ledger::Ledger;

/// Reduce freshly extracted records to the subset requiring action.
///
/// Records are deduplicated by id (first occurrence wins, extraction order
/// preserved), then kept iff the ledger has no entry for the id or holds a
/// different raw due-date string.
pub fn compute_delta(records: Vec<Assignment>, ledger: &Ledger) -> Vec<Assignment> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .filter(|record| !ledger.is_applied(&record.id, &record.due_date_raw))
        .collect()
}
