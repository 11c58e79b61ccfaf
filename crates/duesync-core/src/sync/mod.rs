//! Incremental assignment -> calendar synchronization.
//!
//! Compares freshly extracted assignments against the persisted ledger,
//! normalizes their due dates, and upserts only the changed records into the
//! calendar store using a deterministic external identifier. The ledger is
//! committed in memory per successful apply and flushed once at end of run.

pub mod calendar_client;
pub mod delta;
pub mod due_date;
pub mod engine;
pub mod ledger;
pub mod store;
pub mod types;

#[cfg(test)]
mod delta_tests;
#[cfg(test)]
mod engine_tests;

pub use calendar_client::{to_gcal_event, GoogleCalendarStore};
pub use delta::compute_delta;
pub use due_date::{parse_due_date, DueDate, DueDateError};
pub use engine::SyncEngine;
pub use ledger::{Ledger, LedgerError};
pub use store::{CalendarStore, EventHandle, EventPayload};
pub use types::{ApplyOutcome, SyncError, SyncReport};
