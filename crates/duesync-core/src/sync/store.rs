//! Calendar store boundary: outbound event representation and the
//! operations the engine needs from a backend.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::source::Assignment;
use crate::sync::due_date::DueDate;
use crate::sync::types::SyncError;

/// Store-assigned identifier of an existing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventHandle(pub String);

/// Outbound calendar event. Built fresh per apply attempt from an
/// assignment plus its normalized due date; never persisted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventPayload {
    /// Deterministic external identifier, `{assignment id}@{uid domain}`.
    pub external_id: String,
    /// Display title, `[{course}] {title}`.
    pub summary: String,
    pub start_date: NaiveDate,
    /// Exclusive end date (start + 1 day).
    pub end_date: NaiveDate,
    /// Reference link, or empty when the listing provided none.
    pub description: String,
}

impl EventPayload {
    /// Build the event for an assignment.
    ///
    /// The calendar representation is all-day even for timed deadlines;
    /// the precise timestamp is collapsed to its calendar date.
    pub fn for_assignment(assignment: &Assignment, due: &DueDate, uid_domain: &str) -> Self {
        let date = due.date();
        Self {
            external_id: format!("{}@{}", assignment.id, uid_domain),
            summary: format!("[{}] {}", assignment.course, assignment.title),
            start_date: date,
            end_date: date + Duration::days(1),
            description: assignment.link.clone().unwrap_or_default(),
        }
    }
}

/// Operations the sync engine needs from a calendar backend.
///
/// All three calls may fail with a transport or authorization error, which
/// the engine treats uniformly as a per-record failure.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// Look up an existing event by its external identifier.
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<EventHandle>, SyncError>;

    /// Insert a new event; the store tags it with the payload's external
    /// identifier for future lookups.
    async fn insert(&self, payload: &EventPayload) -> Result<EventHandle, SyncError>;

    /// Replace an existing event's content with the given payload.
    async fn update(
        &self,
        handle: &EventHandle,
        payload: &EventPayload,
    ) -> Result<EventHandle, SyncError>;
}
