//! Due-date normalization for the LMS's locale-specific date strings.
//!
//! The LMS renders deadlines either as a bare date (`2024.05.01`) or as a
//! date plus a 12-hour clock time with a Korean meridiem marker
//! (`2024.05.01 오후 11:59`). The marker is rewritten to `PM`/`AM` before
//! parsing.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

const MERIDIEM_PM: &str = "오후";
const MERIDIEM_AM: &str = "오전";

const DATE_TIME_FORMAT: &str = "%Y.%m.%d %p %I:%M";
const DATE_FORMAT: &str = "%Y.%m.%d";

/// Canonical due date derived from a raw LMS string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDate {
    /// Date-only deadline, no time-of-day semantics.
    AllDay(NaiveDate),
    /// Precise deadline timestamp.
    Timed(NaiveDateTime),
}

impl DueDate {
    /// Calendar date of the deadline, dropping any time-of-day component.
    pub fn date(&self) -> NaiveDate {
        match self {
            DueDate::AllDay(date) => *date,
            DueDate::Timed(datetime) => datetime.date(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DueDateError {
    /// The source rendered no due date at all; callers skip silently.
    #[error("empty due date string")]
    Empty,

    /// Non-empty input matching neither known format; reported, not fatal.
    #[error("unrecognized due date format: '{0}'")]
    Unrecognized(String),
}

/// Parse a raw due-date string into a [`DueDate`].
pub fn parse_due_date(raw: &str) -> Result<DueDate, DueDateError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DueDateError::Empty);
    }

    if trimmed.contains(MERIDIEM_PM) || trimmed.contains(MERIDIEM_AM) {
        let rewritten = trimmed
            .replace(MERIDIEM_PM, "PM")
            .replace(MERIDIEM_AM, "AM");
        return NaiveDateTime::parse_from_str(rewritten.trim(), DATE_TIME_FORMAT)
            .map(DueDate::Timed)
            .map_err(|_| DueDateError::Unrecognized(raw.to_string()));
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(DueDate::AllDay)
        .map_err(|_| DueDateError::Unrecognized(raw.to_string()))
}
