//! Assignment extraction contracts.
//!
//! The browser-driven login/scrape pipeline is a separate component with its
//! own retry policy; from the engine's point of view it is just something
//! that produces [`Assignment`] records for one run. The pipeline writes its
//! results as a JSON export, which [`ExportFileSource`] reads back.

mod export_file;

pub use export_file::ExportFileSource;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One graded-work record extracted from the LMS schedule listing.
///
/// Identifiers are stable across runs and unique within a single extraction
/// pass; the delta computation deduplicates defensively anyway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Stable identifier assigned by the LMS.
    pub id: String,
    /// Course label, without the section suffix.
    pub course: String,
    pub title: String,
    /// Due date exactly as rendered by the LMS, e.g. `2024.05.01 오후 11:59`.
    pub due_date_raw: String,
    /// Link to the submission page, when the listing provides one.
    #[serde(default)]
    pub link: Option<String>,
}

/// Source failures are fatal for the run: with no records to reconcile there
/// is nothing to apply and nothing to flush.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("assignment source unavailable: {0}")]
    Unavailable(String),

    #[error("malformed assignment export: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Produces the assignment records for one sync run.
///
/// No ordering guarantee is required beyond being stable enough that the
/// first occurrence of a duplicated id reflects the authoritative entry.
#[async_trait]
pub trait AssignmentSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Assignment>, SourceError>;
}
