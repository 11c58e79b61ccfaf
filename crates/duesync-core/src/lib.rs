//! # Duesync Core Library
//!
//! Core business logic for duesync, a CLI tool that reflects upcoming LMS
//! assignment deadlines into Google Calendar. All operations are available
//! through the standalone CLI binary; the library is the single place where
//! sync semantics live.
//!
//! ## Architecture
//!
//! - **Sync engine**: delta computation against a persisted ledger, plus an
//!   idempotent upsert protocol keyed by a deterministic external identifier
//! - **Storage**: TOML-based configuration and the JSON sync ledger
//! - **Source**: the `AssignmentSource` contract produced by the (external)
//!   scraper pipeline, with a JSON-export-backed implementation
//! - **Auth**: OS-keyring credential storage and the OAuth2 flow for the
//!   calendar backend
//!
//! ## Key Components
//!
//! - [`SyncEngine`]: per-record normalize -> lookup -> upsert -> commit driver
//! - [`Ledger`]: change-detection memory (id -> last-applied due-date string)
//! - [`parse_due_date`]: normalizer for the LMS's Korean-locale date strings
//! - [`CalendarStore`]: trait boundary for the calendar backend

pub mod auth;
pub mod error;
pub mod source;
pub mod storage;
pub mod sync;

pub use auth::GoogleAuth;
pub use error::{ConfigError, CoreError, OAuthError};
pub use source::{Assignment, AssignmentSource, ExportFileSource, SourceError};
pub use storage::Config;
pub use sync::{
    compute_delta, parse_due_date, ApplyOutcome, CalendarStore, DueDate, DueDateError,
    EventHandle, EventPayload, GoogleCalendarStore, Ledger, LedgerError, SyncEngine, SyncError,
    SyncReport,
};
