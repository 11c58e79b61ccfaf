//! Persisted deduplication ledger.
//!
//! Maps each assignment id to the raw due-date string that was last applied
//! to the calendar store. An entry exists iff that id was successfully
//! applied with exactly that string. Commits are in-memory only; the whole
//! mapping is flushed to disk once at end of run, so an interrupted run
//! leaves the on-disk ledger at its pre-run state.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Change-detection memory for the sync engine.
pub struct Ledger {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl Ledger {
    /// Load the ledger from disk.
    ///
    /// An absent file yields an empty ledger; a malformed file yields an
    /// empty ledger with a warning. Loading never fails the run.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        %err,
                        "ledger file is malformed; starting from an empty ledger"
                    );
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    %err,
                    "ledger file is unreadable; starting from an empty ledger"
                );
                HashMap::new()
            }
        };

        Self { path, entries }
    }

    /// Whether this id was already applied with exactly this due-date string.
    ///
    /// Equality is on the source's own representation, not the parsed date;
    /// a formatting-only change still counts as a change.
    pub fn is_applied(&self, id: &str, due_date_raw: &str) -> bool {
        self.entries.get(id).is_some_and(|due| due == due_date_raw)
    }

    /// Last-applied due-date string for an id, if any.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Record a successful apply. In-memory only until [`Ledger::flush`].
    pub fn commit(&mut self, id: &str, due_date_raw: &str) {
        self.entries
            .insert(id.to_string(), due_date_raw.to_string());
    }

    /// Serialize the full mapping over the ledger file.
    ///
    /// Entries loaded but not recommitted are preserved; the engine never
    /// deletes entries. Called exactly once per run, after every apply
    /// attempt has resolved.
    pub fn flush(&self) -> Result<(), LedgerError> {
        let data = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &HashMap<String, String> {
        &self.entries
    }
}
