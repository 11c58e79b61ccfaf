//! Tests for the sync driver, using an in-memory calendar store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use super::engine::SyncEngine;
use super::ledger::Ledger;
use super::store::{CalendarStore, EventHandle, EventPayload};
use super::types::{ApplyOutcome, SyncError};
use crate::source::Assignment;

const UID_DOMAIN: &str = "lms.example.ac.kr";

/// In-memory calendar store keyed by external id, with injectable failures.
#[derive(Default)]
struct FakeStore {
    events: Mutex<HashMap<String, EventPayload>>,
    fail_lookups_for: Vec<String>,
    fail_inserts: bool,
    lookups: Mutex<usize>,
    inserts: Mutex<usize>,
    updates: Mutex<usize>,
}

impl FakeStore {
    fn event(&self, external_id: &str) -> Option<EventPayload> {
        self.events.lock().unwrap().get(external_id).cloned()
    }

    fn counts(&self) -> (usize, usize, usize) {
        (
            *self.lookups.lock().unwrap(),
            *self.inserts.lock().unwrap(),
            *self.updates.lock().unwrap(),
        )
    }
}

#[async_trait]
impl CalendarStore for FakeStore {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<EventHandle>, SyncError> {
        *self.lookups.lock().unwrap() += 1;
        if self.fail_lookups_for.iter().any(|id| id == external_id) {
            return Err(SyncError::CalendarApi("simulated outage".into()));
        }
        Ok(self
            .events
            .lock()
            .unwrap()
            .get(external_id)
            .map(|_| EventHandle(external_id.to_string())))
    }

    async fn insert(&self, payload: &EventPayload) -> Result<EventHandle, SyncError> {
        *self.inserts.lock().unwrap() += 1;
        if self.fail_inserts {
            return Err(SyncError::CalendarApi("simulated rejection".into()));
        }
        self.events
            .lock()
            .unwrap()
            .insert(payload.external_id.clone(), payload.clone());
        Ok(EventHandle(payload.external_id.clone()))
    }

    async fn update(
        &self,
        handle: &EventHandle,
        payload: &EventPayload,
    ) -> Result<EventHandle, SyncError> {
        *self.updates.lock().unwrap() += 1;
        self.events
            .lock()
            .unwrap()
            .insert(payload.external_id.clone(), payload.clone());
        Ok(handle.clone())
    }
}

fn assignment(id: &str, due: &str) -> Assignment {
    Assignment {
        id: id.to_string(),
        course: "Operating Systems".to_string(),
        title: format!("Assignment {id}"),
        due_date_raw: due.to_string(),
        link: None,
    }
}

fn ledger_at(temp_dir: &TempDir) -> Ledger {
    Ledger::load(temp_dir.path().join("ledger.json"))
}

#[tokio::test]
async fn apply_twice_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let mut ledger = ledger_at(&temp_dir);
    let engine = SyncEngine::new(FakeStore::default(), UID_DOMAIN);
    let record = assignment("1", "2024.05.01");

    let first = engine.apply(&record, &mut ledger).await;
    assert!(matches!(first, ApplyOutcome::Applied));
    let state_after_first = engine.store().event("1@lms.example.ac.kr");

    // Second apply takes the update branch and leaves the store state
    // observably identical.
    let second = engine.apply(&record, &mut ledger).await;
    assert!(matches!(second, ApplyOutcome::Applied));
    assert_eq!(engine.store().event("1@lms.example.ac.kr"), state_after_first);

    let (_, inserts, updates) = engine.store().counts();
    assert_eq!((inserts, updates), (1, 1));
}

#[tokio::test]
async fn unparseable_due_date_skips_before_any_store_call() {
    let temp_dir = TempDir::new().unwrap();
    let mut ledger = ledger_at(&temp_dir);
    let engine = SyncEngine::new(FakeStore::default(), UID_DOMAIN);

    let empty = engine.apply(&assignment("1", ""), &mut ledger).await;
    assert!(matches!(empty, ApplyOutcome::Skipped));

    let garbage = engine.apply(&assignment("2", "tomorrow-ish"), &mut ledger).await;
    assert!(matches!(garbage, ApplyOutcome::Skipped));

    assert!(ledger.is_empty());
    assert_eq!(engine.store().counts(), (0, 0, 0));
}

#[tokio::test]
async fn one_failure_does_not_abort_the_batch() {
    let temp_dir = TempDir::new().unwrap();
    let mut ledger = ledger_at(&temp_dir);
    let store = FakeStore {
        fail_lookups_for: vec!["1@lms.example.ac.kr".to_string()],
        ..FakeStore::default()
    };
    let engine = SyncEngine::new(store, UID_DOMAIN);

    let report = engine
        .run(
            vec![assignment("1", "2024.05.01"), assignment("2", "2024.05.02")],
            &mut ledger,
        )
        .await
        .unwrap();

    assert_eq!(report.applied, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(ledger.get("1"), None);
    assert_eq!(ledger.get("2"), Some("2024.05.02"));
}

#[tokio::test]
async fn ledger_is_not_committed_when_insert_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut ledger = ledger_at(&temp_dir);
    let store = FakeStore {
        fail_inserts: true,
        ..FakeStore::default()
    };
    let engine = SyncEngine::new(store, UID_DOMAIN);

    let outcome = engine.apply(&assignment("1", "2024.05.01"), &mut ledger).await;
    assert!(matches!(outcome, ApplyOutcome::Failed(_)));
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn interrupted_run_leaves_the_flushed_ledger_at_pre_run_state() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ledger.json");

    let mut ledger = Ledger::load(path.clone());
    let engine = SyncEngine::new(FakeStore::default(), UID_DOMAIN);

    // apply succeeds but the process "dies" before flush.
    let outcome = engine.apply(&assignment("1", "2024.05.01"), &mut ledger).await;
    assert!(matches!(outcome, ApplyOutcome::Applied));
    drop(ledger);

    // A restart reconsiders the record as a delta.
    let reloaded = Ledger::load(path);
    assert_eq!(reloaded.get("1"), None);
}

#[tokio::test]
async fn end_to_end_two_records_then_quiescent_second_run() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ledger.json");
    let engine = SyncEngine::new(FakeStore::default(), UID_DOMAIN);
    let records = vec![
        assignment("1", "2024.05.01"),
        assignment("2", "2024.05.02 오후 03:00"),
    ];

    let mut ledger = Ledger::load(path.clone());
    let report = engine.run(records.clone(), &mut ledger).await.unwrap();
    assert_eq!(report.applied, 2);

    let flushed: std::collections::HashMap<String, String> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(flushed.get("1").map(String::as_str), Some("2024.05.01"));
    assert_eq!(
        flushed.get("2").map(String::as_str),
        Some("2024.05.02 오후 03:00")
    );

    // Second run with identical input: empty delta, zero store calls.
    let calls_before = engine.store().counts();
    let mut ledger = Ledger::load(path);
    let report = engine.run(records, &mut ledger).await.unwrap();
    assert_eq!(report, super::types::SyncReport::default());
    assert_eq!(engine.store().counts(), calls_before);
}
