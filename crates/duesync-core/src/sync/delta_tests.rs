//! Tests for delta computation.

use tempfile::TempDir;

use super::delta::compute_delta;
use super::ledger::Ledger;
use crate::source::Assignment;

fn assignment(id: &str, due: &str) -> Assignment {
    Assignment {
        id: id.to_string(),
        course: "Operating Systems".to_string(),
        title: format!("Assignment {id}"),
        due_date_raw: due.to_string(),
        link: None,
    }
}

fn empty_ledger(temp_dir: &TempDir) -> Ledger {
    Ledger::load(temp_dir.path().join("ledger.json"))
}

#[test]
fn unknown_ids_are_included() {
    let temp_dir = TempDir::new().unwrap();
    let ledger = empty_ledger(&temp_dir);

    let delta = compute_delta(vec![assignment("1", "2024.05.01")], &ledger);
    assert_eq!(delta.len(), 1);
    assert_eq!(delta[0].id, "1");
}

#[test]
fn unchanged_due_dates_are_excluded() {
    let temp_dir = TempDir::new().unwrap();
    let mut ledger = empty_ledger(&temp_dir);
    ledger.commit("1", "2024.05.01");

    let delta = compute_delta(vec![assignment("1", "2024.05.01")], &ledger);
    assert!(delta.is_empty());
}

#[test]
fn changed_due_dates_are_included() {
    let temp_dir = TempDir::new().unwrap();
    let mut ledger = empty_ledger(&temp_dir);
    ledger.commit("1", "2024.05.01");

    let delta = compute_delta(vec![assignment("1", "2024.06.01")], &ledger);
    assert_eq!(delta.len(), 1);
}

#[test]
fn formatting_only_changes_still_count_as_changes() {
    // The ledger compares the source's own representation, not parsed
    // dates; a surface reformat forces a re-sync on purpose.
    let temp_dir = TempDir::new().unwrap();
    let mut ledger = empty_ledger(&temp_dir);
    ledger.commit("1", "2024.05.01");

    let delta = compute_delta(vec![assignment("1", "2024.5.1")], &ledger);
    assert_eq!(delta.len(), 1);
}

#[test]
fn duplicate_ids_are_deduped_first_seen_wins() {
    let temp_dir = TempDir::new().unwrap();
    let ledger = empty_ledger(&temp_dir);

    let delta = compute_delta(
        vec![assignment("1", "2024.05.01"), assignment("1", "2024.06.01")],
        &ledger,
    );
    assert_eq!(delta.len(), 1);
    assert_eq!(delta[0].due_date_raw, "2024.05.01");
}

#[test]
fn changed_record_appears_exactly_once_even_if_yielded_twice() {
    let temp_dir = TempDir::new().unwrap();
    let mut ledger = empty_ledger(&temp_dir);
    ledger.commit("1", "2024.05.01");

    let delta = compute_delta(
        vec![assignment("1", "2024.06.01"), assignment("1", "2024.06.01")],
        &ledger,
    );
    assert_eq!(delta.len(), 1);
}

#[test]
fn extraction_order_is_preserved() {
    let temp_dir = TempDir::new().unwrap();
    let ledger = empty_ledger(&temp_dir);

    let delta = compute_delta(
        vec![
            assignment("3", "2024.05.03"),
            assignment("1", "2024.05.01"),
            assignment("2", "2024.05.02"),
        ],
        &ledger,
    );
    let ids: Vec<_> = delta.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["3", "1", "2"]);
}
