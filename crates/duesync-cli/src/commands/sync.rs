//! Sync subcommand: run the incremental engine against Google Calendar.
//!
//! Reads the scraper's JSON export, computes the delta against the ledger,
//! upserts changed records, and reports aggregate counts. Individual record
//! failures are counted, not fatal; the process exits normally either way.

use std::path::PathBuf;

use duesync_core::auth::GoogleAuth;
use duesync_core::error::{CoreError, Result};
use duesync_core::source::{AssignmentSource, ExportFileSource};
use duesync_core::sync::{compute_delta, GoogleCalendarStore, Ledger, SyncEngine};
use duesync_core::Config;

pub fn run(dry_run: bool, export: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let export_path = match export {
        Some(path) => path,
        None => config.export_path()?,
    };
    let ledger_path = config.ledger_path()?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let source = ExportFileSource::new(export_path);
        let records = source.fetch().await?;
        println!("Extracted {} assignments from the export.", records.len());

        let mut ledger = Ledger::load(ledger_path);

        if dry_run {
            let delta = compute_delta(records, &ledger);
            if delta.is_empty() {
                println!("Everything up to date.");
                return Ok(());
            }
            println!("{} new or updated assignments:", delta.len());
            for record in &delta {
                println!(
                    "  [{}] {} (due {})",
                    record.course, record.title, record.due_date_raw
                );
            }
            return Ok(());
        }

        let auth = GoogleAuth::from_keyring();
        if !auth.is_authenticated() {
            return Err(CoreError::Custom(
                "Google Calendar is not authenticated. Run 'duesync auth google login' first."
                    .into(),
            ));
        }

        let store = GoogleCalendarStore::new(auth, config.calendar.calendar_id.clone());
        let engine = SyncEngine::new(store, config.uid_domain());
        let report = engine.run(records, &mut ledger).await?;

        println!(
            "Applied {}, skipped {}, failed {}.",
            report.applied, report.skipped, report.failed
        );
        Ok(())
    })
}
