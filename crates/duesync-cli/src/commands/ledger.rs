//! Inspect the sync ledger.

use clap::Subcommand;
use duesync_core::error::Result;
use duesync_core::sync::Ledger;
use duesync_core::Config;

#[derive(Subcommand)]
pub enum LedgerAction {
    /// List applied assignment ids with their due-date strings
    Show,
    /// Print the ledger file path
    Path,
}

pub fn run(action: LedgerAction) -> Result<()> {
    let config = Config::load()?;
    let path = config.ledger_path()?;

    match action {
        LedgerAction::Show => {
            let ledger = Ledger::load(path);
            if ledger.is_empty() {
                println!("ledger is empty");
                return Ok(());
            }
            let mut entries: Vec<_> = ledger.entries().iter().collect();
            entries.sort();
            for (id, due) in entries {
                println!("{id}\t{due}");
            }
        }
        LedgerAction::Path => println!("{}", path.display()),
    }
    Ok(())
}
