//! `mediasync status` – list ledger records.

use anyhow::Result;
use mediasync_core::ledger::{Ledger, RecordState};

pub async fn run_status(ledger: &Ledger) -> Result<()> {
    let records = ledger.list().await?;
    if records.is_empty() {
        println!("No records in ledger.");
        return Ok(());
    }
    println!("{:<24} {:<8} {:<12} {}", "ID", "STATE", "ADDED", "NAME");
    let mut done = 0;
    for r in &records {
        if r.state() == RecordState::Done {
            done += 1;
        }
        println!(
            "{:<24} {:<8} {:<12} {}",
            r.id,
            r.state().as_str(),
            r.added_at,
            r.name
        );
    }
    println!("{} record(s), {} done", records.len(), done);
    Ok(())
}
