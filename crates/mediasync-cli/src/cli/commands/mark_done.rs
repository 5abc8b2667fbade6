//! `mediasync mark-done <id>` – record an item as already transferred.

use anyhow::{bail, Result};
use mediasync_core::ledger::Ledger;

pub async fn run_mark_done(ledger: &Ledger, id: &str) -> Result<()> {
    if !ledger.has(id).await? {
        bail!("no record with id {id}");
    }
    ledger.mark_done(id).await?;
    println!("Marked {id} done");
    Ok(())
}
