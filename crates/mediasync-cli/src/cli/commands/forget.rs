//! `mediasync forget <id>` – delete a record so the item is rediscovered.

use anyhow::{bail, Result};
use mediasync_core::ledger::Ledger;

pub async fn run_forget(ledger: &Ledger, id: &str) -> Result<()> {
    if !ledger.remove(id).await? {
        bail!("no record with id {id}");
    }
    println!("Forgot {id}");
    Ok(())
}
