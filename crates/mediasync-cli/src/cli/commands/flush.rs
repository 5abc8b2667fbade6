//! `mediasync flush` – drop every undone record.

use anyhow::Result;
use mediasync_core::ledger::Ledger;

pub async fn run_flush(ledger: &Ledger) -> Result<()> {
    let n = ledger.flush_undone().await?;
    println!("Flushed {n} pending record(s)");
    Ok(())
}
