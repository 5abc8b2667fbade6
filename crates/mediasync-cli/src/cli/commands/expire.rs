//! `mediasync expire` – drop records past the retention period.

use anyhow::Result;
use mediasync_core::ledger::Ledger;

pub async fn run_expire(ledger: &Ledger) -> Result<()> {
    let n = ledger.expire().await?;
    println!("Expired {n} record(s)");
    Ok(())
}
