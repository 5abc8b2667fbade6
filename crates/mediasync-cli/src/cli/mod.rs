//! CLI for inspecting and maintaining the mediasync job ledger.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use mediasync_core::config::{self, SyncConfig};
use mediasync_core::ledger::Ledger;
use std::path::PathBuf;

use commands::{
    run_completions, run_expire, run_flush, run_forget, run_mark_done, run_status,
};

/// Top-level CLI for mediasync.
#[derive(Debug, Parser)]
#[command(name = "mediasync")]
#[command(about = "mediasync: mirror a network media server to a local directory", long_about = None)]
pub struct Cli {
    /// Directory holding the mirrored files and the ledger (overrides the config file).
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the XDG location.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List ledger records with their state (queued, claimed, done).
    Status,

    /// Delete records older than the retention period.
    Expire,

    /// Delete every record that has not completed.
    Flush,

    /// Mark a record as transferred so it is never downloaded.
    MarkDone {
        /// Catalog object id of the record.
        id: String,
    },

    /// Delete a record; the next crawl pass rediscovers the item.
    Forget {
        /// Catalog object id of the record.
        id: String,
    },

    /// Print a shell completion script to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = load_config(&cli)?;
        tracing::debug!("loaded config: {:?}", cfg);
        let ledger = Ledger::open_at(cfg.ledger_path()?, cfg.ledger_policy()).await?;

        match cli.command {
            CliCommand::Status => run_status(&ledger).await?,
            CliCommand::Expire => run_expire(&ledger).await?,
            CliCommand::Flush => run_flush(&ledger).await?,
            CliCommand::MarkDone { id } => run_mark_done(&ledger, &id).await?,
            CliCommand::Forget { id } => run_forget(&ledger, &id).await?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

/// Config file (explicit or XDG default) with the command-line overrides applied.
fn load_config(cli: &Cli) -> Result<SyncConfig> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load_or_init()?,
    };
    if let Some(dir) = &cli.output_dir {
        cfg.output_dir = Some(dir.clone());
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests;
