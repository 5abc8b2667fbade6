//! Logging setup. Events go to `$XDG_STATE_HOME/mediasync/mediasync.log`, or
//! to stderr when that file cannot be opened.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info,mediasync_core=debug,mediasync=debug";

const LOG_FILE: &str = "mediasync.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Plain-text subscriber with the crate filter, writing through `writer`.
fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .finish()
}

/// Where [`init_logging`] appends. Creates the state directory if needed.
pub fn log_file_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("mediasync")?;
    dirs.place_state_file(LOG_FILE)
        .context("cannot create the mediasync state directory")
}

/// Install the global subscriber writing to [`log_file_path`].
///
/// Errors leave no subscriber installed, so the caller can fall back to
/// [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing::subscriber::set_global_default(subscriber(env_filter(), Mutex::new(file)))
        .context("a log subscriber is already installed")?;
    tracing::info!("logging to {}", path.display());
    Ok(())
}

pub fn init_logging_stderr() {
    let _ = tracing::subscriber::set_global_default(subscriber(env_filter(), io::stderr));
}
