use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ledger::LedgerPolicy;

/// File name of the job ledger, placed inside the output directory.
pub const LEDGER_FILE_NAME: &str = ".state.db";

/// Global configuration loaded from `~/.config/mediasync/config.toml`.
///
/// Missing keys fall back to the defaults below, so a config file only needs
/// to name what it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Friendly name of the media server to mirror (as announced on the network).
    pub source_name: String,
    /// Directory receiving downloaded files and the ledger (None = current directory).
    pub output_dir: Option<PathBuf>,
    /// Maximum number of transfers in flight.
    pub concurrent_transfers: usize,
    /// Delay after a completed crawl pass before the catalog is browsed again.
    pub recrawl_interval_secs: u64,
    /// Minimum age of a claim before an undone record may be claimed again.
    pub lease_window_secs: u64,
    /// Records older than this are removed from the ledger, done or not.
    pub retention_days: u64,
    /// Largest page requested from the catalog in one browse call.
    pub max_page_size: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source_name: "Canon EOS 70D".to_string(),
            output_dir: None,
            concurrent_transfers: 2,
            recrawl_interval_secs: 180,
            lease_window_secs: 300,
            retention_days: 30,
            max_page_size: 50,
        }
    }
}

impl SyncConfig {
    /// Output directory, defaulting to the current working directory.
    pub fn resolved_output_dir(&self) -> Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("cannot determine current directory"),
        }
    }

    /// Path of the ledger database: a dotfile alongside the downloaded content.
    pub fn ledger_path(&self) -> Result<PathBuf> {
        Ok(self.resolved_output_dir()?.join(LEDGER_FILE_NAME))
    }

    pub fn ledger_policy(&self) -> LedgerPolicy {
        LedgerPolicy {
            lease_window: Duration::from_secs(self.lease_window_secs),
            retention: Duration::from_secs(self.retention_days.saturating_mul(24 * 60 * 60)),
        }
    }

    pub fn recrawl_interval(&self) -> Duration {
        Duration::from_secs(self.recrawl_interval_secs)
    }

    /// Transfer concurrency limit; never below one so the queue can drain.
    pub fn transfer_limit(&self) -> usize {
        self.concurrent_transfers.max(1)
    }

    /// Page size for browse calls; never below one.
    pub fn page_size(&self) -> u32 {
        self.max_page_size.max(1)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mediasync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SyncConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<SyncConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: SyncConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
