//! libcurl-backed [`Fetcher`]: one plain GET per transfer, streamed to disk.

use async_trait::async_trait;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{Fetcher, TransferError};

/// Tunables for the curl handle used per transfer.
#[derive(Debug, Clone)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    /// Abort when the rate stays below `low_speed_limit` bytes/s for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    pub user_agent: String,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            low_speed_limit: 1024,
            low_speed_time: Duration::from_secs(60),
            user_agent: format!("mediasync/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Fetcher running each GET on the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    options: CurlOptions,
}

impl CurlFetcher {
    pub fn new(options: CurlOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Fetcher for CurlFetcher {
    async fn fetch(&self, url: &str, staging: &Path) -> Result<u64, TransferError> {
        let url = url.to_string();
        let staging: PathBuf = staging.to_path_buf();
        let options = self.options.clone();
        tokio::task::spawn_blocking(move || fetch_blocking(&url, &staging, &options))
            .await
            .map_err(|e| TransferError::Task(e.to_string()))?
    }
}

/// Downloads `url` with a single GET, writing the body sequentially to `staging`.
/// Runs in the current thread; call from `spawn_blocking` when used from async code.
fn fetch_blocking(url: &str, staging: &Path, options: &CurlOptions) -> Result<u64, TransferError> {
    let mut file = File::create(staging).map_err(|e| {
        TransferError::Storage(io::Error::new(
            e.kind(),
            format!("failed to create staging file {}: {}", staging.display(), e),
        ))
    })?;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(&options.user_agent)?;
    easy.connect_timeout(options.connect_timeout)?;
    easy.low_speed_limit(options.low_speed_limit)?;
    easy.low_speed_time(options.low_speed_time)?;

    let mut written = 0u64;
    let mut write_error: Option<io::Error> = None;
    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        return Err(TransferError::Storage(e));
    }
    performed?;

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(TransferError::Http(code));
    }

    file.sync_all()?;
    tracing::debug!(url, bytes = written, "transfer body written");
    Ok(written)
}
