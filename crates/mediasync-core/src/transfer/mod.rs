//! Byte transfer of a single record into the output directory.
//!
//! A transfer writes to a hidden staging file next to its destination and is
//! promoted by rename only after the whole body has been written and synced.
//! A failed transfer therefore never leaves a visible partial file.

mod http;
mod error;
mod staging;

use async_trait::async_trait;
use std::path::Path;

pub use http::{CurlFetcher, CurlOptions};
pub use error::TransferError;
pub use staging::{destination_path, promote, staging_path, STAGING_PREFIX, STAGING_SUFFIX};

/// Fetches one URL into a local file.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Download `url` into `staging`, creating or truncating it. Returns the
    /// number of bytes written. Only a complete 2xx response is a success.
    async fn fetch(&self, url: &str, staging: &Path) -> Result<u64, TransferError>;
}

/// Fetch into the staging file, then promote it to `destination`.
pub async fn transfer_to(
    fetcher: &dyn Fetcher,
    url: &str,
    staging: &Path,
    destination: &Path,
) -> Result<u64, TransferError> {
    let bytes = fetcher.fetch(url, staging).await?;
    promote(staging, destination).await?;
    Ok(bytes)
}
