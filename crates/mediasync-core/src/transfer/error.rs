//! Transfer error type.

/// Failure of a single transfer. Every variant leaves the ledger lease in
/// place, so the record is retried once the lease window has passed.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Curl reported an error (timeout, connection, partial body, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing, syncing or renaming the local file failed.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
    /// The blocking transfer task panicked or was cancelled.
    #[error("transfer task failed: {0}")]
    Task(String),
}
