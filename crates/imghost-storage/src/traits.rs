//! Storage abstraction trait

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid stored name: {0}")]
    InvalidName(String),

    #[error("File exceeds size limit of {limit} bytes")]
    ExceedsSizeLimit { limit: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Chunked byte stream returned by `read_stream`.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Storage abstraction for uploaded image bytes.
///
/// Implementations persist whole files under server-generated stored
/// names. Stored names are flat (no directory separators); implementations
/// must reject names that would escape the storage directory.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stream `reader` to a file under `stored_name`, enforcing `max_bytes`
    /// without buffering the payload in memory.
    ///
    /// On success returns the number of bytes written. If the stream
    /// exceeds `max_bytes` the partial file is removed and
    /// `StorageError::ExceedsSizeLimit` is returned, leaving no residue on
    /// disk.
    ///
    /// The reader may borrow from the request body; it only needs to live
    /// for the duration of the call.
    async fn store<'a>(
        &self,
        stored_name: &str,
        reader: Pin<Box<dyn AsyncRead + Send + 'a>>,
        max_bytes: u64,
    ) -> StorageResult<u64>;

    /// Remove a stored file. Returns `Ok(false)` when the file was already
    /// absent; absence is a warning for the caller, never an error,
    /// because metadata deletion must still proceed.
    async fn remove(&self, stored_name: &str) -> StorageResult<bool>;

    /// Check whether a stored file exists.
    async fn exists(&self, stored_name: &str) -> StorageResult<bool>;

    /// Size in bytes of a stored file.
    async fn content_length(&self, stored_name: &str) -> StorageResult<u64>;

    /// Open a stored file as a chunked byte stream (for serving without
    /// loading the whole file into memory).
    async fn read_stream(&self, stored_name: &str) -> StorageResult<ByteStream>;
}
