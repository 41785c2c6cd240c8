use crate::traits::{ByteStream, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::BytesMut;
use futures::StreamExt;
use std::path::PathBuf;
use std::pin::Pin;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

const WRITE_CHUNK_BYTES: usize = 64 * 1024;

/// Local filesystem storage implementation
///
/// Files live directly under `base_path`; stored names are flat tokens, so
/// no subdirectories are ever created.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at `base_path`, creating the
    /// directory if absent (idempotent).
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert a stored name to a filesystem path.
    ///
    /// Stored names are generated by this service, but the check still
    /// rejects anything that could resolve outside the storage directory
    /// in case a name arrives from an untrusted route parameter.
    fn name_to_path(&self, stored_name: &str) -> StorageResult<PathBuf> {
        if stored_name.is_empty()
            || stored_name.contains("..")
            || stored_name.contains('/')
            || stored_name.contains('\\')
        {
            return Err(StorageError::InvalidName(stored_name.to_string()));
        }
        Ok(self.base_path.join(stored_name))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store<'a>(
        &self,
        stored_name: &str,
        mut reader: Pin<Box<dyn AsyncRead + Send + 'a>>,
        max_bytes: u64,
    ) -> StorageResult<u64> {
        let path = self.name_to_path(stored_name)?;
        let start = std::time::Instant::now();

        // The directory can disappear between startup and now (volume
        // remounts); recreate on demand.
        fs::create_dir_all(&self.base_path).await?;

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let mut written: u64 = 0;
        let mut buf = BytesMut::with_capacity(WRITE_CHUNK_BYTES);
        loop {
            let n = match reader.read_buf(&mut buf).await {
                Ok(n) => n,
                Err(e) => {
                    drop(file);
                    let _ = fs::remove_file(&path).await;
                    return Err(StorageError::UploadFailed(format!(
                        "Failed to read upload stream: {}",
                        e
                    )));
                }
            };
            if n == 0 {
                break;
            }

            written += n as u64;
            if written > max_bytes {
                drop(file);
                let _ = fs::remove_file(&path).await;
                return Err(StorageError::ExceedsSizeLimit { limit: max_bytes });
            }

            if let Err(e) = file.write_all(&buf).await {
                drop(file);
                let _ = fs::remove_file(&path).await;
                return Err(StorageError::UploadFailed(format!(
                    "Failed to write file {}: {}",
                    path.display(),
                    e
                )));
            }
            buf.clear();
        }

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            stored_name = %stored_name,
            size_bytes = written,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage store successful"
        );

        Ok(written)
    }

    async fn remove(&self, stored_name: &str) -> StorageResult<bool> {
        let path = self.name_to_path(stored_name)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(false);
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            stored_name = %stored_name,
            "Local storage delete successful"
        );

        Ok(true)
    }

    async fn exists(&self, stored_name: &str) -> StorageResult<bool> {
        let path = self.name_to_path(stored_name)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn content_length(&self, stored_name: &str) -> StorageResult<u64> {
        let path = self.name_to_path(stored_name)?;
        let meta = fs::metadata(&path)
            .await
            .map_err(|_| StorageError::NotFound(stored_name.to_string()))?;
        Ok(meta.len())
    }

    async fn read_stream(&self, stored_name: &str) -> StorageResult<ByteStream> {
        let path = self.name_to_path(stored_name)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(stored_name.to_string()));
        }

        let file = fs::File::open(&path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to open file {}: {}", path.display(), e))
        })?;

        let reader = tokio_util::io::ReaderStream::new(file);
        let stream = reader.map(|result| {
            result.map_err(|e| StorageError::ReadFailed(format!("Failed to read chunk: {}", e)))
        });

        Ok(Box::pin(stream))
    }
}
