//! The `ImageStore` capability trait and its disabled variant.

use async_trait::async_trait;
use imghost_core::models::{ImageRecord, ListPage, ListQuery, NewImage};
use imghost_core::AppError;

/// Relational index of uploaded images.
///
/// The filesystem is the authority for "does this image exist"; the store
/// is a best-effort index layered on top. Every operation uses its own
/// short-lived connection; no transaction ever spans a disk write.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Idempotently ensure the schema exists.
    async fn init(&self) -> Result<(), AppError>;

    /// Insert a metadata row and return the assigned id. Fails on
    /// duplicate `file_name` or connectivity loss.
    async fn insert(&self, image: NewImage) -> Result<i64, AppError>;

    /// One page of records plus the unfiltered total row count.
    async fn list(&self, query: ListQuery) -> Result<ListPage, AppError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<ImageRecord>, AppError>;

    /// Remove a row. Returns false when no row matched the id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

/// Store variant used when no database is configured.
///
/// Every operation reports `StoreDisabled`; uploads keep working because
/// the orchestrator treats insert failures as best-effort.
#[derive(Debug, Clone, Default)]
pub struct DisabledImageStore;

#[async_trait]
impl ImageStore for DisabledImageStore {
    async fn init(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn insert(&self, _image: NewImage) -> Result<i64, AppError> {
        Err(AppError::StoreDisabled)
    }

    async fn list(&self, _query: ListQuery) -> Result<ListPage, AppError> {
        Err(AppError::StoreDisabled)
    }

    async fn get_by_id(&self, _id: i64) -> Result<Option<ImageRecord>, AppError> {
        Err(AppError::StoreDisabled)
    }

    async fn delete(&self, _id: i64) -> Result<bool, AppError> {
        Err(AppError::StoreDisabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_image() -> NewImage {
        NewImage {
            file_name: "abc.jpg".into(),
            original_name: "cat.jpg".into(),
            size: 42,
            file_type: "jpg".into(),
        }
    }

    #[tokio::test]
    async fn test_disabled_store_reports_store_disabled() {
        let store = DisabledImageStore;

        assert!(store.init().await.is_ok());
        assert!(matches!(
            store.insert(new_image()).await,
            Err(AppError::StoreDisabled)
        ));
        assert!(matches!(
            store.list(ListQuery::default()).await,
            Err(AppError::StoreDisabled)
        ));
        assert!(matches!(
            store.get_by_id(1).await,
            Err(AppError::StoreDisabled)
        ));
        assert!(matches!(store.delete(1).await, Err(AppError::StoreDisabled)));
    }
}
