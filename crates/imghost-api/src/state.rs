//! Shared application state

use imghost_core::{Config, UploadValidator};
use imghost_db::ImageStore;
use imghost_storage::Storage;
use std::sync::Arc;

/// State shared across all request handlers.
///
/// The metadata store is always present behind the trait object; when the
/// database is disabled a no-op implementation is injected instead, so
/// handlers never branch on an "is the store enabled" flag.
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub images: Arc<dyn ImageStore>,
    pub validator: UploadValidator,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>, images: Arc<dyn ImageStore>) -> Self {
        let validator = UploadValidator::new(
            config.max_file_size_bytes,
            config.allowed_extensions.clone(),
        );
        Self {
            config,
            storage,
            images,
            validator,
        }
    }
}
