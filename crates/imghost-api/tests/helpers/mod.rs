//! Test helpers: build the router against a temp-dir storage and an
//! in-process metadata store, so tests need no running database.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use chrono::{Duration, TimeZone, Utc};
use imghost_api::setup::routes;
use imghost_api::state::AppState;
use imghost_core::models::{ImageRecord, ListPage, ListQuery, NewImage, SortDir, SortKey};
use imghost_core::{AppError, Config};
use imghost_db::{DisabledImageStore, ImageStore};
use imghost_storage::{LocalStorage, Storage};
use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Test application with its owned storage directory.
pub struct TestApp {
    pub server: TestServer,
    pub images_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of files currently in the storage directory.
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(&self.images_dir)
            .expect("Failed to read images dir")
            .count()
    }

    pub fn stored_file_len(&self, file_name: &str) -> u64 {
        std::fs::metadata(self.images_dir.join(file_name))
            .expect("Stored file missing")
            .len()
    }
}

/// Vec-backed `ImageStore` with the same sorting and paging semantics as
/// the relational store. Ids count up from 1; upload times are spaced one
/// second apart in insert order so date ordering is deterministic.
pub struct InMemoryImageStore {
    rows: Mutex<Vec<ImageRecord>>,
    next_id: AtomicI64,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn init(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn insert(&self, image: NewImage) -> Result<i64, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        self.rows.lock().unwrap().push(ImageRecord {
            id,
            file_name: image.file_name,
            original_name: image.original_name,
            size: image.size,
            upload_time: base + Duration::seconds(id),
            file_type: image.file_type,
        });
        Ok(id)
    }

    async fn list(&self, query: ListQuery) -> Result<ListPage, AppError> {
        let mut rows = self.rows.lock().unwrap().clone();
        match query.sort_by {
            SortKey::Name => rows.sort_by(|a, b| a.original_name.cmp(&b.original_name)),
            SortKey::Size => rows.sort_by_key(|r| r.size),
            SortKey::Date => rows.sort_by_key(|r| r.upload_time),
        }
        if query.sort_dir == SortDir::Desc {
            rows.reverse();
        }
        let total = rows.len() as i64;
        let items = rows
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect();
        Ok(ListPage { total, items })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ImageRecord>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_cap(5 * 1024 * 1024).await
}

pub async fn setup_test_app_with_cap(max_file_size_bytes: u64) -> TestApp {
    build_test_app(max_file_size_bytes, Arc::new(DisabledImageStore)).await
}

pub async fn setup_test_app_with_store(images: Arc<dyn ImageStore>) -> TestApp {
    build_test_app(5 * 1024 * 1024, images).await
}

async fn build_test_app(max_file_size_bytes: u64, images: Arc<dyn ImageStore>) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let images_dir = temp_dir.path().join("images");

    let config = Config {
        server_port: 0,
        images_dir: images_dir.clone(),
        max_file_size_bytes,
        allowed_extensions: vec!["jpg".into(), "png".into(), "gif".into()],
        db_enabled: false,
        database_url: String::new(),
        db_max_connections: 5,
        db_timeout_seconds: 5,
        cors_origins: vec!["*".into()],
        environment: "test".into(),
    };

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(images_dir.clone())
            .await
            .expect("Failed to create local storage"),
    );
    let state = Arc::new(AppState::new(config.clone(), storage, images));
    let router = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        images_dir,
        _temp_dir: temp_dir,
    }
}

/// Multipart form with a single `file` field.
pub fn upload_form(file_name: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(data)
        .file_name(file_name)
        .mime_type("application/octet-stream");
    MultipartForm::new().add_part("file", part)
}
