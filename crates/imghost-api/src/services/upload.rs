//! Upload orchestration: validate, persist bytes, then record metadata.
//!
//! The file write is the authoritative step. The metadata insert that
//! follows is best-effort: its failure is logged and the upload is still
//! reported successful, with a null id. The file is never rolled back.

use crate::state::AppState;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use futures::TryStreamExt;
use imghost_core::models::{self, NewImage};
use imghost_core::validation::{sanitize_original_name, ValidationError};
use imghost_core::AppError;
use imghost_storage::generate_stored_name;
use tokio_util::io::StreamReader;

/// Result of a completed upload.
#[derive(Debug)]
pub struct UploadOutcome {
    /// Store-assigned id; `None` when the store is disabled or the
    /// insert failed.
    pub id: Option<i64>,
    pub file_name: String,
    pub original_name: String,
    pub size: u64,
    pub url: String,
}

fn multipart_to_app(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body exceeds the upload size limit".to_string())
    } else {
        AppError::BadRequest(format!("Failed to read multipart body: {}", err))
    }
}

/// Run one upload through validation, disk write, and metadata insert.
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_image"))]
pub async fn process_upload(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<UploadOutcome, AppError> {
    let field = loop {
        let field = multipart.next_field().await.map_err(multipart_to_app)?;
        match field {
            Some(field) if field.name() == Some("file") => break field,
            Some(_) => continue,
            None => return Err(ValidationError::MissingFile.into()),
        }
    };

    let raw_name = match field.file_name() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(ValidationError::MissingFilename.into()),
    };

    let original_name = sanitize_original_name(&raw_name);
    let extension = state.validator.validate_extension(&raw_name)?;

    // Stored name is always freshly generated, never derived from the
    // client filename.
    let stored_name = generate_stored_name(&extension);

    // The field is streamed straight to disk; the size cap is enforced on
    // the measured byte count as it arrives, never on a buffered payload.
    let reader = StreamReader::new(field.map_err(std::io::Error::other));
    let written = state
        .storage
        .store(
            &stored_name,
            Box::pin(reader),
            state.validator.max_file_size_bytes(),
        )
        .await
        .map_err(crate::error::storage_to_app)?;
    state.validator.validate_size(written)?;

    let record = NewImage {
        file_name: stored_name.clone(),
        original_name: original_name.clone(),
        size: written as i64,
        file_type: extension.to_lowercase(),
    };

    let id = match state.images.insert(record).await {
        Ok(id) => Some(id),
        Err(AppError::StoreDisabled) => {
            tracing::debug!(file_name = %stored_name, "Metadata store disabled, skipping insert");
            None
        }
        Err(err) => {
            // Best-effort index: the file is already on disk and stays
            // the source of truth, so the request still succeeds.
            tracing::error!(
                error = %err,
                file_name = %stored_name,
                "Metadata insert failed after file write"
            );
            None
        }
    };

    let url = models::public_url(&stored_name);
    tracing::info!(
        file_name = %stored_name,
        original_name = %original_name,
        size_bytes = written,
        id = ?id,
        "Image uploaded"
    );

    Ok(UploadOutcome {
        id,
        file_name: stored_name,
        original_name,
        size: written,
        url,
    })
}
