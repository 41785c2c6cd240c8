//! Listing and deletion endpoints for image metadata.

use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use imghost_core::models::{ImageResponse, ListQuery};
use imghost_core::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Raw query-string values. Numbers arrive as strings so that malformed
/// values can fall back to defaults instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub success: bool,
    pub items: Vec<ImageResponse>,
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
    pub sort_by: &'static str,
    pub sort_dir: &'static str,
}

/// `GET /api/images` with pagination and sorting. A disabled store is a
/// degraded 200 with an empty item set, never an error status.
pub async fn list_images(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Response {
    let query = ListQuery::sanitize(
        params.limit.as_deref().and_then(|v| v.parse().ok()),
        params.offset.as_deref().and_then(|v| v.parse().ok()),
        params.sort_by.as_deref(),
        params.sort_dir.as_deref(),
    );

    match state.images.list(query).await {
        Ok(page) => Json(ListingResponse {
            success: true,
            items: page
                .items
                .into_iter()
                .map(ImageResponse::from_record)
                .collect(),
            limit: query.limit,
            offset: query.offset,
            total: page.total,
            sort_by: query.sort_by.as_str(),
            sort_dir: query.sort_dir.as_str(),
        })
        .into_response(),
        Err(AppError::StoreDisabled) => degraded_listing("Database is not configured."),
        Err(err) => {
            tracing::error!(error = %err, "Image listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "message": "Database error.",
                    "items": [],
                })),
            )
                .into_response()
        }
    }
}

fn degraded_listing(message: &str) -> Response {
    Json(serde_json::json!({
        "success": false,
        "message": message,
        "items": [],
    }))
    .into_response()
}

/// `DELETE /api/images/{id}`: remove the disk file (tolerating absence),
/// then the metadata row. A store failure after the file is gone is still
/// reported as an error; the file is not restored.
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    Path(image_id): Path<i64>,
) -> Response {
    let record = match state.images.get_by_id(image_id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return message_response(StatusCode::NOT_FOUND, "File not found.");
        }
        Err(AppError::StoreDisabled) => {
            return message_response(StatusCode::OK, "Database is not configured.");
        }
        Err(err) => {
            tracing::error!(error = %err, image_id, "Image lookup failed");
            return message_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error.");
        }
    };

    match state.storage.remove(&record.file_name).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(file_name = %record.file_name, "File already missing on disk");
        }
        Err(err) => {
            tracing::error!(error = %err, file_name = %record.file_name, "File removal failed");
            return message_response(StatusCode::INTERNAL_SERVER_ERROR, "Storage error.");
        }
    }

    match state.images.delete(image_id).await {
        Ok(_) => {
            tracing::info!(image_id, file_name = %record.file_name, "Image deleted");
            Json(serde_json::json!({ "success": true })).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, image_id, "Metadata row deletion failed");
            message_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error.")
        }
    }
}

fn message_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({ "success": false, "message": message })),
    )
        .into_response()
}
