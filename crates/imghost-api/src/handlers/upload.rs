//! Upload endpoint, served on both `/upload` and `/api/upload`.

use crate::respond::wants_json;
use crate::services::upload::{process_upload, UploadOutcome};
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use imghost_core::LogLevel;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub id: Option<i64>,
    pub file_name: String,
    pub url: String,
}

/// Accept a multipart upload and respond in the mode the client asked for:
/// JSON for the API, an HTML confirmation fragment for the plain form.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let json_mode = wants_json(uri.path(), &headers);

    match process_upload(&state, multipart).await {
        Ok(outcome) => {
            if json_mode {
                Json(UploadResponse {
                    success: true,
                    id: outcome.id,
                    file_name: outcome.file_name,
                    url: outcome.url,
                })
                .into_response()
            } else {
                Html(confirmation_page(&outcome)).into_response()
            }
        }
        Err(err) => {
            let status = StatusCode::from_u16(err.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let message = err.client_message();
            match err.log_level() {
                LogLevel::Error => tracing::error!(error = %err, "Upload failed"),
                _ => tracing::debug!(error = %err, "Upload rejected"),
            }
            if json_mode {
                (
                    status,
                    Json(serde_json::json!({ "success": false, "error": message })),
                )
                    .into_response()
            } else {
                (status, message).into_response()
            }
        }
    }
}

fn confirmation_page(outcome: &UploadOutcome) -> String {
    format!(
        "<html><body><h2>File uploaded</h2>\
         <p>Identifier: {}</p>\
         <p>Link: <a href=\"{}\">{}</a></p>\
         <p><a href=\"/upload\">Upload another</a></p>\
         </body></html>",
        outcome.file_name, outcome.url, outcome.url
    )
}
