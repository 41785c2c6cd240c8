//! Serves stored image files at `/images/{file_name}`.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use futures::StreamExt;
use imghost_core::AppError;
use std::sync::Arc;

/// Stream a stored file back to the client without buffering it.
pub async fn get_image_file(
    State(state): State<Arc<AppState>>,
    Path(file_name): Path<String>,
) -> Result<Response, HttpAppError> {
    let length = state.storage.content_length(&file_name).await?;
    let stream = state.storage.read_stream(&file_name).await?;

    let body_stream = stream.map(|result| result.map_err(std::io::Error::other));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&file_name))
        .header(header::CONTENT_LENGTH, length)
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from_stream(body_stream))
        .map_err(|e| HttpAppError(AppError::Internal(e.to_string())))?;

    Ok(response)
}

/// Content type from the stored name's extension. Stored names always end
/// in an allow-listed extension, so the fallback is rarely reached.
fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit('.')
        .next()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_known_extensions() {
        assert_eq!(content_type_for("a1b2.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a1b2.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a1b2.png"), "image/png");
        assert_eq!(content_type_for("a1b2.gif"), "image/gif");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
