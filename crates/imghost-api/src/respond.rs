//! Dual-mode response selection.
//!
//! The upload endpoint is reachable both from the JSON API (`/api/upload`)
//! and from a plain HTML form (`/upload`). API paths always get JSON;
//! other paths get JSON only when the client asks for it via `Accept`.

use axum::http::{header, HeaderMap};

/// JSON is selected by the `/api/` path prefix or an `Accept` header
/// containing `application/json`.
pub fn wants_json(path: &str, headers: &HeaderMap) -> bool {
    if path.starts_with("/api/") {
        return true;
    }
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map(|accept| accept.contains("application/json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_api_prefix_always_json() {
        let headers = HeaderMap::new();
        assert!(wants_json("/api/upload", &headers));
        assert!(wants_json("/api/images", &headers));
        assert!(!wants_json("/upload", &headers));
    }

    #[test]
    fn test_accept_header_selects_json() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain"),
        );
        assert!(wants_json("/upload", &headers));

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
        assert!(!wants_json("/upload", &headers));
    }
}
