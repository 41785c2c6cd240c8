//! Domain models for uploaded images and the listing contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Hard bounds for the listing window.
pub const LIST_LIMIT_MIN: i64 = 1;
pub const LIST_LIMIT_MAX: i64 = 100;
pub const LIST_LIMIT_DEFAULT: i64 = 10;

/// A stored image's metadata row.
///
/// `file_name` is the server-generated on-disk name and URL path segment;
/// `original_name` is the sanitized client name, display-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ImageRecord {
    pub id: i64,
    pub file_name: String,
    pub original_name: String,
    pub size: i64,
    pub upload_time: DateTime<Utc>,
    pub file_type: String,
}

/// Fields for a new metadata row. `id` and `upload_time` are assigned by
/// the store at insert.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub file_name: String,
    pub original_name: String,
    pub size: i64,
    pub file_type: String,
}

/// Listing item as returned by the API: record fields plus derived URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    pub id: i64,
    pub file_name: String,
    pub original_name: String,
    pub size: i64,
    pub upload_time: DateTime<Utc>,
    pub file_type: String,
    pub url: String,
}

impl ImageResponse {
    pub fn from_record(record: ImageRecord) -> Self {
        let url = public_url(&record.file_name);
        Self {
            id: record.id,
            file_name: record.file_name,
            original_name: record.original_name,
            size: record.size,
            upload_time: record.upload_time,
            file_type: record.file_type,
            url,
        }
    }
}

/// Public URL for a stored name. Stored names are server-generated, so no
/// escaping is needed.
pub fn public_url(stored_name: &str) -> String {
    format!("/images/{}", stored_name)
}

/// Sort key for listings. Closed enumeration with an explicit mapping to
/// storage columns; unknown inputs fall back to the default silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    Size,
    #[default]
    Date,
}

impl SortKey {
    /// Parse a query-string value, falling back to `Date` for anything
    /// unrecognized. Never an error.
    pub fn parse(value: &str) -> Self {
        match value {
            "name" => SortKey::Name,
            "size" => SortKey::Size,
            "date" => SortKey::Date,
            _ => SortKey::Date,
        }
    }

    /// Column identifier in the images table.
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::Name => "original_name",
            SortKey::Size => "size",
            SortKey::Date => "upload_time",
        }
    }

    /// Wire form, echoed back in listing responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Size => "size",
            SortKey::Date => "date",
        }
    }
}

/// Sort direction, defaulting to descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl SortDir {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "asc" => SortDir::Asc,
            "desc" => SortDir::Desc,
            _ => SortDir::Desc,
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

/// Effective listing parameters after boundary sanitization.
#[derive(Debug, Clone, Copy)]
pub struct ListQuery {
    pub limit: i64,
    pub offset: i64,
    pub sort_by: SortKey,
    pub sort_dir: SortDir,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: LIST_LIMIT_DEFAULT,
            offset: 0,
            sort_by: SortKey::default(),
            sort_dir: SortDir::default(),
        }
    }
}

impl ListQuery {
    /// Build an effective query from raw query-string values. Out-of-range
    /// numbers are clamped, unknown sort values fall back to defaults;
    /// nothing here is ever rejected.
    pub fn sanitize(
        limit: Option<i64>,
        offset: Option<i64>,
        sort_by: Option<&str>,
        sort_dir: Option<&str>,
    ) -> Self {
        Self {
            limit: limit
                .unwrap_or(LIST_LIMIT_DEFAULT)
                .clamp(LIST_LIMIT_MIN, LIST_LIMIT_MAX),
            offset: offset.unwrap_or(0).max(0),
            sort_by: sort_by.map(SortKey::parse).unwrap_or_default(),
            sort_dir: sort_dir.map(SortDir::parse).unwrap_or_default(),
        }
    }
}

/// One page of listing results. `total` is the unfiltered row count,
/// independent of the pagination window.
#[derive(Debug)]
pub struct ListPage {
    pub total: i64,
    pub items: Vec<ImageRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_parse_fallback() {
        assert_eq!(SortKey::parse("name"), SortKey::Name);
        assert_eq!(SortKey::parse("size"), SortKey::Size);
        assert_eq!(SortKey::parse("date"), SortKey::Date);
        assert_eq!(SortKey::parse("id"), SortKey::Date);
        assert_eq!(SortKey::parse(""), SortKey::Date);
        assert_eq!(SortKey::parse("NAME"), SortKey::Date);
    }

    #[test]
    fn test_sort_key_column_mapping() {
        assert_eq!(SortKey::Name.column(), "original_name");
        assert_eq!(SortKey::Size.column(), "size");
        assert_eq!(SortKey::Date.column(), "upload_time");
    }

    #[test]
    fn test_sort_dir_parse() {
        assert_eq!(SortDir::parse("asc"), SortDir::Asc);
        assert_eq!(SortDir::parse("ASC"), SortDir::Asc);
        assert_eq!(SortDir::parse("desc"), SortDir::Desc);
        assert_eq!(SortDir::parse("sideways"), SortDir::Desc);
    }

    #[test]
    fn test_list_query_clamps() {
        let q = ListQuery::sanitize(Some(0), Some(-5), None, None);
        assert_eq!(q.limit, 1);
        assert_eq!(q.offset, 0);

        let q = ListQuery::sanitize(Some(1000), Some(30), Some("size"), Some("asc"));
        assert_eq!(q.limit, 100);
        assert_eq!(q.offset, 30);
        assert_eq!(q.sort_by, SortKey::Size);
        assert_eq!(q.sort_dir, SortDir::Asc);
    }

    #[test]
    fn test_list_query_defaults() {
        let q = ListQuery::sanitize(None, None, None, None);
        assert_eq!(q.limit, LIST_LIMIT_DEFAULT);
        assert_eq!(q.offset, 0);
        assert_eq!(q.sort_by, SortKey::Date);
        assert_eq!(q.sort_dir, SortDir::Desc);
    }

    #[test]
    fn test_public_url() {
        assert_eq!(public_url("abc123.jpg"), "/images/abc123.jpg");
    }
}
