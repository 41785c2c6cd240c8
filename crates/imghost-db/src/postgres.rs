//! Postgres-backed image store.

use async_trait::async_trait;
use imghost_core::models::{ImageRecord, ListPage, ListQuery, NewImage};
use imghost_core::AppError;
use sqlx::PgPool;

use crate::store::ImageStore;

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS images (
    id BIGSERIAL PRIMARY KEY,
    file_name TEXT NOT NULL UNIQUE,
    original_name TEXT NOT NULL,
    size BIGINT NOT NULL,
    upload_time TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    file_type TEXT NOT NULL
)
"#;

/// Image metadata repository over a shared connection pool.
///
/// Each operation acquires a pool connection for its single statement
/// (or two, for list); no locks are held across operations.
#[derive(Clone)]
pub struct PgImageStore {
    pool: PgPool,
}

impl PgImageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageStore for PgImageStore {
    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "create"))]
    async fn init(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    #[tracing::instrument(
        skip(self, image),
        fields(db.table = "images", db.operation = "insert", file_name = %image.file_name)
    )]
    async fn insert(&self, image: NewImage) -> Result<i64, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO images (file_name, original_name, size, file_type)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&image.file_name)
        .bind(&image.original_name)
        .bind(image.size)
        .bind(&image.file_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "select"))]
    async fn list(&self, query: ListQuery) -> Result<ListPage, AppError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM images")
            .fetch_one(&self.pool)
            .await?;

        // Sort column and direction come from closed enums, never from
        // raw client input, so interpolating them is injection-safe.
        let items_sql = format!(
            "SELECT id, file_name, original_name, size, upload_time, file_type \
             FROM images ORDER BY {} {} LIMIT $1 OFFSET $2",
            query.sort_by.column(),
            query.sort_dir.sql(),
        );

        let items: Vec<ImageRecord> = sqlx::query_as(&items_sql)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(ListPage { total, items })
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "select", image_id = id))]
    async fn get_by_id(&self, id: i64) -> Result<Option<ImageRecord>, AppError> {
        let record: Option<ImageRecord> = sqlx::query_as(
            "SELECT id, file_name, original_name, size, upload_time, file_type \
             FROM images WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "delete", image_id = id))]
    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use imghost_core::models::{SortDir, SortKey};

    /// Every sort combination must interpolate only known column and
    /// direction identifiers into the list statement.
    #[test]
    fn test_list_sql_uses_closed_identifiers() {
        for key in [SortKey::Name, SortKey::Size, SortKey::Date] {
            for dir in [SortDir::Asc, SortDir::Desc] {
                let sql = format!("ORDER BY {} {}", key.column(), dir.sql());
                assert!(
                    ["original_name", "size", "upload_time"]
                        .iter()
                        .any(|col| sql.contains(col)),
                    "unexpected column in {sql}"
                );
                assert!(sql.ends_with("ASC") || sql.ends_with("DESC"));
            }
        }
    }
}
