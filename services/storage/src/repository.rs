use chrono::Utc;
use mercato_data::{DataError, Pageable};
use sqlx::SqlitePool;

use crate::models::FileMetadata;

#[derive(Clone)]
pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<FileMetadata>, DataError> {
        let file = sqlx::query_as::<_, FileMetadata>("SELECT * FROM files WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(file)
    }

    pub async fn list_by_owner(
        &self,
        owner_id: i64,
        pageable: &Pageable,
    ) -> Result<(Vec<FileMetadata>, u64), DataError> {
        let files = sqlx::query_as::<_, FileMetadata>(
            "SELECT * FROM files WHERE owner_id = ? ORDER BY created_at DESC LIMIT ? OFFSET ?",
        )
        .bind(owner_id)
        .bind(pageable.limit() as i64)
        .bind(pageable.offset() as i64)
        .fetch_all(&self.pool)
        .await?;
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM files WHERE owner_id = ?")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;
        Ok((files, total as u64))
    }

    pub async fn insert(
        &self,
        id: &str,
        owner_id: i64,
        original_name: &str,
        content_type: &str,
        size: i64,
    ) -> Result<FileMetadata, DataError> {
        let file = sqlx::query_as::<_, FileMetadata>(
            "INSERT INTO files (id, owner_id, original_name, content_type, size, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(original_name)
        .bind(content_type)
        .bind(size)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(file)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DataError> {
        sqlx::query("DELETE FROM files WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
