use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{ScoreRepository, StorageError};

use super::SqliteRepository;

#[async_trait]
impl ScoreRepository for SqliteRepository {
    async fn get_score(&self, key: &str) -> Result<Option<u32>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT value
            FROM scores
            WHERE key = ?1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: i64 = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        u32::try_from(value)
            .map(Some)
            .map_err(|_| StorageError::Serialization(format!("score out of range: {value}")))
    }

    async fn set_score(&self, key: &str, value: u32) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO scores (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(i64::from(value))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
