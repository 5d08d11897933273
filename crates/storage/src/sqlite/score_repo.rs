use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{BEST_SCORE_KEY, ScoreStore, StorageError, parse_score};

use super::SqliteRepository;

#[async_trait]
impl ScoreStore for SqliteRepository {
    async fn read_best(&self) -> Result<u32, StorageError> {
        let row = sqlx::query("SELECT value FROM app_state WHERE key = ?1")
            .bind(BEST_SCORE_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(0);
        };

        let value: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        Ok(parse_score(Some(&value)))
    }

    async fn write_best(&self, score: u32) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO app_state (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value
            ",
        )
        .bind(BEST_SCORE_KEY)
        .bind(score.to_string())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
