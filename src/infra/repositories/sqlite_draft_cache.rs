use crate::domain::{models::event::EventDraft, ports::DraftCache};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteDraftCache {
    pool: SqlitePool,
}

impl SqliteDraftCache {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DraftCache for SqliteDraftCache {
    async fn load(&self, key: &str) -> Result<Option<EventDraft>, AppError> {
        let payload = sqlx::query_scalar::<_, String>(
            "SELECT payload FROM draft_cache WHERE cache_key = ?",
        )
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        payload
            .map(|json| serde_json::from_str(&json).map_err(AppError::Serialization))
            .transpose()
    }

    async fn store(&self, key: &str, draft: &EventDraft) -> Result<(), AppError> {
        let payload = serde_json::to_string(draft)?;
        sqlx::query(
            r#"INSERT INTO draft_cache (cache_key, payload, updated_at) VALUES (?, ?, ?)
               ON CONFLICT(cache_key) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at"#
        )
            .bind(key)
            .bind(&payload)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM draft_cache WHERE cache_key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
