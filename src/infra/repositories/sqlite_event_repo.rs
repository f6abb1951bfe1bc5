use crate::domain::{models::event::EventDraft, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Events are kept as their JSON layout, with the columns the admin tables
/// filter on pulled out next to it.
pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn record_id(event: &EventDraft) -> Result<&str, AppError> {
    event
        .id
        .as_deref()
        .ok_or_else(|| AppError::Validation("Event record has no id".into()))
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &EventDraft) -> Result<EventDraft, AppError> {
        let id = record_id(event)?;
        let payload = serde_json::to_string(event)?;

        sqlx::query(
            "INSERT INTO events (id, title, organizer, status, created_at, payload) VALUES (?, ?, ?, ?, ?, ?)"
        )
            .bind(id)
            .bind(&event.title)
            .bind(&event.organizer)
            .bind(event.status.as_str())
            .bind(event.created_at)
            .bind(&payload)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(event.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<EventDraft>, AppError> {
        let payload = sqlx::query_scalar::<_, String>(
            "SELECT payload FROM events WHERE id = ?",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        payload
            .map(|json| serde_json::from_str(&json).map_err(AppError::Serialization))
            .transpose()
    }

    async fn list(&self) -> Result<Vec<EventDraft>, AppError> {
        let payloads = sqlx::query_scalar::<_, String>(
            "SELECT payload FROM events ORDER BY created_at, id",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        payloads
            .iter()
            .map(|json| serde_json::from_str(json).map_err(AppError::Serialization))
            .collect()
    }

    async fn update(&self, event: &EventDraft) -> Result<EventDraft, AppError> {
        let id = record_id(event)?;
        let payload = serde_json::to_string(event)?;

        let result = sqlx::query(
            "UPDATE events SET title = ?, organizer = ?, status = ?, created_at = ?, payload = ? WHERE id = ?"
        )
            .bind(&event.title)
            .bind(&event.organizer)
            .bind(event.status.as_str())
            .bind(event.created_at)
            .bind(&payload)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Event '{}' not found", id)));
        }
        Ok(event.clone())
    }
}
