use crate::domain::models::{event::EventDraft, notification::Notification};
use crate::error::AppError;
use async_trait::async_trait;

/// The event collection the wizard reads originals from and hands finalized
/// records to.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &EventDraft) -> Result<EventDraft, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<EventDraft>, AppError>;
    async fn list(&self) -> Result<Vec<EventDraft>, AppError>;
    async fn update(&self, event: &EventDraft) -> Result<EventDraft, AppError>;
}

/// Key-value slot used to recover an unfinished request draft after a reload.
#[async_trait]
pub trait DraftCache: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<EventDraft>, AppError>;
    async fn store(&self, key: &str, draft: &EventDraft) -> Result<(), AppError>;
    async fn clear(&self, key: &str) -> Result<(), AppError>;
}

/// Target of a debounced autosave commit.
#[async_trait]
pub trait DraftSink: Send + Sync {
    async fn commit(&self, draft: &EventDraft) -> Result<(), AppError>;
}

/// Fire-and-forget toast surface.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
