use std::collections::HashMap;
use crate::domain::{models::event::EventDraft, ports::DraftCache};
use crate::error::AppError;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Drafts are stored serialized, the same way a browser storage slot holds
/// them, so a recovered draft goes through the JSON layout.
#[derive(Default)]
pub struct InMemoryDraftCache {
    slots: RwLock<HashMap<String, String>>,
}

impl InMemoryDraftCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftCache for InMemoryDraftCache {
    async fn load(&self, key: &str) -> Result<Option<EventDraft>, AppError> {
        let slots = self.slots.read().await;
        slots
            .get(key)
            .map(|json| serde_json::from_str(json).map_err(AppError::Serialization))
            .transpose()
    }

    async fn store(&self, key: &str, draft: &EventDraft) -> Result<(), AppError> {
        let json = serde_json::to_string(draft)?;
        self.slots.write().await.insert(key.to_string(), json);
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), AppError> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}
