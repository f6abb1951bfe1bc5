use std::collections::HashMap;
use crate::domain::{models::event::EventDraft, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-process event collection, keyed by id and kept in insertion order.
#[derive(Default)]
pub struct InMemoryEventRepo {
    events: RwLock<(Vec<String>, HashMap<String, EventDraft>)>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<EventDraft>) -> Self {
        let mut order = Vec::new();
        let mut by_id = HashMap::new();
        for event in events {
            if let Some(id) = event.id.clone() {
                if by_id.insert(id.clone(), event).is_none() {
                    order.push(id);
                }
            }
        }
        Self { events: RwLock::new((order, by_id)) }
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepo {
    async fn create(&self, event: &EventDraft) -> Result<EventDraft, AppError> {
        let id = event
            .id
            .clone()
            .ok_or_else(|| AppError::Validation("Event record has no id".into()))?;

        let mut guard = self.events.write().await;
        let (order, by_id) = &mut *guard;
        if by_id.contains_key(&id) {
            return Err(AppError::Conflict(format!("Event '{}' already exists", id)));
        }
        order.push(id.clone());
        by_id.insert(id, event.clone());
        Ok(event.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<EventDraft>, AppError> {
        Ok(self.events.read().await.1.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<EventDraft>, AppError> {
        let guard = self.events.read().await;
        let (order, by_id) = &*guard;
        Ok(order.iter().filter_map(|id| by_id.get(id).cloned()).collect())
    }

    async fn update(&self, event: &EventDraft) -> Result<EventDraft, AppError> {
        let id = event
            .id
            .as_deref()
            .ok_or_else(|| AppError::Validation("Event record has no id".into()))?;

        let mut guard = self.events.write().await;
        match guard.1.get_mut(id) {
            Some(existing) => {
                *existing = event.clone();
                Ok(event.clone())
            }
            None => Err(AppError::NotFound(format!("Event '{}' not found", id))),
        }
    }
}
