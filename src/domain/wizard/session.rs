use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;
use crate::domain::models::{
    account::FieldError,
    event::{DraftField, EventDraft},
    restriction::RestrictionSet,
    save_status::AutosaveState,
};
use crate::domain::wizard::{
    renderer::{StepRenderer, StepView},
    steps::WizardStep,
    store::EventFormStore,
};
use crate::error::AppError;

/// One open wizard: the form store plus the editor currently on screen.
pub struct WizardSession {
    pub store: EventFormStore,
    pub renderer: StepRenderer,
    touched: Instant,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub session_id: Uuid,
    pub mode: &'static str,
    pub draft: EventDraft,
    pub step: StepView,
    pub is_complete: bool,
    pub missing_fields: Vec<DraftField>,
    pub field_errors: Vec<FieldError>,
    pub save: AutosaveState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<RestrictionSet>,
}

impl WizardSession {
    pub fn new(store: EventFormStore) -> Self {
        let renderer = StepRenderer::new(store.step());
        Self {
            store,
            renderer,
            touched: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.touched = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.touched.elapsed()
    }

    /// Moves the store to `step` and mounts the matching editor.
    pub fn go_to(&mut self, index: usize) -> WizardStep {
        let step = self.store.set_step(index);
        self.renderer.show(step);
        step
    }

    pub fn next(&mut self) -> WizardStep {
        let step = self.store.next_step();
        self.renderer.show(step);
        step
    }

    pub fn previous(&mut self) -> WizardStep {
        let step = self.store.previous_step();
        self.renderer.show(step);
        step
    }

    pub async fn reset(&mut self) -> Result<(), AppError> {
        self.store.reset().await?;
        self.renderer.show(self.store.step());
        Ok(())
    }

    pub fn snapshot(&self, session_id: Uuid) -> WizardSnapshot {
        let draft = self.store.draft().clone();
        WizardSnapshot {
            session_id,
            mode: if self.store.is_editing() { "edit" } else { "request" },
            step: self.renderer.view(&draft),
            is_complete: self.store.is_complete(),
            missing_fields: self.store.missing_fields(),
            field_errors: self.store.field_errors(),
            save: self.store.save_state(),
            restrictions: self.store.restrictions().cloned(),
            draft,
        }
    }
}

pub type SharedSession = Arc<Mutex<WizardSession>>;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, SharedSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self, store: EventFormStore) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(WizardSession::new(store)));
        self.sessions.lock().await.insert(id, session.clone());
        info!("Opened wizard session {}", id);
        (id, session)
    }

    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.lock().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.lock().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Drops sessions untouched for longer than `ttl`. Sessions busy with a
    /// request are skipped.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(guard) => guard.idle_for() < ttl,
            Err(_) => true,
        });
        before - sessions.len()
    }
}
