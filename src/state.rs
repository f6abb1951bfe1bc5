use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{DraftCache, EventRepository, Notifier};
use crate::domain::wizard::{editors::AudienceCatalog, session::SessionRegistry};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub draft_cache: Arc<dyn DraftCache>,
    pub notifier: Arc<dyn Notifier>,
    pub sessions: Arc<SessionRegistry>,
    pub catalog: Arc<AudienceCatalog>,
    pub venues: Arc<Vec<String>>,
}
