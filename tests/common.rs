#![allow(dead_code)]

use digievent_backend::{
    api::router::create_router,
    config::Config,
    domain::{
        models::{
            event::{DateRange, DayType, EventDraft, EventStatus, EventType},
            notification::{Notification, ToastVariant},
            patch::DraftPatch,
        },
        ports::{DraftCache, DraftSink, EventRepository, Notifier},
        wizard::{editors::AudienceCatalog, session::SessionRegistry},
    },
    error::AppError,
    infra::repositories::{memory_draft_cache::InMemoryDraftCache, memory_event_repo::InMemoryEventRepo},
    state::AppState,
};
use async_trait::async_trait;
use axum::Router;
use chrono::{TimeZone, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count(&self, variant: ToastVariant) -> usize {
        self.sent().iter().filter(|n| n.variant == variant).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}

/// Records every committed draft; optionally slow or failing.
#[derive(Default)]
pub struct RecordingSink {
    commits: Mutex<Vec<EventDraft>>,
    latency: Option<Duration>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slow(latency: Duration) -> Self {
        Self { latency: Some(latency), ..Default::default() }
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn commits(&self) -> Vec<EventDraft> {
        self.commits.lock().unwrap().clone()
    }
}

#[async_trait]
impl DraftSink for RecordingSink {
    async fn commit(&self, draft: &EventDraft) -> Result<(), AppError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.commits.lock().unwrap().push(draft.clone());
        if self.fail {
            return Err(AppError::InternalWithMsg("storage unavailable".into()));
        }
        Ok(())
    }
}

/// In-memory cache whose writes take `latency`.
pub struct SlowCache {
    inner: InMemoryDraftCache,
    latency: Duration,
}

impl SlowCache {
    pub fn new(latency: Duration) -> Self {
        Self { inner: InMemoryDraftCache::new(), latency }
    }
}

#[async_trait]
impl DraftCache for SlowCache {
    async fn load(&self, key: &str) -> Result<Option<EventDraft>, AppError> {
        self.inner.load(key).await
    }

    async fn store(&self, key: &str, draft: &EventDraft) -> Result<(), AppError> {
        tokio::time::sleep(self.latency).await;
        self.inner.store(key, draft).await
    }

    async fn clear(&self, key: &str) -> Result<(), AppError> {
        self.inner.clear(key).await
    }
}

/// In-memory event collection whose updates take `latency`.
pub struct SlowRepo {
    inner: InMemoryEventRepo,
    latency: Duration,
}

impl SlowRepo {
    pub fn new(events: Vec<EventDraft>, latency: Duration) -> Self {
        Self { inner: InMemoryEventRepo::with_events(events), latency }
    }
}

#[async_trait]
impl EventRepository for SlowRepo {
    async fn create(&self, event: &EventDraft) -> Result<EventDraft, AppError> {
        self.inner.create(event).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<EventDraft>, AppError> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self) -> Result<Vec<EventDraft>, AppError> {
        self.inner.list().await
    }

    async fn update(&self, event: &EventDraft) -> Result<EventDraft, AppError> {
        tokio::time::sleep(self.latency).await;
        self.inner.update(event).await
    }
}

/// Every field the submission gate asks for, with well-formed values.
pub fn complete_patch() -> DraftPatch {
    let mut year = BTreeMap::new();
    year.insert("BTech".to_string(), vec!["1".to_string(), "2".to_string()]);
    DraftPatch {
        title: Some("Tech Fest".into()),
        description: Some("Annual technical festival".into()),
        category: Some("technical".into()),
        day_type: Some(DayType::SingleDay),
        date: Some("2024-05-01".into()),
        time: Some("10:00".into()),
        duration: Some("3".into()),
        is_free: Some(true),
        event_type: Some(EventType::Physical),
        venue: Some("Main Auditorium".into()),
        cover_image: Some("data:image/png;base64,AAAA".into()),
        year: Some(year),
        department: Some(vec!["CSE".into()]),
        capacity: Some("120".into()),
        ..Default::default()
    }
}

pub fn complete_draft() -> EventDraft {
    let mut draft = EventDraft::default();
    complete_patch().merge_into(&mut draft);
    draft.sync_audience();
    draft
}

pub fn approved_event(id: &str, capacity: &str) -> EventDraft {
    EventDraft {
        id: Some(id.to_string()),
        status: EventStatus::Approved,
        capacity: capacity.to_string(),
        created_at: Some(Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap()),
        organizer: "org-7".into(),
        ..complete_draft()
    }
}

pub fn multi_day_event(id: &str) -> EventDraft {
    EventDraft {
        id: Some(id.to_string()),
        day_type: DayType::MultiDay,
        date: String::new(),
        date_range: Some(DateRange::new("2024-06-01", "2024-06-03")),
        is_free: false,
        price: "250".into(),
        ..complete_draft()
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "memory".to_string(),
        port: 0,
        autosave_delay: Duration::from_millis(1000),
        ..Config::default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub event_repo: Arc<InMemoryEventRepo>,
    pub draft_cache: Arc<InMemoryDraftCache>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_events(Vec::new()).await
    }

    pub async fn with_events(events: Vec<EventDraft>) -> Self {
        let event_repo = Arc::new(InMemoryEventRepo::with_events(events));
        let draft_cache = Arc::new(InMemoryDraftCache::new());
        let notifier = Arc::new(RecordingNotifier::default());

        let state = Arc::new(AppState {
            config: test_config(),
            event_repo: event_repo.clone(),
            draft_cache: draft_cache.clone(),
            notifier: notifier.clone(),
            sessions: Arc::new(SessionRegistry::new()),
            catalog: Arc::new(AudienceCatalog::standard()),
            venues: Arc::new(vec!["Main Auditorium".to_string(), "Seminar Hall A".to_string()]),
        });

        let router = create_router(state.clone());

        Self {
            router,
            state,
            event_repo,
            draft_cache,
            notifier,
        }
    }
}
