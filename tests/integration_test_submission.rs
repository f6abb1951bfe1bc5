mod common;

use common::{approved_event, complete_draft, complete_patch, multi_day_event, RecordingNotifier, SlowCache, SlowRepo};
use digievent_backend::config::DEFAULT_DRAFT_CACHE_KEY;
use digievent_backend::domain::models::{
    event::{DraftField, EventDraft, EventStatus, EventType},
    notification::ToastVariant,
    patch::DraftPatch,
    save_status::SaveStatus,
};
use digievent_backend::domain::ports::{DraftCache, EventRepository};
use digievent_backend::domain::wizard::{steps::WizardStep, store::EventFormStore};
use digievent_backend::error::AppError;
use digievent_backend::infra::repositories::{
    memory_draft_cache::InMemoryDraftCache, memory_event_repo::InMemoryEventRepo,
};
use std::sync::Arc;
use std::time::Duration;

const DELAY: Duration = Duration::from_millis(1000);

struct RequestFixture {
    store: EventFormStore,
    repo: Arc<InMemoryEventRepo>,
    cache: Arc<InMemoryDraftCache>,
    notifier: Arc<RecordingNotifier>,
}

async fn request_fixture() -> RequestFixture {
    let repo = Arc::new(InMemoryEventRepo::new());
    let cache = Arc::new(InMemoryDraftCache::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let store = EventFormStore::open_request(
        repo.clone(),
        cache.clone(),
        DEFAULT_DRAFT_CACHE_KEY,
        notifier.clone(),
        DELAY,
    )
    .await
    .unwrap();
    RequestFixture { store, repo, cache, notifier }
}

#[tokio::test(start_paused = true)]
async fn test_request_flow_submit_creates_pending_event_and_clears_cache() {
    let mut fx = request_fixture().await;
    let mut rx = fx.store.subscribe_save_state();

    fx.store.set_field(complete_patch());
    rx.wait_for(|s| s.status == SaveStatus::Saved && s.commits == 1).await.unwrap();
    assert!(fx.cache.load(DEFAULT_DRAFT_CACHE_KEY).await.unwrap().is_some());
    assert!(fx.store.is_complete());

    let saved = fx.store.submit().await.unwrap();

    assert_eq!(saved.status, EventStatus::Pending);
    assert!(saved.id.is_some());
    assert!(saved.created_at.is_some());
    assert_eq!(fx.repo.list().await.unwrap(), vec![saved]);
    assert!(fx.cache.load(DEFAULT_DRAFT_CACHE_KEY).await.unwrap().is_none());

    assert_eq!(fx.store.draft(), &EventDraft::default());
    assert_eq!(fx.store.step(), WizardStep::BasicDetails);
    assert_eq!(fx.notifier.count(ToastVariant::Default), 1);
}

#[tokio::test(start_paused = true)]
async fn test_incomplete_draft_is_rejected() {
    let mut fx = request_fixture().await;
    fx.store.set_field(DraftPatch { title: Some("Half done".into()), ..Default::default() });

    let result = fx.store.submit().await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(fx.repo.list().await.unwrap().is_empty());
    assert_eq!(fx.store.draft().title, "Half done");
}

#[tokio::test(start_paused = true)]
async fn test_malformed_values_block_submit_with_field_errors() {
    let mut fx = request_fixture().await;
    let mut patch = complete_patch();
    patch.capacity = Some("plenty".into());
    patch.time = Some("25:99".into());
    fx.store.set_field(patch);
    assert!(fx.store.is_complete());

    match fx.store.submit().await {
        Err(AppError::FieldErrors(errors)) => {
            let fields: Vec<_> = errors.into_iter().map(|e| e.field).collect();
            assert_eq!(fields, vec!["capacity".to_string(), "time".to_string()]);
        }
        other => panic!("expected field errors, got {:?}", other.map(|d| d.title)),
    }
    assert!(fx.repo.list().await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cached_draft_is_recovered() {
    let repo = Arc::new(InMemoryEventRepo::new());
    let cache = Arc::new(InMemoryDraftCache::new());
    let cached = EventDraft { title: "Unfinished".into(), capacity: "30".into(), ..Default::default() };
    cache.store(DEFAULT_DRAFT_CACHE_KEY, &cached).await.unwrap();

    let store = EventFormStore::open_request(
        repo,
        cache,
        DEFAULT_DRAFT_CACHE_KEY,
        Arc::new(RecordingNotifier::default()),
        DELAY,
    )
    .await
    .unwrap();

    assert_eq!(store.draft(), &cached);
    assert!(!store.is_editing());
}

#[tokio::test(start_paused = true)]
async fn test_hydrate_normalizes_only_capacity() {
    let original = approved_event("evt-1", "0100");
    let repo = Arc::new(InMemoryEventRepo::with_events(vec![original.clone()]));
    let store = EventFormStore::open_edit(repo, "evt-1", Arc::new(RecordingNotifier::default()), DELAY)
        .await
        .unwrap();

    let expected = EventDraft { capacity: "100".into(), ..original };
    assert_eq!(store.draft(), &expected);
}

#[tokio::test(start_paused = true)]
async fn test_edit_submit_keeps_identity_and_resets_status() {
    let original = approved_event("evt-1", "100");
    let repo = Arc::new(InMemoryEventRepo::with_events(vec![original.clone()]));
    let mut store = EventFormStore::open_edit(repo.clone(), "evt-1", Arc::new(RecordingNotifier::default()), DELAY)
        .await
        .unwrap();

    store.set_field(DraftPatch { description: Some("Updated agenda".into()), ..Default::default() });
    let saved = store.submit().await.unwrap();

    assert_eq!(saved.id, original.id);
    assert_eq!(saved.created_at, original.created_at);
    assert_eq!(saved.status, EventStatus::Pending);

    let stored = repo.find_by_id("evt-1").await.unwrap().unwrap();
    assert_eq!(stored.description, "Updated agenda");
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_requirements_follow_discriminators() {
    let mut fx = request_fixture().await;
    fx.store.set_field(complete_patch());
    assert!(fx.store.missing_fields().is_empty());

    fx.store.set_field(DraftPatch { event_type: Some(EventType::Virtual), ..Default::default() });
    assert_eq!(fx.store.missing_fields(), vec![DraftField::VirtualLink]);

    fx.store.set_field(DraftPatch {
        virtual_link: Some("https://meet.example.com/fest".into()),
        is_free: Some(false),
        ..Default::default()
    });
    assert_eq!(fx.store.missing_fields(), vec![DraftField::Price]);

    let multi = multi_day_event("evt-9");
    let repo = Arc::new(InMemoryEventRepo::with_events(vec![multi]));
    let store = EventFormStore::open_edit(repo, "evt-9", Arc::new(RecordingNotifier::default()), DELAY)
        .await
        .unwrap();
    assert!(store.is_complete());
}

#[tokio::test(start_paused = true)]
async fn test_reset_discards_draft_and_pending_save() {
    let mut fx = request_fixture().await;
    fx.store.set_field(DraftPatch { title: Some("Scratch".into()), ..Default::default() });
    fx.store.next_step();
    assert_eq!(fx.store.save_state().status, SaveStatus::Saving);

    fx.store.reset().await.unwrap();

    assert_eq!(fx.store.draft(), &EventDraft::default());
    assert_eq!(fx.store.step(), WizardStep::BasicDetails);
    assert_eq!(fx.store.save_state().status, SaveStatus::Saved);

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(fx.cache.load(DEFAULT_DRAFT_CACHE_KEY).await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_complete_draft_helper_passes_gate() {
    let draft = complete_draft();
    assert!(digievent_backend::domain::services::submission_gate::is_complete(&draft));
    assert!(digievent_backend::domain::services::validation::field_errors(&draft).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_request_reset_clears_cache_slot() {
    let mut fx = request_fixture().await;
    let mut rx = fx.store.subscribe_save_state();
    fx.store.set_field(DraftPatch { title: Some("Scratch".into()), ..Default::default() });
    rx.wait_for(|s| s.status == SaveStatus::Saved && s.commits == 1).await.unwrap();
    assert!(fx.cache.load(DEFAULT_DRAFT_CACHE_KEY).await.unwrap().is_some());

    fx.store.reset().await.unwrap();
    assert!(fx.cache.load(DEFAULT_DRAFT_CACHE_KEY).await.unwrap().is_none());

    let reopened = EventFormStore::open_request(
        fx.repo.clone(),
        fx.cache.clone(),
        DEFAULT_DRAFT_CACHE_KEY,
        fx.notifier.clone(),
        DELAY,
    )
    .await
    .unwrap();
    assert_eq!(reopened.draft(), &EventDraft::default());
}

#[tokio::test(start_paused = true)]
async fn test_edit_reset_restores_original_and_keeps_autosaving() {
    let original = approved_event("evt-1", "100");
    let repo = Arc::new(InMemoryEventRepo::with_events(vec![original.clone()]));
    let mut store = EventFormStore::open_edit(repo.clone(), "evt-1", Arc::new(RecordingNotifier::default()), DELAY)
        .await
        .unwrap();
    let mut rx = store.subscribe_save_state();

    store.set_field(DraftPatch { title: Some("Renamed".into()), ..Default::default() });
    rx.wait_for(|s| s.status == SaveStatus::Saved && s.commits == 1).await.unwrap();
    assert_eq!(repo.find_by_id("evt-1").await.unwrap().unwrap().title, "Renamed");

    store.reset().await.unwrap();
    assert_eq!(store.draft(), &original);
    assert_eq!(store.step(), WizardStep::BasicDetails);
    assert_eq!(repo.find_by_id("evt-1").await.unwrap().unwrap(), original);

    store.set_field(DraftPatch { title: Some("After reset".into()), ..Default::default() });
    let state = rx.wait_for(|s| s.status != SaveStatus::Saving).await.unwrap().clone();
    assert_eq!(state.status, SaveStatus::Saved);

    let stored = repo.find_by_id("evt-1").await.unwrap().unwrap();
    assert_eq!(stored.title, "After reset");
    assert_eq!(stored.id, original.id);
    assert_eq!(stored.created_at, original.created_at);
}

#[tokio::test(start_paused = true)]
async fn test_submit_waits_for_in_flight_cache_write() {
    let repo = Arc::new(InMemoryEventRepo::new());
    let cache = Arc::new(SlowCache::new(Duration::from_millis(500)));
    let mut store = EventFormStore::open_request(
        repo.clone(),
        cache.clone(),
        DEFAULT_DRAFT_CACHE_KEY,
        Arc::new(RecordingNotifier::default()),
        DELAY,
    )
    .await
    .unwrap();

    store.set_field(complete_patch());
    // The cache write runs from 1000ms to 1500ms.
    tokio::time::sleep(Duration::from_millis(1100)).await;
    store.submit().await.unwrap();

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(cache.load(DEFAULT_DRAFT_CACHE_KEY).await.unwrap().is_none());
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_edit_submit_is_not_overwritten_by_in_flight_autosave() {
    let repo = Arc::new(SlowRepo::new(vec![approved_event("evt-1", "100")], Duration::from_millis(500)));
    let mut store = EventFormStore::open_edit(repo.clone(), "evt-1", Arc::new(RecordingNotifier::default()), DELAY)
        .await
        .unwrap();

    store.set_field(DraftPatch { description: Some("Updated agenda".into()), ..Default::default() });
    tokio::time::sleep(Duration::from_millis(1100)).await;
    store.submit().await.unwrap();

    tokio::time::sleep(Duration::from_secs(2)).await;
    let stored = repo.find_by_id("evt-1").await.unwrap().unwrap();
    assert_eq!(stored.status, EventStatus::Pending);
    assert_eq!(stored.description, "Updated agenda");
}

#[tokio::test(start_paused = true)]
async fn test_status_patch_does_not_reach_collection() {
    let rejected = EventDraft { status: EventStatus::Rejected, ..approved_event("evt-1", "100") };
    let repo = Arc::new(InMemoryEventRepo::with_events(vec![rejected]));
    let mut store = EventFormStore::open_edit(repo.clone(), "evt-1", Arc::new(RecordingNotifier::default()), DELAY)
        .await
        .unwrap();
    let mut rx = store.subscribe_save_state();

    let patch: DraftPatch = serde_json::from_str(r#"{"status":"approved","title":"Retitled"}"#).unwrap();
    store.set_field(patch);
    rx.wait_for(|s| s.status == SaveStatus::Saved && s.commits == 1).await.unwrap();

    let stored = repo.find_by_id("evt-1").await.unwrap().unwrap();
    assert_eq!(stored.title, "Retitled");
    assert_eq!(stored.status, EventStatus::Rejected);
}
