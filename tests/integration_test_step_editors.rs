mod common;

use common::RecordingNotifier;
use digievent_backend::config::DEFAULT_DRAFT_CACHE_KEY;
use digievent_backend::domain::models::event::{DateRange, DayType, DraftField, EventType};
use digievent_backend::domain::wizard::{
    editors::{AudienceCatalog, AudienceEditor, BasicDetailsEditor, DateTimeEditor, LocationEditor},
    session::WizardSession,
    store::EventFormStore,
    steps::WizardStep,
};
use digievent_backend::infra::repositories::{
    memory_draft_cache::InMemoryDraftCache, memory_event_repo::InMemoryEventRepo,
};
use std::sync::Arc;
use std::time::Duration;

async fn request_store() -> EventFormStore {
    EventFormStore::open_request(
        Arc::new(InMemoryEventRepo::new()),
        Arc::new(InMemoryDraftCache::new()),
        DEFAULT_DRAFT_CACHE_KEY,
        Arc::new(RecordingNotifier::default()),
        Duration::from_millis(1000),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_basic_details_editor() {
    let mut store = request_store().await;
    let mut editor = BasicDetailsEditor::default();

    editor.set_title(&mut store, "Robo Wars");
    editor.set_category_query("comp");
    assert_eq!(editor.matching_categories(), vec!["competition"]);
    editor.set_category(&mut store, "competition");
    assert_eq!(editor.category_query(), "");

    editor.set_free(&mut store, false);
    editor.set_price(&mut store, " 150 ");
    assert_eq!(store.draft().title, "Robo Wars");
    assert_eq!(store.draft().category, "competition");
    assert!(!store.draft().is_free);
    assert_eq!(store.draft().price, "150");

    // Price stays but is no longer required once free again.
    editor.set_free(&mut store, true);
    assert_eq!(store.draft().price, "150");
    assert!(!store.missing_fields().contains(&DraftField::Price));
}

#[tokio::test]
async fn test_date_time_editor_orders_range() {
    let mut store = request_store().await;
    let mut editor = DateTimeEditor::default();

    editor.toggle_calendar();
    assert!(editor.is_calendar_open());
    editor.set_day_type(&mut store, DayType::MultiDay);
    assert!(!editor.is_calendar_open());

    editor.set_date_range(&mut store, "2024-06-05", "2024-06-02");
    assert_eq!(store.draft().date_range, Some(DateRange::new("2024-06-02", "2024-06-05")));

    editor.set_time(&mut store, "18:30");
    editor.set_duration(&mut store, " 2 ");
    assert_eq!(store.draft().time, "18:30");
    assert_eq!(store.draft().duration, "2");
    assert!(!store.missing_fields().contains(&DraftField::DateRange));
    assert!(!store.missing_fields().contains(&DraftField::Date));
}

#[tokio::test]
async fn test_location_editor_suggestions() {
    let mut store = request_store().await;
    let mut editor = LocationEditor::default();
    let venues = vec!["Main Auditorium".to_string(), "Seminar Hall A".to_string(), "Seminar Hall B".to_string()];

    editor.set_venue_query("seminar");
    assert_eq!(editor.venue_suggestions(&venues), vec!["Seminar Hall A", "Seminar Hall B"]);
    editor.set_venue(&mut store, "Seminar Hall B");
    assert_eq!(editor.venue_suggestions(&venues).len(), 3);

    editor.set_event_type(&mut store, EventType::Virtual);
    editor.set_virtual_link(&mut store, " https://meet.example.com/robo ");
    assert_eq!(store.draft().venue, "Seminar Hall B");
    assert_eq!(store.draft().virtual_link, "https://meet.example.com/robo");
    assert!(!store.missing_fields().contains(&DraftField::Venue));
}

#[tokio::test]
async fn test_audience_editor_keeps_courses_and_years_together() {
    let mut store = request_store().await;
    let catalog = AudienceCatalog::standard();
    let mut editor = AudienceEditor::default();

    editor.toggle_year(&mut store, "BTech", "2");
    editor.select_all_years(&mut store, &catalog, "MBA");
    assert_eq!(store.draft().course, vec!["BTech".to_string(), "MBA".to_string()]);
    assert_eq!(store.draft().year["MBA"], vec!["1".to_string(), "2".to_string()]);
    assert!(editor.is_expanded("MBA"));

    editor.toggle_year(&mut store, "BTech", "2");
    assert_eq!(store.draft().course, vec!["MBA".to_string()]);
    assert!(!store.draft().year.contains_key("BTech"));

    editor.clear_course(&mut store, "MBA");
    assert!(store.draft().course.is_empty());
    assert!(store.missing_fields().contains(&DraftField::Year));

    editor.toggle_department(&mut store, "CSE");
    editor.toggle_department(&mut store, "ECE");
    editor.toggle_department(&mut store, "CSE");
    assert_eq!(store.draft().department, vec!["ECE".to_string()]);

    editor.set_capacity(&mut store, " 60 ");
    assert_eq!(store.draft().capacity, "60");

    editor.set_search("mt");
    let names: Vec<&str> = editor.visible_courses(&catalog).iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["MTech"]);
}

#[tokio::test]
async fn test_session_navigation_mounts_matching_editor() {
    let mut session = WizardSession::new(request_store().await);
    assert_eq!(session.renderer.step(), WizardStep::BasicDetails);

    assert_eq!(session.next(), WizardStep::DateTime);
    assert_eq!(session.go_to(7), WizardStep::Audience);
    assert_eq!(session.renderer.step(), WizardStep::Audience);
    assert_eq!(session.previous(), WizardStep::Media);

    session.reset().await.unwrap();
    assert_eq!(session.renderer.step(), WizardStep::BasicDetails);
    assert_eq!(session.store.step(), WizardStep::BasicDetails);
}
