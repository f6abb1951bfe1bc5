use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;
use crate::domain::{
    models::{
        account::FieldError,
        event::{canonical_capacity, DraftField, EventDraft, EventStatus},
        notification::Notification,
        patch::DraftPatch,
        restriction::{RestrictionSet, RestrictionWarning},
        save_status::AutosaveState,
    },
    ports::{DraftCache, EventRepository, Notifier},
    services::{
        autosave::{CacheSink, CollectionSink, DebouncedSaver},
        restrictions::apply_restrictions,
        submission_gate, validation,
    },
    wizard::{steps::WizardStep, FormContext},
};
use crate::error::AppError;

pub enum FormMode {
    /// New event request; autosaves into the local draft cache.
    Request { cache: Arc<dyn DraftCache>, cache_key: String },
    /// Existing event; autosaves into the collection under its restrictions.
    Edit { original: EventDraft, restrictions: RestrictionSet },
}

/// Single owner of the in-progress draft for one wizard session.
pub struct EventFormStore {
    draft: EventDraft,
    step: WizardStep,
    mode: FormMode,
    saver: DebouncedSaver,
    repo: Arc<dyn EventRepository>,
    notifier: Arc<dyn Notifier>,
}

impl EventFormStore {
    /// Starts a request session, recovering an unfinished draft from the
    /// cache slot when one exists.
    pub async fn open_request(
        repo: Arc<dyn EventRepository>,
        cache: Arc<dyn DraftCache>,
        cache_key: &str,
        notifier: Arc<dyn Notifier>,
        autosave_delay: Duration,
    ) -> Result<Self, AppError> {
        let draft = match cache.load(cache_key).await? {
            Some(recovered) => {
                info!("Recovered cached event request draft '{}'", recovered.title);
                recovered
            }
            None => EventDraft::default(),
        };

        let sink = Arc::new(CacheSink::new(cache.clone(), cache_key));
        Ok(Self {
            draft,
            step: WizardStep::default(),
            mode: FormMode::Request { cache, cache_key: cache_key.to_string() },
            saver: DebouncedSaver::new(sink, autosave_delay),
            repo,
            notifier,
        })
    }

    /// Starts an edit session for `event_id`. A missing event is terminal for
    /// the session and is reported through the notifier.
    pub async fn open_edit(
        repo: Arc<dyn EventRepository>,
        event_id: &str,
        notifier: Arc<dyn Notifier>,
        autosave_delay: Duration,
    ) -> Result<Self, AppError> {
        let Some(original) = repo.find_by_id(event_id).await? else {
            warn!("Edit requested for unknown event {}", event_id);
            notifier.notify(Notification::destructive(
                "Event not found",
                format!("No event with id {} exists.", event_id),
            ));
            return Err(AppError::NotFound(format!("Event '{}' not found", event_id)));
        };

        let draft = EventDraft::hydrate(&original);
        let restrictions = RestrictionSet::for_existing(&draft);
        info!("Editing event {} ({} restricted fields)", event_id, restrictions.iter().count());

        let sink = Arc::new(CollectionSink::new(repo.clone()));
        Ok(Self {
            draft: draft.clone(),
            step: WizardStep::default(),
            mode: FormMode::Edit { original: draft, restrictions },
            saver: DebouncedSaver::new(sink, autosave_delay),
            repo,
            notifier,
        })
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn restrictions(&self) -> Option<&RestrictionSet> {
        match &self.mode {
            FormMode::Edit { restrictions, .. } => Some(restrictions),
            FormMode::Request { .. } => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        submission_gate::is_complete(&self.draft)
    }

    pub fn missing_fields(&self) -> Vec<DraftField> {
        submission_gate::missing_fields(&self.draft)
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        validation::field_errors(&self.draft)
    }

    pub fn save_state(&self) -> AutosaveState {
        self.saver.state()
    }

    pub fn subscribe_save_state(&self) -> watch::Receiver<AutosaveState> {
        self.saver.subscribe()
    }

    /// Merges `patch` into the draft after applying edit restrictions, then
    /// schedules an autosave. The live draft is updated immediately.
    pub fn set_field(&mut self, patch: DraftPatch) -> Vec<RestrictionWarning> {
        if patch.is_empty() {
            return Vec::new();
        }

        let (patch, warnings) = match &self.mode {
            FormMode::Edit { original, restrictions } => apply_restrictions(original, patch, restrictions),
            FormMode::Request { .. } => (patch, Vec::new()),
        };

        if !warnings.is_empty() {
            let description = warnings
                .iter()
                .map(RestrictionWarning::message)
                .collect::<Vec<_>>()
                .join("; ");
            self.notifier.notify(Notification::warning("Some changes were adjusted", description));
        }

        let touches_audience = patch.touches(DraftField::Year) || patch.touches(DraftField::Course);
        patch.merge_into(&mut self.draft);
        if touches_audience {
            self.draft.sync_audience();
        }

        self.saver.schedule_save(self.draft.clone());
        warnings
    }

    pub fn set_step(&mut self, index: usize) -> WizardStep {
        self.step = WizardStep::from_index(index);
        self.step
    }

    pub fn next_step(&mut self) -> WizardStep {
        self.step = self.step.next();
        self.step
    }

    pub fn previous_step(&mut self) -> WizardStep {
        self.step = self.step.prev();
        self.step
    }

    /// Discards the session's edits and returns to the first step. A request
    /// goes back to an empty draft and its cache slot is cleared. An edit goes
    /// back to the record as it was opened, which is written back to the
    /// collection over any autosaved changes.
    pub async fn reset(&mut self) -> Result<(), AppError> {
        self.saver.discard().await;
        self.step = WizardStep::default();
        match &self.mode {
            FormMode::Request { cache, cache_key } => {
                self.draft = EventDraft::default();
                cache.clear(cache_key).await?;
            }
            FormMode::Edit { original, .. } => {
                self.draft = original.clone();
                self.repo.update(original).await?;
            }
        }
        info!("Wizard draft reset");
        Ok(())
    }

    /// Finalizes the draft into a pending event record and hands it to the
    /// collection. The draft is discarded afterwards.
    pub async fn submit(&mut self) -> Result<EventDraft, AppError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(DraftField::as_str).collect();
            return Err(AppError::Validation(format!("Missing required fields: {}", names.join(", "))));
        }

        let errors = self.field_errors();
        if !errors.is_empty() {
            return Err(AppError::FieldErrors(errors));
        }

        // No autosave may land after the record is finalized.
        self.saver.discard().await;

        let mut record = self.draft.clone();
        record.status = EventStatus::Pending;
        record.capacity = canonical_capacity(&record.capacity);

        let saved = match self.finalize(record).await {
            Ok(saved) => saved,
            Err(e) => {
                // The draft is still valid; keep autosaving it.
                self.saver.schedule_save(self.draft.clone());
                return Err(e);
            }
        };

        info!("Event submitted: {:?}", saved.id);
        self.notifier.notify(Notification::info(
            "Event submitted",
            format!("'{}' is pending approval.", saved.title),
        ));

        self.after_submit(&saved);
        Ok(saved)
    }
}

impl EventFormStore {
    fn after_submit(&mut self, saved: &EventDraft) {
        self.step = WizardStep::default();
        match &mut self.mode {
            FormMode::Request { .. } => self.draft = EventDraft::default(),
            FormMode::Edit { original, .. } => {
                *original = saved.clone();
                self.draft = saved.clone();
            }
        }
    }

    async fn finalize(&self, mut record: EventDraft) -> Result<EventDraft, AppError> {
        match &self.mode {
            FormMode::Request { cache, cache_key } => {
                record.id = Some(Uuid::new_v4().to_string());
                record.created_at = Some(Utc::now());
                let created = self.repo.create(&record).await?;
                cache.clear(cache_key).await?;
                Ok(created)
            }
            FormMode::Edit { original, .. } => {
                record.id = original.id.clone();
                record.created_at = original.created_at;
                self.repo.update(&record).await
            }
        }
    }
}

impl FormContext for EventFormStore {
    fn draft(&self) -> &EventDraft {
        &self.draft
    }

    fn update_form_data(&mut self, patch: DraftPatch) {
        self.set_field(patch);
    }
}
