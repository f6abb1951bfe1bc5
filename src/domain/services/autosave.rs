use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, info_span, Instrument};
use crate::domain::{
    models::{
        event::EventDraft,
        save_status::{AutosaveState, SavePhase, SaveStatus},
    },
    ports::{DraftCache, DraftSink, EventRepository},
};
use crate::error::AppError;

/// Trailing-edge debounce in front of a [`DraftSink`].
///
/// Every `schedule_save` bumps the revision, marks the status `saving` and
/// re-arms a single timer. When the timer fires the commit runs in its own
/// task, so re-arming never interrupts a commit already in flight. Only the
/// commit of the latest revision may report `saved` or `error`.
///
/// Commits are serialized through `commit_gate`. A commit whose revision is
/// no longer current when it acquires the gate is skipped without writing.
pub struct DebouncedSaver {
    sink: Arc<dyn DraftSink>,
    delay: Duration,
    state: Arc<watch::Sender<AutosaveState>>,
    commit_gate: Arc<Mutex<()>>,
    pending: Option<JoinHandle<()>>,
}

impl DebouncedSaver {
    pub fn new(sink: Arc<dyn DraftSink>, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(AutosaveState::default());
        Self {
            sink,
            delay,
            state: Arc::new(tx),
            commit_gate: Arc::new(Mutex::new(())),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> AutosaveState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AutosaveState> {
        self.state.subscribe()
    }

    pub fn schedule_save(&mut self, draft: EventDraft) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }

        let mut revision = 0;
        self.state.send_modify(|s| {
            s.revision += 1;
            s.status = SaveStatus::Saving;
            s.phase = SavePhase::Pending;
            revision = s.revision;
        });
        debug!("Autosave armed for revision {} ({:?})", revision, self.delay);

        let sink = self.sink.clone();
        let state = self.state.clone();
        let gate = self.commit_gate.clone();
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            let span = info_span!("autosave_commit", revision);
            tokio::spawn(commit(sink, state, gate, draft, revision).instrument(span));
        }));
    }

    /// Drops a pending (not yet committing) save and reports `saved`.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
        self.state.send_modify(|s| {
            // Invalidates any commit already in flight.
            s.revision += 1;
            s.status = SaveStatus::Saved;
            s.phase = SavePhase::Idle;
        });
    }

    /// Like [`cancel`](Self::cancel), but also waits for a commit that is
    /// already writing. Once this returns the sink sees no further writes
    /// until the next `schedule_save`.
    pub async fn discard(&mut self) {
        self.cancel();
        let _gate = self.commit_gate.lock().await;
    }
}

impl Drop for DebouncedSaver {
    fn drop(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }
}

async fn commit(
    sink: Arc<dyn DraftSink>,
    state: Arc<watch::Sender<AutosaveState>>,
    gate: Arc<Mutex<()>>,
    draft: EventDraft,
    revision: u64,
) {
    let _gate = gate.lock().await;
    if state.borrow().revision != revision {
        debug!("Skipping superseded autosave revision {}", revision);
        return;
    }

    state.send_modify(|s| s.phase = SavePhase::Committing);

    let result = sink.commit(&draft).await;
    if let Err(e) = &result {
        error!("Autosave commit failed: {}", e);
    }

    state.send_modify(|s| {
        s.commits += 1;
        if s.revision != revision {
            return;
        }
        s.phase = SavePhase::Idle;
        match &result {
            Ok(()) => {
                s.status = SaveStatus::Saved;
                s.last_saved_at = Some(Utc::now().to_rfc3339());
            }
            Err(_) => s.status = SaveStatus::Error,
        }
    });

    if result.is_ok() {
        info!("Autosaved draft revision {}", revision);
    }
}

/// Request flow: the draft lives in the local cache slot until submitted.
pub struct CacheSink {
    cache: Arc<dyn DraftCache>,
    key: String,
}

impl CacheSink {
    pub fn new(cache: Arc<dyn DraftCache>, key: impl Into<String>) -> Self {
        Self { cache, key: key.into() }
    }
}

#[async_trait]
impl DraftSink for CacheSink {
    async fn commit(&self, draft: &EventDraft) -> Result<(), AppError> {
        self.cache.store(&self.key, draft).await
    }
}

/// Edit flow: changes are written straight back to the event collection.
pub struct CollectionSink {
    repo: Arc<dyn EventRepository>,
}

impl CollectionSink {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl DraftSink for CollectionSink {
    async fn commit(&self, draft: &EventDraft) -> Result<(), AppError> {
        self.repo.update(draft).await.map(|_| ())
    }
}
