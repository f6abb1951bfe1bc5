pub mod editors;
pub mod renderer;
pub mod session;
pub mod steps;
pub mod store;

use crate::domain::models::{event::EventDraft, patch::DraftPatch};

/// What a step editor sees of the wizard: the current draft and a way to
/// send patches upward. Editors never hold the draft themselves.
pub trait FormContext {
    fn draft(&self) -> &EventDraft;
    fn update_form_data(&mut self, patch: DraftPatch);
}
