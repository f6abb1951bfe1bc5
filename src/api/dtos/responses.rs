use serde::Serialize;
use crate::domain::models::{
    account::FieldError,
    event::EventDraft,
    restriction::RestrictionWarning,
};
use crate::domain::wizard::{editors::AudienceCatalog, session::WizardSnapshot};

#[derive(Serialize)]
pub struct FieldUpdateResponse {
    #[serde(flatten)]
    pub snapshot: WizardSnapshot,
    pub warnings: Vec<RestrictionWarning>,
}

#[derive(Serialize)]
pub struct MediaUploadResponse {
    #[serde(flatten)]
    pub snapshot: WizardSnapshot,
    pub applied: bool,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub event: EventDraft,
}

#[derive(Serialize)]
pub struct FormValidationResponse {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

#[derive(Serialize)]
pub struct WizardOptionsResponse {
    pub categories: Vec<&'static str>,
    pub venues: Vec<String>,
    pub audience: AudienceCatalog,
}
