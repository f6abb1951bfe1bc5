use axum::{extract::Path, response::IntoResponse, Json};
use crate::api::dtos::responses::FormValidationResponse;
use crate::domain::models::account::{CreateOrganizerForm, EditOrganizerForm};
use crate::domain::services::account_forms::{validate_create, validate_edit};
use crate::error::AppError;
use tracing::debug;

pub async fn validate_new_organizer(
    Json(payload): Json<CreateOrganizerForm>,
) -> Result<impl IntoResponse, AppError> {
    let errors = validate_create(&payload);
    debug!("Organizer form for {} has {} errors", payload.email, errors.len());
    Ok(Json(FormValidationResponse { valid: errors.is_empty(), errors }))
}

pub async fn validate_existing_organizer(
    Path(organizer_id): Path<String>,
    Json(payload): Json<EditOrganizerForm>,
) -> Result<impl IntoResponse, AppError> {
    let errors = validate_edit(&payload);
    debug!("Edit form for organizer {} has {} errors", organizer_id, errors.len());
    Ok(Json(FormValidationResponse { valid: errors.is_empty(), errors }))
}
