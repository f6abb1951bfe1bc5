use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use crate::api::dtos::{
    requests::{MediaTarget, MediaUploadRequest, StepAction, StepRequest},
    responses::{FieldUpdateResponse, MediaUploadResponse, SubmitResponse, WizardOptionsResponse},
};
use crate::domain::models::patch::DraftPatch;
use crate::domain::services::media::Upload;
use crate::domain::wizard::{
    editors::{basic::CATEGORIES, media},
    renderer::MountedEditor,
    session::SharedSession,
    store::EventFormStore,
};
use crate::error::AppError;
use crate::state::AppState;

async fn find_session(state: &AppState, session_id: &Uuid) -> Result<SharedSession, AppError> {
    state.sessions.get(session_id).await
        .ok_or_else(|| AppError::NotFound(format!("Wizard session '{}' not found", session_id)))
}

pub async fn open_request(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let store = EventFormStore::open_request(
        state.event_repo.clone(),
        state.draft_cache.clone(),
        &state.config.draft_cache_key,
        state.notifier.clone(),
        state.config.autosave_delay,
    ).await?;

    let (session_id, session) = state.sessions.open(store).await;
    let snapshot = session.lock().await.snapshot(session_id);
    Ok((StatusCode::CREATED, Json(snapshot)))
}

pub async fn open_edit(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let store = EventFormStore::open_edit(
        state.event_repo.clone(),
        &event_id,
        state.notifier.clone(),
        state.config.autosave_delay,
    ).await?;

    let (session_id, session) = state.sessions.open(store).await;
    let snapshot = session.lock().await.snapshot(session_id);
    Ok((StatusCode::CREATED, Json(snapshot)))
}

pub async fn get_wizard(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = find_session(&state, &session_id).await?;
    let mut session = session.lock().await;
    session.touch();
    Ok(Json(session.snapshot(session_id)))
}

pub async fn update_fields(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<DraftPatch>,
) -> Result<impl IntoResponse, AppError> {
    let session = find_session(&state, &session_id).await?;
    let mut session = session.lock().await;
    session.touch();

    let warnings = session.store.set_field(payload);
    Ok(Json(FieldUpdateResponse {
        snapshot: session.snapshot(session_id),
        warnings,
    }))
}

pub async fn change_step(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<StepRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = find_session(&state, &session_id).await?;
    let mut session = session.lock().await;
    session.touch();

    let step = match (payload.step, payload.action) {
        (Some(index), None) => session.go_to(index),
        (None, Some(StepAction::Next)) => session.next(),
        (None, Some(StepAction::Previous)) => session.previous(),
        _ => return Err(AppError::Validation("Provide exactly one of 'step' or 'action'".into())),
    };
    debug!("Session {} now on step {:?}", session_id, step);
    Ok(Json(session.snapshot(session_id)))
}

pub async fn reset_wizard(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = find_session(&state, &session_id).await?;
    let mut session = session.lock().await;
    session.touch();
    session.reset().await?;
    Ok(Json(session.snapshot(session_id)))
}

pub async fn submit_wizard(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = find_session(&state, &session_id).await?;
    let event = {
        let mut session = session.lock().await;
        session.touch();
        session.store.submit().await?
    };

    state.sessions.remove(&session_id).await;
    info!("Session {} closed after submit", session_id);
    Ok((StatusCode::CREATED, Json(SubmitResponse { event })))
}

pub async fn close_wizard(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.sessions.remove(&session_id).await
        .ok_or_else(|| AppError::NotFound(format!("Wizard session '{}' not found", session_id)))?;
    info!("Session {} discarded", session_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Reads an uploaded file through the mounted media editor. The read runs
/// without holding the session lock; a step change in the meantime cancels it.
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<MediaUploadRequest>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = STANDARD.decode(payload.content_base64.as_bytes())
        .map_err(|_| AppError::Validation("contentBase64 is not valid base64".into()))?;
    let max_bytes = state.config.max_image_bytes;
    if payload.target != MediaTarget::Archive && bytes.len() as u64 > max_bytes {
        return Err(AppError::Validation(format!(
            "{} is larger than the {} byte limit",
            payload.file_name, max_bytes
        )));
    }

    let shared = find_session(&state, &session_id).await?;
    let token = {
        let mut session = shared.lock().await;
        session.touch();
        match session.renderer.editor() {
            MountedEditor::Media(editor) => editor.cancellation(),
            other => {
                return Err(AppError::Validation(format!(
                    "Media uploads need the media step, session is on {:?}",
                    other.step()
                )));
            }
        }
    };

    let upload = Upload::new(payload.file_name, bytes);
    let update = match payload.target {
        MediaTarget::Cover => media::read_image(token.clone(), upload).await?
            .map(media::MediaUpdate::Cover),
        MediaTarget::Poster => media::read_image(token.clone(), upload).await?
            .map(media::MediaUpdate::Poster),
        MediaTarget::Gallery => media::read_gallery(token.clone(), vec![upload]).await?,
        MediaTarget::Archive => media::read_archive(token.clone(), upload.bytes, max_bytes).await?,
    };
    let update = update.ok_or(AppError::Cancelled)?;

    let mut guard = shared.lock().await;
    let session = &mut *guard;
    let applied = match session.renderer.editor_mut() {
        MountedEditor::Media(editor) => editor.apply_if_current(&mut session.store, &token, update),
        _ => false,
    };
    if !applied {
        return Err(AppError::Cancelled);
    }

    Ok(Json(MediaUploadResponse {
        snapshot: session.snapshot(session_id),
        applied,
    }))
}

pub async fn wizard_options(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(WizardOptionsResponse {
        categories: CATEGORIES.to_vec(),
        venues: state.venues.as_ref().clone(),
        audience: state.catalog.as_ref().clone(),
    }))
}
