use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, wizard, event, organizer};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Wizard sessions
        .route("/api/v1/wizard/options", get(wizard::wizard_options))
        .route("/api/v1/wizard/request", post(wizard::open_request))
        .route("/api/v1/wizard/edit/{event_id}", post(wizard::open_edit))
        .route("/api/v1/wizard/{session_id}", get(wizard::get_wizard).patch(wizard::update_fields).delete(wizard::close_wizard))
        .route("/api/v1/wizard/{session_id}/step", put(wizard::change_step))
        .route("/api/v1/wizard/{session_id}/reset", post(wizard::reset_wizard))
        .route("/api/v1/wizard/{session_id}/submit", post(wizard::submit_wizard))
        .route("/api/v1/wizard/{session_id}/media", post(wizard::upload_media))

        // Event collection
        .route("/api/v1/events", get(event::list_events))
        .route("/api/v1/events/{event_id}", get(event::get_event))

        // Organizer account forms
        .route("/api/v1/organizers/validate", post(organizer::validate_new_organizer))
        .route("/api/v1/organizers/{organizer_id}/validate", put(organizer::validate_existing_organizer))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
