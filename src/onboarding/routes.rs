//! REST endpoints for the onboarding form — the thin adapter between the
//! static marketing pages and the engine.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::error::Error;

use super::engine::{FormEngine, NavOutcome, SubmitOutcome, UploadOutcome};
use super::model::{FileUpload, PackageQuery, StepInput};

/// Uploads are bounded well above the 5MB logo cap; validation produces
/// the friendly message, this limit only stops abuse.
const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Shared state for onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub engine: Arc<FormEngine>,
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/onboarding/session", post(open_session))
        .route(
            "/api/onboarding/{session}",
            get(current_view).delete(reset_session),
        )
        .route("/api/onboarding/{session}/next", post(next_step))
        .route("/api/onboarding/{session}/previous", post(previous_step))
        .route("/api/onboarding/{session}/step/{step}", post(go_to_step))
        .route("/api/onboarding/{session}/capture", post(capture))
        .route("/api/onboarding/{session}/field", post(check_field))
        .route(
            "/api/onboarding/{session}/logo",
            post(upload_logo).delete(remove_logo),
        )
        .route("/api/onboarding/{session}/submit", post(submit))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "bluenode-onboarding"
    }))
}

/// POST /api/onboarding/session?package=…&type=…&pages=…
///
/// Open a session for a package selection and return the first view.
async fn open_session(
    State(state): State<OnboardingRouteState>,
    Query(query): Query<PackageQuery>,
) -> impl IntoResponse {
    let (session, view) = state.engine.open(&query).await;
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "session": session, "view": view })),
    )
}

/// GET /api/onboarding/{session}
async fn current_view(
    State(state): State<OnboardingRouteState>,
    Path(session): Path<String>,
) -> Response {
    match state.engine.resume(&session).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/onboarding/{session} — discard the session's answers and
/// start over.
async fn reset_session(
    State(state): State<OnboardingRouteState>,
    Path(session): Path<String>,
) -> Response {
    match state.engine.reset(&session).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/onboarding/{session}/next
async fn next_step(
    State(state): State<OnboardingRouteState>,
    Path(session): Path<String>,
    Json(input): Json<StepInput>,
) -> Response {
    match state.engine.next_step(&session, &input).await {
        Ok(NavOutcome::Moved { view }) => Json(view).into_response(),
        Ok(NavOutcome::Invalid { errors }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "errors": errors })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/onboarding/{session}/previous
async fn previous_step(
    State(state): State<OnboardingRouteState>,
    Path(session): Path<String>,
) -> Response {
    match state.engine.previous_step(&session).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/onboarding/{session}/step/{step} — the summary's edit links.
async fn go_to_step(
    State(state): State<OnboardingRouteState>,
    Path((session, step)): Path<(String, u8)>,
) -> Response {
    match state.engine.go_to_step(&session, step).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/onboarding/{session}/capture — debounced autosave.
async fn capture(
    State(state): State<OnboardingRouteState>,
    Path(session): Path<String>,
    Json(input): Json<StepInput>,
) -> Response {
    match state.engine.capture(&session, &input).await {
        Ok(ack) => Json(ack).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
struct FieldCheckBody {
    name: String,
    #[serde(default)]
    value: String,
}

/// POST /api/onboarding/{session}/field — advisory inline validation.
async fn check_field(
    State(state): State<OnboardingRouteState>,
    Path(session): Path<String>,
    Json(body): Json<FieldCheckBody>,
) -> Response {
    match state.engine.check_field(&session, &body.name, &body.value).await {
        Ok(check) => Json(check).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/onboarding/{session}/logo — multipart logo upload.
async fn upload_logo(
    State(state): State<OnboardingRouteState>,
    Path(session): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let mut upload: Option<FileUpload> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let Some(file_name) = field.file_name().map(String::from) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        match field.bytes().await {
            Ok(bytes) => {
                upload = Some(FileUpload {
                    file_name,
                    content_type,
                    data: bytes.to_vec(),
                });
                break;
            }
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": e.to_string() })),
                )
                    .into_response();
            }
        }
    }

    let Some(upload) = upload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "No file in upload" })),
        )
            .into_response();
    };

    match state.engine.attach_logo(&session, upload).await {
        Ok(outcome @ UploadOutcome::Stored { .. }) => Json(outcome).into_response(),
        Ok(UploadOutcome::Rejected { errors }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "errors": errors })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/onboarding/{session}/logo
async fn remove_logo(
    State(state): State<OnboardingRouteState>,
    Path(session): Path<String>,
) -> Response {
    match state.engine.remove_logo(&session).await {
        Ok(ack) => Json(ack).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/onboarding/{session}/submit
async fn submit(
    State(state): State<OnboardingRouteState>,
    Path(session): Path<String>,
    Json(input): Json<StepInput>,
) -> Response {
    match state.engine.submit(&session, &input).await {
        Ok(outcome @ SubmitOutcome::Redirect { .. }) => Json(outcome).into_response(),
        Ok(SubmitOutcome::Invalid { errors }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "errors": errors })),
        )
            .into_response(),
        Ok(outcome @ SubmitOutcome::InFlight) => {
            (StatusCode::CONFLICT, Json(outcome)).into_response()
        }
        Ok(outcome @ SubmitOutcome::Failed { .. }) => {
            (StatusCode::BAD_GATEWAY, Json(outcome)).into_response()
        }
        Err(e) => error_response(e),
    }
}

fn error_response(error: Error) -> Response {
    let status = match error {
        Error::UnknownSession(_) | Error::UnknownStep(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(serde_json::json!({ "error": error.to_string() })),
    )
        .into_response()
}
