//! Router and request handlers.

use crate::error::AppError;
use crate::render::PageView;
use crate::session_cookie;
use crate::state::AppState;
use axum::extract::{Form, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use daytrip_application::{PlannerSession, RecommendationOutcome};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api-key", post(submit_api_key))
        .route("/recommendations", post(submit_preferences))
        .route("/api/itinerary", post(api_itinerary))
        .route("/healthz", get(healthz))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ApiKeyForm {
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct PreferenceForm {
    #[serde(default)]
    pub preferences: String,
}

/// Resolves the caller's session. The second value is `Some` when a new
/// cookie has to be sent back.
async fn resolve_session(
    state: &AppState,
    headers: &HeaderMap,
) -> (Arc<Mutex<PlannerSession>>, Option<String>) {
    let requested = session_cookie::read(headers);
    let (id, session) = state.service.open_session(requested).await;
    let set_cookie = (requested != Some(id)).then(|| session_cookie::build(id));
    (session, set_cookie)
}

fn with_cookie(mut response: Response, set_cookie: Option<String>) -> Response {
    if let Some(cookie) = set_cookie {
        match cookie.parse() {
            Ok(value) => {
                response.headers_mut().insert(SET_COOKIE, value);
            }
            Err(e) => tracing::error!("[Web] Invalid session cookie header: {}", e),
        }
    }
    response
}

fn page_response(html: String, set_cookie: Option<String>) -> Response {
    with_cookie(Html(html).into_response(), set_cookie)
}

/// Never waits on the session lock. A refresh during a slow completion gets
/// a placeholder page instead of hanging until the provider answers.
async fn index(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let (session, set_cookie) = resolve_session(&state, &headers).await;

    let view = match session.try_lock() {
        Ok(session) => PageView::for_session(state.service.city(), &session),
        Err(_) => {
            tracing::debug!("[Web] Session busy, rendering placeholder page");
            PageView::busy(state.service.city())
        }
    };
    let html = state.renderer.render(&view)?;
    Ok(page_response(html, set_cookie))
}

async fn submit_api_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ApiKeyForm>,
) -> Result<Response, AppError> {
    let (session, set_cookie) = resolve_session(&state, &headers).await;
    let mut session = session.lock().await;

    let status = state.service.set_api_key(&mut session, &form.api_key);
    let view = PageView::for_session(state.service.city(), &session).with_credential_status(status);
    let html = state.renderer.render(&view)?;
    Ok(page_response(html, set_cookie))
}

async fn submit_preferences(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PreferenceForm>,
) -> Result<Response, AppError> {
    let (session, set_cookie) = resolve_session(&state, &headers).await;
    let mut session = session.lock().await;

    let outcome = state.service.recommend(&mut session, &form.preferences).await?;

    // Built after the call so the history panel includes this completion.
    let view = PageView::for_session(state.service.city(), &session)
        .with_preference(&form.preferences)
        .with_outcome(outcome, session.last_preference());
    let html = state.renderer.render(&view)?;
    Ok(page_response(html, set_cookie))
}

/// JSON variant of `/recommendations`. POST only: every call is billed and
/// lands in the session transcript.
async fn api_itinerary(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PreferenceForm>,
) -> Result<Response, AppError> {
    let (session, set_cookie) = resolve_session(&state, &headers).await;
    let mut session = session.lock().await;

    let outcome = state.service.recommend(&mut session, &form.preferences).await?;
    let warning = outcome.warning().unwrap_or_default();
    let response = match outcome {
        RecommendationOutcome::Itinerary(itinerary) => Json(itinerary).into_response(),
        RecommendationOutcome::MissingCredential => {
            error_response(StatusCode::BAD_REQUEST, "missing_credential", warning)
        }
        RecommendationOutcome::EmptyPreference => {
            error_response(StatusCode::BAD_REQUEST, "empty_preference", warning)
        }
        RecommendationOutcome::ParseFailed { error, raw } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "parse_failed",
                "message": error.to_string(),
                "raw": raw,
            })),
        )
            .into_response(),
        RecommendationOutcome::ProviderFailed(e) => {
            error_response(StatusCode::BAD_GATEWAY, "provider_failed", e.to_string())
        }
    };

    Ok(with_cookie(response, set_cookie))
}

fn error_response(status: StatusCode, code: &str, message: String) -> Response {
    (status, Json(json!({ "error": code, "message": message }))).into_response()
}

async fn healthz() -> &'static str {
    "ok"
}

async fn fallback_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 Not Found")
}

