//! Waitlist routes: stats, join, and CORS preflight on a single path.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::WaitlistEntry,
};

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, X-User-Id";
pub const PREFLIGHT_MAX_AGE_SECS: &str = "86400";

#[derive(Serialize)]
struct JoinResponse {
    success: bool,
    user: WaitlistEntry,
    #[serde(rename = "isNew")]
    is_new: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(stats)
                .post(join)
                .options(preflight)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
}

/// OPTIONS /
/// Never touches the database, even when none is configured.
async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
            (header::ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE_SECS),
        ],
    )
}

/// GET /
async fn stats(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = app_state
        .waitlist_use_cases
        .stats()
        .await
        .map_err(|err| app_state.config.error_disclosure.apply(err))?;

    Ok(Json(stats))
}

/// POST /
/// The body is read raw so malformed JSON, and a body over the size limit,
/// surface as an `AppError` rather than an extractor rejection.
async fn join(
    State(app_state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<impl IntoResponse> {
    let disclosure = app_state.config.error_disclosure;
    let body = body
        .map_err(|rej| AppError::MalformedBody(rej.body_text()))
        .map_err(|err| disclosure.apply(err))?;

    let outcome = app_state
        .waitlist_use_cases
        .join(&body)
        .await
        .map_err(|err| disclosure.apply(err))?;

    Ok(Json(JoinResponse {
        success: true,
        user: outcome.entry,
        is_new: outcome.is_new,
    }))
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
