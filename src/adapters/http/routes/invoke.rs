//! Gateway invocation endpoint.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};

use crate::{
    adapters::{
        gateway::{GatewayEvent, GatewayResponse, dispatch},
        http::app_state::AppState,
    },
    app_error::{AppError, AppResult},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/invoke", post(invoke))
}

/// POST /invoke
/// Answers 200 with the gateway response for any well-formed event; the
/// waitlist outcome is carried in `statusCode`. An event that cannot be read
/// is a JSON 500 like any other malformed body.
async fn invoke(
    State(app_state): State<AppState>,
    event: Result<Json<GatewayEvent>, JsonRejection>,
) -> AppResult<Json<GatewayResponse>> {
    let Json(event) = event
        .map_err(|rej| AppError::MalformedBody(rej.body_text()))
        .map_err(|err| app_state.config.error_disclosure.apply(err))?;

    Ok(Json(dispatch(app_state, event).await))
}
