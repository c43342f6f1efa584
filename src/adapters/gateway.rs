//! Serverless gateway bridge.
//!
//! Function gateways hand the service a JSON event (`httpMethod`, `body`,
//! `headers`, ...) and expect a JSON reply (`statusCode`, `headers`, `body`,
//! `isBase64Encoded`). `dispatch` converts the event into an HTTP request,
//! runs it through the same router the server mounts, and folds the response
//! back into that shape.

use std::collections::{BTreeMap, HashMap};

use axum::{
    body::{Body, to_bytes},
    http::{HeaderName, HeaderValue, Method, Request, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower::ServiceExt;
use tracing::{debug, instrument};

use crate::{
    adapters::http::{app_state::AppState, routes::waitlist},
    app_error::AppError,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub request_context: Option<serde_json::Value>,
}

fn default_method() -> String {
    "GET".to_string()
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

#[instrument(skip_all, fields(method = %event.http_method))]
pub async fn dispatch(app_state: AppState, event: GatewayEvent) -> GatewayResponse {
    let response = match build_request(event) {
        Ok(request) => match waitlist::router().with_state(app_state).oneshot(request).await {
            Ok(response) => response,
            Err(infallible) => match infallible {},
        },
        Err(err) => with_envelope_headers(err.into_response()),
    };

    into_gateway_response(response).await
}

fn build_request(event: GatewayEvent) -> Result<Request<Body>, AppError> {
    let method = Method::from_bytes(event.http_method.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| AppError::MethodNotAllowed)?;

    if let Some(params) = &event.query_string_parameters {
        debug!(count = params.len(), "Ignoring query string parameters");
    }

    let mut request = Request::builder()
        .method(method)
        .uri("/")
        .body(Body::from(event.body.unwrap_or_default()))
        .map_err(|e| AppError::Internal(e.to_string()))?;

    for (name, value) in event.headers.unwrap_or_default() {
        // Headers that are not valid HTTP are dropped; none of them affect routing.
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            request.headers_mut().append(name, value);
        }
    }

    Ok(request)
}

// Responses built outside the router miss the headers its layers add.
fn with_envelope_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers
        .entry(header::CONTENT_TYPE)
        .or_insert(HeaderValue::from_static("application/json"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

async fn into_gateway_response(response: Response) -> GatewayResponse {
    let (parts, body) = response.into_parts();

    let body = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to collect response body");
            let error = serde_json::json!({ "error": err.to_string() });
            return GatewayResponse {
                status_code: 500,
                headers: BTreeMap::from([
                    ("content-type".to_string(), "application/json".to_string()),
                    ("access-control-allow-origin".to_string(), "*".to_string()),
                ]),
                body: error.to_string(),
                is_base64_encoded: false,
            };
        }
    };

    let headers = parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();

    GatewayResponse {
        status_code: parts.status.as_u16(),
        headers,
        body,
        is_base64_encoded: false,
    }
}
