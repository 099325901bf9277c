//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::AppState;
use amanah_core::disbursement::EngineError;

pub mod disbursements;
pub mod health;
pub mod pools;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(disbursements::routes())
        .merge(pools::routes())
}

/// Builds a 400 response with the standard error envelope.
pub(crate) fn bad_request(code: &str, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": code,
            "message": message
        })),
    )
        .into_response()
}

/// Maps an engine error onto the standard error envelope.
///
/// Internal failures are logged and masked; every other error carries
/// its own status code and message.
pub(crate) fn engine_error_response(e: &EngineError) -> Response {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if status.is_server_error() {
        error!(error = %e, "disbursement request failed");
        "An error occurred".to_string()
    } else {
        e.to_string()
    };

    (
        status,
        Json(json!({
            "error": e.error_code(),
            "message": message
        })),
    )
        .into_response()
}
