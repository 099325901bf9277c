//! Request extractors.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use serde_json::json;
use uuid::Uuid;

/// Header carrying the caller's identity, set by the authenticating
/// gateway in front of this service.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Extractor for the acting user.
///
/// Use this in handlers to get the caller's actor id:
///
/// ```ignore
/// async fn handler(Actor(actor): Actor) -> impl IntoResponse {
///     // actor is a Uuid
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Actor(pub Uuid);

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(ACTOR_HEADER).and_then(|v| v.to_str().ok()) else {
            return Err(unauthorized("Actor identification required"));
        };

        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| unauthorized("Malformed actor id"))
    }
}

fn unauthorized(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "UNAUTHORIZED",
            "message": message
        })),
    )
}
