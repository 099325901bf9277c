//! Fund availability routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use super::{bad_request, engine_error_response};
use crate::{AppState, extractors::Actor};
use amanah_core::pool::PoolKey;

/// Creates the pool routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/pools/available", get(available_funds))
}

/// Query parameters for the availability endpoint.
#[derive(Debug, Deserialize)]
pub struct AvailableFundsQuery {
    /// Canonical pool key, `reference_type/<uuid or ->/category`.
    pub pool: String,
}

/// GET `/pools/available` - Advisory funds snapshot for one pool.
///
/// The figures are informational; the submit transaction re-checks the
/// cap authoritatively.
async fn available_funds(
    State(state): State<AppState>,
    Actor(_actor): Actor,
    Query(query): Query<AvailableFundsQuery>,
) -> impl IntoResponse {
    let Some(pool) = PoolKey::parse(&query.pool) else {
        return bad_request(
            "INVALID_POOL_KEY",
            "Pool key must be reference_type/<uuid or ->/category",
        );
    };

    match state.service.available_funds(pool).await {
        Ok(snapshot) => (
            StatusCode::OK,
            Json(json!({
                "pool": pool.canonical(),
                "collected": snapshot.collected.to_string(),
                "committed": snapshot.committed.to_string(),
                "available": snapshot.available.to_string(),
            })),
        )
            .into_response(),
        Err(e) => engine_error_response(&e),
    }
}
