//! HTTP API layer with Axum routes and extractors.
//!
//! This crate provides:
//! - REST API routes for the disbursement lifecycle
//! - The actor extractor that identifies the caller
//! - Response types and error envelopes

pub mod extractors;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use amanah_db::DisbursementService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The disbursement engine.
    pub service: Arc<DisbursementService>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
