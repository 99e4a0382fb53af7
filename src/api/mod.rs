pub mod errors;
pub mod models;
pub mod routes;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::council::types::CredentialSet;

#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialSet,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/models", get(routes::list_models))
        .route("/api/query", post(routes::query))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
