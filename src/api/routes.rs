use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::models::{QueryRequest, QueryResponse};
use crate::api::AppState;
use crate::catalog::fetch_all_catalogs;
use crate::council::dispatch::dispatch;
use crate::council::synthesize::synthesize;
use crate::council::types::{Provider, ProviderCatalog};
use crate::errors::CouncilError;

pub async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "council"}))
}

pub async fn list_models(State(state): State<AppState>) -> Json<ProviderCatalog> {
    Json(fetch_all_catalogs(&state.credentials).await)
}

pub async fn query(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, CouncilError> {
    // Catalogs are rebuilt per request; selections made against an older
    // catalog are re-validated inside dispatch.
    let catalog = fetch_all_catalogs(&state.credentials).await;
    let results = dispatch(&req.question, &req.selections, &catalog, &state.credentials).await?;

    let summary = if req.include_summary {
        let model = catalog
            .get(&Provider::Anthropic)
            .and_then(|models| models.first());
        synthesize(&req.question, &results, &state.credentials, model).await
    } else {
        None
    };

    Ok(Json(QueryResponse { results, summary }))
}
