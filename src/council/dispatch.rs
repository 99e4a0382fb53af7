//! Fan one prompt out to every selected backend and collect the outcomes.

use futures::future::join_all;
use tracing::{debug, info};

use crate::council::types::{
    AggregateResult, CredentialSet, ProviderCatalog, Selection,
};
use crate::errors::CouncilError;
use crate::llm::{create_backend, run_query, ModelBackend};

/// Re-validate selections against the catalog and credentials, then build
/// one backend per survivor, preserving selection order. Selections whose
/// model has vanished from the catalog (or whose provider lost its
/// credential) are dropped, not errors: catalogs can change between
/// selection time and dispatch time.
pub fn resolve_backends(
    selections: &[Selection],
    catalog: &ProviderCatalog,
    credentials: &CredentialSet,
) -> Vec<Box<dyn ModelBackend>> {
    let mut backends: Vec<Box<dyn ModelBackend>> = Vec::with_capacity(selections.len());
    for selection in selections {
        let Some(api_key) = credentials.get(selection.provider) else {
            debug!(provider = %selection.provider, "Dropping selection: no credential");
            continue;
        };
        let model = catalog
            .get(&selection.provider)
            .and_then(|models| models.iter().find(|m| m.id == selection.model_id));
        let Some(model) = model else {
            debug!(provider = %selection.provider, model = %selection.model_id,
                   "Dropping selection: model not in catalog");
            continue;
        };
        backends.push(create_backend(selection.provider, api_key, model));
    }
    backends
}

/// Issue every backend query concurrently and wait for all of them to
/// settle. Result order equals backend order, never completion order, so
/// callers can align each result back to the selection that produced it.
pub async fn dispatch_backends(
    prompt: &str,
    backends: &[Box<dyn ModelBackend>],
) -> AggregateResult {
    join_all(backends.iter().map(|b| run_query(b.as_ref(), prompt))).await
}

/// Core dispatch operation: validate, fan out, collect.
///
/// The only hard failures are malformed input (empty prompt) and the case
/// where no selection survives validation; every per-backend failure is
/// data on its `QueryResult`.
pub async fn dispatch(
    prompt: &str,
    selections: &[Selection],
    catalog: &ProviderCatalog,
    credentials: &CredentialSet,
) -> Result<AggregateResult, CouncilError> {
    if prompt.trim().is_empty() {
        return Err(CouncilError::InvalidInput("Prompt must not be empty".into()));
    }

    let backends = resolve_backends(selections, catalog, credentials);
    if backends.is_empty() {
        return Err(CouncilError::NoProviders(
            "No selection survived catalog validation".into(),
        ));
    }

    info!(count = backends.len(), "Dispatching prompt to selected models");
    Ok(dispatch_backends(prompt, &backends).await)
}
