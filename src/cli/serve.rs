use tracing::info;

use crate::api::{build_router, AppState};
use crate::cli::commands::ServeArgs;
use crate::config::credentials_from_env;
use crate::council::types::Provider;
use crate::errors::CouncilError;

pub async fn handle_serve(args: ServeArgs) -> Result<(), CouncilError> {
    let credentials = credentials_from_env();
    for provider in Provider::ALL {
        if !credentials.contains(provider) {
            info!(provider = %provider, "No API key configured; provider will be unavailable");
        }
    }

    let state = AppState { credentials };
    let router = build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Council API listening");

    axum::serve(listener, router).await?;
    Ok(())
}
