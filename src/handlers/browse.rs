use crate::config::FatalPolicy;
use crate::dispatch::dispatch;
use crate::error::FatalError;
use crate::path::BackendPath;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

/// GET / handler - List the children of the raw root
pub async fn root_handler(State(state): State<AppState>) -> Response {
    browse(&state, "").await
}

/// GET /{*endpoint} handler - List a prefix ending in `/`, read anything else
pub async fn endpoint_handler(
    State(state): State<AppState>,
    Path(endpoint): Path<String>,
) -> Response {
    tracing::debug!("Found endpoint {}", endpoint);
    browse(&state, &endpoint).await
}

async fn browse(state: &AppState, endpoint: &str) -> Response {
    let path = BackendPath::resolve(endpoint);

    match dispatch(state.store.as_ref(), &path).await {
        Ok(rendered) => rendered.into_response(),
        Err(err) => on_fatal(state.config.fatal_policy, err),
    }
}

fn on_fatal(policy: FatalPolicy, err: FatalError) -> Response {
    match policy {
        FatalPolicy::Exit => {
            tracing::error!("{}, shutting down", err);
            std::process::exit(1);
        }
        FatalPolicy::Respond => {
            tracing::error!("{}", err);
            err.into_response()
        }
    }
}
