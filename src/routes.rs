use axum::{http::StatusCode, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{endpoint_handler, root_handler};
use crate::state::AppState;

// Route path constants - single source of truth for all API paths
pub const ROOT: &str = "/";
pub const ENDPOINT: &str = "/{*endpoint}";

/// Assemble the router with request tracing and the server-side timeout
pub fn router(state: AppState) -> Router {
    let timeout = state.config.request_timeout;

    Router::new()
        .route(ROOT, get(root_handler))
        .route(ENDPOINT, get(endpoint_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)),
        )
        .with_state(state)
}
