use axum::{
    http::header,
    response::{Html, IntoResponse, Response},
};
use serde_json::Value as JsonValue;

use crate::error::FatalError;
use crate::path::BackendPath;
use crate::render::{pretty_print, render_listing, render_value};
use crate::vault::SecretStore;

/// Body produced for a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Anchor lines for the children of a prefix
    Listing(String),
    /// Raw stored value, expected to be JSON
    Value(String),
    /// Description of a failed read, sent with the same content type as a value
    ReadFailure(String),
}

impl IntoResponse for Rendered {
    fn into_response(self) -> Response {
        match self {
            Rendered::Listing(body) => Html(body).into_response(),
            Rendered::Value(body) | Rendered::ReadFailure(body) => {
                ([(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
        }
    }
}

/// List or read `path` depending on its shape, and render the result.
pub async fn dispatch(
    store: &dyn SecretStore,
    path: &BackendPath,
) -> Result<Rendered, FatalError> {
    if path.is_listing() {
        tracing::debug!("Getting list of {}", path);
        list(store, path).await
    } else {
        tracing::debug!("Getting read of {}", path);
        read(store, path).await
    }
}

async fn list(store: &dyn SecretStore, path: &BackendPath) -> Result<Rendered, FatalError> {
    let data = store
        .list(path.as_str())
        .await
        .map_err(|source| FatalError::ListFailed {
            path: path.to_string(),
            source,
        })?;
    tracing::debug!("LIST raw {:?}", data);

    let keys = match data.as_ref().and_then(|d| d.get("keys")) {
        Some(JsonValue::Array(keys)) => keys,
        _ => {
            return Err(FatalError::MalformedListing {
                path: path.to_string(),
            })
        }
    };

    tracing::debug!("Listed {} keys under {}", keys.len(), path);
    Ok(Rendered::Listing(render_listing(keys)))
}

async fn read(store: &dyn SecretStore, path: &BackendPath) -> Result<Rendered, FatalError> {
    let data = match store.read(path.as_str()).await {
        Ok(Some(data)) => data,
        Ok(None) => {
            return Err(FatalError::EmptyRead {
                path: path.to_string(),
            })
        }
        Err(e) => {
            tracing::debug!("ERROR (status {:?}): {}", e.status(), e);
            return Ok(Rendered::ReadFailure(e.to_string()));
        }
    };

    let value = render_value(data.get("value"));
    match pretty_print(&value) {
        Ok(pretty) => tracing::debug!("READ data: {}", pretty),
        Err(e) => tracing::debug!("JSON parse error: {}", e),
    }

    Ok(Rendered::Value(value))
}
