use crate::config::Config;
use crate::vault::SecretStore;
use std::sync::Arc;

/// Shared application state
///
/// Built once at startup and never mutated; every request sees the same store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SecretStore>,
    pub config: Arc<Config>,
}
