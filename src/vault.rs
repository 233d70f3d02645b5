use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::config::Config;
use crate::error::BackendError;

/// The `data` object of a secret store response
pub type SecretData = Map<String, JsonValue>;

/// Node status reported by `sys/health`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub initialized: bool,
    #[serde(default)]
    pub sealed: bool,
    #[serde(default)]
    pub standby: bool,
    #[serde(default)]
    pub version: String,
}

/// List and read capability of the secret store
///
/// A single instance is shared by every in-flight request, so
/// implementations must be safe to call concurrently.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// List the immediate children under `path`.
    ///
    /// `Ok(None)` means the store returned no data for the prefix.
    async fn list(&self, path: &str) -> Result<Option<SecretData>, BackendError>;

    /// Read the value stored at exactly `path`.
    async fn read(&self, path: &str) -> Result<Option<SecretData>, BackendError>;

    /// Probe the store without touching any secret.
    async fn health_check(&self) -> Result<HealthStatus, BackendError>;
}

#[derive(Deserialize)]
struct SecretResponse {
    #[serde(default)]
    data: Option<SecretData>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

/// Shareable Vault HTTP API client
#[derive(Clone)]
pub struct VaultClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl VaultClient {
    /// Create a new client from configuration
    ///
    /// Only validates the address; no request is made until the first call.
    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        let base_url = Url::parse(&config.vault_addr)
            .map_err(|_| BackendError::InvalidAddress(config.vault_addr.clone()))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(BackendError::InvalidAddress(config.vault_addr.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.vault_timeout)
            .user_agent(concat!("vault-raw-browser/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::info!("Vault client configured for {}", base_url);

        Ok(Self {
            http,
            base_url,
            token: config.vault_token.clone(),
        })
    }

    /// Build `<addr>/v1/<path>`, encoding each segment and keeping a trailing slash
    fn url_for(&self, path: &str) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidAddress(self.base_url.to_string()))?
            .pop_if_empty()
            .push("v1")
            .extend(path.split('/'));
        Ok(url)
    }

    async fn get(&self, path: &str, list: bool) -> Result<reqwest::Response, BackendError> {
        let url = self.url_for(path)?;
        let mut req = self.http.get(url);
        if list {
            req = req.query(&[("list", "true")]);
        }
        if !self.token.is_empty() {
            req = req.header("X-Vault-Token", &self.token);
        }

        req.send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout
            } else {
                BackendError::Network(e)
            }
        })
    }

    async fn secret(&self, path: &str, list: bool) -> Result<Option<SecretData>, BackendError> {
        let resp = self.get(path, list).await?;
        let status = resp.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Nothing stored at {}", path);
            return Ok(None);
        }

        let text = resp.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(None);
        }

        let parsed: SecretResponse = serde_json::from_str(&text)?;
        Ok(parsed.data)
    }
}

fn api_error(status: StatusCode, body: &str) -> BackendError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.errors)
        .filter(|errors| !errors.is_empty())
        .map(|errors| errors.join("; "))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    BackendError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl SecretStore for VaultClient {
    async fn list(&self, path: &str) -> Result<Option<SecretData>, BackendError> {
        self.secret(path, true).await
    }

    async fn read(&self, path: &str) -> Result<Option<SecretData>, BackendError> {
        self.secret(path, false).await
    }

    /// Sealed and standby nodes answer with non-2xx codes, so any decodable
    /// body counts as a successful probe.
    async fn health_check(&self) -> Result<HealthStatus, BackendError> {
        let resp = self.get("sys/health", false).await?;
        let status = resp.status();
        let text = resp.text().await?;

        serde_json::from_str(&text).map_err(|_| api_error(status, &text))
    }
}
