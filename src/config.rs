use std::env;
use std::str::FromStr;
use std::time::Duration;
use anyhow::{bail, Context, Result};

/// What to do when a request hits a [`FatalError`](crate::error::FatalError)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalPolicy {
    /// Log and terminate the whole process
    Exit,
    /// Log and answer that request with a 500
    Respond,
}

impl FromStr for FatalPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "exit" => Ok(FatalPolicy::Exit),
            "respond" => Ok(FatalPolicy::Respond),
            other => bail!("FATAL_POLICY must be one of: exit, respond, got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub vault_addr: String,
    pub vault_token: String,
    pub vault_timeout: Duration,
    pub service_port: u16,
    pub service_host: String,
    pub request_timeout: Duration,
    pub fatal_policy: FatalPolicy,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let vault_addr = env::var("VAULT_ADDR")
            .context("VAULT_ADDR environment variable is required")?;

        let vault_token = env::var("VAULT_TOKEN").unwrap_or_default();

        let vault_timeout = seconds_var("VAULT_TIMEOUT_SECS", 60)?;

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "8090".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let request_timeout = seconds_var("REQUEST_TIMEOUT_SECS", 15)?;

        let fatal_policy = env::var("FATAL_POLICY")
            .unwrap_or_else(|_| "exit".to_string())
            .parse::<FatalPolicy>()?;

        let log_level = env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "debug".to_string());

        Ok(Config {
            vault_addr,
            vault_token,
            vault_timeout,
            service_port,
            service_host,
            request_timeout,
            fatal_policy,
            log_level,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Vault address: {}", self.vault_addr);
        tracing::info!("  Vault token: {}",
            if self.vault_token.is_empty() { "unset" } else { "set" });
        tracing::info!("  Vault timeout: {:?}", self.vault_timeout);
        tracing::info!("  Request timeout: {:?}", self.request_timeout);
        tracing::info!("  Fatal policy: {:?}", self.fatal_policy);
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);

        if self.vault_token.is_empty() {
            tracing::warn!("VAULT_TOKEN is not set, requests will be sent unauthenticated");
        }
    }
}

fn seconds_var(name: &str, default: u64) -> Result<Duration> {
    let secs = match env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{} must be a whole number of seconds", name))?,
        Err(_) => default,
    };
    Ok(Duration::from_secs(secs))
}
