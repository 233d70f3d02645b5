//! In-memory [`SecretStore`] for handler and dispatcher tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::BackendError;
use crate::vault::{HealthStatus, SecretData, SecretStore};

type Canned = Result<SecretData, BackendError>;

#[derive(Default)]
pub struct FakeStore {
    lists: Mutex<HashMap<String, Canned>>,
    reads: Mutex<HashMap<String, Canned>>,
    calls: Mutex<Vec<String>>,
    read_delay: Option<Duration>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(self, path: &str, data: JsonValue) -> Self {
        self.lists.lock().unwrap().insert(path.to_string(), Ok(as_data(data)));
        self
    }

    pub fn with_list_error(self, path: &str, err: BackendError) -> Self {
        self.lists.lock().unwrap().insert(path.to_string(), Err(err));
        self
    }

    pub fn with_read(self, path: &str, data: JsonValue) -> Self {
        self.reads.lock().unwrap().insert(path.to_string(), Ok(as_data(data)));
        self
    }

    pub fn with_read_error(self, path: &str, err: BackendError) -> Self {
        self.reads.lock().unwrap().insert(path.to_string(), Err(err));
        self
    }

    /// Make every read wait this long before answering
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    /// Operations performed so far, as `"list <path>"` or `"read <path>"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    // Canned errors are handed out once; a second call for the same path sees nothing stored
    fn take(
        &self,
        table: &Mutex<HashMap<String, Canned>>,
        op: &str,
        path: &str,
    ) -> Result<Option<SecretData>, BackendError> {
        self.calls.lock().unwrap().push(format!("{} {}", op, path));
        let mut table = table.lock().unwrap();
        match table.get(path) {
            Some(Ok(data)) => Ok(Some(data.clone())),
            Some(Err(_)) => match table.remove(path) {
                Some(Err(e)) => Err(e),
                _ => Ok(None),
            },
            None => Ok(None),
        }
    }
}

fn as_data(value: JsonValue) -> SecretData {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("fake store data must be an object, got {}", other),
    }
}

#[async_trait]
impl SecretStore for FakeStore {
    async fn list(&self, path: &str) -> Result<Option<SecretData>, BackendError> {
        self.take(&self.lists, "list", path)
    }

    async fn read(&self, path: &str) -> Result<Option<SecretData>, BackendError> {
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        self.take(&self.reads, "read", path)
    }

    async fn health_check(&self) -> Result<HealthStatus, BackendError> {
        Ok(HealthStatus {
            initialized: true,
            sealed: false,
            standby: false,
            version: "fake".to_string(),
        })
    }
}
