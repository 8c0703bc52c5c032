use super::{Task, TaskSource};
use crate::error::TrackerError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Kanboard JSON-RPC client authenticated with an API user and token
pub struct KanboardClient {
    client: reqwest::Client,
    url: String,
    user: String,
    token: String,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Deserialize)]
struct TaskDetails {
    #[serde(default)]
    column_title: Option<String>,
}

impl KanboardClient {
    pub fn new(
        url: impl Into<String>,
        user: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TrackerError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            user: user.into(),
            token: token.into(),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, TrackerError> {
        debug!("Kanboard call {} {}", method, params);

        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "id": 1,
            "params": params,
        });

        let response = self
            .client
            .post(&self.url)
            .basic_auth(&self.user, Some(&self.token))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrackerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: RpcResponse = response.json().await?;
        if let Some(error) = envelope.error {
            return Err(TrackerError::Rpc {
                method: method.to_string(),
                error: error.to_string(),
            });
        }

        let result = envelope.result.ok_or_else(|| TrackerError::MissingResult {
            method: method.to_string(),
        })?;

        serde_json::from_value(result).map_err(|source| TrackerError::Decode {
            method: method.to_string(),
            source,
        })
    }
}

#[async_trait]
impl TaskSource for KanboardClient {
    async fn fetch_all(&self, project_id: u64) -> Result<Vec<Task>, TrackerError> {
        self.call("getAllTasks", json!({ "project_id": project_id }))
            .await
    }

    async fn resolve_column(&self, task_id: &str) -> Result<Option<String>, TrackerError> {
        let details: TaskDetails = self.call("getTask", json!({ "task_id": task_id })).await?;
        Ok(details.column_title)
    }
}
