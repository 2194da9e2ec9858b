//! HTTP client for the Retell API with bearer auth, timeouts and retries.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::RetellError;
use crate::wire::{AgentRecord, AgentVersionRecord, LlmRecord};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
const INITIAL_RETRY_INTERVAL: Duration = Duration::from_millis(200);
const MAX_RETRY_INTERVAL: Duration = Duration::from_secs(2);

/// The Retell endpoints the gateway reads from.
#[async_trait]
pub trait RetellApi: Send + Sync {
    /// `GET /list-agents`
    async fn list_agents(&self) -> Result<Vec<AgentRecord>, RetellError>;

    /// `GET /get-agent/{agent_id}`
    async fn get_agent(&self, agent_id: &str) -> Result<AgentRecord, RetellError>;

    /// `GET /get-retell-llm/{llm_id}`
    async fn get_retell_llm(&self, llm_id: &str) -> Result<LlmRecord, RetellError>;

    /// `GET /get-agent-versions/{agent_id}`
    async fn get_agent_versions(&self, agent_id: &str) -> Result<Vec<AgentVersionRecord>, RetellError>;
}

/// Client for the Retell REST API.
pub struct RetellClient {
    http: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    retry_attempts: u32,
}

impl RetellClient {
    /// Creates a client for the given base URL and API key.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        debug!(
            "RetellClient: base_url={}, api_key_len={}",
            base_url,
            api_key.len()
        );
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the total number of attempts for transient failures.
    pub fn with_retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = attempts.max(1);
        self
    }

    /// Builds an endpoint URL, percent-encoding each path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RetellError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| RetellError::Transport(format!("invalid base URL '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| RetellError::Transport(format!("base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issues a GET, retrying transient failures with exponential backoff.
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, RetellError> {
        let url = self.endpoint(segments)?;
        let attempts = AtomicU32::new(0);
        let attempts = &attempts;
        let url = &url;
        let max_attempts = self.retry_attempts;

        let operation = move || async move {
            let attempt = attempts.fetch_add(1, Ordering::Relaxed) + 1;
            self.send::<T>(url).await.map_err(|e| {
                if e.is_transient() && attempt < max_attempts {
                    backoff::Error::transient(e)
                } else {
                    backoff::Error::permanent(e)
                }
            })
        };

        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(INITIAL_RETRY_INTERVAL)
            .with_max_interval(MAX_RETRY_INTERVAL)
            .with_max_elapsed_time(None)
            .build();

        backoff::future::retry_notify(policy, operation, |err: RetellError, wait: Duration| {
            warn!("Retell request to {} failed ({}), retrying in {}ms", url.path(), err, wait.as_millis());
        })
        .await
    }

    async fn send<T: DeserializeOwned>(&self, url: &Url) -> Result<T, RetellError> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(RetellError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RetellError::Status {
                status: status.as_u16(),
                message: error_message(&body, status.canonical_reason()),
            });
        }

        response.json::<T>().await.map_err(RetellError::from_reqwest)
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Retell usually answers `{"status": "error", "message": "..."}`; anything
/// else is used as-is, and an empty body falls back to the status reason.
fn error_message(body: &str, reason: Option<&str>) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body).ok().and_then(|v| {
        ["message", "error", "detail"]
            .iter()
            .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(String::from))
    });

    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => reason.unwrap_or("no response body").to_string(),
        None => body.trim().to_string(),
    }
}

#[async_trait]
impl RetellApi for RetellClient {
    async fn list_agents(&self) -> Result<Vec<AgentRecord>, RetellError> {
        self.get_json(&["list-agents"]).await
    }

    async fn get_agent(&self, agent_id: &str) -> Result<AgentRecord, RetellError> {
        self.get_json(&["get-agent", agent_id]).await
    }

    async fn get_retell_llm(&self, llm_id: &str) -> Result<LlmRecord, RetellError> {
        self.get_json(&["get-retell-llm", llm_id]).await
    }

    async fn get_agent_versions(&self, agent_id: &str) -> Result<Vec<AgentVersionRecord>, RetellError> {
        self.get_json(&["get-agent-versions", agent_id]).await
    }
}
