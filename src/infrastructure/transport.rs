//! Infrastructure implementations of the transport port

use crate::domain::transport::{GameTransport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Origin the hosted worker service runs on
pub const DEFAULT_BASE_URL: &str = "https://stefan-chatbot.stefankelly.workers.dev";

/// Environment variable overriding the remote origin
pub const BASE_URL_ENV: &str = "TRAITORS_BASE_URL";

/// Client-side configuration for reaching the game service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Read the origin from `TRAITORS_BASE_URL`, falling back to the
    /// hosted worker
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Live implementation over reqwest.
///
/// One attempt per call and no client-side timeout: a hung request keeps the
/// session busy until the connection dies, matching the documented
/// concurrency model.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url,
        }
    }

    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }
}

/// The error text for a failure status: the server's `message` field when it
/// sent one, otherwise the synthesized generic text.
fn failure_message(status: u16, body: Option<&serde_json::Value>) -> String {
    body.and_then(|v| v.get("message"))
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[async_trait]
impl GameTransport for HttpTransport {
    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?;
        let parsed: Result<serde_json::Value, _> = serde_json::from_str(&text);

        if !status.is_success() {
            return Err(TransportError::http(failure_message(
                status.as_u16(),
                parsed.as_ref().ok(),
            )));
        }
        parsed.map_err(|e| TransportError::malformed(e.to_string()))
    }
}

/// One call recorded by [`ScriptedTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub path: String,
    pub body: serde_json::Value,
}

/// In-memory transport with scripted responses, for tests.
///
/// Responses are consumed in push order; every call is recorded so tests can
/// assert on paths, bodies and call counts. Calling past the script yields a
/// network error.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<serde_json::Value, TransportError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful response body
    pub fn push_ok(&self, body: serde_json::Value) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(Ok(body));
        }
    }

    /// Script a transport failure
    pub fn push_error(&self, error: TransportError) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(Err(error));
        }
    }

    /// Script a failure status carrying a server message
    pub fn push_http_error(&self, message: &str) {
        self.push_error(TransportError::http(message));
    }

    /// Number of round trips performed so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Every recorded call, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().ok().and_then(|c| c.last().cloned())
    }
}

#[async_trait]
impl GameTransport for ScriptedTransport {
    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                path: path.to_string(),
                body,
            });
        }
        self.responses
            .lock()
            .ok()
            .and_then(|mut r| r.pop_front())
            .unwrap_or_else(|| {
                Err(TransportError::network(format!(
                    "no scripted response for {path}"
                )))
            })
    }
}
