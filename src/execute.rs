//! Live execution of a parsed request, for previewing its response.
//!
//! This is a side channel: it never feeds back into parsing or emission,
//! and its failures are reported as [`ExecutionError`], not [`crate::Error`].

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use reqwest::{Method, Url, redirect};
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::ExecutionError;
use crate::types::RequestDescriptor;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Settings for live execution.
#[derive(Debug, Clone)]
pub struct ExecuteConfig {
    /// Whole-request timeout (default: 30 s).
    pub timeout: Duration,
    /// Follow 3xx redirects (default: true).
    pub follow_redirects: bool,
    /// Redirect hop limit when following (default: 10).
    pub max_redirects: usize,
}

impl Default for ExecuteConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            follow_redirects: true,
            max_redirects: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// What came back from a live request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResponse {
    pub status: u16,
    /// Response headers in wire order.
    pub headers: Vec<(String, String)>,
    pub body: ResponseBody,
}

/// A response body, pretty-printed when it is JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "lowercase")]
pub enum ResponseBody {
    Json(String),
    Text(String),
}

impl ResponseBody {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Json(s) | Self::Text(s) => s,
        }
    }
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

/// Sends [`RequestDescriptor`]s over the network.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Executor {
    client: reqwest::Client,
    config: ExecuteConfig,
}

impl Executor {
    /// Create an executor with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::Client`] if the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, ExecutionError> {
        Self::with_config(ExecuteConfig::default())
    }

    /// Create an executor with custom settings.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::Client`] if the TLS backend cannot be
    /// initialised.
    pub fn with_config(config: ExecuteConfig) -> Result<Self, ExecutionError> {
        let policy = if config.follow_redirects {
            redirect::Policy::limited(config.max_redirects)
        } else {
            redirect::Policy::none()
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(policy)
            .build()
            .map_err(|err| {
                warn!(error = %err, "failed to build HTTP client");
                ExecutionError::Client(err.to_string())
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ExecuteConfig {
        &self.config
    }

    /// Perform the request described by `descriptor`.
    ///
    /// Resolves early with [`ExecutionError::Cancelled`] once `cancel`
    /// fires; the in-flight request is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] for invalid request parts, transport
    /// failures, timeouts and cancellation.
    pub async fn execute(
        &self,
        descriptor: &RequestDescriptor,
        cancel: &CancellationToken,
    ) -> Result<ExecutionResponse, ExecutionError> {
        let request = self.build(descriptor)?;
        info!(method = descriptor.method(), url = descriptor.url(), "executing request");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(url = descriptor.url(), "request cancelled");
                Err(ExecutionError::Cancelled)
            }
            result = self.send(request) => result,
        }
    }

    fn build(&self, descriptor: &RequestDescriptor) -> Result<reqwest::Request, ExecutionError> {
        let method = Method::from_bytes(descriptor.method().as_bytes())
            .map_err(|_| ExecutionError::InvalidMethod(descriptor.method().to_string()))?;
        let url = Url::parse(descriptor.url()).map_err(|err| ExecutionError::InvalidUrl {
            url: descriptor.url().to_string(),
            reason: err.to_string(),
        })?;

        let mut builder = self.client.request(method, url);
        for (name, value) in descriptor.headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ExecutionError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| ExecutionError::InvalidHeader(name.clone()))?;
            builder = builder.header(header_name, header_value);
        }
        if let Some(body) = descriptor.body() {
            builder = builder.body(body.to_string());
        }

        builder
            .build()
            .map_err(|err| ExecutionError::Transport(err.to_string()))
    }

    async fn send(&self, request: reqwest::Request) -> Result<ExecutionResponse, ExecutionError> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| self.classify(err))?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let json_hint = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));

        let text = response.text().await.map_err(|err| self.classify(err))?;
        debug!(status, bytes = text.len(), "received response");

        Ok(ExecutionResponse {
            status,
            headers,
            body: render_body(text, json_hint),
        })
    }

    fn classify(&self, err: reqwest::Error) -> ExecutionError {
        if err.is_timeout() {
            warn!(timeout = ?self.config.timeout, "request timed out");
            ExecutionError::Timeout(self.config.timeout)
        } else {
            warn!(error = %err, "request failed");
            ExecutionError::Transport(err.to_string())
        }
    }
}

/// Pretty-print JSON bodies. Without a JSON content type only structured
/// values count, so a plain-text `42` stays text.
fn render_body(text: String, json_hint: bool) -> ResponseBody {
    let pretty = serde_json::from_str::<Value>(&text)
        .ok()
        .filter(|v| json_hint || v.is_object() || v.is_array())
        .and_then(|v| serde_json::to_string_pretty(&v).ok());

    match pretty {
        Some(pretty) => ResponseBody::Json(pretty),
        None => ResponseBody::Text(text),
    }
}
