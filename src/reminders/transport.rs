//! HTTP transport and the retrying fetcher built on top of it

use super::retry::{Backoff, RetryPolicy};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// An outbound GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Overrides the transport's default timeout
    pub timeout: Option<Duration>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            timeout: None,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status code and raw body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> std::result::Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Failure of a single fetch
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport { message, .. } => AppError::Network(message),
            FetchError::Status { status, url } => AppError::Upstream {
                status,
                message: url,
            },
        }
    }
}

/// Something that can perform a GET request
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, request: FetchRequest) -> std::result::Result<HttpResponse, FetchError>;
}

/// Production transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("baseera/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: FetchRequest) -> std::result::Result<HttpResponse, FetchError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let transport_err = |e: reqwest::Error| FetchError::Transport {
            url: request.url.clone(),
            message: e.to_string(),
        };

        let response = builder.send().await.map_err(transport_err)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_err)?;

        Ok(HttpResponse { status, body })
    }
}

/// Runs requests through a transport under a [`RetryPolicy`].
///
/// Non-2xx statuses count as failures and are retried like transport errors.
#[derive(Clone)]
pub struct RetryingFetcher {
    transport: Arc<dyn HttpTransport>,
    policy: RetryPolicy<FetchError>,
}

impl RetryingFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>, policy: RetryPolicy<FetchError>) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy<FetchError> {
        &self.policy
    }

    pub async fn fetch(
        &self,
        request: &FetchRequest,
    ) -> std::result::Result<HttpResponse, FetchError> {
        self.fetch_under(&self.policy, request).await
    }

    /// Like [`fetch`](Self::fetch) with a different attempt budget for this call only
    pub async fn fetch_with_attempts(
        &self,
        request: &FetchRequest,
        max_attempts: u32,
    ) -> std::result::Result<HttpResponse, FetchError> {
        self.fetch_with(request, max_attempts, None).await
    }

    /// Per-call attempt budget and, when given, backoff
    pub async fn fetch_with(
        &self,
        request: &FetchRequest,
        max_attempts: u32,
        backoff: Option<Backoff>,
    ) -> std::result::Result<HttpResponse, FetchError> {
        let mut policy = self.policy.clone().with_max_attempts(max_attempts);
        if let Some(backoff) = backoff {
            policy = policy.with_backoff(backoff);
        }
        self.fetch_under(&policy, request).await
    }

    async fn fetch_under(
        &self,
        policy: &RetryPolicy<FetchError>,
        request: &FetchRequest,
    ) -> std::result::Result<HttpResponse, FetchError> {
        policy
            .run(|attempt| {
                let transport = Arc::clone(&self.transport);
                let request = request.clone();
                async move {
                    debug!(attempt, url = %request.url, "Fetching");
                    let response = transport.get(request.clone()).await?;
                    if response.is_success() {
                        Ok(response)
                    } else {
                        Err(FetchError::Status {
                            status: response.status,
                            url: request.url,
                        })
                    }
                }
            })
            .await
    }
}

impl std::fmt::Debug for RetryingFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryingFetcher")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
