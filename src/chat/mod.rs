//! Question answering
//!
//! Questions are forwarded to an answering backend. The production backend is a
//! remote HTTP service ([`ProxyBackend`]); [`MockBackend`] returns a canned
//! answer for demos and tests.

use crate::types::{AppError, ChatRequest, ChatResponse, Reference, ReminderType, Result};
use crate::utils::toml_config::{ChatBackendKind, ChatConfig};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Answer shown when the backend cannot be reached
pub const APOLOGY: &str =
    "I'm sorry, I couldn't process your question right now. Please try again later.";

/// Something that answers questions
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn ask(&self, question: &str) -> Result<ChatResponse>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Forwards questions to `{backend_url}/api/chat`
#[derive(Debug, Clone)]
pub struct ProxyBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl ProxyBackend {
    pub fn new(backend_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/chat", backend_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for ProxyBackend {
    async fn ask(&self, question: &str) -> Result<ChatResponse> {
        debug!(endpoint = %self.endpoint, "Forwarding question");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest {
                question: question.to_string(),
            })
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| AppError::InvalidResponse(e.to_string()))
    }

    fn name(&self) -> &str {
        "proxy"
    }
}

/// Canned answers citing Ayat al-Kursi
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBackend;

#[async_trait]
impl ChatBackend for MockBackend {
    async fn ask(&self, question: &str) -> Result<ChatResponse> {
        Ok(ChatResponse {
            answer: format!("Here's a mock response about {}", question),
            references: vec![Reference {
                kind: ReminderType::Quran,
                citation: "Quran (2:255)".to_string(),
                arabic: "اللَّهُ لَا إِلَٰهَ إِلَّا هُوَ الْحَيُّ الْقَيُّومُ".to_string(),
                english: "Allah - there is no deity except Him, the Ever-Living, the Sustainer of existence.".to_string(),
            }],
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Validates questions and delegates them to a [`ChatBackend`]
#[derive(Clone)]
pub struct ChatService {
    backend: Arc<dyn ChatBackend>,
}

impl ChatService {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    pub fn from_config(config: &ChatConfig) -> Result<Self> {
        let backend: Arc<dyn ChatBackend> = match config.backend {
            ChatBackendKind::Proxy => {
                let url = config.resolved_backend_url();
                info!(backend_url = %url, "Using proxy chat backend");
                Arc::new(ProxyBackend::new(&url, config.timeout())?)
            }
            ChatBackendKind::Mock => {
                info!("Using mock chat backend");
                Arc::new(MockBackend)
            }
        };
        Ok(Self::new(backend))
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Ask the backend. Blank questions are rejected without a request.
    pub async fn ask(&self, question: &str) -> Result<ChatResponse> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::InvalidInput(
                "Question must not be empty".to_string(),
            ));
        }

        self.backend.ask(question).await
    }

    /// Like [`ask`](Self::ask), but any failure becomes an apology with no references
    pub async fn ask_or_apologize(&self, question: &str) -> ChatResponse {
        match self.ask(question).await {
            Ok(response) => response,
            Err(e) => {
                warn!(backend = self.backend_name(), error = %e, "Chat request failed");
                ChatResponse {
                    answer: APOLOGY.to_string(),
                    references: Vec::new(),
                }
            }
        }
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("backend", &self.backend_name())
            .finish()
    }
}
