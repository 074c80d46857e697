use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= Reminder Types =============

/// Kind of content a reminder or reference carries
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Quran,
    Hadith,
}

impl ReminderType {
    /// Human readable label used in listings
    pub fn label(&self) -> &'static str {
        match self {
            ReminderType::Quran => "Quranic Verse",
            ReminderType::Hadith => "Hadith",
        }
    }
}

impl std::fmt::Display for ReminderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderType::Quran => write!(f, "quran"),
            ReminderType::Hadith => write!(f, "hadith"),
        }
    }
}

/// A single Quran verse or hadith shown to the user.
///
/// `source` doubles as the identity of the reminder when bookmarking.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub arabic: String,
    pub english: String,
    pub source: String,
    #[serde(rename = "type")]
    pub kind: ReminderType,
}

impl Reminder {
    pub fn new(
        arabic: impl Into<String>,
        english: impl Into<String>,
        source: impl Into<String>,
        kind: ReminderType,
    ) -> Self {
        Self {
            arabic: arabic.into(),
            english: english.into(),
            source: source.into(),
            kind,
        }
    }

    /// The reminder substituted whenever a remote fetch fails (Quran 94:5)
    pub fn fallback() -> Self {
        Self::new(
            "فَإِنَّ مَعَ الْعُسْرِ يُسْرًا",
            "Verily, with hardship comes ease.",
            "Quran 94:5",
            ReminderType::Quran,
        )
    }
}

// ============= Chat Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ChatRequest {
    #[serde(alias = "message")]
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub references: Vec<Reference>,
}

/// A Quran or Hadith citation attached to a chat answer
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct Reference {
    #[serde(rename = "type")]
    pub kind: ReminderType,
    pub citation: String,
    pub arabic: String,
    pub english: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidResponse(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Network(msg) => (axum::http::StatusCode::BAD_GATEWAY, msg),
            AppError::Upstream { status, message } => (
                axum::http::StatusCode::BAD_GATEWAY,
                format!("upstream status {}: {}", status, message),
            ),
            AppError::InvalidResponse(msg) => (axum::http::StatusCode::BAD_GATEWAY, msg),
            AppError::Storage(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Config(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
