use crate::{
    AppState,
    types::{AppError, ChatRequest, ChatResponse, Result},
};
use axum::{Json, extract::State};
use tracing::error;

/// Ask a question about Islam
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer with Quran and Hadith references", body = ChatResponse),
        (status = 400, description = "Empty question"),
        (status = 500, description = "Backend failure")
    ),
    tag = "chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    match state.chat.ask(&payload.question).await {
        Ok(response) => Ok(Json(response)),
        Err(e @ AppError::InvalidInput(_)) => Err(e),
        Err(e) => {
            error!(backend = state.chat.backend_name(), error = %e, "Chat request failed");
            Err(AppError::Internal(format!("Failed to process request: {}", e)))
        }
    }
}
