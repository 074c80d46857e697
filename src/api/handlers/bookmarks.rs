use crate::{
    AppState, BookmarkStore,
    types::{AppError, Reminder, Result},
};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddBookmarkResponse {
    pub bookmarked: bool,
    /// `false` when a bookmark with the same source already existed
    pub added: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ToggleBookmarkResponse {
    pub bookmarked: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RemoveBookmarkResponse {
    pub removed: bool,
}

#[derive(Debug, Deserialize)]
pub struct RemoveBookmarkQuery {
    pub source: String,
}

/// List bookmarked reminders in the order they were added
#[utoipa::path(
    get,
    path = "/api/bookmarks",
    responses(
        (status = 200, description = "Bookmarked reminders", body = Vec<Reminder>),
        (status = 500, description = "Storage error")
    ),
    tag = "bookmarks"
)]
pub async fn list_bookmarks(State(state): State<AppState>) -> Result<Json<Vec<Reminder>>> {
    Ok(Json(with_store(&state, |store| store.list()).await?))
}

/// Bookmark a reminder
#[utoipa::path(
    post,
    path = "/api/bookmarks",
    request_body = Reminder,
    responses(
        (status = 200, description = "Reminder is bookmarked", body = AddBookmarkResponse),
        (status = 400, description = "Invalid reminder")
    ),
    tag = "bookmarks"
)]
pub async fn add_bookmark(
    State(state): State<AppState>,
    Json(reminder): Json<Reminder>,
) -> Result<Json<AddBookmarkResponse>> {
    validate_source(&reminder.source)?;
    let added = with_store(&state, move |store| store.add(reminder)).await?;

    Ok(Json(AddBookmarkResponse {
        bookmarked: true,
        added,
    }))
}

/// Bookmark a reminder if absent, remove it if present
#[utoipa::path(
    post,
    path = "/api/bookmarks/toggle",
    request_body = Reminder,
    responses(
        (status = 200, description = "Bookmark state after the toggle", body = ToggleBookmarkResponse),
        (status = 400, description = "Invalid reminder")
    ),
    tag = "bookmarks"
)]
pub async fn toggle_bookmark(
    State(state): State<AppState>,
    Json(reminder): Json<Reminder>,
) -> Result<Json<ToggleBookmarkResponse>> {
    validate_source(&reminder.source)?;
    let bookmarked = with_store(&state, move |store| store.toggle(reminder)).await?;

    Ok(Json(ToggleBookmarkResponse { bookmarked }))
}

/// Remove the bookmark with the given source
#[utoipa::path(
    delete,
    path = "/api/bookmarks",
    params(
        ("source" = String, Query, description = "Source of the reminder, e.g. \"Quran 94:5\"")
    ),
    responses(
        (status = 200, description = "Whether a bookmark was removed", body = RemoveBookmarkResponse)
    ),
    tag = "bookmarks"
)]
pub async fn remove_bookmark(
    State(state): State<AppState>,
    Query(query): Query<RemoveBookmarkQuery>,
) -> Result<Json<RemoveBookmarkResponse>> {
    validate_source(&query.source)?;
    let removed = with_store(&state, move |store| store.remove(&query.source)).await?;

    Ok(Json(RemoveBookmarkResponse { removed }))
}

fn validate_source(source: &str) -> Result<()> {
    if source.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Reminder source must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Run a bookmark operation on the blocking pool; file-backed stores do
/// synchronous IO.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T>
where
    F: FnOnce(&BookmarkStore) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.bookmarks);
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| AppError::Internal(format!("Bookmark task failed: {}", e)))?
}
