//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Baseera, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Reminders
//! - `GET /api/reminder` - Random Quran verse or hadith (`?offline=true` for the built-in rotation)
//! - `GET /api/islamic-date` - Hijri estimate and event of the day (`?date=YYYY-MM-DD`)
//!
//! ## Bookmarks (`/api/bookmarks`)
//! - `GET /api/bookmarks` - List bookmarks
//! - `POST /api/bookmarks` - Add a bookmark
//! - `POST /api/bookmarks/toggle` - Toggle a bookmark
//! - `DELETE /api/bookmarks?source=...` - Remove a bookmark
//!
//! ## Chat (`/api/chat`)
//! - `POST /api/chat` - Forward a question to the answering backend
//!
//! ## Health (`/api/health`)
//! - `GET /api/health` - Health check endpoint
//!
//! # OpenAPI Documentation
//!
//! The OpenAPI document is served at `/api/openapi.json`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use crate::types::{ChatRequest, ChatResponse, Reference, Reminder, ReminderType};
use utoipa::OpenApi;

/// OpenAPI description of the HTTP API
#[derive(OpenApi)]
#[openapi(
    info(title = "Baseera API", description = "Islamic reminders, Hijri dates and Q&A"),
    paths(
        handlers::health::health_check,
        handlers::chat::chat,
        handlers::reminders::get_reminder,
        handlers::reminders::get_islamic_date,
        handlers::bookmarks::list_bookmarks,
        handlers::bookmarks::add_bookmark,
        handlers::bookmarks::toggle_bookmark,
        handlers::bookmarks::remove_bookmark,
    ),
    components(schemas(
        Reminder,
        ReminderType,
        ChatRequest,
        ChatResponse,
        Reference,
        handlers::health::HealthResponse,
        handlers::bookmarks::AddBookmarkResponse,
        handlers::bookmarks::ToggleBookmarkResponse,
        handlers::bookmarks::RemoveBookmarkResponse,
    )),
    tags(
        (name = "reminders", description = "Quran and Hadith reminders"),
        (name = "calendar", description = "Hijri date estimation"),
        (name = "bookmarks", description = "Saved reminders"),
        (name = "chat", description = "Question answering"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
