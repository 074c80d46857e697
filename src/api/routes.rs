use crate::AppState;
use crate::api::{ApiDoc, handlers};
use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// Routes mounted under `/api`
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/chat", post(handlers::chat::chat))
        .route("/reminder", get(handlers::reminders::get_reminder))
        .route("/islamic-date", get(handlers::reminders::get_islamic_date))
        .route(
            "/bookmarks",
            get(handlers::bookmarks::list_bookmarks)
                .post(handlers::bookmarks::add_bookmark)
                .delete(handlers::bookmarks::remove_bookmark),
        )
        .route(
            "/bookmarks/toggle",
            post(handlers::bookmarks::toggle_bookmark),
        )
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}

/// The complete application: `/api` routes, permissive CORS and request tracing
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", create_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
