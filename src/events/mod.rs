use axum::{routing::get, Router};

use crate::shared::AppState;

// Public API - what other modules can use
pub use handlers::{create_event, delete_event, get_event, list_events, update_event};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod service;

/// Routes under `/api/events`. Mutating methods are gated by `AdminSession`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route(
            "/api/events/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
}
