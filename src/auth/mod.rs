use axum::{
    routing::{get, post},
    Router,
};

use crate::shared::AppState;

// Public API - what other modules can use
pub use guard::{bearer_token, require_auth, AdminSession};
pub use handlers::{login, logout, me};
pub use types::{LoginResponse, MeResponse, OkResponse};

// Internal modules
mod guard;
mod handlers;
mod types;

/// Routes under `/api/auth`. Paths not listed here are left to the outer router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
}
