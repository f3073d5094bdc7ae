// Library crate for the club events API
// This file exposes the public API for the binary and integration tests

pub mod auth;
pub mod config;
pub mod events;
pub mod routes;
pub mod session;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use auth::{require_auth, AdminSession};
pub use config::AppConfig;
pub use events::repository::{EventRepository, InMemoryEventRepository, PostgresEventRepository};
pub use session::{Clock, InMemorySessionStore, ManualClock, SessionStore, SystemClock};
pub use shared::{AppError, AppState};
