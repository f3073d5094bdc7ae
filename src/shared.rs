use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::events::repository::EventRepository;
use crate::session::SessionStore;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub session_store: Arc<dyn SessionStore>,
    pub event_repository: Arc<dyn EventRepository + Send + Sync>,
    pub admin_password: Arc<str>,
}

impl AppState {
    pub fn new(
        session_store: Arc<dyn SessionStore>,
        event_repository: Arc<dyn EventRepository + Send + Sync>,
        admin_password: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            session_store,
            event_repository,
            admin_password: admin_password.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing or malformed authorization header")]
    Unauthenticated,

    #[error("Session not found or expired")]
    InvalidSession,

    #[error("Invalid password")]
    BadCredentials,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Both render the same so callers cannot tell which tokens exist
            AppError::Unauthenticated | AppError::InvalidSession => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            AppError::BadCredentials => (StatusCode::UNAUTHORIZED, "Invalid password".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// JSON body extractor whose failures render as `AppError::BadRequest`
///
/// The content type is not checked, matching the lenient login body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(ApiJson)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
    }
}
