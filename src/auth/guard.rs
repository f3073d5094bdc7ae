use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::{debug, warn};

use crate::session::SessionStore;
use crate::shared::{AppError, AppState};

/// Extracts the token from an `Authorization: Bearer <token>` header
///
/// Returns `None` when the header is missing, not valid UTF-8, uses another
/// scheme, or carries an empty or whitespace-containing token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let token = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();

    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some(token)
}

/// Checks that the request carries a live admin session
///
/// `Ok(())` lets the caller proceed. The error is a ready-to-send 401; missing
/// credentials and dead sessions are indistinguishable to the client.
pub fn require_auth(headers: &HeaderMap, sessions: &dyn SessionStore) -> Result<(), AppError> {
    let Some(token) = bearer_token(headers) else {
        warn!("Missing or malformed Authorization header");
        return Err(AppError::Unauthenticated);
    };

    if !sessions.validate_session(token) {
        warn!("Rejected unknown or expired session token");
        return Err(AppError::InvalidSession);
    }

    debug!("Request authenticated");
    Ok(())
}

/// Extractor gating admin-only handlers
///
/// Put it before any body extractor so unauthenticated requests are rejected
/// before the payload is read.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_auth(&parts.headers, state.session_store.as_ref())?;
        Ok(AdminSession)
    }
}
