use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use tracing::{info, instrument, warn};

use super::{
    guard::bearer_token,
    types::{LoginRequest, LoginResponse, MeResponse, OkResponse},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for admin login
///
/// POST /api/auth/login
/// Trades the admin password for a session token. The body is read as JSON
/// regardless of content type; anything unparseable counts as no password.
#[instrument(name = "login", skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LoginResponse>, AppError> {
    let request: LoginRequest = serde_json::from_slice(&body).unwrap_or_default();

    let Some(password) = request.password else {
        warn!("Login attempt without a password");
        return Err(AppError::BadCredentials);
    };

    if password.as_str() != &*state.admin_password {
        warn!("Login attempt with wrong password");
        return Err(AppError::BadCredentials);
    }

    let token = state.session_store.create_session();
    info!("Admin logged in, session created");

    Ok(Json(LoginResponse { token }))
}

/// HTTP handler reporting whether the caller's token is live
///
/// GET /api/auth/me
/// Never rejects; the outcome is in the body.
#[instrument(name = "me", skip(state, headers))]
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Json<MeResponse> {
    let authenticated =
        bearer_token(&headers).is_some_and(|token| state.session_store.validate_session(token));

    info!(authenticated, "Session status checked");
    Json(MeResponse { authenticated })
}

/// HTTP handler for logout
///
/// POST /api/auth/logout
/// Always succeeds, with or without a (valid) token.
#[instrument(name = "logout", skip(state, headers))]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<OkResponse> {
    match bearer_token(&headers) {
        Some(token) => {
            state.session_store.delete_session(token);
            info!("Session revoked");
        }
        None => info!("Logout without a token"),
    }

    Json(OkResponse::new())
}
