use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use super::setup::{TestApp, ADMIN_PASSWORD};

// ============================================================================
// Action Helpers
// ============================================================================

impl TestApp {
    /// Send a request and decode the JSON body (`Null` when there is none)
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }

    // ============================================================================
    // Auth Actions
    // ============================================================================

    pub async fn login(&self, password: &str) -> (StatusCode, Value) {
        self.send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "password": password })),
        )
        .await
    }

    /// Log in with the right password and return the token
    pub async fn login_as_admin(&self) -> String {
        let (status, body) = self.login(ADMIN_PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    /// Ask `/me` whether the token is live
    pub async fn is_authenticated(&self, token: Option<&str>) -> bool {
        let (status, body) = self.send("GET", "/api/auth/me", token, None).await;
        assert_eq!(status, StatusCode::OK);
        body["authenticated"].as_bool().unwrap()
    }

    pub async fn logout(&self, token: Option<&str>) -> (StatusCode, Value) {
        self.send("POST", "/api/auth/logout", token, None).await
    }

    // ============================================================================
    // Event Actions
    // ============================================================================

    pub async fn list_events(&self, all: bool) -> Vec<Value> {
        let uri = if all { "/api/events?all=true" } else { "/api/events" };
        let (status, body) = self.send("GET", uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        body.as_array().unwrap().clone()
    }

    pub async fn create_event(&self, token: Option<&str>, payload: Value) -> (StatusCode, Value) {
        self.send("POST", "/api/events", token, Some(payload)).await
    }

    pub async fn update_event(
        &self,
        token: Option<&str>,
        id: i64,
        payload: Value,
    ) -> (StatusCode, Value) {
        self.send("PUT", &format!("/api/events/{}", id), token, Some(payload))
            .await
    }

    pub async fn delete_event(&self, token: Option<&str>, id: i64) -> (StatusCode, Value) {
        self.send("DELETE", &format!("/api/events/{}", id), token, None)
            .await
    }
}
