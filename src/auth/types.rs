use serde::{Deserialize, Serialize};

/// Request payload for the login endpoint
///
/// `password` is optional so that a missing field is reported as a failed
/// login rather than a malformed request.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub password: Option<String>,
}

/// Response for a successful login
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
}

/// Response for the session status endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MeResponse {
    pub authenticated: bool,
}

/// Acknowledgement body shared by logout and delete endpoints
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_request_without_password() {
        let request: LoginRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.password, None);
    }

    #[test]
    fn test_response_shapes() {
        assert_eq!(
            serde_json::to_value(LoginResponse {
                token: "abc".to_string()
            })
            .unwrap(),
            json!({ "token": "abc" })
        );
        assert_eq!(
            serde_json::to_value(MeResponse {
                authenticated: false
            })
            .unwrap(),
            json!({ "authenticated": false })
        );
        assert_eq!(
            serde_json::to_value(OkResponse::new()).unwrap(),
            json!({ "ok": true })
        );
    }
}
