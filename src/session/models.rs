use chrono::{DateTime, Duration, Utc};

/// How long a session stays valid after login. Fixed, never refreshed by use.
pub const SESSION_TTL_HOURS: i64 = 24;

pub fn session_ttl() -> Duration {
    Duration::hours(SESSION_TTL_HOURS)
}

/// An issued admin session
///
/// Immutable once created. There is a single admin identity, so no subject is
/// carried alongside the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionModel {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionModel {
    /// Creates a session issued at `now` that expires after [`SESSION_TTL_HOURS`]
    pub fn new(token: String, now: DateTime<Utc>) -> Self {
        Self {
            token,
            created_at: now,
            expires_at: now + session_ttl(),
        }
    }

    /// A session is valid strictly before its expiry instant
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_session_model() {
        let now = Utc.with_ymd_and_hms(2026, 2, 12, 9, 0, 0).unwrap();
        let session = SessionModel::new("abc".to_string(), now);

        assert_eq!(session.token, "abc");
        assert_eq!(session.created_at, now);
        assert_eq!(session.expires_at, now + Duration::hours(24));
    }

    #[test]
    fn test_session_expiry_boundary() {
        let now = Utc.with_ymd_and_hms(2026, 2, 12, 9, 0, 0).unwrap();
        let session = SessionModel::new("abc".to_string(), now);

        assert!(session.is_valid_at(now));
        assert!(session.is_valid_at(session.expires_at - Duration::milliseconds(1)));
        assert!(!session.is_valid_at(session.expires_at));
        assert!(!session.is_valid_at(now + Duration::hours(25)));
    }
}
