use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument, warn};

use super::{
    clock::{Clock, SystemClock},
    generators::{TokenGenerator, UuidTokenGenerator},
    models::SessionModel,
};

/// Fresh tokens drawn before giving up on avoiding a collision
const MAX_TOKEN_ATTEMPTS: usize = 3;

/// Trait for session store operations
///
/// Implementations own the full set of active sessions. Every operation is
/// synchronous and must be safe to call from concurrently handled requests.
pub trait SessionStore: Send + Sync {
    /// Issues a new token valid for the session TTL. Callers must have checked
    /// the admin credential already.
    fn create_session(&self) -> String;

    /// True iff the token was issued, not deleted, and is not yet expired
    fn validate_session(&self, token: &str) -> bool;

    /// Removes the session if present. Unknown tokens are ignored.
    fn delete_session(&self, token: &str);
}

/// In-memory session store
///
/// Sessions live for the lifetime of the process; a restart logs everyone out.
/// Expired entries are dropped lazily, when they are next validated or when a
/// new session is created.
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, SessionModel>>,
    clock: Arc<dyn Clock>,
    token_generator: Arc<dyn TokenGenerator>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionStore {
    /// Creates an empty store using the system clock and UUID tokens
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_dependencies(clock, Arc::new(UuidTokenGenerator::new()))
    }

    pub fn with_dependencies(
        clock: Arc<dyn Clock>,
        token_generator: Arc<dyn TokenGenerator>,
    ) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            clock,
            token_generator,
        }
    }

    /// Number of entries currently held, expired-but-unvalidated ones included
    pub fn session_count(&self) -> usize {
        self.sessions().len()
    }

    // The map has no invariant spanning more than one insert/remove, so a
    // panic while holding the lock cannot leave it half-updated.
    fn sessions(&self) -> MutexGuard<'_, HashMap<String, SessionModel>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for InMemorySessionStore {
    #[instrument(skip(self))]
    fn create_session(&self) -> String {
        let now = self.clock.now();
        let mut sessions = self.sessions();

        // Expired tokens that were never checked again would otherwise pile up
        let before = sessions.len();
        sessions.retain(|_, session| session.is_valid_at(now));
        if sessions.len() < before {
            debug!(purged = before - sessions.len(), "Purged expired sessions");
        }

        let mut token = self.token_generator.generate();
        for _ in 1..MAX_TOKEN_ATTEMPTS {
            if !sessions.contains_key(&token) {
                break;
            }
            warn!("Generated session token already in use, drawing another");
            token = self.token_generator.generate();
        }

        let session = SessionModel::new(token.clone(), now);
        debug!(expires_at = %session.expires_at, "Creating session in memory");
        sessions.insert(token.clone(), session);

        debug!(active_sessions = sessions.len(), "Session created in memory");
        token
    }

    #[instrument(skip(self, token))]
    fn validate_session(&self, token: &str) -> bool {
        let now = self.clock.now();
        let mut sessions = self.sessions();

        let Some(session) = sessions.get(token) else {
            debug!("Session not found in memory");
            return false;
        };

        if session.is_valid_at(now) {
            debug!(expires_at = %session.expires_at, "Session is valid");
            return true;
        }

        debug!(expired_at = %session.expires_at, "Session expired, removing it");
        sessions.remove(token);
        false
    }

    #[instrument(skip(self, token))]
    fn delete_session(&self, token: &str) {
        match self.sessions().remove(token) {
            Some(_) => debug!("Session deleted from memory"),
            None => debug!("No session to delete"),
        }
    }
}
