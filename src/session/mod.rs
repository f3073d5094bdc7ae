// Public API - what other modules can use
pub use clock::{Clock, ManualClock, SystemClock};
pub use models::{session_ttl, SESSION_TTL_HOURS};
pub use store::{InMemorySessionStore, SessionStore};

// Internal modules
pub mod clock;
pub mod generators;
pub mod models;
pub mod store;
