use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// What a session remembers about its owner. The original board keeps
/// `{id, username, email}` in the session; so do we.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub account_id: Uuid,
    pub username: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// Port for the server-side session store. The backend choice (memory
/// vs. distributed cache) stays behind this seam.
pub trait SessionStore: Send + Sync {
    /// Install a session under a fresh token.
    fn insert(&self, token: String, data: SessionData);

    /// Fetch a live session and extend its rolling expiry by `ttl`.
    /// Expired sessions are treated as absent.
    fn get_touch(&self, token: &str, ttl: Duration) -> Option<SessionData>;

    /// Drop a session; absent tokens are a no-op.
    fn remove(&self, token: &str);
}
