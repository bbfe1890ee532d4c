//! In-process session store. Expired sessions are dropped lazily on
//! access; a distributed backend would implement the same port.

use chrono::{Duration, Utc};
use dashmap::DashMap;

use crate::domain::sessions::{SessionData, SessionStore};

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, SessionData>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn insert(&self, token: String, data: SessionData) {
        self.sessions.insert(token, data);
    }

    fn get_touch(&self, token: &str, ttl: Duration) -> Option<SessionData> {
        let now = Utc::now();

        let mut entry = self.sessions.get_mut(token)?;
        if entry.expires_at <= now {
            drop(entry);
            self.sessions.remove(token);
            return None;
        }

        // Rolling expiry: every authenticated access extends the session
        entry.expires_at = now + ttl;
        Some(entry.clone())
    }

    fn remove(&self, token: &str) {
        self.sessions.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn session(expires_in: Duration) -> SessionData {
        SessionData {
            account_id: Uuid::new_v4(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            expires_at: Utc::now() + expires_in,
        }
    }

    #[test]
    fn live_sessions_are_returned_and_extended() {
        let store = MemorySessionStore::new();
        store.insert("tok".into(), session(Duration::minutes(1)));

        let got = store.get_touch("tok", Duration::minutes(30)).unwrap();
        assert_eq!(got.username, "alice");

        // Touch moved the expiry well past the original minute
        let again = store.get_touch("tok", Duration::minutes(30)).unwrap();
        assert!(again.expires_at > Utc::now() + Duration::minutes(25));
    }

    #[test]
    fn expired_sessions_are_dropped() {
        let store = MemorySessionStore::new();
        store.insert("tok".into(), session(Duration::minutes(-1)));

        assert!(store.get_touch("tok", Duration::minutes(30)).is_none());
        // Gone for good, not just filtered
        assert!(store.get_touch("tok", Duration::minutes(30)).is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let store = MemorySessionStore::new();
        store.insert("tok".into(), session(Duration::minutes(5)));
        store.remove("tok");
        store.remove("tok");
        assert!(store.get_touch("tok", Duration::minutes(5)).is_none());
    }
}
