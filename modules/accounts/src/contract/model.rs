use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Pure account model for inter-module communication (no serde, no
/// credential material).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The authenticated identity attached to a request by the session
/// middleware. Downstream modules trust this value and never re-derive
/// identity themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub account_id: Uuid,
    pub username: String,
}
