use serde::{Deserialize, Serialize};

/// Accounts module configuration (the `accounts` section of the
/// application config's module bag).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccountsConfig {
    /// Rolling session lifetime in minutes.
    pub session_ttl_minutes: i64,
    /// bcrypt work factor for password hashing.
    pub bcrypt_cost: u32,
    /// Failed login attempts allowed per window before throttling.
    pub login_max_attempts: u32,
    /// Throttle window in seconds.
    pub login_window_secs: i64,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            session_ttl_minutes: 30,
            bcrypt_cost: 10,
            login_max_attempts: 5,
            login_window_secs: 300,
        }
    }
}
