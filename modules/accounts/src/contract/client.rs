use async_trait::async_trait;

use crate::contract::error::AccountsError;
use crate::contract::model::AuthContext;

/// Public API trait for the accounts module that other modules can use.
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// Resolve a session token into an authenticated identity, extending
    /// the session's rolling expiry on success.
    async fn authenticate(&self, session_token: &str) -> Result<AuthContext, AccountsError>;
}
