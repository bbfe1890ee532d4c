use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{client::AccountsApi, error::AccountsError, model::AuthContext};
use crate::domain::{error::DomainError, service::Service};

/// Local implementation of the AccountsApi trait that delegates to the
/// domain service. Other modules consume the trait, not the service.
pub struct AccountsLocalClient {
    service: Arc<Service>,
}

impl AccountsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AccountsApi for AccountsLocalClient {
    async fn authenticate(&self, session_token: &str) -> Result<AuthContext, AccountsError> {
        self.service.authenticate(session_token).map_err(|e| match e {
            DomainError::SessionExpired => AccountsError::Unauthorized,
            _ => AccountsError::Internal,
        })
    }
}
