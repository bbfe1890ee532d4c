use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::AccountsConfig;
use crate::contract::model::{Account, AuthContext};
use crate::domain::error::DomainError;
use crate::domain::model::{AccountRecord, Credentials, NewAccount};
use crate::domain::repo::{AccountsRepository, RepoError};
use crate::domain::sessions::{SessionData, SessionStore};
use crate::domain::throttle::LoginThrottle;

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub session_ttl: Duration,
    pub bcrypt_cost: u32,
    pub login_max_attempts: u32,
    pub login_window: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from(&AccountsConfig::default())
    }
}

impl From<&AccountsConfig> for ServiceConfig {
    fn from(cfg: &AccountsConfig) -> Self {
        Self {
            session_ttl: Duration::minutes(cfg.session_ttl_minutes),
            bcrypt_cost: cfg.bcrypt_cost,
            login_max_attempts: cfg.login_max_attempts,
            login_window: Duration::seconds(cfg.login_window_secs),
        }
    }
}

/// A freshly-opened session together with its owner.
#[derive(Debug, Clone)]
pub struct OpenedSession {
    pub token: String,
    pub account: Account,
}

/// Domain service with business rules for accounts and sessions.
/// Depends only on the repository and session-store ports.
pub struct Service {
    repo: Arc<dyn AccountsRepository>,
    sessions: Arc<dyn SessionStore>,
    throttle: LoginThrottle,
    config: ServiceConfig,
}

impl Service {
    pub fn new(
        repo: Arc<dyn AccountsRepository>,
        sessions: Arc<dyn SessionStore>,
        config: ServiceConfig,
    ) -> Self {
        let throttle = LoginThrottle::new(config.login_max_attempts, config.login_window);
        Self {
            repo,
            sessions,
            throttle,
            config,
        }
    }

    #[instrument(
        name = "accounts.service.sign_up",
        skip(self, new_account),
        fields(username = %new_account.username)
    )]
    pub async fn sign_up(&self, new_account: NewAccount) -> Result<OpenedSession, DomainError> {
        info!("Registering new account");

        self.validate_new_account(&new_account)?;

        // Pre-check uniqueness; the unique indexes catch concurrent racers
        if self
            .repo
            .username_exists(&new_account.username)
            .await
            .map_err(map_repo)?
        {
            return Err(DomainError::user_already_exists(new_account.username));
        }
        if self
            .repo
            .email_exists(&new_account.email)
            .await
            .map_err(map_repo)?
        {
            return Err(DomainError::email_already_registered(new_account.email));
        }

        let password_hash = self.hash_password(new_account.password).await?;

        let now = Utc::now();
        let record = AccountRecord {
            id: Uuid::new_v4(),
            username: new_account.username,
            email: new_account.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        self.repo
            .insert(record.clone())
            .await
            .map_err(|e| match e {
                RepoError::UsernameTaken => DomainError::user_already_exists(&record.username),
                RepoError::EmailTaken => DomainError::email_already_registered(&record.email),
                other => map_repo(other),
            })?;

        info!("Successfully registered account with id={}", record.id);
        Ok(self.open_session(&record))
    }

    #[instrument(
        name = "accounts.service.login",
        skip(self, credentials),
        fields(username = %credentials.username)
    )]
    pub async fn login(&self, credentials: Credentials) -> Result<OpenedSession, DomainError> {
        debug!("Authenticating login");

        require_non_empty("username", &credentials.username)?;
        require_non_empty("password", &credentials.password)?;

        if let Err(retry_after_secs) = self.throttle.check(&credentials.username) {
            warn!("Login throttled for {}s", retry_after_secs);
            return Err(DomainError::TooManyAttempts { retry_after_secs });
        }

        // Unknown username and wrong password are the same error: no
        // account-existence oracle.
        let record = match self
            .repo
            .find_by_username(&credentials.username)
            .await
            .map_err(map_repo)?
        {
            Some(record) => record,
            None => {
                self.throttle.record_failure(&credentials.username);
                return Err(DomainError::InvalidCredentials);
            }
        };

        let ok = verify_password(credentials.password, record.password_hash.clone()).await?;
        if !ok {
            self.throttle.record_failure(&credentials.username);
            return Err(DomainError::InvalidCredentials);
        }

        self.throttle.clear(&credentials.username);
        info!("Login succeeded for account {}", record.id);
        Ok(self.open_session(&record))
    }

    /// Destroy a session; unknown tokens are a no-op.
    #[instrument(name = "accounts.service.logout", skip_all)]
    pub fn logout(&self, token: &str) {
        self.sessions.remove(token);
    }

    /// Resolve a session token, extending its rolling expiry.
    pub fn current_session(&self, token: &str) -> Result<SessionData, DomainError> {
        self.sessions
            .get_touch(token, self.config.session_ttl)
            .ok_or(DomainError::SessionExpired)
    }

    /// Contract-facing identity resolution.
    pub fn authenticate(&self, token: &str) -> Result<AuthContext, DomainError> {
        let session = self.current_session(token)?;
        Ok(AuthContext {
            account_id: session.account_id,
            username: session.username,
        })
    }

    #[instrument(
        name = "accounts.service.change_password",
        skip(self, current_password, new_password),
        fields(account_id = %account_id)
    )]
    pub async fn change_password(
        &self,
        account_id: Uuid,
        current_password: String,
        new_password: String,
    ) -> Result<(), DomainError> {
        info!("Changing password");

        require_non_empty("current_password", &current_password)?;
        require_non_empty("new_password", &new_password)?;

        let record = self
            .repo
            .find_by_id(account_id)
            .await
            .map_err(map_repo)?
            .ok_or_else(|| DomainError::account_not_found(account_id))?;

        let ok = verify_password(current_password, record.password_hash.clone()).await?;
        if !ok {
            return Err(DomainError::InvalidCredentials);
        }

        let password_hash = self.hash_password(new_password).await?;
        let changed = self
            .repo
            .update_password(account_id, password_hash, Utc::now())
            .await
            .map_err(map_repo)?;
        if !changed {
            return Err(DomainError::account_not_found(account_id));
        }

        // Existing sessions stay valid, as the original board behaves.
        info!("Password changed");
        Ok(())
    }

    // --- session helpers ---

    /// Open a session under a fresh token (login and signup always
    /// regenerate; tokens are never reused across authentications).
    fn open_session(&self, record: &AccountRecord) -> OpenedSession {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            SessionData {
                account_id: record.id,
                username: record.username.clone(),
                email: record.email.clone(),
                expires_at: Utc::now() + self.config.session_ttl,
            },
        );
        OpenedSession {
            token,
            account: record.to_public(),
        }
    }

    // --- validation helpers ---

    fn validate_new_account(&self, new_account: &NewAccount) -> Result<(), DomainError> {
        require_non_empty("username", &new_account.username)?;
        require_non_empty("email", &new_account.email)?;
        require_non_empty("password", &new_account.password)?;

        let email = &new_account.email;
        if !email.contains('@') || !email.contains('.') {
            return Err(DomainError::invalid_email(email.clone()));
        }
        Ok(())
    }

    async fn hash_password(&self, password: String) -> Result<String, DomainError> {
        let cost = self.config.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::database(format!("hashing task failed: {e}")))?
            .map_err(|e| DomainError::database(format!("password hashing failed: {e}")))
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::required_field(field));
    }
    Ok(())
}

async fn verify_password(password: String, hash: String) -> Result<bool, DomainError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::database(format!("verify task failed: {e}")))?
        .map_err(|e| DomainError::database(format!("password verify failed: {e}")))
}

// Unique-violation variants are mapped at the insert call site where the
// offending value is known; anywhere else they are unexpected.
fn map_repo(e: RepoError) -> DomainError {
    DomainError::database(e.to_string())
}
