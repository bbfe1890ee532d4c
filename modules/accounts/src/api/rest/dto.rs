use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::contract::model::Account;
use crate::domain::model::{Credentials, NewAccount};
use crate::domain::sessions::SessionData;

/// REST DTO for the public account representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// REST DTO for the identity carried by a live session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUserDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

/// REST DTO for signup
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupReq {
    #[schema(example = "user123")]
    pub username: String,
    #[schema(example = "user123@example.com")]
    pub email: String,
    pub password: String,
}

/// REST DTO for login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginReq {
    pub username: String,
    pub password: String,
}

/// REST DTO for password change
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChangePasswordReq {
    pub current_password: String,
    pub new_password: String,
}

// Conversion implementations between REST DTOs and domain models

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            created_at: account.created_at,
        }
    }
}

impl From<SessionData> for SessionUserDto {
    fn from(session: SessionData) -> Self {
        Self {
            id: session.account_id,
            username: session.username,
            email: session.email,
        }
    }
}

impl From<SignupReq> for NewAccount {
    fn from(req: SignupReq) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
        }
    }
}

impl From<LoginReq> for Credentials {
    fn from(req: LoginReq) -> Self {
        Self {
            username: req.username,
            password: req.password,
        }
    }
}
