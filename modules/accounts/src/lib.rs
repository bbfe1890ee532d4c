//! Accounts module: users, credentials and server-side sessions.
//!
//! Identity flows through an explicit [`contract::model::AuthContext`]
//! resolved from the `sid` session cookie by the module's auth
//! middleware; nothing downstream re-derives it.

pub mod api;
pub mod config;
pub mod contract;
pub mod domain;
pub mod gateways;
pub mod infra;
