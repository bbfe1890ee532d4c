use serde::{Deserialize, Serialize};

/// HTTP surface configuration (the `api` section of the module bag).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields, default)]
pub struct ApiConfig {
    pub enable_docs: bool,
    pub cors_enabled: bool,
    pub cors_origins: Vec<String>,
}
