use serde::{Deserialize, Serialize};

/// Fallback signing secret used when none is configured.
pub const DEFAULT_JWT_SECRET: &str = "random-secret";

/// Upper bound on `token_ttl_hours` (ten years).
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365 * 10;

/// Configuration for the events_info module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsInfoConfig {
    /// HMAC secret for identity tokens.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

impl Default for EventsInfoConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

impl EventsInfoConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_token_ttl_hours() -> i64 {
    72
}
