// --- File: crates/rocketrides_config/src/models.rs ---

use serde::{Deserialize, Serialize};

use crate::env_vars;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4242;
pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_ACCOUNT_COUNTRY: &str = "US";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Marker value in config files that is replaced by an environment variable.
pub const SECRET_FROM_ENV: &str = "secret_from_env";

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with a pre-built front-end, served as a fallback when set.
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// --- Stripe Config ---
// Holds non-secret Stripe config. The secret key is usually `secret_from_env`
// in files and resolved from STRIPE_SECRET_KEY.
#[derive(Deserialize, Serialize, Clone, PartialEq)]
pub struct StripeConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Country used when creating connected accounts.
    #[serde(default = "default_account_country")]
    pub account_country: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            secret_key: None,
            account_country: default_account_country(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl StripeConfig {
    /// Returns the configured secret key, falling back to the environment.
    ///
    /// An unresolved `secret_from_env` marker or an empty string counts as missing.
    pub fn resolve_secret_key(&self) -> Option<String> {
        self.secret_key
            .as_deref()
            .filter(|key| !key.is_empty() && *key != SECRET_FROM_ENV)
            .map(str::to_string)
            .or_else(|| env_vars::get_secret_env_var("stripe.secret_key"))
            .filter(|key| !key.is_empty())
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_base", &self.api_base)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "***"))
            .field("account_country", &self.account_country)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub stripe: StripeConfig,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_api_base() -> String {
    DEFAULT_STRIPE_API_BASE.to_string()
}

fn default_account_country() -> String {
    DEFAULT_ACCOUNT_COUNTRY.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
