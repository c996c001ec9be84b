//! Environment variable naming for configuration and secrets.
//!
//! Plain settings use `ROCKETRIDES__SECTION__KEY`. Secrets use
//! `ROCKETRIDES_SECRET_SECTION_KEY` and fall back to the conventional
//! `SECTION_KEY` name, so `stripe.secret_key` also resolves from
//! `STRIPE_SECRET_KEY`.

use std::env;

use serde_json::Value;
use tracing::warn;

use crate::models::SECRET_FROM_ENV;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "ROCKETRIDES";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "ROCKETRIDES_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a secret path to an environment variable name
/// (`stripe.secret_key` → `ROCKETRIDES_SECRET_STRIPE_SECRET_KEY`).
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to its conventional, unprefixed name
/// (`stripe.secret_key` → `STRIPE_SECRET_KEY`).
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", service, key).to_uppercase()
}

/// Look up a secret, trying the prefixed name first.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    if let Ok(value) = env::var(secret_path_to_env_var(path)) {
        return Some(value);
    }

    env::var(legacy_secret_path_to_env_var(path)).ok()
}

/// Replace every `secret_from_env` string in `value` with the matching secret
/// environment variable. Returns `true` when anything was replaced.
pub fn inject_env_vars(value: &mut Value) -> bool {
    fn walk(path: &mut Vec<String>, obj: &mut Value) -> bool {
        let mut replaced = false;

        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    path.push(k.to_string());
                    replaced |= walk(path, v);
                    path.pop();
                }
            }
            Value::String(s) if s == SECRET_FROM_ENV => {
                let path_str = path.join(".");
                if let Some(env_val) = get_secret_env_var(&path_str) {
                    *s = env_val;
                    replaced = true;
                } else {
                    warn!("env var for {} not found", path_str);
                }
            }
            _ => {}
        }

        replaced
    }

    walk(&mut Vec::new(), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_path_to_env_var() {
        assert_eq!(
            secret_path_to_env_var("stripe.secret_key"),
            "ROCKETRIDES_SECRET_STRIPE_SECRET_KEY"
        );
    }

    #[test]
    fn test_legacy_secret_path_to_env_var() {
        assert_eq!(
            legacy_secret_path_to_env_var("stripe.secret_key"),
            "STRIPE_SECRET_KEY"
        );
        assert_eq!(legacy_secret_path_to_env_var("token"), "TOKEN");
    }

    #[test]
    fn test_inject_leaves_plain_values_alone() {
        let mut value = serde_json::json!({
            "server": { "host": "0.0.0.0", "port": 4242 },
            "stripe": { "api_base": "https://api.stripe.com" }
        });
        let before = value.clone();
        assert!(!inject_env_vars(&mut value));
        assert_eq!(value, before);
    }
}
