use std::{env, fmt::Display, net::SocketAddr, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::backend::domain::commands::checkout::CheckoutSettings;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);
const DEFAULT_DATABASE_URL: &str = "sqlite:journal.db";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_TIMEOUT_SECS: u64 = 15;
const DEFAULT_STRIPE_BASE_URL: &str = "https://api.stripe.com";
const DEFAULT_SUCCESS_URL: &str = "http://localhost:8080/?checkout=success";
const DEFAULT_CANCEL_URL: &str = "http://localhost:8080/?checkout=cancel";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub cors_origin: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_timeout: Duration,
    pub stripe_secret_key: Option<String>,
    pub stripe_base_url: String,
    pub stripe_price_id: Option<String>,
    pub checkout_success_url: String,
    pub checkout_cancel_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::load(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing or unparsable values use defaults
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let timeout_secs: u64 = try_load(&lookup, "OPENAI_TIMEOUT_SECS", DEFAULT_OPENAI_TIMEOUT_SECS);

        Self {
            bind_addr: try_load(&lookup, "JOURNAL_BIND_ADDR", SocketAddr::from(DEFAULT_BIND_ADDR)),
            database_url: load_or(&lookup, "JOURNAL_DATABASE_URL", DEFAULT_DATABASE_URL),
            cors_origin: load_or(&lookup, "JOURNAL_CORS_ORIGIN", DEFAULT_CORS_ORIGIN),
            openai_api_key: secret(&lookup, "OPENAI_API_KEY"),
            openai_base_url: load_or(&lookup, "OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            openai_model: load_or(&lookup, "OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            openai_timeout: Duration::from_secs(timeout_secs.max(1)),
            stripe_secret_key: secret(&lookup, "STRIPE_SECRET_KEY"),
            stripe_base_url: load_or(&lookup, "STRIPE_BASE_URL", DEFAULT_STRIPE_BASE_URL),
            stripe_price_id: secret(&lookup, "STRIPE_PRICE_ID"),
            checkout_success_url: load_or(&lookup, "CHECKOUT_SUCCESS_URL", DEFAULT_SUCCESS_URL),
            checkout_cancel_url: load_or(&lookup, "CHECKOUT_CANCEL_URL", DEFAULT_CANCEL_URL),
        }
    }

    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            price_id: self.stripe_price_id.clone(),
            success_url: self.checkout_success_url.clone(),
            cancel_url: self.checkout_cancel_url.clone(),
        }
    }
}

fn var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn load_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    var(lookup, key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn try_load<T: FromStr + Display>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T::Err: Display,
{
    match var(lookup, key) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

/// Optional values; never logged
fn secret(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    let value = var(lookup, key);
    if value.is_none() {
        warn!("Environment variable {key} not found, related features are disabled");
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_with(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::load(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load_with(&[]);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.database_url, "sqlite:journal.db");
        assert_eq!(config.cors_origin, "http://localhost:8080");
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.openai_timeout, Duration::from_secs(15));
        assert!(config.openai_api_key.is_none());
        assert!(config.stripe_price_id.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load_with(&[
            ("JOURNAL_BIND_ADDR", "0.0.0.0:8000"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_TIMEOUT_SECS", "30"),
            ("STRIPE_PRICE_ID", "price_1"),
        ]);
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.openai_timeout, Duration::from_secs(30));
        assert_eq!(config.checkout_settings().price_id.as_deref(), Some("price_1"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = load_with(&[
            ("JOURNAL_BIND_ADDR", "not-an-address"),
            ("OPENAI_TIMEOUT_SECS", "soon"),
            ("OPENAI_API_KEY", "   "),
        ]);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.openai_timeout, Duration::from_secs(15));
        assert!(config.openai_api_key.is_none());
    }
}
