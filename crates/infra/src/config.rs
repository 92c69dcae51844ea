//! Configuration loading from the process environment.
//!
//! Values are read once at startup. Credentials are kept as opaque strings
//! and never logged (see the `Debug` impls).

use std::net::SocketAddr;

use thiserror::Error;

use tourdesk_core::Locale;
use tourdesk_payments::GatewaySettings;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_LOCALE_COOKIE: &str = "NEXT_LOCALE";
pub const DEFAULT_CURRENCY: &str = "EUR";
pub const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the API process needs to start.
#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Postgres connection string. `None` runs on the in-memory order store.
    pub database_url: Option<String>,
    pub default_locale: Locale,
    /// Cookie holding the visitor's chosen locale.
    pub locale_cookie: String,
    pub jwt_secret: String,
    /// Whether success/fail callbacks record the final payment status.
    pub persist_callback_status: bool,
    pub gateway: GatewaySettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::InvalidValue {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let locale_raw = get("DEFAULT_LOCALE").unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let default_locale = Locale::parse(&locale_raw).map_err(|e| ConfigError::InvalidValue {
            key: "DEFAULT_LOCALE",
            value: locale_raw.clone(),
            reason: e.to_string(),
        })?;

        let jwt_secret = match get("AUTH_JWT_SECRET") {
            Some(secret) => secret,
            None => {
                tracing::warn!("AUTH_JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            }
        };

        let gateway = GatewaySettings {
            merchant_id: get("PAYMENT_MERCHANT_ID"),
            store_key: get("PAYMENT_STORE_KEY"),
            api_url: get("PAYMENT_GATEWAY_API_URL"),
            public_base_url: get("PUBLIC_BASE_URL").unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string()),
            currency: get("PAYMENT_CURRENCY")
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            force_enabled: parse_flag("PAYMENT_GATEWAY_FORCE_ENABLED", get("PAYMENT_GATEWAY_FORCE_ENABLED"), true)?,
        };

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            default_locale,
            locale_cookie: get("LOCALE_COOKIE").unwrap_or_else(|| DEFAULT_LOCALE_COOKIE.to_string()),
            jwt_secret,
            persist_callback_status: parse_flag(
                "PAYMENT_CALLBACK_PERSIST_STATUS",
                get("PAYMENT_CALLBACK_PERSIST_STATUS"),
                true,
            )?,
            gateway,
        })
    }
}

fn parse_flag(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw,
            reason: "expected true/false".to_string(),
        }),
    }
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("default_locale", &self.default_locale)
            .field("locale_cookie", &self.locale_cookie)
            .field("jwt_secret", &"<redacted>")
            .field("persist_callback_status", &self.persist_callback_status)
            .field("gateway", &self.gateway)
            .finish()
    }
}
