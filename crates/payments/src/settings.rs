//! Gateway settings and the "is the gateway enabled" resolver.

use serde::Serialize;

use crate::GatewayError;

/// Connection settings for the hosted payment gateway.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    pub merchant_id: Option<String>,
    pub store_key: Option<String>,
    pub api_url: Option<String>,
    /// Public origin of the site; callback URLs are built from it.
    pub public_base_url: String,
    /// ISO 4217 alphabetic code used when neither the stored order nor the
    /// initiation request names one.
    pub currency: String,
    /// Report the gateway as enabled even when credentials are missing.
    ///
    /// Test-environment shim; defaults to `true` until the production
    /// credentials are rolled out everywhere.
    pub force_enabled: bool,
}

/// Credentials borrowed from [`GatewaySettings`] once all of them are known to be present.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub merchant_id: &'a str,
    pub store_key: &'a str,
    pub api_url: &'a str,
}

/// Body of the gateway status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayStatus {
    pub enabled: bool,
    pub message: String,
}

impl GatewaySettings {
    /// All three credential values present and non-blank.
    pub fn credentials_present(&self) -> bool {
        self.credentials().is_ok()
    }

    pub fn is_enabled(&self) -> bool {
        self.force_enabled || self.credentials_present()
    }

    pub fn status(&self) -> GatewayStatus {
        let enabled = self.is_enabled();
        let message = if enabled {
            "Payment gateway is enabled"
        } else {
            "Payment gateway is not configured"
        };
        GatewayStatus {
            enabled,
            message: message.to_string(),
        }
    }

    pub fn credentials(&self) -> Result<Credentials<'_>, GatewayError> {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }

        let mut missing = Vec::new();
        let merchant_id = present(&self.merchant_id);
        let store_key = present(&self.store_key);
        let api_url = present(&self.api_url);
        if merchant_id.is_none() {
            missing.push("merchant id");
        }
        if store_key.is_none() {
            missing.push("store key");
        }
        if api_url.is_none() {
            missing.push("gateway API URL");
        }

        match (merchant_id, store_key, api_url) {
            (Some(merchant_id), Some(store_key), Some(api_url)) => Ok(Credentials {
                merchant_id,
                store_key,
                api_url,
            }),
            _ => Err(GatewayError::NotConfigured(missing.join(", "))),
        }
    }

    pub fn success_url(&self) -> String {
        format!("{}/api/payment/success", self.public_base_url.trim_end_matches('/'))
    }

    pub fn fail_url(&self) -> String {
        format!("{}/api/payment/fail", self.public_base_url.trim_end_matches('/'))
    }
}

impl core::fmt::Debug for GatewaySettings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GatewaySettings")
            .field("merchant_id", &self.merchant_id)
            .field("store_key", &self.store_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("public_base_url", &self.public_base_url)
            .field("currency", &self.currency)
            .field("force_enabled", &self.force_enabled)
            .finish()
    }
}
