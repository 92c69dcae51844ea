//! Hosted payment page client (3D Pay Hosting style).
//!
//! The gateway does not need a server-to-server call to start a payment: the
//! browser is sent to the gateway's URL with the order parameters and a hash
//! keyed by the merchant's store key. The gateway later posts the outcome back
//! to `okUrl` / `failUrl`.

use sha2::{Digest, Sha512};
use tracing::debug;
use uuid::Uuid;

use crate::encoding::encode_component;
use crate::{GatewayError, GatewayPaymentRequest, GatewayRedirect, GatewaySettings, PaymentGateway};

const STORE_TYPE: &str = "3d_pay_hosting";
const HASH_ALGORITHM: &str = "ver3";

/// ISO 4217 numeric code for the currencies the gateway accepts.
pub fn numeric_currency_code(alpha: &str) -> Option<&'static str> {
    match alpha.to_ascii_uppercase().as_str() {
        "EUR" => Some("978"),
        "USD" => Some("840"),
        "RSD" => Some("941"),
        "GBP" => Some("826"),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct HostedPaymentGateway {
    settings: GatewaySettings,
}

impl HostedPaymentGateway {
    pub fn new(settings: GatewaySettings) -> Self {
        Self { settings }
    }

    /// Build the redirect URL for `request` using `rnd` as the per-request nonce.
    pub fn build_redirect_url(
        &self,
        request: &GatewayPaymentRequest,
        rnd: &str,
    ) -> Result<String, GatewayError> {
        let creds = self.settings.credentials()?;
        let currency = numeric_currency_code(&request.currency)
            .ok_or_else(|| GatewayError::UnsupportedCurrency(request.currency.clone()))?;

        let amount = format!("{:.2}", request.amount.round_dp(2));
        let ok_url = self.settings.success_url();
        let fail_url = self.settings.fail_url();

        let params: Vec<(&str, &str)> = vec![
            ("clientid", creds.merchant_id),
            ("oid", request.order_number.as_str()),
            ("amount", amount.as_str()),
            ("currency", currency),
            ("okUrl", ok_url.as_str()),
            ("failUrl", fail_url.as_str()),
            ("lang", request.language.as_str()),
            ("email", request.email.as_str()),
            ("BillToName", request.customer_name.as_str()),
            ("rnd", rnd),
            ("storetype", STORE_TYPE),
            ("hashAlgorithm", HASH_ALGORITHM),
        ];

        let hash = sign(&params, creds.store_key);

        let separator = if creds.api_url.contains('?') { '&' } else { '?' };
        let query = params
            .iter()
            .map(|(k, v)| (*k, *v))
            .chain(std::iter::once(("hash", hash.as_str())))
            .map(|(k, v)| format!("{k}={}", encode_component(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!("{}{separator}{query}", creds.api_url))
    }
}

/// Lowercase hex SHA-512 over `v1|v2|...|vn|store_key`.
///
/// Each value has `\` and `|` backslash-escaped first, so a separator inside
/// a value cannot shift the field boundaries.
fn sign(params: &[(&str, &str)], store_key: &str) -> String {
    let mut hasher = Sha512::new();
    for (_, value) in params {
        hasher.update(escape_hash_value(value).as_bytes());
        hasher.update(b"|");
    }
    hasher.update(escape_hash_value(store_key).as_bytes());
    format!("{:x}", hasher.finalize())
}

fn escape_hash_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('|', "\\|")
}

#[async_trait::async_trait]
impl PaymentGateway for HostedPaymentGateway {
    fn name(&self) -> &'static str {
        "hosted"
    }

    async fn create_redirect(
        &self,
        request: &GatewayPaymentRequest,
    ) -> Result<GatewayRedirect, GatewayError> {
        let rnd = Uuid::now_v7().simple().to_string();
        let redirect_url = self.build_redirect_url(request, &rnd)?;
        debug!(order_number = %request.order_number, "built hosted gateway redirect");
        Ok(GatewayRedirect {
            redirect_url,
            order_id: request.order_number.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tourdesk_core::{Locale, OrderNumber};

    fn settings() -> GatewaySettings {
        GatewaySettings {
            merchant_id: Some("190100000".to_string()),
            store_key: Some("SKEY0123".to_string()),
            api_url: Some("https://testsecurepay.example/fim/est3Dgate".to_string()),
            public_base_url: "https://tours.example".to_string(),
            currency: "EUR".to_string(),
            force_enabled: false,
        }
    }

    fn request() -> GatewayPaymentRequest {
        GatewayPaymentRequest {
            order_number: OrderNumber::parse("ORD-20261019-AB12CD34").unwrap(),
            amount: dec!(150),
            email: "mia@example.com".to_string(),
            customer_name: "Mia Kovac".to_string(),
            language: Locale::parse("en").unwrap(),
            currency: "EUR".to_string(),
        }
    }

    fn query_param<'a>(url: &'a str, key: &str) -> Option<&'a str> {
        let (_, query) = url.split_once('?')?;
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    #[test]
    fn redirect_carries_order_parameters() {
        let gw = HostedPaymentGateway::new(settings());
        let url = gw.build_redirect_url(&request(), "nonce1").unwrap();

        assert!(url.starts_with("https://testsecurepay.example/fim/est3Dgate?clientid=190100000&"));
        assert_eq!(query_param(&url, "oid"), Some("ORD-20261019-AB12CD34"));
        assert_eq!(query_param(&url, "amount"), Some("150.00"));
        assert_eq!(query_param(&url, "currency"), Some("978"));
        assert_eq!(query_param(&url, "BillToName"), Some("Mia%20Kovac"));
        assert_eq!(
            query_param(&url, "okUrl"),
            Some("https%3A%2F%2Ftours.example%2Fapi%2Fpayment%2Fsuccess")
        );
        assert_eq!(query_param(&url, "storetype"), Some("3d_pay_hosting"));
    }

    #[test]
    fn hash_is_keyed_by_store_key() {
        let gw = HostedPaymentGateway::new(settings());
        let a = gw.build_redirect_url(&request(), "nonce1").unwrap();
        let b = gw.build_redirect_url(&request(), "nonce1").unwrap();
        assert_eq!(query_param(&a, "hash"), query_param(&b, "hash"));

        let mut other_key = settings();
        other_key.store_key = Some("OTHERKEY".to_string());
        let c = HostedPaymentGateway::new(other_key)
            .build_redirect_url(&request(), "nonce1")
            .unwrap();
        assert_ne!(query_param(&a, "hash"), query_param(&c, "hash"));

        let hash = query_param(&a, "hash").unwrap();
        assert_eq!(hash.len(), 128);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn existing_query_string_in_api_url_is_extended() {
        let mut s = settings();
        s.api_url = Some("https://gw.example/pay?tenant=7".to_string());
        let url = HostedPaymentGateway::new(s)
            .build_redirect_url(&request(), "n")
            .unwrap();
        assert!(url.starts_with("https://gw.example/pay?tenant=7&clientid="));
    }

    #[tokio::test]
    async fn missing_credentials_fail_the_call() {
        let mut s = settings();
        s.merchant_id = None;
        s.force_enabled = true;
        let err = HostedPaymentGateway::new(s)
            .create_redirect(&request())
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::NotConfigured("merchant id".to_string()));
    }

    #[test]
    fn currency_comes_from_the_request() {
        let mut req = request();
        req.currency = "USD".to_string();
        let url = HostedPaymentGateway::new(settings())
            .build_redirect_url(&req, "nonce1")
            .unwrap();
        assert_eq!(query_param(&url, "currency"), Some("840"));
    }

    #[test]
    fn separators_inside_values_cannot_collide() {
        let gw = HostedPaymentGateway::new(settings());
        let mut a = request();
        a.email = "a".to_string();
        a.customer_name = "b|c".to_string();
        let mut b = request();
        b.email = "a|b".to_string();
        b.customer_name = "c".to_string();

        let ua = gw.build_redirect_url(&a, "nonce1").unwrap();
        let ub = gw.build_redirect_url(&b, "nonce1").unwrap();
        assert_ne!(query_param(&ua, "hash"), query_param(&ub, "hash"));
    }

    #[test]
    fn hash_escapes_backslash_before_pipe() {
        assert_eq!(escape_hash_value("a|b"), "a\\|b");
        assert_eq!(escape_hash_value("a\\|b"), "a\\\\\\|b");
        assert_eq!(escape_hash_value("plain"), "plain");
    }

    #[tokio::test]
    async fn unsupported_currency_fails_the_call() {
        let mut req = request();
        req.currency = "JPY".to_string();
        let err = HostedPaymentGateway::new(settings())
            .create_redirect(&req)
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::UnsupportedCurrency("JPY".to_string()));
    }

    #[tokio::test]
    async fn create_redirect_echoes_order_number() {
        let redirect = HostedPaymentGateway::new(settings())
            .create_redirect(&request())
            .await
            .unwrap();
        assert_eq!(redirect.order_id.as_str(), "ORD-20261019-AB12CD34");
        assert!(query_param(&redirect.redirect_url, "rnd").is_some());
    }
}
