use std::sync::Arc;

use anyhow::Context;

use tourdesk_auth::{Hs256JwtValidator, JwtValidator};
use tourdesk_core::Locale;
use tourdesk_infra::{
    AppConfig, CallbackReconciler, InMemoryOrderStore, OrderStore, PaymentInitiator, PostgresOrderStore,
    db::{DEFAULT_MAX_CONNECTIONS, lazy_pool},
};
use tourdesk_payments::{GatewaySettings, HostedPaymentGateway, PaymentGateway};

/// Everything a handler may need, shared behind an `Arc`.
#[derive(Clone)]
pub struct AppServices {
    pub orders: Arc<dyn OrderStore>,
    pub initiator: PaymentInitiator,
    pub callbacks: CallbackReconciler,
    pub gateway_settings: GatewaySettings,
    pub default_locale: Locale,
    pub locale_cookie: String,
    pub jwt: Arc<dyn JwtValidator>,
}

impl AppServices {
    /// Wire services around an explicit store and gateway.
    pub fn new(config: &AppConfig, orders: Arc<dyn OrderStore>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            initiator: PaymentInitiator::new(
                Arc::clone(&orders),
                gateway,
                config.default_locale.clone(),
                config.gateway.currency.clone(),
            ),
            callbacks: CallbackReconciler::new(Arc::clone(&orders), config.persist_callback_status),
            orders,
            gateway_settings: config.gateway.clone(),
            default_locale: config.default_locale.clone(),
            locale_cookie: config.locale_cookie.clone(),
            jwt: Arc::new(Hs256JwtValidator::new(config.jwt_secret.as_bytes())),
        }
    }
}

pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let orders: Arc<dyn OrderStore> = match config.database_url.as_deref() {
        Some(url) => {
            let pool = lazy_pool(url, DEFAULT_MAX_CONNECTIONS).context("invalid DATABASE_URL")?;
            let store = PostgresOrderStore::new(pool);
            store
                .ensure_schema()
                .await
                .context("failed to prepare the orders schema")?;
            tracing::info!("using postgres order store");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; orders are kept in memory and lost on restart");
            Arc::new(InMemoryOrderStore::new())
        }
    };

    let gateway_settings = &config.gateway;
    if !gateway_settings.credentials_present() {
        tracing::warn!(
            force_enabled = gateway_settings.force_enabled,
            "payment gateway credentials incomplete; initiation will fail"
        );
    }
    let gateway: Arc<dyn PaymentGateway> = Arc::new(HostedPaymentGateway::new(gateway_settings.clone()));

    Ok(AppServices::new(config, orders, gateway))
}
