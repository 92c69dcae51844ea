//! Payment initiation: validate, mark the order as processing, ask the gateway
//! for a redirect.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use tourdesk_core::{DomainError, Locale, OrderNumber};
use tourdesk_orders::PaymentStatus;
use tourdesk_payments::{
    GatewayError, GatewayPaymentRequest, GatewayRedirect, InitiatePaymentRequest, PaymentGateway,
};

use crate::order_store::OrderStore;

#[derive(Debug, Error)]
pub enum InitiationError {
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Clone)]
pub struct PaymentInitiator {
    orders: Arc<dyn OrderStore>,
    gateway: Arc<dyn PaymentGateway>,
    default_language: Locale,
    default_currency: String,
}

impl PaymentInitiator {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        gateway: Arc<dyn PaymentGateway>,
        default_language: Locale,
        default_currency: impl Into<String>,
    ) -> Self {
        Self {
            orders,
            gateway,
            default_language,
            default_currency: default_currency.into(),
        }
    }

    /// Start a payment for an existing order.
    ///
    /// Validation failures return before the store or the gateway is touched.
    /// A stored order's currency overrides the one in the request. The status
    /// update to `processing` runs detached and is not awaited; it never moves
    /// an order out of `success`.
    pub async fn initiate(&self, raw: &InitiatePaymentRequest) -> Result<GatewayRedirect, InitiationError> {
        let mut request = raw.validate(&self.default_language, &self.default_currency)?;
        self.adopt_order_currency(&mut request).await;

        self.mark_processing(request.order_number.clone());

        let redirect = self.gateway.create_redirect(&request).await?;
        info!(
            order_number = %request.order_number,
            gateway = self.gateway.name(),
            "payment initiated"
        );
        Ok(redirect)
    }

    async fn adopt_order_currency(&self, request: &mut GatewayPaymentRequest) {
        match self.orders.find_by_number(&request.order_number).await {
            Ok(Some(order)) if order.currency != request.currency => {
                debug!(
                    order_number = %request.order_number,
                    requested = %request.currency,
                    stored = %order.currency,
                    "using the order's currency"
                );
                request.currency = order.currency;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(order_number = %request.order_number, error = %e, "failed to load order currency");
            }
        }
    }

    fn mark_processing(&self, order_number: OrderNumber) {
        let orders = Arc::clone(&self.orders);
        tokio::spawn(async move {
            if let Err(e) = orders
                .transition_status(&order_number, PaymentStatus::Processing, Utc::now())
                .await
            {
                warn!(order_number = %order_number, error = %e, "failed to mark order as processing");
            }
        });
    }
}
