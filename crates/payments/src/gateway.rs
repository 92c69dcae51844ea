use serde::Serialize;
use thiserror::Error;

use tourdesk_core::OrderNumber;

use crate::GatewayPaymentRequest;

/// Where to send the customer's browser to complete payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRedirect {
    pub redirect_url: String,
    pub order_id: OrderNumber,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("payment gateway is not configured (missing: {0})")]
    NotConfigured(String),

    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("gateway rejected the request: {0}")]
    Rejected(String),
}

/// A hosted payment provider.
///
/// Implementations turn a validated payment request into a redirect target.
/// Errors are reported to the caller as a generic initiation failure; nothing
/// is retried.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &'static str;

    async fn create_redirect(
        &self,
        request: &GatewayPaymentRequest,
    ) -> Result<GatewayRedirect, GatewayError>;
}
