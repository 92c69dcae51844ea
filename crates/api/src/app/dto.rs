use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tourdesk_auth::Role;
use tourdesk_core::{Locale, OrderNumber};
use tourdesk_orders::{NewOrder, Order};
use tourdesk_payments::GatewayRedirect;

use crate::app::errors::ApiError;
use crate::context::PrincipalContext;

// -------------------------
// Request DTOs
// -------------------------

/// Checkout body. Fields are optional on the wire so that omissions surface
/// as validation errors.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub email: Option<String>,
    pub customer_name: Option<String>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub locale: Option<String>,
    pub tour_id: Option<String>,
    pub notes: Option<String>,
}

impl CreateOrderRequest {
    pub fn into_new_order(self) -> Result<NewOrder, ApiError> {
        let locale = match self.locale.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            Some(tag) => Some(Locale::parse(tag)?),
            None => None,
        };
        Ok(NewOrder {
            email: self.email.unwrap_or_default(),
            customer_name: self.customer_name.unwrap_or_default(),
            amount: self.amount.unwrap_or(Decimal::ZERO),
            currency: self.currency,
            locale,
            tour_id: self.tour_id,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListOrdersQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentResponse {
    pub success: bool,
    pub redirect_url: String,
    pub order_id: OrderNumber,
}

impl From<GatewayRedirect> for InitiatePaymentResponse {
    fn from(redirect: GatewayRedirect) -> Self {
        Self {
            success: true,
            redirect_url: redirect.redirect_url,
            order_id: redirect.order_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub struct WhoAmI {
    pub sub: String,
    pub email: Option<String>,
    pub roles: Vec<Role>,
}

impl From<&PrincipalContext> for WhoAmI {
    fn from(ctx: &PrincipalContext) -> Self {
        let principal = ctx.principal();
        Self {
            sub: principal.subject.clone(),
            email: principal.email.clone(),
            roles: principal.roles.clone(),
        }
    }
}
