use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, Json};

use tourdesk_payments::GatewayStatus;

use crate::app::{dto::WhoAmI, services::AppServices};
use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> Json<WhoAmI> {
    Json(WhoAmI::from(&principal))
}

/// `GET /api/payment/status`
pub async fn gateway_status(Extension(services): Extension<Arc<AppServices>>) -> Json<GatewayStatus> {
    Json(services.gateway_settings.status())
}
