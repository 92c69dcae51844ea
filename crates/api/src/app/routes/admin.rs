//! Back-office order routes. Mounted behind the auth middleware and the
//! admin role guard.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, rejection::JsonRejection},
    routing::{get, patch},
    Json, Router,
};
use chrono::Utc;

use tourdesk_core::OrderNumber;
use tourdesk_orders::{Order, PaymentStatus};

use crate::app::{dto, errors::ApiError, services::AppServices};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/:order_number/status", patch(update_status))
}

/// `GET /api/admin/orders?status=<status>`
pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListOrdersQuery>,
) -> Result<Json<dto::OrderList>, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<PaymentStatus>)
        .transpose()?;

    let items = services.orders.list(status).await?;
    Ok(Json(dto::OrderList { items }))
}

/// `PATCH /api/admin/orders/{orderNumber}/status`
///
/// Manual override: the lifecycle check is skipped.
pub async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(raw): Path<String>,
    body: Result<Json<dto::UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<Order>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    let order_number = OrderNumber::parse(&raw)?;
    let status: PaymentStatus = body.status.parse()?;

    let order = services
        .orders
        .update_status(&order_number, status, Utc::now())
        .await?;

    tracing::info!(
        order_number = %order_number,
        status = %status,
        by = principal.subject(),
        "order status overridden"
    );
    Ok(Json(order))
}
