use std::sync::Arc;

use axum::{
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use tourdesk_core::OrderNumber;
use tourdesk_orders::Order;

use crate::app::{dto, errors::ApiError, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order))
        .route("/:order_number", get(get_order))
}

/// `POST /api/orders`
pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let Json(body) = body.map_err(|e| ApiError::Validation(e.body_text()))?;

    let order = body
        .into_new_order()?
        .place(&services.default_locale, Utc::now())?;
    let order = services.orders.insert(order).await?;

    tracing::info!(order_number = %order.order_number, amount = %order.amount, "order created");
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders/{orderNumber}`
pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(raw): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order_number = OrderNumber::parse(&raw)?;
    services
        .orders
        .find_by_number(&order_number)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("order {order_number} not found")))
}
