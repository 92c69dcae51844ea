use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use tourdesk_auth::AuthzError;
use tourdesk_core::DomainError;
use tourdesk_infra::{InitiationError, OrderStoreError};

/// Every error an API handler can return.
///
/// Callback routes never produce one of these; they always redirect.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("authentication required")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),

    /// `details` carries the underlying error text to the client.
    #[error("{message}")]
    Internal { message: String, details: String },
}

impl ApiError {
    pub fn internal(message: impl Into<String>, details: impl ToString) -> Self {
        Self::Internal {
            message: message.into(),
            details: details.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "ORDER_NOT_FOUND",
            ApiError::Conflict(_) => "ORDER_CONFLICT",
            ApiError::Unauthenticated => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        match self {
            ApiError::Internal { message, details } => {
                tracing::error!(%message, %details, "request failed");
                json_error(status, code, message, Some(details))
            }
            other => json_error(status, code, other.to_string(), None),
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
    details: Option<String>,
) -> Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
            "code": code,
            "details": details,
        })),
    )
        .into_response()
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidTransition(msg) => ApiError::Conflict(msg),
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => ApiError::Validation(msg),
        }
    }
}

impl From<OrderStoreError> for ApiError {
    fn from(err: OrderStoreError) -> Self {
        match err {
            OrderStoreError::NotFound(n) => ApiError::NotFound(format!("order {n} not found")),
            OrderStoreError::Duplicate(n) => ApiError::Conflict(format!("order number {n} already exists")),
            err @ OrderStoreError::StatusConflict { .. } => ApiError::Conflict(err.to_string()),
            OrderStoreError::Storage(msg) => ApiError::internal("Internal server error", msg),
        }
    }
}

impl From<InitiationError> for ApiError {
    fn from(err: InitiationError) -> Self {
        match err {
            InitiationError::Validation(e) => ApiError::from(e),
            InitiationError::Gateway(e) => ApiError::internal("Failed to initiate payment", e),
        }
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        ApiError::Forbidden(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourdesk_core::OrderNumber;
    use tourdesk_orders::PaymentStatus;
    use tourdesk_payments::GatewayError;

    #[test]
    fn store_errors_map_to_status_codes() {
        let n = OrderNumber::parse("ORD123").unwrap();
        let cases = [
            (ApiError::from(OrderStoreError::NotFound(n.clone())), StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
            (ApiError::from(OrderStoreError::Duplicate(n.clone())), StatusCode::CONFLICT, "ORDER_CONFLICT"),
            (
                ApiError::from(OrderStoreError::StatusConflict {
                    order_number: n,
                    current: PaymentStatus::Success,
                    requested: PaymentStatus::Failed,
                }),
                StatusCode::CONFLICT,
                "ORDER_CONFLICT",
            ),
            (
                ApiError::from(OrderStoreError::Storage("pool closed".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status(), status);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn gateway_failure_keeps_underlying_message_in_details() {
        let err = ApiError::from(InitiationError::Gateway(GatewayError::Rejected("declined".to_string())));
        match err {
            ApiError::Internal { message, details } => {
                assert_eq!(message, "Failed to initiate payment");
                assert!(details.contains("declined"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::from(DomainError::validation("amount must be greater than 0"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "amount must be greater than 0");
    }
}
