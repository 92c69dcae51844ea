use chrono::{DateTime, Utc};
use thiserror::Error;

use tourdesk_core::OrderNumber;
use tourdesk_orders::{Order, PaymentStatus};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderStoreError {
    #[error("order not found: {0}")]
    NotFound(OrderNumber),

    /// Unique constraint on the order number.
    #[error("order number already exists: {0}")]
    Duplicate(OrderNumber),

    /// A checked transition found the order in a status it may not leave that way.
    #[error("order {order_number} cannot move from {current} to {requested}")]
    StatusConflict {
        order_number: OrderNumber,
        current: PaymentStatus,
        requested: PaymentStatus,
    },

    #[error("storage error: {0}")]
    Storage(String),
}

/// Order persistence.
///
/// `update_status` overwrites whatever status is stored; concurrent writers
/// race and the last write wins. `transition_status` checks the lifecycle and
/// writes in one step, so it cannot undo a status it did not see.
#[async_trait::async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a new order. Fails with `Duplicate` if the order number is taken.
    async fn insert(&self, order: Order) -> Result<Order, OrderStoreError>;

    async fn find_by_number(&self, order_number: &OrderNumber) -> Result<Option<Order>, OrderStoreError>;

    /// Overwrite the payment status and bump `updated_at`.
    async fn update_status(
        &self,
        order_number: &OrderNumber,
        status: PaymentStatus,
        now: DateTime<Utc>,
    ) -> Result<Order, OrderStoreError>;

    /// Move to `status` only if the stored status allows it
    /// ([`PaymentStatus::can_transition_to`]); otherwise `StatusConflict`.
    async fn transition_status(
        &self,
        order_number: &OrderNumber,
        status: PaymentStatus,
        now: DateTime<Utc>,
    ) -> Result<Order, OrderStoreError>;

    /// All orders, newest first, optionally filtered by status.
    async fn list(&self, status: Option<PaymentStatus>) -> Result<Vec<Order>, OrderStoreError>;
}
