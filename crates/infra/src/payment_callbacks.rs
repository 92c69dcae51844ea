//! Recording gateway callback outcomes against stored orders.
//!
//! Callbacks are unauthenticated posts from the gateway (or the customer's
//! browser). Recording is best-effort: nothing here can change where the
//! browser is redirected, and errors are logged, never returned.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use tourdesk_orders::PaymentStatus;
use tourdesk_payments::{CallbackKind, CallbackPayload};

use crate::order_store::{OrderStore, OrderStoreError};

/// What happened when a callback was recorded. Only used for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Persistence is switched off.
    Disabled,
    /// The payload carried no usable `oid`.
    NoOrderNumber,
    UnknownOrder,
    /// The order already had the target status (repeated callback).
    Unchanged,
    Recorded(PaymentStatus),
    /// The stored status does not allow the move (e.g. `success` to `failed`),
    /// including when a concurrent callback changed it first.
    Rejected { current: PaymentStatus },
    StoreFailed(String),
}

#[derive(Clone)]
pub struct CallbackReconciler {
    orders: Arc<dyn OrderStore>,
    persist: bool,
}

impl CallbackReconciler {
    pub fn new(orders: Arc<dyn OrderStore>, persist: bool) -> Self {
        Self { orders, persist }
    }

    pub async fn record(&self, kind: CallbackKind, payload: &CallbackPayload) -> RecordOutcome {
        if !self.persist {
            return RecordOutcome::Disabled;
        }
        let Some(order_number) = payload.order_number() else {
            debug!(oid = ?payload.oid, "callback without a usable order number");
            return RecordOutcome::NoOrderNumber;
        };

        let target = match kind {
            CallbackKind::Success => PaymentStatus::Success,
            CallbackKind::Fail => PaymentStatus::Failed,
        };

        let order = match self.orders.find_by_number(&order_number).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                warn!(order_number = %order_number, status = %target, "callback for unknown order");
                return RecordOutcome::UnknownOrder;
            }
            Err(e) => {
                warn!(order_number = %order_number, error = %e, "failed to load order for callback");
                return RecordOutcome::StoreFailed(e.to_string());
            }
        };

        if order.status == target {
            return RecordOutcome::Unchanged;
        }

        match self.orders.transition_status(&order_number, target, Utc::now()).await {
            Ok(_) => {
                info!(
                    order_number = %order_number,
                    status = %target,
                    response = ?payload.response,
                    "payment outcome recorded"
                );
                RecordOutcome::Recorded(target)
            }
            Err(OrderStoreError::StatusConflict { current, .. }) => {
                warn!(
                    order_number = %order_number,
                    current = %current,
                    requested = %target,
                    "callback status not applied"
                );
                RecordOutcome::Rejected { current }
            }
            Err(OrderStoreError::NotFound(_)) => {
                warn!(order_number = %order_number, status = %target, "order vanished before callback was recorded");
                RecordOutcome::UnknownOrder
            }
            Err(e) => {
                warn!(order_number = %order_number, error = %e, "failed to record payment outcome");
                RecordOutcome::StoreFailed(e.to_string())
            }
        }
    }
}
