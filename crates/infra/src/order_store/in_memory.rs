use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use tourdesk_core::OrderNumber;
use tourdesk_orders::{Order, PaymentStatus};

use super::r#trait::{OrderStore, OrderStoreError};

/// In-memory order store keyed by order number.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderNumber, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> OrderStoreError {
        OrderStoreError::Storage("lock poisoned".to_string())
    }
}

#[async_trait::async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: Order) -> Result<Order, OrderStoreError> {
        let mut orders = self.orders.write().map_err(|_| Self::poisoned())?;
        if orders.contains_key(&order.order_number) {
            return Err(OrderStoreError::Duplicate(order.order_number));
        }
        orders.insert(order.order_number.clone(), order.clone());
        Ok(order)
    }

    async fn find_by_number(&self, order_number: &OrderNumber) -> Result<Option<Order>, OrderStoreError> {
        let orders = self.orders.read().map_err(|_| Self::poisoned())?;
        Ok(orders.get(order_number).cloned())
    }

    async fn update_status(
        &self,
        order_number: &OrderNumber,
        status: PaymentStatus,
        now: DateTime<Utc>,
    ) -> Result<Order, OrderStoreError> {
        let mut orders = self.orders.write().map_err(|_| Self::poisoned())?;
        let order = orders
            .get_mut(order_number)
            .ok_or_else(|| OrderStoreError::NotFound(order_number.clone()))?;
        order.set_status(status, now);
        Ok(order.clone())
    }

    async fn transition_status(
        &self,
        order_number: &OrderNumber,
        status: PaymentStatus,
        now: DateTime<Utc>,
    ) -> Result<Order, OrderStoreError> {
        let mut orders = self.orders.write().map_err(|_| Self::poisoned())?;
        let order = orders
            .get_mut(order_number)
            .ok_or_else(|| OrderStoreError::NotFound(order_number.clone()))?;
        let current = order.status;
        order
            .transition_to(status, now)
            .map_err(|_| OrderStoreError::StatusConflict {
                order_number: order_number.clone(),
                current,
                requested: status,
            })?;
        Ok(order.clone())
    }

    async fn list(&self, status: Option<PaymentStatus>) -> Result<Vec<Order>, OrderStoreError> {
        let orders = self.orders.read().map_err(|_| Self::poisoned())?;
        let mut out: Vec<Order> = orders
            .values()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.as_uuid().cmp(a.id.as_uuid())));
        Ok(out)
    }
}
