//! Postgres-backed order store.
//!
//! ## Error Mapping
//!
//! | SQLx error | Postgres code | `OrderStoreError` |
//! |------------|---------------|-------------------|
//! | Database (unique violation) | `23505` | `Duplicate` |
//! | Database (other) | any | `Storage` |
//! | PoolClosed / Io / other | n/a | `Storage` |
//!
//! `transition_status` reports `StatusConflict` when its guarded `UPDATE`
//! matches no row but the order exists.
//!
//! Rows that fail domain parsing (bad status, malformed order number) are
//! reported as `Storage` rather than silently skipped.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use tourdesk_core::{Locale, OrderId, OrderNumber};
use tourdesk_orders::{Order, PaymentStatus};

use super::r#trait::{OrderStore, OrderStoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id             UUID PRIMARY KEY,
    order_number   TEXT NOT NULL UNIQUE,
    status         TEXT NOT NULL,
    amount         NUMERIC(12, 2) NOT NULL CHECK (amount > 0),
    currency       TEXT NOT NULL,
    customer_email TEXT NOT NULL,
    customer_name  TEXT NOT NULL,
    locale         TEXT NOT NULL,
    tour_id        TEXT NULL,
    notes          TEXT NULL,
    created_at     TIMESTAMPTZ NOT NULL,
    updated_at     TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS orders_created_at_idx ON orders (created_at DESC);
"#;

const SELECT_COLUMNS: &str = "id, order_number, status, amount, currency, customer_email, \
     customer_name, locale, tour_id, notes, created_at, updated_at";

/// Order store on a shared `PgPool`.
///
/// Thread-safe: the pool is `Clone + Send + Sync` and handles its own
/// connection lifecycle (see [`crate::db::lazy_pool`]).
#[derive(Debug, Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `orders` table and index if they do not exist.
    pub async fn ensure_schema(&self) -> Result<(), OrderStoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", None, e))?;
        Ok(())
    }
}

/// Raw row shape before domain parsing.
struct OrderRow {
    id: Uuid,
    order_number: String,
    status: String,
    amount: Decimal,
    currency: String,
    customer_email: String,
    customer_name: String,
    locale: String,
    tour_id: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for OrderRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(OrderRow {
            id: row.try_get("id")?,
            order_number: row.try_get("order_number")?,
            status: row.try_get("status")?,
            amount: row.try_get("amount")?,
            currency: row.try_get("currency")?,
            customer_email: row.try_get("customer_email")?,
            customer_name: row.try_get("customer_name")?,
            locale: row.try_get("locale")?,
            tour_id: row.try_get("tour_id")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = OrderStoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str, e: tourdesk_core::DomainError| {
            OrderStoreError::Storage(format!("corrupt {what} in order row {}: {e}", row.id))
        };
        Ok(Order {
            id: OrderId::from_uuid(row.id),
            order_number: OrderNumber::parse(&row.order_number).map_err(|e| corrupt("order_number", e))?,
            status: row.status.parse::<PaymentStatus>().map_err(|e| corrupt("status", e))?,
            amount: row.amount,
            currency: row.currency,
            customer_email: row.customer_email,
            customer_name: row.customer_name,
            locale: Locale::parse(&row.locale).map_err(|e| corrupt("locale", e))?,
            tour_id: row.tour_id,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn decode_row(row: &sqlx::postgres::PgRow) -> Result<Order, OrderStoreError> {
    use sqlx::FromRow;
    let raw = OrderRow::from_row(row)
        .map_err(|e| OrderStoreError::Storage(format!("failed to decode order row: {e}")))?;
    Order::try_from(raw)
}

fn map_sqlx_error(operation: &str, order_number: Option<&OrderNumber>, err: sqlx::Error) -> OrderStoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some("23505") {
                if let Some(n) = order_number {
                    return OrderStoreError::Duplicate(n.clone());
                }
            }
            OrderStoreError::Storage(format!("database error in {operation}: {}", db_err.message()))
        }
        sqlx::Error::PoolClosed => OrderStoreError::Storage(format!("connection pool closed in {operation}")),
        other => OrderStoreError::Storage(format!("sqlx error in {operation}: {other}")),
    }
}

#[async_trait::async_trait]
impl OrderStore for PostgresOrderStore {
    #[instrument(skip(self, order), fields(order_number = %order.order_number))]
    async fn insert(&self, order: Order) -> Result<Order, OrderStoreError> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_number, status, amount, currency, customer_email,
                customer_name, locale, tour_id, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(*order.id.as_uuid())
        .bind(order.order_number.as_str())
        .bind(order.status.as_str())
        .bind(order.amount)
        .bind(&order.currency)
        .bind(&order.customer_email)
        .bind(&order.customer_name)
        .bind(order.locale.as_str())
        .bind(order.tour_id.as_deref())
        .bind(order.notes.as_deref())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_order", Some(&order.order_number), e))?;

        Ok(order)
    }

    #[instrument(skip(self), fields(order_number = %order_number))]
    async fn find_by_number(&self, order_number: &OrderNumber) -> Result<Option<Order>, OrderStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM orders WHERE order_number = $1"
        ))
        .bind(order_number.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_order", None, e))?;

        row.as_ref().map(decode_row).transpose()
    }

    #[instrument(skip(self, now), fields(order_number = %order_number, status = %status))]
    async fn update_status(
        &self,
        order_number: &OrderNumber,
        status: PaymentStatus,
        now: DateTime<Utc>,
    ) -> Result<Order, OrderStoreError> {
        let row = sqlx::query(&format!(
            "UPDATE orders SET status = $2, updated_at = $3 WHERE order_number = $1 RETURNING {SELECT_COLUMNS}"
        ))
        .bind(order_number.as_str())
        .bind(status.as_str())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_order_status", None, e))?;

        match row {
            Some(row) => decode_row(&row),
            None => Err(OrderStoreError::NotFound(order_number.clone())),
        }
    }

    #[instrument(skip(self, now), fields(order_number = %order_number, status = %status))]
    async fn transition_status(
        &self,
        order_number: &OrderNumber,
        status: PaymentStatus,
        now: DateTime<Utc>,
    ) -> Result<Order, OrderStoreError> {
        let allowed: Vec<&'static str> = PaymentStatus::sources_of(status).map(|s| s.as_str()).collect();

        let row = sqlx::query(&format!(
            "UPDATE orders SET status = $2, updated_at = $3 \
             WHERE order_number = $1 AND status = ANY($4) RETURNING {SELECT_COLUMNS}"
        ))
        .bind(order_number.as_str())
        .bind(status.as_str())
        .bind(now)
        .bind(allowed)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("transition_order_status", None, e))?;

        if let Some(row) = row {
            return decode_row(&row);
        }

        // Nothing matched: either the order is missing or its status forbids the move.
        match self.find_by_number(order_number).await? {
            Some(current) => Err(OrderStoreError::StatusConflict {
                order_number: order_number.clone(),
                current: current.status,
                requested: status,
            }),
            None => Err(OrderStoreError::NotFound(order_number.clone())),
        }
    }

    #[instrument(skip(self))]
    async fn list(&self, status: Option<PaymentStatus>) -> Result<Vec<Order>, OrderStoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM orders \
             WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_orders", None, e))?;

        rows.iter().map(decode_row).collect()
    }
}
