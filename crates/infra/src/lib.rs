//! Infrastructure layer: configuration, storage adapters, and the payment
//! orchestration that ties orders to the gateway.

pub mod config;
pub mod db;
pub mod order_store;
pub mod payment_callbacks;
pub mod payment_initiator;

pub use config::{AppConfig, ConfigError};
pub use order_store::{InMemoryOrderStore, OrderStore, OrderStoreError, PostgresOrderStore};
pub use payment_callbacks::{CallbackReconciler, RecordOutcome};
pub use payment_initiator::{InitiationError, PaymentInitiator};
