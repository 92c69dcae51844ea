//! Order persistence boundary.
//!
//! The API and the payment flow talk to orders only through [`OrderStore`];
//! the in-memory implementation backs dev/test, Postgres backs production.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryOrderStore;
pub use postgres::PostgresOrderStore;
pub use r#trait::{OrderStore, OrderStoreError};
