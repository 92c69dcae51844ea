//! Orders domain module.
//!
//! Business rules for excursion orders: checkout validation, order number
//! assignment and the payment status lifecycle. Pure domain logic (no IO, no
//! HTTP, no storage).

pub mod order;
pub mod status;

pub use order::{NewOrder, Order, DEFAULT_CURRENCY};
pub use status::PaymentStatus;
