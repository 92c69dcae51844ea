//! `tourdesk-core`: domain building blocks shared by every tourdesk crate.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod locale;
pub mod order_number;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::OrderId;
pub use locale::Locale;
pub use order_number::OrderNumber;
pub use value_object::ValueObject;
