//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. Two `Locale("de")` values are the same
//! locale; two orders with identical fields are still two orders.

/// Marker trait for immutable values compared by their contents.
///
/// Implementors validate on construction, so holding one is proof the value is
/// well-formed (e.g. an [`OrderNumber`](crate::OrderNumber) is never empty).
///
/// ```ignore
/// let a: Locale = "en".parse()?;
/// let b: Locale = "en".parse()?;
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
