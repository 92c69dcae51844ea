//! Entity trait: records that keep their identity while their fields change.
//!
//! An order is the canonical example: its status moves from `pending` to
//! `success` but it is still the same order.

/// A domain record with a stable identifier.
pub trait Entity {
    /// Strongly-typed identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Two entities are the same record when their ids match, regardless of state.
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
