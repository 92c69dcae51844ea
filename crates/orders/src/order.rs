use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tourdesk_core::{DomainError, DomainResult, Entity, Locale, OrderId, OrderNumber};

use crate::PaymentStatus;

/// Currency used when checkout does not name one.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Checkout input: what the customer submitted, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewOrder {
    pub email: String,
    pub customer_name: String,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub locale: Option<Locale>,
    pub tour_id: Option<String>,
    pub notes: Option<String>,
}

impl NewOrder {
    /// Validate checkout input and build a `pending` order with a fresh order number.
    pub fn place(self, default_locale: &Locale, now: DateTime<Utc>) -> DomainResult<Order> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(DomainError::validation("email is required"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation("email must be a valid address"));
        }

        let customer_name = self.customer_name.trim();
        if customer_name.is_empty() {
            return Err(DomainError::validation("customerName is required"));
        }

        if self.amount <= Decimal::ZERO {
            return Err(DomainError::validation("amount must be greater than 0"));
        }

        let currency = match self.currency.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_CURRENCY.to_string(),
            Some(c) if c.len() == 3 && c.chars().all(|ch| ch.is_ascii_alphabetic()) => {
                c.to_ascii_uppercase()
            }
            Some(c) => {
                return Err(DomainError::validation(format!(
                    "currency must be a three-letter ISO code (got {c:?})"
                )));
            }
        };

        Ok(Order {
            id: OrderId::new(),
            order_number: OrderNumber::generate(now),
            status: PaymentStatus::Pending,
            amount: self.amount,
            currency,
            customer_email: email.to_string(),
            customer_name: customer_name.to_string(),
            locale: self.locale.unwrap_or_else(|| default_locale.clone()),
            tour_id: self.tour_id.filter(|t| !t.trim().is_empty()),
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            created_at: now,
            updated_at: now,
        })
    }
}

/// A stored excursion order.
///
/// Serialized camelCase; this is the shape returned by order lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_number: OrderNumber,
    pub status: PaymentStatus,
    pub amount: Decimal,
    pub currency: String,
    pub customer_email: String,
    pub customer_name: String,
    pub locale: Locale,
    pub tour_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Move to `next`, enforcing [`PaymentStatus::can_transition_to`].
    pub fn transition_to(&mut self, next: PaymentStatus, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::invalid_transition(format!(
                "order {} cannot move from {} to {}",
                self.order_number, self.status, next
            )));
        }
        self.set_status(next, now);
        Ok(())
    }

    /// Overwrite the status without checking the lifecycle.
    ///
    /// Used by payment initiation and admin overrides, which are caller-driven.
    pub fn set_status(&mut self, next: PaymentStatus, now: DateTime<Utc>) {
        self.status = next;
        self.updated_at = now;
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn test_locale() -> Locale {
        Locale::parse("en").unwrap()
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn checkout() -> NewOrder {
        NewOrder {
            email: "ana@example.com".to_string(),
            customer_name: "Ana Petrovic".to_string(),
            amount: dec!(120.50),
            currency: None,
            locale: None,
            tour_id: Some("kotor-bay-cruise".to_string()),
            notes: None,
        }
    }

    #[test]
    fn place_creates_pending_order_with_defaults() {
        let now = test_time();
        let order = checkout().place(&test_locale(), now).unwrap();

        assert_eq!(order.status, PaymentStatus::Pending);
        assert_eq!(order.currency, DEFAULT_CURRENCY);
        assert_eq!(order.locale, test_locale());
        assert_eq!(order.amount, dec!(120.50));
        assert_eq!(order.created_at, now);
        assert_eq!(order.updated_at, now);
        assert!(order.order_number.as_str().starts_with("ORD-"));
    }

    #[test]
    fn place_keeps_explicit_locale_and_normalizes_currency() {
        let mut input = checkout();
        input.locale = Some(Locale::parse("de").unwrap());
        input.currency = Some("usd".to_string());

        let order = input.place(&test_locale(), test_time()).unwrap();
        assert_eq!(order.locale.as_str(), "de");
        assert_eq!(order.currency, "USD");
    }

    #[test]
    fn place_rejects_missing_customer_fields() {
        let mut no_email = checkout();
        no_email.email = "  ".to_string();
        assert!(matches!(
            no_email.place(&test_locale(), test_time()),
            Err(DomainError::Validation(msg)) if msg.contains("email")
        ));

        let mut bad_email = checkout();
        bad_email.email = "ana.example.com".to_string();
        assert!(bad_email.place(&test_locale(), test_time()).is_err());

        let mut no_name = checkout();
        no_name.customer_name = String::new();
        assert!(matches!(
            no_name.place(&test_locale(), test_time()),
            Err(DomainError::Validation(msg)) if msg.contains("customerName")
        ));
    }

    #[test]
    fn place_rejects_bad_currency() {
        let mut input = checkout();
        input.currency = Some("EURO".to_string());
        assert!(input.place(&test_locale(), test_time()).is_err());
    }

    #[test]
    fn lifecycle_happy_path_and_terminal_success() {
        let mut order = checkout().place(&test_locale(), test_time()).unwrap();
        order.transition_to(PaymentStatus::Processing, test_time()).unwrap();
        order.transition_to(PaymentStatus::Success, test_time()).unwrap();

        let err = order.transition_to(PaymentStatus::Failed, test_time()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
        assert_eq!(order.status, PaymentStatus::Success);
    }

    #[test]
    fn set_status_bypasses_lifecycle() {
        let mut order = checkout().place(&test_locale(), test_time()).unwrap();
        let placed = order.clone();
        order.set_status(PaymentStatus::Success, test_time());
        order.set_status(PaymentStatus::Processing, test_time());
        assert_eq!(order.status, PaymentStatus::Processing);
        assert!(order.same_identity_as(&placed));

        let other = checkout().place(&test_locale(), test_time()).unwrap();
        assert!(!order.same_identity_as(&other));
    }

    #[test]
    fn serializes_camel_case_record() {
        let order = checkout().place(&test_locale(), test_time()).unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["orderNumber"], order.order_number.as_str());
        assert_eq!(json["customerEmail"], "ana@example.com");
        assert_eq!(json["status"], "pending");

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: no checkout with a non-positive amount produces an order.
        #[test]
        fn non_positive_amounts_never_place(cents in i64::MIN / 2..=0i64) {
            let mut input = checkout();
            input.amount = Decimal::new(cents, 2);
            let result = input.place(&test_locale(), test_time());
            prop_assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        /// Property: a successful order never changes status again through the lifecycle API.
        #[test]
        fn success_absorbs_every_transition(idx in 0usize..4) {
            let mut order = checkout().place(&test_locale(), test_time()).unwrap();
            order.set_status(PaymentStatus::Success, test_time());
            let next = PaymentStatus::ALL[idx];
            prop_assert!(order.transition_to(next, test_time()).is_err());
            prop_assert_eq!(order.status, PaymentStatus::Success);
        }
    }
}
