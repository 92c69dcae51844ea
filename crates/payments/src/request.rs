//! Payment initiation input and its validated form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tourdesk_core::{DomainError, Locale, OrderNumber};

/// Raw initiation body as posted by the checkout page.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentRequest {
    pub order_number: Option<String>,
    pub amount: Option<Decimal>,
    pub email: Option<String>,
    pub customer_name: Option<String>,
    pub language: Option<String>,
    /// ISO 4217 alphabetic code; the configured default applies when absent.
    pub currency: Option<String>,
}

/// Value handed to the gateway. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayPaymentRequest {
    pub order_number: OrderNumber,
    pub amount: Decimal,
    pub email: String,
    pub customer_name: String,
    pub language: Locale,
    /// Uppercase ISO 4217 alphabetic code.
    pub currency: String,
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl InitiatePaymentRequest {
    /// Check required fields and the amount. `language` and `currency` fall
    /// back to the given defaults.
    pub fn validate(
        &self,
        default_language: &Locale,
        default_currency: &str,
    ) -> Result<GatewayPaymentRequest, DomainError> {
        let order_number = non_blank(&self.order_number);
        let email = non_blank(&self.email);
        let customer_name = non_blank(&self.customer_name);

        let mut missing = Vec::new();
        if order_number.is_none() {
            missing.push("orderNumber");
        }
        if self.amount.is_none() {
            missing.push("amount");
        }
        if email.is_none() {
            missing.push("email");
        }
        if customer_name.is_none() {
            missing.push("customerName");
        }

        let (Some(order_number), Some(amount), Some(email), Some(customer_name)) =
            (order_number, self.amount, email, customer_name)
        else {
            return Err(DomainError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        };

        if amount <= Decimal::ZERO {
            return Err(DomainError::validation("amount must be greater than 0"));
        }

        let language = match non_blank(&self.language) {
            Some(tag) => Locale::parse(tag)?,
            None => default_language.clone(),
        };
        let currency = parse_currency(non_blank(&self.currency).unwrap_or(default_currency))?;

        Ok(GatewayPaymentRequest {
            order_number: OrderNumber::parse(order_number)?,
            amount,
            email: email.to_string(),
            customer_name: customer_name.to_string(),
            language,
            currency,
        })
    }
}

fn parse_currency(code: &str) -> Result<String, DomainError> {
    let code = code.trim();
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(DomainError::validation("currency must be a three-letter ISO code"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn en() -> Locale {
        Locale::parse("en").unwrap()
    }

    fn complete() -> InitiatePaymentRequest {
        InitiatePaymentRequest {
            order_number: Some("ORD123".to_string()),
            amount: Some(dec!(89.90)),
            email: Some("ivan@example.com".to_string()),
            customer_name: Some("Ivan Horvat".to_string()),
            language: None,
            currency: None,
        }
    }

    #[test]
    fn complete_request_validates_with_default_language() {
        let req = complete().validate(&en(), "EUR").unwrap();
        assert_eq!(req.order_number.as_str(), "ORD123");
        assert_eq!(req.amount, dec!(89.90));
        assert_eq!(req.language, en());
        assert_eq!(req.currency, "EUR");
    }

    #[test]
    fn explicit_currency_is_normalized() {
        let mut raw = complete();
        raw.currency = Some(" usd ".to_string());
        assert_eq!(raw.validate(&en(), "EUR").unwrap().currency, "USD");
    }

    #[test]
    fn malformed_currency_is_rejected() {
        for bad in ["EURO", "E1R", "€"] {
            let mut raw = complete();
            raw.currency = Some(bad.to_string());
            assert_eq!(
                raw.validate(&en(), "EUR").unwrap_err(),
                DomainError::validation("currency must be a three-letter ISO code")
            );
        }
    }

    #[test]
    fn explicit_language_is_kept() {
        let mut raw = complete();
        raw.language = Some("de".to_string());
        assert_eq!(raw.validate(&en(), "EUR").unwrap().language.as_str(), "de");
    }

    #[test]
    fn missing_fields_are_listed() {
        let raw = InitiatePaymentRequest {
            order_number: Some(" ".to_string()),
            email: None,
            ..complete()
        };
        match raw.validate(&en(), "EUR") {
            Err(DomainError::Validation(msg)) => {
                assert_eq!(msg, "missing required fields: orderNumber, email")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn deserializes_camel_case_with_numeric_amount() {
        let raw: InitiatePaymentRequest = serde_json::from_str(
            r#"{"orderNumber":"ORD1","amount":45.5,"email":"a@b.c","customerName":"A B"}"#,
        )
        .unwrap();
        assert_eq!(raw.amount, Some(dec!(45.5)));
        assert!(raw.language.is_none());
        assert!(raw.currency.is_none());
    }

    proptest! {
        #[test]
        fn non_positive_amounts_are_rejected(cents in -10_000_000i64..=0i64) {
            let raw = InitiatePaymentRequest {
                amount: Some(Decimal::new(cents, 2)),
                ..complete()
            };
            let err = raw.validate(&en(), "EUR").unwrap_err();
            prop_assert_eq!(err, DomainError::validation("amount must be greater than 0"));
        }
    }
}
