//! Human-readable order numbers (`ORD-20261019-3FA85F64`).

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DomainError, ValueObject};

const MAX_LEN: usize = 64;

/// Public identifier of an order, shown to customers and sent to the gateway as `oid`.
///
/// Distinct from the internal [`OrderId`](crate::OrderId). Generated numbers
/// follow `ORD-YYYYMMDD-XXXXXXXX`; parsing is looser and accepts any
/// alphanumeric/`-`/`_` string up to 64 characters so numbers minted by
/// earlier releases still resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Generate a fresh order number for an order created at `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let random = Uuid::now_v7().simple().to_string();
        // The tail of a v7 UUID is random; the head is the timestamp we already encode.
        let suffix = random[random.len() - 8..].to_ascii_uppercase();
        Self(format!("ORD-{}-{}", now.format("%Y%m%d"), suffix))
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::validation("order number is required"));
        }
        if raw.len() > MAX_LEN {
            return Err(DomainError::validation(format!(
                "order number exceeds {MAX_LEN} characters"
            )));
        }
        if !raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(DomainError::validation(format!(
                "order number contains invalid characters: {raw:?}"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for OrderNumber {}

impl core::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OrderNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for OrderNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OrderNumber> for String {
    fn from(value: OrderNumber) -> Self {
        value.0
    }
}
