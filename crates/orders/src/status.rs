use core::str::FromStr;

use serde::{Deserialize, Serialize};

use tourdesk_core::DomainError;

/// Payment status lifecycle of an order.
///
/// ```text
/// pending ──► processing ──► success
///    │  │         │ ▲           ▲
///    │  │         ▼ │           │
///    │  └──────► failed         │
///    └──────────────────────────┘
/// ```
///
/// `failed → processing` covers the customer retrying from the payment page.
/// `pending → success` covers a gateway confirmation that arrives before the
/// detached `processing` update landed. `success` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Success,
    Failed,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Processing,
        PaymentStatus::Success,
        PaymentStatus::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Processing)
                | (Failed, Processing)
                | (Processing, Success)
                | (Pending, Success)
                | (Processing, Failed)
                | (Pending, Failed)
        )
    }

    /// Statuses from which `next` may be entered.
    pub fn sources_of(next: PaymentStatus) -> impl Iterator<Item = PaymentStatus> {
        Self::ALL.into_iter().filter(move |s| s.can_transition_to(next))
    }
}

impl core::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "processing" => Ok(PaymentStatus::Processing),
            "success" => Ok(PaymentStatus::Success),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(DomainError::validation(format!(
                "status must be one of: pending, processing, success, failed (got {other:?})"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_terminal() {
        for next in PaymentStatus::ALL {
            assert!(!PaymentStatus::Success.can_transition_to(next));
        }
    }

    #[test]
    fn initiation_is_allowed_from_pending_and_after_a_failure() {
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Processing));
        assert!(PaymentStatus::Failed.can_transition_to(PaymentStatus::Processing));
        assert!(PaymentStatus::Processing.can_transition_to(PaymentStatus::Processing));
    }

    #[test]
    fn gateway_confirmation_is_accepted_before_processing_lands() {
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Success));
    }

    #[test]
    fn sources_of_success_and_failed() {
        let into_success: Vec<_> = PaymentStatus::sources_of(PaymentStatus::Success).collect();
        assert_eq!(into_success, vec![PaymentStatus::Pending, PaymentStatus::Processing]);

        let into_failed: Vec<_> = PaymentStatus::sources_of(PaymentStatus::Failed).collect();
        assert_eq!(into_failed, vec![PaymentStatus::Pending, PaymentStatus::Processing]);
    }

    #[test]
    fn parses_case_insensitively_and_serializes_lowercase() {
        assert_eq!("Processing".parse::<PaymentStatus>().unwrap(), PaymentStatus::Processing);
        assert!("paid".parse::<PaymentStatus>().is_err());
        assert_eq!(serde_json::to_string(&PaymentStatus::Failed).unwrap(), "\"failed\"");
    }
}
