//! In-process gateway for tests and local development.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{GatewayError, GatewayPaymentRequest, GatewayRedirect, PaymentGateway};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockBehavior {
    /// Redirect to `<base>/pay/<order number>`.
    Redirect { base: String },
    /// Fail every call with [`GatewayError::Rejected`].
    Reject { reason: String },
}

/// Gateway double that records how often it was called and the last request.
#[derive(Debug)]
pub struct MockGateway {
    behavior: MockBehavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<GatewayPaymentRequest>>,
}

impl MockGateway {
    pub fn redirecting(base: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Redirect { base: base.into() },
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Reject {
                reason: reason.into(),
            },
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GatewayPaymentRequest> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait::async_trait]
impl PaymentGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create_redirect(
        &self,
        request: &GatewayPaymentRequest,
    ) -> Result<GatewayRedirect, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }
        match &self.behavior {
            MockBehavior::Redirect { base } => Ok(GatewayRedirect {
                redirect_url: format!("{}/pay/{}", base.trim_end_matches('/'), request.order_number),
                order_id: request.order_number.clone(),
            }),
            MockBehavior::Reject { reason } => Err(GatewayError::Rejected(reason.clone())),
        }
    }
}
