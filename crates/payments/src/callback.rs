//! Gateway callback payloads and the browser redirects they produce.
//!
//! The gateway posts the outcome to the success or fail URL. The payload is
//! not signed-checked; it only decides where the customer's browser lands.

use serde::Deserialize;

use tourdesk_core::{Locale, OrderNumber};

use crate::encoding::encode_component;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackKind {
    Success,
    Fail,
}

/// Fields read from the gateway post (or query string). Everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackPayload {
    #[serde(rename = "oid", default)]
    pub oid: Option<String>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "ErrMsg", default)]
    pub err_msg: Option<String>,
}

/// `/<locale>`, the landing page used when a callback cannot be tied to an order.
pub fn locale_root(locale: &Locale) -> String {
    format!("/{locale}")
}

impl CallbackPayload {
    /// Fill fields missing from `self` with the ones in `fallback`.
    pub fn or(self, fallback: CallbackPayload) -> Self {
        Self {
            oid: self.oid.or(fallback.oid),
            response: self.response.or(fallback.response),
            err_msg: self.err_msg.or(fallback.err_msg),
        }
    }

    /// The order number, if present and well-formed.
    ///
    /// A malformed `oid` is treated as absent; it would otherwise be spliced
    /// into the redirect path.
    pub fn order_number(&self) -> Option<OrderNumber> {
        self.oid.as_deref().and_then(|oid| OrderNumber::parse(oid).ok())
    }

    /// Browser redirect target for this callback.
    pub fn redirect_target(&self, kind: CallbackKind, locale: &Locale) -> String {
        let Some(order_number) = self.order_number() else {
            return locale_root(locale);
        };

        match kind {
            CallbackKind::Success => {
                format!("/{locale}/order-confirmation/{order_number}?payment=success")
            }
            CallbackKind::Fail => {
                let message = self.err_msg.as_deref().unwrap_or_default();
                format!(
                    "/{locale}/payment/{order_number}?error={}",
                    encode_component(message)
                )
            }
        }
    }
}
