//! Payment gateway boundary.
//!
//! Everything the site knows about the hosted payment page lives here:
//! whether the gateway is usable, what a valid initiation request looks like,
//! how the redirect to the gateway is built, and where the browser goes when
//! the gateway posts back. No storage and no HTTP server code.

pub mod callback;
pub mod encoding;
pub mod gateway;
pub mod hosted;
pub mod mock;
pub mod request;
pub mod settings;

pub use callback::{CallbackKind, CallbackPayload, locale_root};
pub use gateway::{GatewayError, GatewayRedirect, PaymentGateway};
pub use hosted::HostedPaymentGateway;
pub use mock::MockGateway;
pub use request::{GatewayPaymentRequest, InitiatePaymentRequest};
pub use settings::{GatewaySettings, GatewayStatus};
