//! `tourdesk-auth`: authentication/authorization boundary.
//!
//! Sign-in happens at the external identity provider; this crate only
//! verifies the tokens it issues and answers role questions. It is decoupled
//! from HTTP and storage.

pub mod authorize;
pub mod claims;
pub mod roles;
pub mod validator;

pub use authorize::{AuthzError, Principal, require_role};
pub use claims::{IdentityClaims, TokenValidationError, validate_claims};
pub use roles::Role;
pub use validator::{AuthError, Hs256JwtValidator, JwtValidator};
