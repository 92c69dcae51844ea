//! Role guard for the admin routes.
//!
//! Runs after [`crate::middleware::auth_middleware`], which guarantees a
//! [`PrincipalContext`] in the request extensions.

use axum::{extract::Extension, middleware::Next, response::Response};

use tourdesk_auth::{Role, require_role};

use crate::app::errors::ApiError;
use crate::context::PrincipalContext;

pub async fn require_admin(
    Extension(principal): Extension<PrincipalContext>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(principal.principal(), &Role::ADMIN).map_err(|e| {
        tracing::info!(subject = principal.subject(), "admin route denied");
        ApiError::from(e)
    })?;
    Ok(next.run(req).await)
}
