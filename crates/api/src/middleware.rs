use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use tourdesk_auth::{JwtValidator, Principal};

use crate::app::errors::ApiError;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers())?;

    let claims = state.jwt.validate(token, Utc::now()).map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        ApiError::Unauthenticated
    })?;

    req.extensions_mut()
        .insert(PrincipalContext::new(Principal::from(claims)));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(ApiError::Unauthenticated)?;

    let header = header.to_str().map_err(|_| ApiError::Unauthenticated)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthenticated)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(ApiError::Unauthenticated);
    }

    Ok(token)
}
