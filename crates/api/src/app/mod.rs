//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: storage and gateway wiring shared by all handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response bodies
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use tourdesk_infra::AppConfig;

use crate::{authz, middleware};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router from configuration (used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config).await?;
    Ok(router(Arc::new(services)))
}

/// Router over already-wired services.
pub fn router(services: Arc<AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        jwt: Arc::clone(&services.jwt),
    };

    // Admin routes: bearer token, then the admin role.
    let admin = routes::admin::router()
        .layer(axum::middleware::from_fn(authz::require_admin))
        .layer(axum::middleware::from_fn_with_state(
            auth_state.clone(),
            middleware::auth_middleware,
        ));

    // Any authenticated principal.
    let authenticated = Router::new()
        .route("/whoami", get(routes::system::whoami))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest(
            "/api",
            routes::router().nest("/admin", admin).merge(authenticated),
        )
        .layer(ServiceBuilder::new().layer(Extension(services)))
}

pub use services::AppServices;
