use axum::Router;

pub mod admin;
pub mod orders;
pub mod payment;
pub mod system;

/// Public endpoints under `/api`. Admin and identity routes are layered in
/// `app::router` because they need the auth middleware.
pub fn router() -> Router {
    Router::new()
        .nest("/payment", payment::router())
        .nest("/orders", orders::router())
}
