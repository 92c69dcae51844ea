//! Payment routes: initiation, gateway callbacks and gateway status.
//!
//! Callback handlers always answer with a `302` to a page on the site; a
//! payload that cannot be read degrades to the locale root.

use std::sync::Arc;

use axum::{
    extract::{
        Extension, Form, Query,
        rejection::{FormRejection, JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use tourdesk_core::Locale;
use tourdesk_payments::{CallbackKind, CallbackPayload, InitiatePaymentRequest};

use crate::app::{dto, errors::ApiError, routes::system, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/initiate", post(initiate))
        .route("/success", get(success_callback).post(success_callback))
        .route("/fail", get(fail_callback).post(fail_callback))
        .route("/status", get(system::gateway_status))
}

/// `POST /api/payment/initiate`
pub async fn initiate(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<InitiatePaymentRequest>, JsonRejection>,
) -> Result<Json<dto::InitiatePaymentResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    let redirect = services.initiator.initiate(&body).await?;
    Ok(Json(redirect.into()))
}

pub async fn success_callback(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    query: Result<Query<CallbackPayload>, QueryRejection>,
    form: Result<Form<CallbackPayload>, FormRejection>,
) -> Response {
    handle_callback(&services, CallbackKind::Success, &headers, query, form).await
}

pub async fn fail_callback(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    query: Result<Query<CallbackPayload>, QueryRejection>,
    form: Result<Form<CallbackPayload>, FormRejection>,
) -> Response {
    handle_callback(&services, CallbackKind::Fail, &headers, query, form).await
}

async fn handle_callback(
    services: &AppServices,
    kind: CallbackKind,
    headers: &HeaderMap,
    query: Result<Query<CallbackPayload>, QueryRejection>,
    form: Result<Form<CallbackPayload>, FormRejection>,
) -> Response {
    let locale = request_locale(headers, &services.locale_cookie, &services.default_locale);

    // Form fields win; the query string fills whatever the post left out.
    let payload = match (form, query) {
        (Ok(Form(form)), Ok(Query(query))) => Some(form.or(query)),
        (Ok(Form(form)), Err(_)) => Some(form),
        (Err(_), Ok(Query(query))) => Some(query),
        (Err(form_err), Err(query_err)) => {
            tracing::warn!(?kind, form_error = %form_err, query_error = %query_err, "unreadable payment callback");
            None
        }
    };

    let Some(payload) = payload else {
        return redirect(&tourdesk_payments::locale_root(&services.default_locale));
    };

    tracing::info!(
        ?kind,
        oid = ?payload.oid,
        response = ?payload.response,
        err_msg = ?payload.err_msg,
        "payment callback received"
    );

    services.callbacks.record(kind, &payload).await;

    redirect(&payload.redirect_target(kind, &locale))
}

fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Locale from the locale cookie, or `default` when absent or implausible.
pub fn request_locale(headers: &HeaderMap, cookie_name: &str, default: &Locale) -> Locale {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| Locale::parse(value.trim_matches('"')).ok())
        .unwrap_or_else(|| default.clone())
}
