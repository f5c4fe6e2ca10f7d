//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{AppState, middleware::identity_middleware};
use fieldops_core::access::AccessPolicy;
use fieldops_shared::{AppError, CurrentUser};

pub mod approvals;
pub mod attachments;
pub mod credits;
pub mod health;
pub mod map;
pub mod members;
pub mod notes;
pub mod travel;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    // Every route except the health check requires a forwarded identity.
    let gated = Router::new()
        .merge(members::routes())
        .merge(approvals::routes())
        .merge(travel::routes())
        .merge(credits::routes())
        .merge(notes::routes())
        .merge(attachments::routes())
        .merge(map::routes())
        .layer(middleware::from_fn(identity_middleware));

    Router::new().merge(health::routes()).merge(gated)
}

/// Renders the fixed not-authorized view.
///
/// The gate is advisory: it controls what the page shows, not what the
/// repositories can be asked to do.
pub(crate) fn check_view_access(policy: &AccessPolicy, user: &CurrentUser) -> Result<(), Response> {
    if policy.permits(user) {
        return Ok(());
    }

    tracing::debug!(
        user = %user.name,
        allowed = ?policy.allowed_roles(),
        "view access denied"
    );
    Err((
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "not_authorized",
            "message": "You are not authorized to view this page"
        })),
    )
        .into_response())
}

/// Maps an `AppError` to its JSON error response.
///
/// Every failure that reaches the client carries the taxonomy's code; no
/// write failure is swallowed into a success.
pub(crate) fn app_error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Shorthand for a one-off JSON error body.
pub(crate) fn json_error(
    status: StatusCode,
    error: &'static str,
    message: impl Into<String>,
) -> Response {
    (
        status,
        Json(json!({
            "error": error,
            "message": message.into()
        })),
    )
        .into_response()
}
