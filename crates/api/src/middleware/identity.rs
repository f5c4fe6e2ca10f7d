//! Identity middleware.
//!
//! Authentication happens at an upstream gateway, which forwards the
//! acting user's display name and role names as headers. This middleware
//! turns them into a `CurrentUser` request extension; there is no ambient
//! session anywhere downstream.

use axum::{
    Json,
    extract::{FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use fieldops_shared::CurrentUser;

/// Header carrying the authenticated display name.
pub const USER_HEADER: &str = "x-remote-user";
/// Header carrying the comma-separated role names.
pub const ROLES_HEADER: &str = "x-remote-roles";

/// Parses the comma-separated roles header.
fn parse_roles(header: Option<&str>) -> Vec<String> {
    header
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Identity middleware that requires the gateway headers.
///
/// This middleware:
/// 1. Reads the display name from `x-remote-user`
/// 2. Reads the role list from `x-remote-roles`
/// 3. Stores a `CurrentUser` in request extensions for handlers to access
pub async fn identity_middleware(mut request: Request, next: Next) -> Response {
    let name = request
        .headers()
        .get(USER_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let Some(name) = name else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "missing_identity",
                "message": "The identity gateway did not supply a user"
            })),
        )
            .into_response();
    };

    let roles = parse_roles(
        request
            .headers()
            .get(ROLES_HEADER)
            .and_then(|h| h.to_str().ok()),
    );

    let user = CurrentUser::new(name, roles);
    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Extractor for the acting user.
///
/// Use this in handlers to get the identity injected by the middleware:
///
/// ```ignore
/// async fn handler(Identity(user): Identity) -> impl IntoResponse {
///     let name = &user.name;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity(pub CurrentUser);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().map(Identity).ok_or((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "missing_identity",
                "message": "The identity gateway did not supply a user"
            })),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roles() {
        assert_eq!(
            parse_roles(Some("Managers, Human Resources,Finance")),
            vec!["Managers", "Human Resources", "Finance"]
        );
    }

    #[test]
    fn test_parse_roles_empty() {
        assert!(parse_roles(None).is_empty());
        assert!(parse_roles(Some("")).is_empty());
        assert!(parse_roles(Some(" , ,")).is_empty());
    }
}
