//! Admin role guard

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use axum_helpers::{AppError, JwtClaims};

/// Rejects authenticated requests whose token lacks the admin role.
/// Runs after the jwt middleware, which inserts the claims extension.
pub async fn require_admin(
    Extension(claims): Extension<JwtClaims>,
    request: Request,
    next: Next,
) -> Response {
    if !claims.is_admin() {
        tracing::debug!(sub = %claims.sub, "Admin route refused for non-admin token");
        return AppError::Forbidden("Administrator role required".to_string()).into_response();
    }

    next.run(request).await
}
