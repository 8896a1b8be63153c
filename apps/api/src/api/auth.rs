//! Auth API routes

use axum::{middleware, Router};
use axum_helpers::jwt_auth_middleware;
use domain_users::handlers::{self, AuthState};
use domain_users::{PgUserRepository, UserService};

use crate::state::AppState;

/// Registration/login plus the token-protected /me endpoint
pub fn router(state: &AppState) -> Router {
    let auth_state = AuthState {
        service: UserService::new(PgUserRepository::new(state.db.clone())),
        jwt_auth: state.jwt_auth.clone(),
    };

    let protected = handlers::me_router(auth_state.clone()).layer(
        middleware::from_fn_with_state(state.jwt_auth.clone(), jwt_auth_middleware),
    );

    handlers::router(auth_state).merge(protected)
}
