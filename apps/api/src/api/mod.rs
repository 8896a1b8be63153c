//! API routes module
//!
//! Wires the domain routers together: public catalog reads and auth,
//! token-protected shopping endpoints, and an admin surface gated on
//! the admin role. Routes are nested under /api by the router factory.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod guard;
pub mod health;
pub mod orders;
pub mod payments;
pub mod wishlist;

use axum::{middleware, Router};
use axum_helpers::jwt_auth_middleware;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let jwt = middleware::from_fn_with_state(state.jwt_auth.clone(), jwt_auth_middleware);

    let admin = Router::new()
        .merge(catalog::admin_router(state))
        .nest("/orders", orders::admin_router(state))
        .layer(middleware::from_fn(guard::require_admin))
        .layer(jwt.clone());

    Router::new()
        .nest("/auth", auth::router(state))
        .merge(catalog::router(state))
        .nest("/cart", cart::router(state).layer(jwt.clone()))
        .nest("/wishlist", wishlist::router(state).layer(jwt.clone()))
        .nest("/orders", orders::router(state).layer(jwt))
        .nest("/payment", payments::router(state))
        .nest("/admin", admin)
        .merge(health::router(state.clone()))
}
