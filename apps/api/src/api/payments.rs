//! Payments API routes

use axum::{middleware, Router};
use axum_helpers::jwt_auth_middleware;
use domain_orders::PgOrderRepository;
use domain_payments::{handlers, PaymentState};
use std::sync::Arc;

use crate::state::AppState;

/// Payment initiation (jwt-protected) plus the public gateway callbacks
pub fn router(state: &AppState) -> Router {
    let orders = Arc::new(PgOrderRepository::new(state.db.clone()));
    let payment_state = PaymentState::new(state.gateway.clone(), orders);

    let init = handlers::router(payment_state.clone()).layer(middleware::from_fn_with_state(
        state.jwt_auth.clone(),
        jwt_auth_middleware,
    ));

    init.merge(handlers::callback_router(payment_state))
}
