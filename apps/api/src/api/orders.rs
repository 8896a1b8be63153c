//! Orders API routes

use axum::Router;
use domain_cart::PgCartRepository;
use domain_catalog::PgCatalogRepository;
use domain_orders::{handlers, OrderState, PgOrderRepository};
use std::sync::Arc;

use crate::state::AppState;

fn order_state(
    state: &AppState,
) -> OrderState<PgOrderRepository, PgCartRepository, PgCatalogRepository> {
    OrderState::new(
        Arc::new(PgOrderRepository::new(state.db.clone())),
        Arc::new(PgCartRepository::new(state.db.clone())),
        Arc::new(PgCatalogRepository::new(state.db.clone())),
    )
}

/// Checkout and order history; jwt middleware is layered by the caller
pub fn router(state: &AppState) -> Router {
    handlers::router(order_state(state))
}

/// Order management (mounted under /admin/orders)
pub fn admin_router(state: &AppState) -> Router {
    handlers::admin_router(order_state(state))
}
