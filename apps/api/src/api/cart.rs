//! Cart API routes

use axum::Router;
use domain_cart::{handlers, CartState, PgCartRepository};
use domain_catalog::PgCatalogRepository;
use std::sync::Arc;

use crate::state::AppState;

/// Cart endpoints; jwt middleware is layered by the caller
pub fn router(state: &AppState) -> Router {
    let carts = Arc::new(PgCartRepository::new(state.db.clone()));
    let products = Arc::new(PgCatalogRepository::new(state.db.clone()));
    handlers::router(CartState::new(carts, products))
}
