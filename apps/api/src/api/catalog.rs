//! Catalog API routes

use axum::Router;
use domain_catalog::{handlers, CatalogState, PgCatalogRepository};
use std::sync::Arc;

use crate::state::AppState;

fn catalog_state(state: &AppState) -> CatalogState<PgCatalogRepository> {
    CatalogState::new(Arc::new(PgCatalogRepository::new(state.db.clone())))
}

/// Public catalog reads
pub fn router(state: &AppState) -> Router {
    handlers::router(catalog_state(state))
}

/// Catalog management (mounted under /admin)
pub fn admin_router(state: &AppState) -> Router {
    handlers::admin_router(catalog_state(state))
}
