//! Wishlist API routes

use axum::Router;
use domain_catalog::PgCatalogRepository;
use domain_wishlist::{handlers, PgWishlistRepository, WishlistState};
use std::sync::Arc;

use crate::state::AppState;

/// Wishlist endpoints; jwt middleware is layered by the caller
pub fn router(state: &AppState) -> Router {
    let wishlists = Arc::new(PgWishlistRepository::new(state.db.clone()));
    let products = Arc::new(PgCatalogRepository::new(state.db.clone()));
    handlers::router(WishlistState::new(wishlists, products))
}
