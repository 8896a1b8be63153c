//! Wishlist Domain
//!
//! Per-user saved products. Adding is idempotent: saving a product twice
//! returns the existing row instead of failing on the unique index.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{WishlistError, WishlistResult};
pub use handlers::WishlistState;
pub use models::{AddToWishlist, WishlistItem, WishlistItemWithProduct};
pub use postgres::PgWishlistRepository;
pub use repository::{InMemoryWishlistRepository, WishlistRepository};
pub use service::WishlistService;
