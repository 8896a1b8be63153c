//! Cart Domain
//!
//! Per-user shopping carts. Adding a product the user already carries
//! merges quantities; every quantity change is capped by the product's
//! total variant stock. The order engine consumes cart rows at checkout.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CartError, CartResult};
pub use handlers::CartState;
pub use models::{AddToCart, CartItem, CartItemWithProduct, UpdateCartItem};
pub use postgres::PgCartRepository;
pub use repository::{CartRepository, InMemoryCartRepository};
pub use service::CartService;
