//! Orders Domain
//!
//! The checkout engine: turns a user's cart rows into an order with
//! price snapshots in a single transaction, deleting the consumed cart
//! rows on the way. Pricing is fixed: flat shipping waived above the
//! free-shipping threshold, then 8% tax on the subtotal.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod pricing;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use handlers::OrderState;
pub use models::{
    CreateOrder, Order, OrderFilter, OrderItem, OrderStatus, OrderWithItems, Pagination,
    PaymentMethod, PaymentStatus, UpdateOrderStatus,
};
pub use postgres::PgOrderRepository;
pub use pricing::{compute_totals, round2, OrderTotals};
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
