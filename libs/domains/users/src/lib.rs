//! Users Domain
//!
//! Accounts and authentication: registration with argon2 password hashing,
//! email/password login issuing JWT access tokens, and the current-user
//! endpoint.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use models::{LoginRequest, LoginResponse, RegisterRequest, User, UserResponse};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
