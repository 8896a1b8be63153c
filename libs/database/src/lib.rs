//! PostgreSQL connection management and repository primitives.
//!
//! Provides pooled connections with retry, health checks, migration running,
//! and a generic [`BaseRepository`] for UUID-keyed SeaORM entities.

pub mod common;
pub mod postgres;
pub mod repository;

pub use common::{DatabaseError, DatabaseResult};
pub use repository::BaseRepository;
