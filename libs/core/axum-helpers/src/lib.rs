//! Utilities, middleware, and helpers shared by the HTTP surface.
//!
//! - [`errors`]: structured error responses with error codes
//! - [`extractors`]: custom extractors (UUID path, validated JSON)
//! - [`auth`]: stateless JWT authentication middleware
//! - [`http`]: CORS and security-header middleware
//! - [`server`]: router/server bootstrap, health checks, graceful shutdown

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    jwt_auth_middleware, JwtAuth, JwtClaims, JwtConfig, ACCESS_TOKEN_TTL,
};
pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson};
pub use http::{create_cors_layer, security_headers};
pub use server::{
    create_app, create_production_app, create_router, health_router, run_health_checks,
    shutdown_signal, HealthCheckFuture, HealthResponse, ShutdownCoordinator,
};
