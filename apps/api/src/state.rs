//! Application state management

use axum_helpers::JwtAuth;
use domain_payments::SslCommerzGateway;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
    pub jwt_auth: JwtAuth,
    pub gateway: Arc<SslCommerzGateway>,
}
