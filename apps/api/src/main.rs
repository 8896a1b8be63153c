//! Pitchkit API - football jersey shop backend

use axum_helpers::server::{create_production_app, health_router};
use axum_helpers::JwtAuth;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_payments::SslCommerzGateway;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = database::postgres::connect_with_retry(config.postgres.clone(), None).await?;

    database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name).await?;

    let jwt_auth = JwtAuth::new(&config.jwt);
    let gateway = Arc::new(SslCommerzGateway::new(config.sslcommerz.clone())?);

    let state = AppState {
        config: config.clone(),
        db,
        jwt_auth,
        gateway,
    };

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router.merge(health_router(state.config.app.clone()));

    info!("Starting Pitchkit API on port {}", state.config.server.port);

    create_production_app(
        app,
        &config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing PostgreSQL connections");
            if let Err(e) = state.db.close().await {
                tracing::warn!("Error while closing database connection: {}", e);
            }
            info!("PostgreSQL connection closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Pitchkit API shutdown complete");
    Ok(())
}
